//! In-memory stand-ins for the data service used by the integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use elos_task::{
    Connector, ConnectionConfig, DataService, Mutation, Query, Record, RecordStream, Task,
    TaskResult,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Every request a fake service has seen, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Query(Query),
    Mutate(Mutation),
}

/// Scripted responses plus a shared call log.
#[derive(Clone, Default)]
pub struct Script {
    pub calls: Arc<Mutex<Vec<Call>>>,
    pub connected_to: Arc<Mutex<Vec<String>>>,
    query_result: Arc<Mutex<Option<TaskResult<Vec<TaskResult<Record>>>>>>,
    mutate_results: Arc<Mutex<VecDeque<TaskResult<Record>>>>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(self, records: Vec<TaskResult<Record>>) -> Self {
        *self.query_result.lock().unwrap() = Some(Ok(records));
        self
    }

    pub fn with_query_error(self, error: elos_task::TaskError) -> Self {
        *self.query_result.lock().unwrap() = Some(Err(error));
        self
    }

    pub fn with_mutation_results(self, results: Vec<TaskResult<Record>>) -> Self {
        *self.mutate_results.lock().unwrap() = results.into();
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn connected_to(&self) -> Vec<String> {
        self.connected_to.lock().unwrap().clone()
    }

    /// Ids carried by the DELETE mutations seen so far.
    pub fn deleted_ids(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Mutate(m) if m.mutation_op() == elos_task::Op::Delete => {
                    m.target_task().map(|t| t.id.clone())
                }
                _ => None,
            })
            .collect()
    }
}

pub struct FakeStream(VecDeque<TaskResult<Record>>);

#[async_trait]
impl RecordStream for FakeStream {
    async fn next_record(&mut self) -> TaskResult<Option<Record>> {
        self.0.pop_front().transpose()
    }
}

pub struct FakeService {
    script: Script,
}

#[async_trait]
impl DataService for FakeService {
    async fn query(&mut self, query: Query) -> TaskResult<Box<dyn RecordStream>> {
        self.script.calls.lock().unwrap().push(Call::Query(query));
        match self.script.query_result.lock().unwrap().take() {
            Some(Ok(records)) => Ok(Box::new(FakeStream(records.into()))),
            Some(Err(e)) => Err(e),
            None => Ok(Box::new(FakeStream(VecDeque::new()))),
        }
    }

    async fn mutate(&mut self, mutation: Mutation) -> TaskResult<Record> {
        let echo = mutation.record.clone().unwrap_or_default();
        self.script.calls.lock().unwrap().push(Call::Mutate(mutation));
        self.script
            .mutate_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(echo))
    }
}

/// Connector handing out [`FakeService`]s and recording dial targets.
#[derive(Clone, Default)]
pub struct FakeConnector {
    pub script: Script,
}

impl FakeConnector {
    pub fn new(script: Script) -> Self {
        Self { script }
    }
}

impl Connector for FakeConnector {
    type Service = FakeService;

    fn connect(&self, config: &ConnectionConfig) -> TaskResult<FakeService> {
        self.script
            .connected_to
            .lock()
            .unwrap()
            .push(config.address.clone());
        Ok(FakeService {
            script: self.script.clone(),
        })
    }
}

pub fn task(id: &str, name: &str) -> Record {
    Record::task(Task {
        id: id.to_string(),
        name: name.to_string(),
    })
}

pub fn unavailable(message: &str) -> elos_task::TaskError {
    elos_task::TaskError::rpc("mutate", tonic::Status::unavailable(message.to_string()))
}
