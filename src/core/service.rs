use crate::domain::config::ConnectionConfig;
use crate::domain::error::TaskResult;
use crate::domain::model::{Mutation, Query, Record};
use async_trait::async_trait;

/// A lazily consumed, non-restartable sequence of records.
#[async_trait]
pub trait RecordStream: Send {
    /// Receive the next record; `Ok(None)` marks the end of the stream.
    async fn next_record(&mut self) -> TaskResult<Option<Record>>;
}

/// Remote data service operations used by the task client
#[async_trait]
pub trait DataService: Send {
    /// Issue a query and return its result stream.
    async fn query(&mut self, query: Query) -> TaskResult<Box<dyn RecordStream>>;

    /// Apply a single mutation and return the resulting record.
    async fn mutate(&mut self, mutation: Mutation) -> TaskResult<Record>;
}

/// Builds a data service handle for a connection configuration.
///
/// Construction must not require the remote side to be reachable; network
/// failures surface from the first call made on the returned service.
pub trait Connector {
    type Service: DataService;

    fn connect(&self, config: &ConnectionConfig) -> TaskResult<Self::Service>;
}
