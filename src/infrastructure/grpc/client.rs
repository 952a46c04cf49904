//! Client for the `data.DB` gRPC service.

use crate::core::service::{DataService, RecordStream};
use crate::domain::error::{TaskError, TaskResult};
use crate::domain::model::{Mutation, Query, Record};
use async_trait::async_trait;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::service::interceptor::InterceptedService;
use tonic::transport::Channel;
use tonic::{GrpcMethod, IntoRequest, Response, Status, Streaming};
use tracing::debug;

use super::credentials::CredentialInterceptor;

/// Fully qualified service name
pub const SERVICE_NAME: &str = "data.DB";
const QUERY_PATH: &str = "/data.DB/Query";
const MUTATE_PATH: &str = "/data.DB/Mutate";

type AuthenticatedChannel = InterceptedService<Channel, CredentialInterceptor>;

/// Low-level client issuing `Query` and `Mutate` calls.
#[derive(Debug, Clone)]
pub struct DbClient {
    inner: tonic::client::Grpc<AuthenticatedChannel>,
}

impl DbClient {
    pub fn new(channel: Channel, credentials: CredentialInterceptor) -> Self {
        let inner = tonic::client::Grpc::new(InterceptedService::new(channel, credentials));
        Self { inner }
    }

    async fn ready(&mut self) -> Result<(), Status> {
        self.inner
            .ready()
            .await
            .map_err(|e| Status::unavailable(format!("Service was not ready: {}", e)))
    }

    /// Server-streaming query.
    pub async fn query(
        &mut self,
        request: impl IntoRequest<Query>,
    ) -> Result<Response<Streaming<Record>>, Status> {
        self.ready().await?;
        let codec = tonic_prost::ProstCodec::default();
        let path = PathAndQuery::from_static(QUERY_PATH);
        let mut request = request.into_request();
        request
            .extensions_mut()
            .insert(GrpcMethod::new(SERVICE_NAME, "Query"));
        self.inner.server_streaming(request, path, codec).await
    }

    /// Unary mutation.
    pub async fn mutate(
        &mut self,
        request: impl IntoRequest<Mutation>,
    ) -> Result<Response<Record>, Status> {
        self.ready().await?;
        let codec = tonic_prost::ProstCodec::default();
        let path = PathAndQuery::from_static(MUTATE_PATH);
        let mut request = request.into_request();
        request
            .extensions_mut()
            .insert(GrpcMethod::new(SERVICE_NAME, "Mutate"));
        self.inner.unary(request, path, codec).await
    }
}

/// [`DataService`] backed by a gRPC connection.
#[derive(Debug, Clone)]
pub struct GrpcDataService {
    client: DbClient,
}

impl GrpcDataService {
    pub fn new(client: DbClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DataService for GrpcDataService {
    async fn query(&mut self, query: Query) -> TaskResult<Box<dyn RecordStream>> {
        debug!(kind = query.kind, "Sending query");
        let response = self
            .client
            .query(query)
            .await
            .map_err(|status| TaskError::rpc("query", status))?;
        Ok(Box::new(response.into_inner()))
    }

    async fn mutate(&mut self, mutation: Mutation) -> TaskResult<Record> {
        debug!(op = mutation.mutation_op().as_str_name(), "Sending mutation");
        let response = self
            .client
            .mutate(mutation)
            .await
            .map_err(|status| TaskError::rpc("mutate", status))?;
        Ok(response.into_inner())
    }
}

#[async_trait]
impl RecordStream for Streaming<Record> {
    async fn next_record(&mut self) -> TaskResult<Option<Record>> {
        self.message()
            .await
            .map_err(|status| TaskError::rpc("receive", status))
    }
}
