use crate::core::service::Connector;
use crate::domain::config::ConnectionConfig;
use crate::domain::error::{TaskError, TaskResult};
use tonic::transport::Endpoint;
use tracing::debug;

use super::client::{DbClient, GrpcDataService};
use super::credentials::CredentialInterceptor;

/// Connects to the data service over plaintext HTTP/2.
///
/// The channel is created lazily: no network I/O happens until the first
/// call, so an unreachable service fails on that call rather than here.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrpcConnector;

impl GrpcConnector {
    pub fn new() -> Self {
        Self
    }
}

impl Connector for GrpcConnector {
    type Service = GrpcDataService;

    fn connect(&self, config: &ConnectionConfig) -> TaskResult<Self::Service> {
        let endpoint = build_endpoint(config)?;
        let credentials =
            CredentialInterceptor::new(&config.public_credential, &config.private_credential)?;

        debug!(endpoint = %endpoint.uri(), "Connecting to data service");
        let channel = endpoint.connect_lazy();

        Ok(GrpcDataService::new(DbClient::new(channel, credentials)))
    }
}

/// Endpoint URI for a configured address; bare `host:port` gets `http://`.
pub fn endpoint_uri(address: &str) -> String {
    if address.contains("://") {
        address.to_string()
    } else {
        format!("http://{}", address)
    }
}

/// Build the tonic endpoint, applying any configured timeouts.
pub fn build_endpoint(config: &ConnectionConfig) -> TaskResult<Endpoint> {
    let mut endpoint = Endpoint::from_shared(endpoint_uri(&config.address)).map_err(|e| {
        TaskError::InvalidAddress {
            address: config.address.clone(),
            reason: e.to_string(),
        }
    })?;

    if let Some(timeout) = config.timeout() {
        endpoint = endpoint.timeout(timeout);
    }
    if let Some(timeout) = config.connect_timeout() {
        endpoint = endpoint.connect_timeout(timeout);
    }

    Ok(endpoint)
}
