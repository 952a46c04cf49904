use thiserror::Error;

/// Unified error type for the task client
#[derive(Error, Debug)]
pub enum TaskError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid service address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Invalid credential: {0}")]
    Credential(String),

    #[error("{operation} failed: {status}")]
    Rpc {
        operation: &'static str,
        #[source]
        status: tonic::Status,
    },

    #[error("Logging error: {0}")]
    Logging(String),

    #[error("Output error: {0}")]
    Output(String),
}

impl TaskError {
    /// Wrap a failed remote call, naming the operation that issued it.
    pub fn rpc(operation: &'static str, status: tonic::Status) -> Self {
        Self::Rpc { operation, status }
    }

    /// The gRPC status code for remote failures, if this is one.
    pub fn status_code(&self) -> Option<tonic::Code> {
        match self {
            Self::Rpc { status, .. } => Some(status.code()),
            _ => None,
        }
    }
}

pub type TaskResult<T> = Result<T, TaskError>;
