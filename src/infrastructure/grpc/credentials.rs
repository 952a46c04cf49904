//! Per-call credentials.
//!
//! The data service authenticates every request from a public/private string
//! pair carried as gRPC metadata. The transport itself is plaintext.

use crate::domain::error::{TaskError, TaskResult};
use tonic::{
    metadata::{Ascii, MetadataValue},
    service::Interceptor,
    Request, Status,
};

/// Metadata key carrying the public half of the credential
pub const PUBLIC_METADATA_KEY: &str = "public";
/// Metadata key carrying the private half of the credential
pub const PRIVATE_METADATA_KEY: &str = "private";

/// Interceptor attaching the credential pair to every outgoing call.
#[derive(Clone)]
pub struct CredentialInterceptor {
    public: MetadataValue<Ascii>,
    private: MetadataValue<Ascii>,
}

impl CredentialInterceptor {
    /// Validate both halves up front so a bad value fails before any call is made.
    pub fn new(public: &str, private: &str) -> TaskResult<Self> {
        Ok(Self {
            public: parse_value("public", public)?,
            private: parse_value("private", private)?,
        })
    }
}

fn parse_value(which: &str, value: &str) -> TaskResult<MetadataValue<Ascii>> {
    value
        .parse::<MetadataValue<Ascii>>()
        .map_err(|e| TaskError::Credential(format!("{} credential is not valid metadata: {}", which, e)))
}

impl std::fmt::Debug for CredentialInterceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialInterceptor")
            .field("public", &self.public)
            .field("private", &"<redacted>")
            .finish()
    }
}

impl Interceptor for CredentialInterceptor {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        let metadata = request.metadata_mut();
        metadata.insert(PUBLIC_METADATA_KEY, self.public.clone());
        metadata.insert(PRIVATE_METADATA_KEY, self.private.clone());
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attaches_both_halves() {
        let mut interceptor = CredentialInterceptor::new("pub", "priv").unwrap();
        let request = interceptor.call(Request::new(())).unwrap();

        let metadata = request.metadata();
        assert_eq!(metadata.get(PUBLIC_METADATA_KEY).unwrap().to_str().unwrap(), "pub");
        assert_eq!(metadata.get(PRIVATE_METADATA_KEY).unwrap().to_str().unwrap(), "priv");
    }

    #[test]
    fn test_rejects_non_ascii_credentials() {
        let err = CredentialInterceptor::new("p", "line\nbreak").unwrap_err();
        assert!(matches!(err, TaskError::Credential(_)));
    }

    #[test]
    fn test_debug_redacts_private_half() {
        let interceptor = CredentialInterceptor::new("pub", "hunter2").unwrap();
        let debug = format!("{:?}", interceptor);
        assert!(!debug.contains("hunter2"));
    }
}
