// gRPC transport for the data service
pub mod client;
pub mod connector;
pub mod credentials;

pub use client::{DbClient, GrpcDataService};
pub use connector::GrpcConnector;
pub use credentials::CredentialInterceptor;
