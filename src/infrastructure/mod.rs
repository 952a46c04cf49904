// Infrastructure module - External dependencies and adapters
pub mod config;
pub mod grpc;
pub mod logging;
