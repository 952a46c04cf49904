// Domain module - Configuration, wire model and error types
pub mod config;
pub mod error;
pub mod model;
