//! elos-task Library
//!
//! Command-line client for the elos data service: lists, creates and
//! deletes tasks over gRPC with per-call credentials.

pub mod cli;
pub mod core;
pub mod domain;
pub mod infrastructure;

pub use core::service::{Connector, DataService, RecordStream};
pub use domain::config::{ClientConfig, ConnectionConfig};
pub use domain::error::{TaskError, TaskResult};
pub use domain::model::{Kind, Mutation, Op, Query, Record, Task};
