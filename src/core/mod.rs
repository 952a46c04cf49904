// Core module - Service seams and task flows
pub mod service;
pub mod tasks;

pub use service::{Connector, DataService, RecordStream};
pub use tasks::{create_task, delete_tasks, list_tasks, split_ids};
