// CLI module - Command line interface
pub mod args;
pub mod commands;
pub mod output;

pub use args::{Args, Command, MkArgs, OutputFormat, RmArgs};
pub use commands::{execute_command, run};
pub use output::{ConsoleWriter, OutputWriter};
