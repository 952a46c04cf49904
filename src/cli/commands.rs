use crate::cli::args::{Args, Command};
use crate::cli::output::OutputWriter;
use crate::core::service::Connector;
use crate::core::tasks::{create_task, delete_tasks, list_tasks, split_ids};
use crate::domain::config::ConnectionConfig;
use crate::domain::error::TaskResult;
use crate::infrastructure::config::ConfigManager;
use crate::infrastructure::grpc::GrpcConnector;
use crate::infrastructure::logging::init_logging;
use std::path::Path;
use tracing::debug;

/// Run the CLI end to end: configuration, logging, connection and command.
pub async fn run<W>(args: Args, writer: &W) -> TaskResult<()>
where
    W: OutputWriter + ?Sized,
{
    let config_manager = ConfigManager::new();
    let config = config_manager.load_config(args.config.as_deref().map(Path::new))?;

    if !args.quiet {
        init_logging(&config.global.log_level, args.verbose)?;
    }
    if let Some(path) = config_manager.get_global_config_path_ref() {
        debug!(path = %path.display(), "Global config location");
    }

    execute_command(args.command(), &config.connection, &GrpcConnector::new(), writer).await
}

/// Execute CLI command
///
/// Opens a fresh connection through `connector` and runs exactly one flow.
pub async fn execute_command<C, W>(
    command: Command,
    config: &ConnectionConfig,
    connector: &C,
    writer: &W,
) -> TaskResult<()>
where
    C: Connector,
    W: OutputWriter + ?Sized,
{
    let mut service = connector.connect(config)?;

    match command {
        Command::Ls => {
            list_tasks(&mut service, writer).await?;
        }
        Command::Mk(mk_args) => {
            if !mk_args.extra.is_empty() {
                debug!(ignored = ?mk_args.extra, "Ignoring extra arguments");
            }
            create_task(&mut service, &mk_args.name, writer).await?;
        }
        Command::Rm(rm_args) => {
            if !rm_args.extra.is_empty() {
                debug!(ignored = ?rm_args.extra, "Ignoring extra arguments");
            }
            let ids = split_ids(&rm_args.id);
            delete_tasks(&mut service, &ids, writer).await?;
        }
    }

    Ok(())
}
