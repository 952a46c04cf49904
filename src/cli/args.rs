use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::ffi::OsString;

/// Long options that may also be spelled with a single dash (`-name foo`).
const SINGLE_DASH_LONGS: &[&str] = &["name", "id", "config", "output", "verbose", "quiet"];

/// Options whose next token is always their value, even when it starts with `-`.
const VALUE_FLAGS: &[&str] = &["--name", "--id", "--config", "--output", "-c", "-o"];

/// Command line arguments for the task client
#[derive(Parser, Debug)]
#[command(
    name = "t",
    version = env!("CARGO_PKG_VERSION"),
    about = "List, create and delete tasks on an elos data service",
    long_about = "A small client for the elos data service. The service address and per-call credentials are read from ELOS_DB_ADDR, ELOS_PUBLIC_CRED and ELOS_PRIVATE_CRED, falling back to the config file and then to built-in defaults."
)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub output: OutputFormat,

    /// Command to execute (defaults to `ls`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List all tasks ordered by name
    Ls,
    /// Create a task
    Mk(MkArgs),
    /// Delete tasks by id
    Rm(RmArgs),
}

/// Task creation arguments
#[derive(ClapArgs, Debug, Clone, Default, PartialEq, Eq)]
pub struct MkArgs {
    /// Name of task
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub name: String,

    /// Positional arguments after the options; accepted and ignored
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub extra: Vec<String>,
}

/// Task deletion arguments
#[derive(ClapArgs, Debug, Clone, Default, PartialEq, Eq)]
pub struct RmArgs {
    /// Comma separated ids of the tasks to delete
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub id: String,

    /// Positional arguments after the options; accepted and ignored
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub extra: Vec<String>,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// One JSON object per line
    Json,
    /// Table output
    Table,
}

impl Args {
    /// Parse the process arguments, exiting with a diagnostic on failure.
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_flag_args(std::env::args_os()))
    }

    /// Parse an explicit argument list (program name first).
    pub fn try_parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_flag_args(args))
    }

    /// The command to run; no subcommand means `ls`.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Ls)
    }
}

/// Rewrite single-dash long options (`-id a,b`, `-name=x`) to their
/// double-dash form. The token after a value-taking option is its value and
/// is never rewritten. Everything after a bare `--` is left untouched.
pub fn normalize_flag_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut normalized = Vec::new();
    let mut passthrough = false;
    let mut expects_value = false;

    for arg in args {
        let arg: OsString = arg.into();
        if passthrough || std::mem::take(&mut expects_value) {
            normalized.push(arg);
            continue;
        }
        let Some(text) = arg.to_str() else {
            normalized.push(arg);
            continue;
        };
        if text == "--" {
            passthrough = true;
            normalized.push(arg);
            continue;
        }

        let rewritten = match text.strip_prefix('-') {
            Some(rest) if !rest.starts_with('-') => {
                let flag = rest.split_once('=').map_or(rest, |(flag, _)| flag);
                if SINGLE_DASH_LONGS.contains(&flag) {
                    OsString::from(format!("-{}", text))
                } else {
                    arg
                }
            }
            _ => arg,
        };

        expects_value = rewritten
            .to_str()
            .is_some_and(|token| VALUE_FLAGS.contains(&token));
        normalized.push(rewritten);
    }

    normalized
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Table => write!(f, "table"),
        }
    }
}
