use crate::cli::args::OutputFormat;
use crate::domain::model::Record;
use serde::Serialize;
use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard};
use tabled::{Table, Tabled};

/// Output writer trait for different formats
pub trait OutputWriter {
    /// Write one record from a listing.
    fn write_record(&self, record: &Record) -> Result<(), OutputError>;
    fn write_created(&self, record: &Record) -> Result<(), OutputError>;
    fn write_deleted(&self, record: &Record) -> Result<(), OutputError>;
    fn write_message(&self, message: &str) -> Result<(), OutputError>;
    fn write_error(&self, error: &str) -> Result<(), OutputError>;
    /// Emit anything buffered so far.
    fn flush(&self) -> Result<(), OutputError>;
}

/// Output formatting errors
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Output sink poisoned")]
    Poisoned,
}

impl From<OutputError> for crate::domain::error::TaskError {
    fn from(err: OutputError) -> Self {
        Self::Output(err.to_string())
    }
}

/// Console output writer
///
/// Results go to stdout and errors to stderr by default; other `io::Write`
/// sinks can be supplied with [`ConsoleWriter::with_sink`] and
/// [`ConsoleWriter::with_sinks`].
pub struct ConsoleWriter<W: Write = io::Stdout, E: Write = io::Stderr> {
    format: OutputFormat,
    sink: Mutex<W>,
    error_sink: Mutex<E>,
    table_rows: Mutex<Vec<RecordRow>>,
}

impl ConsoleWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self::with_sink(format, io::stdout())
    }
}

impl<W: Write> ConsoleWriter<W> {
    pub fn with_sink(format: OutputFormat, sink: W) -> Self {
        Self::with_sinks(format, sink, io::stderr())
    }
}

impl<W: Write, E: Write> ConsoleWriter<W, E> {
    pub fn with_sinks(format: OutputFormat, sink: W, error_sink: E) -> Self {
        Self {
            format,
            sink: Mutex::new(sink),
            error_sink: Mutex::new(error_sink),
            table_rows: Mutex::new(Vec::new()),
        }
    }

    /// Consume the writer and return its result sink.
    pub fn into_inner(self) -> W {
        self.into_sinks().0
    }

    /// Consume the writer and return both sinks.
    pub fn into_sinks(self) -> (W, E) {
        let sink = match self.sink.into_inner() {
            Ok(sink) => sink,
            Err(poisoned) => poisoned.into_inner(),
        };
        let error_sink = match self.error_sink.into_inner() {
            Ok(sink) => sink,
            Err(poisoned) => poisoned.into_inner(),
        };
        (sink, error_sink)
    }

    fn sink(&self) -> Result<MutexGuard<'_, W>, OutputError> {
        self.sink.lock().map_err(|_| OutputError::Poisoned)
    }

    fn write_line(&self, line: &str) -> Result<(), OutputError> {
        let mut sink = self.sink()?;
        writeln!(sink, "{}", line)?;
        Ok(())
    }

    fn write_action(&self, action: &str, record: &Record) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "action": action,
                    "record": RecordView::from(record),
                });
                self.write_line(&serde_json::to_string(&output)?)
            }
            _ => self.write_line(&format!("{}: {}", action, record)),
        }
    }
}

impl<W: Write, E: Write> OutputWriter for ConsoleWriter<W, E> {
    fn write_record(&self, record: &Record) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Text => self.write_line(&record.to_string()),
            OutputFormat::Json => {
                let output = serde_json::to_string(&RecordView::from(record))?;
                self.write_line(&output)
            }
            OutputFormat::Table => {
                let mut rows = self.table_rows.lock().map_err(|_| OutputError::Poisoned)?;
                rows.push(RecordRow::from(record));
                Ok(())
            }
        }
    }

    fn write_created(&self, record: &Record) -> Result<(), OutputError> {
        self.write_action("created", record)
    }

    fn write_deleted(&self, record: &Record) -> Result<(), OutputError> {
        self.write_action("deleted", record)
    }

    fn write_message(&self, message: &str) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "message": message,
                    "level": "info"
                });
                self.write_line(&serde_json::to_string(&output)?)
            }
            _ => self.write_line(message),
        }
    }

    fn write_error(&self, error: &str) -> Result<(), OutputError> {
        let line = match self.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "error": error,
                    "level": "error"
                });
                serde_json::to_string(&output)?
            }
            _ => format!("Error: {}", error),
        };

        let mut error_sink = self.error_sink.lock().map_err(|_| OutputError::Poisoned)?;
        writeln!(error_sink, "{}", line)?;
        error_sink.flush()?;
        Ok(())
    }

    fn flush(&self) -> Result<(), OutputError> {
        let rows = {
            let mut rows = self.table_rows.lock().map_err(|_| OutputError::Poisoned)?;
            std::mem::take(&mut *rows)
        };

        let mut sink = self.sink()?;
        if !rows.is_empty() {
            writeln!(sink, "{}", Table::new(rows))?;
        }
        sink.flush()?;
        Ok(())
    }
}

/// Serializable view of a record
#[derive(Debug, Serialize)]
struct RecordView<'a> {
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    task: Option<TaskView<'a>>,
}

#[derive(Debug, Serialize)]
struct TaskView<'a> {
    id: &'a str,
    name: &'a str,
}

impl<'a> From<&'a Record> for RecordView<'a> {
    fn from(record: &'a Record) -> Self {
        Self {
            kind: record.record_kind().as_str_name(),
            task: record.task.as_ref().map(|task| TaskView {
                id: &task.id,
                name: &task.name,
            }),
        }
    }
}

/// Table row for a listed record
#[derive(Tabled)]
struct RecordRow {
    id: String,
    name: String,
    kind: String,
}

impl From<&Record> for RecordRow {
    fn from(record: &Record) -> Self {
        let (id, name) = record
            .task
            .as_ref()
            .map(|task| (task.id.clone(), task.name.clone()))
            .unwrap_or_default();

        Self {
            id,
            name,
            kind: record.record_kind().as_str_name().to_string(),
        }
    }
}
