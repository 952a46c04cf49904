use crate::cli::output::OutputWriter;
use crate::core::service::DataService;
use crate::domain::error::TaskResult;
use crate::domain::model::{Mutation, Query};
use tracing::{debug, info, warn};

/// Stream every task ordered by name, writing each record as it arrives.
///
/// Records received before a stream failure are still flushed to the writer.
/// Returns the number of records written.
pub async fn list_tasks<S, W>(service: &mut S, writer: &W) -> TaskResult<usize>
where
    S: DataService + ?Sized,
    W: OutputWriter + ?Sized,
{
    let query = Query::tasks_by_name();
    debug!(orders = ?query.orders, "Querying tasks");

    let mut stream = service.query(query).await?;
    let mut count = 0;

    let streamed: TaskResult<()> = loop {
        match stream.next_record().await {
            Ok(Some(record)) => {
                if let Err(e) = writer.write_record(&record) {
                    break Err(e.into());
                }
                count += 1;
            }
            Ok(None) => break Ok(()),
            Err(e) => break Err(e),
        }
    };

    let flushed = writer.flush();
    streamed?;
    flushed?;

    debug!(count, "Task listing complete");
    Ok(count)
}

/// Create a single task with `name`. An empty name is passed through as is.
pub async fn create_task<S, W>(service: &mut S, name: &str, writer: &W) -> TaskResult<()>
where
    S: DataService + ?Sized,
    W: OutputWriter + ?Sized,
{
    let record = service.mutate(Mutation::create_task(name)).await?;
    info!(task_name = %name, "Task created");

    writer.write_created(&record)?;
    writer.flush()?;
    Ok(())
}

/// Delete tasks one at a time, in order.
///
/// The first failure stops the loop; deletions already applied stay applied.
pub async fn delete_tasks<S, W>(service: &mut S, ids: &[String], writer: &W) -> TaskResult<usize>
where
    S: DataService + ?Sized,
    W: OutputWriter + ?Sized,
{
    if ids.is_empty() {
        warn!("No task ids given, nothing to delete");
        writer.write_message("no task ids given, nothing deleted")?;
        writer.flush()?;
        return Ok(0);
    }

    for (index, id) in ids.iter().enumerate() {
        debug!(id = %id, position = index + 1, total = ids.len(), "Deleting task");
        let record = service.mutate(Mutation::delete_task(id.as_str())).await?;
        writer.write_deleted(&record)?;
    }

    writer.flush()?;
    info!(count = ids.len(), "Tasks deleted");
    Ok(ids.len())
}

/// Split a comma separated id list, trimming whitespace and dropping empty entries.
pub fn split_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}
