use std::cmp::Reverse;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use crate::view_model::{TaskListView, TaskRowView, TaskSummary};
use crate::{StatusCategory, Task};

pub const NO_TASKS_PLACEHOLDER: &str = "No tasks yet. Submit one to get started!";
pub const FETCH_FAILED_MESSAGE: &str =
    "Failed to load the task list. Check that the API service is running.";
pub const LOADING_MESSAGE: &str = "Loading tasks...";

/// Order and classify a task snapshot for display.
///
/// Newest `submit_time` first. RFC 3339 is preferred; an ISO date-time without
/// an offset is read as UTC. Missing or unreadable timestamps sort after every
/// parsable one, and equal keys keep the server's order.
pub fn render_tasks(tasks: Option<&[Task]>) -> TaskListView {
    let tasks = match tasks {
        Some(tasks) if !tasks.is_empty() => tasks,
        _ => {
            return TaskListView::Empty {
                placeholder: NO_TASKS_PLACEHOLDER,
            }
        }
    };

    let mut keyed: Vec<(Option<DateTime<Utc>>, &Task)> = tasks
        .iter()
        .map(|task| (parse_submit_time(task), task))
        .collect();
    // `None < Some`, so reversing puts unparsable timestamps last.
    keyed.sort_by_key(|(key, _)| Reverse(*key));

    TaskListView::Rows(keyed.into_iter().map(|(_, task)| row_for(task)).collect())
}

pub fn summarize(rows: &[TaskRowView]) -> TaskSummary {
    let mut summary = TaskSummary {
        total: rows.len(),
        ..TaskSummary::default()
    };
    for row in rows {
        match row.category {
            StatusCategory::Queued => summary.queued += 1,
            StatusCategory::Running => summary.running += 1,
            StatusCategory::Completed => summary.completed += 1,
            StatusCategory::Failed => summary.failed += 1,
            StatusCategory::Other(_) => summary.other += 1,
        }
    }
    summary
}

const NAIVE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

fn parse_submit_time(task: &Task) -> Option<DateTime<Utc>> {
    let raw = task.submit_time.as_deref()?.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, NAIVE_TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn row_for(task: &Task) -> TaskRowView {
    TaskRowView {
        id: task.id.clone(),
        url: task.url.clone(),
        output_path: task.output_path.clone(),
        status_label: task.status_label().to_string(),
        category: task.status_category(),
        submit_time: task.submit_time.clone(),
        finish_time: non_empty(task.finish_time.as_deref()),
        error: non_empty(task.error.as_deref()),
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToOwned::to_owned)
}
