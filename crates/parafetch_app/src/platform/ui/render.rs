use chrono::{DateTime, Local};
use parafetch_core::{
    AppViewModel, Severity, TaskListView, TaskRowView, TaskSummary, LOADING_MESSAGE,
};

use super::constants::*;

/// Text frame for the task list. Pure; the terminal decides where it goes.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push("─".repeat(RULE_WIDTH));
    lines.push(header(view.summary.as_ref()));

    match &view.tasks {
        TaskListView::Loading => lines.push(LOADING_MESSAGE.to_string()),
        TaskListView::Empty { placeholder } => lines.push((*placeholder).to_string()),
        TaskListView::Error { message, detail } => {
            lines.push(message.clone());
            lines.push(format!("  ({detail})"));
        }
        TaskListView::Rows(rows) => {
            for row in rows {
                push_row(&mut lines, row);
            }
        }
    }

    if view.submitting {
        lines.push("Submitting...".to_string());
    }
    lines.push("─".repeat(RULE_WIDTH));
    lines
}

pub fn render_notification(severity: Severity, message: &str) -> String {
    match severity {
        Severity::Information => format!("* {message}"),
        Severity::Error => format!("! {message}"),
    }
}

fn header(summary: Option<&TaskSummary>) -> String {
    match summary {
        Some(s) => format!(
            "Tasks: {} | queued {} | running {} | completed {} | failed {}{}",
            s.total,
            s.queued,
            s.running,
            s.completed,
            s.failed,
            if s.other > 0 {
                format!(" | other {}", s.other)
            } else {
                String::new()
            }
        ),
        None => "Tasks".to_string(),
    }
}

fn push_row(lines: &mut Vec<String>, row: &TaskRowView) {
    lines.push(format!(
        "{:<status_w$} {}",
        format!("[{}]", row.status_label),
        truncate(&row.url, URL_COLUMN_WIDTH),
        status_w = STATUS_COLUMN_WIDTH,
    ));

    let mut detail = format!("{:status_w$} -> {}", "", row.output_path, status_w = STATUS_COLUMN_WIDTH);
    if let Some(id) = row.id.as_deref() {
        detail.push_str(&format!("  id {id}"));
    }
    if let Some(submitted) = row.submit_time.as_deref() {
        detail.push_str(&format!("  submitted {}", format_timestamp(submitted)));
    }
    if let Some(finished) = row.finish_time.as_deref() {
        detail.push_str(&format!("  finished {}", format_timestamp(finished)));
    }
    lines.push(detail);

    if let Some(error) = row.error.as_deref() {
        lines.push(format!("{:status_w$} error: {}", "", error, status_w = STATUS_COLUMN_WIDTH));
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

/// Local time for RFC 3339 input, the raw text otherwise.
fn format_timestamp(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(ts) => ts.with_timezone(&Local).format(TIME_FORMAT).to_string(),
        Err(_) => raw.to_string(),
    }
}
