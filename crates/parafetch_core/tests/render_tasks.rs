use parafetch_core::{
    render_tasks, summarize, StatusCategory, Task, TaskListView, TaskRowView,
    NO_TASKS_PLACEHOLDER, QUEUED_LABEL,
};
use pretty_assertions::assert_eq;

fn task(url: &str, status: Option<&str>, submit_time: Option<&str>) -> Task {
    Task {
        id: None,
        url: url.to_string(),
        output_path: format!("/app/downloads/{url}"),
        threads: None,
        status: status.map(ToOwned::to_owned),
        submit_time: submit_time.map(ToOwned::to_owned),
        finish_time: None,
        error: None,
    }
}

fn rows(view: TaskListView) -> Vec<TaskRowView> {
    match view {
        TaskListView::Rows(rows) => rows,
        other => panic!("expected rows, got {other:?}"),
    }
}

fn urls(rows: &[TaskRowView]) -> Vec<&str> {
    rows.iter().map(|row| row.url.as_str()).collect()
}

#[test]
fn newest_submission_first() {
    let tasks = vec![
        task("t1", Some("completed"), Some("2024-05-01T10:00:00Z")),
        task("t3", Some("running"), Some("2024-05-01T12:00:00Z")),
        task("t2", Some("queued"), Some("2024-05-01T11:00:00Z")),
    ];

    let rows = rows(render_tasks(Some(tasks.as_slice())));
    assert_eq!(urls(&rows), vec!["t3", "t2", "t1"]);
}

#[test]
fn offsets_are_compared_as_instants() {
    let tasks = vec![
        // 09:30 UTC
        task("early", None, Some("2024-05-01T11:30:00+02:00")),
        // 10:00 UTC
        task("late", None, Some("2024-05-01T10:00:00Z")),
    ];
    let rows = rows(render_tasks(Some(tasks.as_slice())));
    assert_eq!(urls(&rows), vec!["late", "early"]);
}

#[test]
fn timestamps_without_offset_are_ordered_as_utc() {
    let tasks = vec![
        task("older", None, Some("2024-05-01T10:00:00")),
        task("newer", None, Some("2024-05-01T12:00:00")),
        // 11:00 UTC, between the two naive ones
        task("zoned", None, Some("2024-05-01T13:00:00+02:00")),
        task("fractional", None, Some("2024-05-01T12:30:00.250")),
    ];
    let rows = rows(render_tasks(Some(tasks.as_slice())));
    assert_eq!(urls(&rows), vec!["fractional", "newer", "zoned", "older"]);
}

#[test]
fn unparsable_timestamps_sort_last_in_server_order() {
    let tasks = vec![
        task("garbage", None, Some("yesterday")),
        task("dated", None, Some("2024-05-01T10:00:00Z")),
        task("missing", None, None),
        task("blank", None, Some("")),
    ];
    let rows = rows(render_tasks(Some(tasks.as_slice())));
    assert_eq!(urls(&rows), vec!["dated", "garbage", "missing", "blank"]);
}

#[test]
fn equal_timestamps_keep_server_order() {
    let tasks = vec![
        task("first", None, Some("2024-05-01T10:00:00Z")),
        task("second", None, Some("2024-05-01T10:00:00Z")),
    ];
    let rows = rows(render_tasks(Some(tasks.as_slice())));
    assert_eq!(urls(&rows), vec!["first", "second"]);
}

#[test]
fn empty_or_absent_renders_placeholder() {
    let expected = TaskListView::Empty {
        placeholder: NO_TASKS_PLACEHOLDER,
    };
    assert_eq!(render_tasks(Some(&[][..])), expected);
    assert_eq!(render_tasks(None), expected);
}

#[test]
fn missing_status_defaults_to_queued() {
    let tasks = vec![
        task("absent", None, Some("2024-05-01T12:00:00Z")),
        task("empty", Some(""), Some("2024-05-01T11:00:00Z")),
    ];
    let rows = rows(render_tasks(Some(tasks.as_slice())));
    for row in &rows {
        assert_eq!(row.status_label, QUEUED_LABEL);
        assert_eq!(row.category, StatusCategory::Queued);
    }
}

#[test]
fn statuses_are_classified() {
    let tasks = vec![
        task("a", Some("downloading"), Some("2024-05-01T15:00:00Z")),
        task("b", Some("completed"), Some("2024-05-01T14:00:00Z")),
        task("c", Some("failed"), Some("2024-05-01T13:00:00Z")),
        task("d", Some("paused"), Some("2024-05-01T12:00:00Z")),
    ];
    let rows = rows(render_tasks(Some(tasks.as_slice())));

    assert_eq!(rows[0].category, StatusCategory::Running);
    assert_eq!(rows[1].category, StatusCategory::Completed);
    assert_eq!(rows[2].category, StatusCategory::Failed);
    assert_eq!(rows[3].category, StatusCategory::Other("paused".to_string()));
    assert_eq!(rows[3].status_label, "paused");

    let summary = summarize(&rows);
    assert_eq!(summary.total, 4);
    assert_eq!(summary.running, 1);
    assert_eq!(summary.completed, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.other, 1);
    assert_eq!(summary.queued, 0);
}

#[test]
fn failed_rows_carry_server_error() {
    let mut failed = task("broken", Some("failed"), Some("2024-05-01T10:00:00Z"));
    failed.error = Some("upload to object storage failed".to_string());
    failed.finish_time = Some("  ".to_string());

    let rows = rows(render_tasks(Some(std::slice::from_ref(&failed))));
    assert_eq!(
        rows[0].error.as_deref(),
        Some("upload to object storage failed")
    );
    assert_eq!(rows[0].finish_time, None);
}

#[test]
fn tasks_decode_from_backend_json() {
    let body = r#"[
        {"id":"9f1c","url":"https://example.com/a.zip","output_path":"/app/downloads/a.zip",
         "status":"completed","submit_time":"2024-05-01T10:00:00Z","finish_time":"2024-05-01T10:05:00Z"},
        {"url":"https://example.com/b.zip","threads":8}
    ]"#;
    let tasks: Vec<Task> = serde_json::from_str(body).expect("decode");

    assert_eq!(tasks[0].id.as_deref(), Some("9f1c"));
    assert_eq!(tasks[1].status_label(), QUEUED_LABEL);
    assert_eq!(tasks[1].threads, Some(8));

    let rows = rows(render_tasks(Some(tasks.as_slice())));
    assert_eq!(urls(&rows), vec!["https://example.com/a.zip", "https://example.com/b.zip"]);
}

#[test]
fn numeric_ids_and_negative_threads_do_not_spoil_the_snapshot() {
    let body = r#"[
        {"id":17,"url":"https://example.com/a.zip","threads":-1},
        {"id":null,"url":"https://example.com/b.zip"},
        {"id":"","url":"https://example.com/c.zip"}
    ]"#;
    let tasks: Vec<Task> = serde_json::from_str(body).expect("decode");

    assert_eq!(tasks.len(), 3);
    assert_eq!(tasks[0].id.as_deref(), Some("17"));
    assert_eq!(tasks[0].threads, Some(-1));
    assert_eq!(tasks[1].id, None);
    assert_eq!(tasks[2].id, None);
}
