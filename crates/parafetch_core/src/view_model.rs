use crate::StatusCategory;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub input: String,
    pub submitting: bool,
    pub tasks: TaskListView,
    pub summary: Option<TaskSummary>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TaskListView {
    #[default]
    Loading,
    /// Shown instead of an empty list.
    Empty { placeholder: &'static str },
    Rows(Vec<TaskRowView>),
    /// Inline error replacing the list after a failed fetch.
    Error { message: String, detail: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRowView {
    pub id: Option<String>,
    pub url: String,
    pub output_path: String,
    pub status_label: String,
    pub category: StatusCategory,
    pub submit_time: Option<String>,
    pub finish_time: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskSummary {
    pub total: usize,
    pub queued: usize,
    pub running: usize,
    pub completed: usize,
    pub failed: usize,
    pub other: usize,
}
