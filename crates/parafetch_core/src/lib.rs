//! Parafetch core: pure controller state machine, request building and task rendering.
mod effect;
mod error;
mod gate;
mod msg;
mod render;
mod request;
mod state;
mod task;
mod update;
mod view_model;

pub use effect::{Effect, Severity};
pub use error::ControllerError;
pub use gate::SubmissionGate;
pub use msg::{Msg, SubmitAck};
pub use render::{render_tasks, summarize, FETCH_FAILED_MESSAGE, LOADING_MESSAGE, NO_TASKS_PLACEHOLDER};
pub use request::{
    build_request, derive_filename, DownloadRequest, SubmissionSettings, DEFAULT_OUTPUT_PREFIX,
    DEFAULT_THREADS, FALLBACK_FILENAME,
};
pub use state::{AppState, Listing};
pub use task::{StatusCategory, Task, QUEUED_LABEL};
pub use update::update;
pub use view_model::{AppViewModel, TaskListView, TaskRowView, TaskSummary};
