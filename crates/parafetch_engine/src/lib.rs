//! Parafetch engine: backend HTTP client and the polling scheduler.
mod api;
mod scheduler;
mod types;

pub use api::{ApiSettings, ReqwestTaskApi, TaskApi, DOWNLOAD_ENDPOINT, TASKS_ENDPOINT};
pub use scheduler::{start_polling, PollSettings, PollingHandle, TaskListSink};
pub use types::{ApiError, FailureKind, SubmitReceipt};
