use crate::DownloadRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SubmitDownload { request: DownloadRequest },
    /// Run one fetch cycle now, outside the polling cadence.
    RefreshTasks,
    Notify { severity: Severity, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Information,
    Error,
}
