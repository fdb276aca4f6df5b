use thiserror::Error;

/// Everything that can go wrong from the user's point of view. None of these
/// are fatal; the controller keeps running after each one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error("URL must not be empty")]
    EmptyInput,
    /// Server message, shown verbatim.
    #[error("{0}")]
    SubmissionRejected(String),
    #[error("network failure: {0}")]
    NetworkFailure(String),
    #[error("task list request failed with http status {0}")]
    FetchFailed(u16),
    #[error("task list response could not be decoded: {0}")]
    DecodeFailed(String),
}
