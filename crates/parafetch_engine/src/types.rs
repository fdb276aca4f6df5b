use std::fmt;

use thiserror::Error;

/// Transport-level failure of a backend call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidBaseUrl,
    /// Non-2xx on a read.
    HttpStatus(u16),
    /// The backend refused a submission: non-2xx or an `error` field.
    Rejected { status: u16 },
    /// Body did not have the expected shape.
    Decode,
    Timeout,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidBaseUrl => write!(f, "invalid base url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Rejected { status } => write!(f, "rejected with http status {status}"),
            FailureKind::Decode => write!(f, "malformed response"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Accepted-submission reply. The backend sends `{message, task_id}`; both
/// are optional here since only ok/error matters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmitReceipt {
    pub task_id: Option<String>,
    pub message: Option<String>,
}
