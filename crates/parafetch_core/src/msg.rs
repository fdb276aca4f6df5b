use crate::{ControllerError, Task};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL input.
    InputChanged(String),
    /// User triggered submission of the current input.
    SubmitClicked,
    /// The submit call finished, one way or another.
    SubmitFinished(Result<SubmitAck, ControllerError>),
    /// A fetch cycle finished, periodic or out-of-band.
    TasksFetched(Result<Vec<Task>, ControllerError>),
}

/// What the backend told us about an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmitAck {
    pub task_id: Option<String>,
    pub message: Option<String>,
}
