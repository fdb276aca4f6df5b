use std::sync::Arc;

use client_logging::{client_info, client_warn};
use parafetch_core::{ControllerError, Effect, Msg, SubmitAck, Task};
use parafetch_engine::{
    start_polling, ApiError, FailureKind, PollSettings, PollingHandle, SubmitReceipt, TaskApi,
    TaskListSink,
};
use tokio::sync::mpsc;

/// Executes effects against the backend and feeds results back as messages.
pub(crate) struct EffectRunner {
    api: Arc<dyn TaskApi>,
    msg_tx: mpsc::UnboundedSender<Msg>,
    polling: PollingHandle,
}

impl EffectRunner {
    /// Starts polling right away. Must be called inside the runtime.
    pub(crate) fn start(
        api: Arc<dyn TaskApi>,
        msg_tx: mpsc::UnboundedSender<Msg>,
        poll: PollSettings,
    ) -> Self {
        let sink = Arc::new(MsgSink {
            tx: msg_tx.clone(),
        });
        let polling = start_polling(api.clone(), sink, poll);
        Self {
            api,
            msg_tx,
            polling,
        }
    }

    pub(crate) fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitDownload { request } => {
                    client_info!(
                        "SubmitDownload url_len={} url={} output_path={}",
                        request.url.len(),
                        request.url,
                        request.output_path
                    );
                    let api = self.api.clone();
                    let completion = SubmitCompletion::new(self.msg_tx.clone());
                    tokio::spawn(async move {
                        let result = api
                            .submit(&request)
                            .await
                            .map(map_receipt)
                            .map_err(map_submit_error);
                        completion.finish(result);
                    });
                }
                Effect::RefreshTasks => self.polling.refresh_now(),
                Effect::Notify { .. } => {
                    // shown by the controller
                }
            }
        }
    }

    pub(crate) fn shutdown(&self) {
        self.polling.stop();
    }
}

struct MsgSink {
    tx: mpsc::UnboundedSender<Msg>,
}

impl TaskListSink for MsgSink {
    fn deliver(&self, result: Result<Vec<Task>, ApiError>) {
        let _ = self
            .tx
            .send(Msg::TasksFetched(result.map_err(map_fetch_error)));
    }
}

/// Reports the end of a submission exactly once. If the submit task dies
/// before reporting, the drop still releases the gate.
struct SubmitCompletion {
    tx: mpsc::UnboundedSender<Msg>,
    reported: bool,
}

impl SubmitCompletion {
    fn new(tx: mpsc::UnboundedSender<Msg>) -> Self {
        Self {
            tx,
            reported: false,
        }
    }

    fn finish(mut self, result: Result<SubmitAck, ControllerError>) {
        self.reported = true;
        let _ = self.tx.send(Msg::SubmitFinished(result));
    }
}

impl Drop for SubmitCompletion {
    fn drop(&mut self) {
        if !self.reported {
            client_warn!("Submit task ended without a result");
            let _ = self.tx.send(Msg::SubmitFinished(Err(ControllerError::NetworkFailure(
                "submission aborted".to_string(),
            ))));
        }
    }
}

fn map_receipt(receipt: SubmitReceipt) -> SubmitAck {
    SubmitAck {
        task_id: receipt.task_id,
        message: receipt.message,
    }
}

fn map_submit_error(err: ApiError) -> ControllerError {
    client_warn!("Submission failed: {}", err);
    match err.kind {
        FailureKind::Rejected { .. } | FailureKind::HttpStatus(_) | FailureKind::Decode => {
            ControllerError::SubmissionRejected(err.message)
        }
        FailureKind::InvalidBaseUrl | FailureKind::Timeout | FailureKind::Network => {
            ControllerError::NetworkFailure(err.to_string())
        }
    }
}

fn map_fetch_error(err: ApiError) -> ControllerError {
    match err.kind {
        FailureKind::HttpStatus(code) | FailureKind::Rejected { status: code } => {
            ControllerError::FetchFailed(code)
        }
        FailureKind::Decode => ControllerError::DecodeFailed(err.message),
        FailureKind::InvalidBaseUrl | FailureKind::Timeout | FailureKind::Network => {
            ControllerError::NetworkFailure(err.to_string())
        }
    }
}
