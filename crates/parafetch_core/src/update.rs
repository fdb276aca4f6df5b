use crate::{build_request, AppState, Effect, Listing, Msg, Severity, SubmitAck};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::SubmitClicked => {
            // Single flight: a trigger while a submission is out is dropped.
            if state.is_submitting() {
                return (state, Vec::new());
            }
            // Acquire before anything that can fail; every branch below
            // either releases here or hands the release to SubmitFinished.
            let acquired = state.gate_mut().try_acquire();
            debug_assert!(acquired);

            match build_request(state.input(), state.settings()) {
                Ok(request) => vec![Effect::SubmitDownload { request }],
                Err(err) => {
                    state.gate_mut().release();
                    vec![Effect::Notify {
                        severity: Severity::Error,
                        message: err.to_string(),
                    }]
                }
            }
        }
        Msg::SubmitFinished(result) => {
            state.gate_mut().release();
            match result {
                Ok(ack) => {
                    state.clear_input();
                    vec![
                        Effect::Notify {
                            severity: Severity::Information,
                            message: accepted_message(&ack),
                        },
                        Effect::RefreshTasks,
                    ]
                }
                Err(err) => vec![Effect::Notify {
                    severity: Severity::Error,
                    message: err.to_string(),
                }],
            }
        }
        Msg::TasksFetched(result) => {
            let listing = match result {
                Ok(tasks) => Listing::Loaded(tasks),
                Err(err) => Listing::Failed(err),
            };
            state.replace_listing(listing);
            Vec::new()
        }
    };

    (state, effects)
}

fn accepted_message(ack: &SubmitAck) -> String {
    let base = ack
        .message
        .as_deref()
        .filter(|m| !m.trim().is_empty())
        .unwrap_or("Task accepted");
    match &ack.task_id {
        Some(id) => format!("{base} (task {id})"),
        None => base.to_string(),
    }
}
