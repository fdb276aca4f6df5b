use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use client_logging::{client_debug, client_info, client_warn, LogDestination};
use parafetch_core::{update, AppState, Effect, Msg, SubmissionSettings};
use parafetch_engine::{ApiSettings, PollSettings, ReqwestTaskApi, TaskApi};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::cli::Cli;
use super::effects::EffectRunner;
use super::ui::{Screen, TerminalScreen};

pub fn run_app() -> anyhow::Result<()> {
    let args = Cli::parse();

    let destination = if args.log_to_terminal {
        LogDestination::Both(args.log_file.clone())
    } else {
        LogDestination::File(args.log_file.clone())
    };
    client_logging::initialize(destination, args.log_level());

    let api = ReqwestTaskApi::new(ApiSettings {
        base_url: args.api_base.clone(),
        ..ApiSettings::default()
    })
    .with_context(|| format!("invalid API base URL {:?}", args.api_base))?;
    client_info!("Using download service at {}", api.base_url());

    // One thread: every network call is a suspension point on the same loop.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    runtime.block_on(async move {
        let shutdown = CancellationToken::new();
        let (controller, msg_tx) = Controller::start(
            Arc::new(api),
            PollSettings::default(),
            SubmissionSettings::default(),
        );

        spawn_input_reader(msg_tx);
        spawn_interrupt_watch(shutdown.clone());

        let mut screen = TerminalScreen::new();
        controller.run(&mut screen, shutdown).await;
    });

    client_info!("Shut down");
    Ok(())
}

/// Owns the controller state and applies messages to it one at a time.
pub(crate) struct Controller {
    state: AppState,
    runner: EffectRunner,
    msg_rx: mpsc::UnboundedReceiver<Msg>,
}

impl Controller {
    /// Starts polling immediately. Must be called inside the runtime.
    pub(crate) fn start(
        api: Arc<dyn TaskApi>,
        poll: PollSettings,
        submission: SubmissionSettings,
    ) -> (Self, mpsc::UnboundedSender<Msg>) {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let runner = EffectRunner::start(api, msg_tx.clone(), poll);
        let controller = Self {
            state: AppState::with_settings(submission),
            runner,
            msg_rx,
        };
        (controller, msg_tx)
    }

    pub(crate) async fn run(mut self, screen: &mut dyn Screen, shutdown: CancellationToken) {
        screen.draw(&self.state.view());
        loop {
            let msg = tokio::select! {
                _ = shutdown.cancelled() => break,
                msg = self.msg_rx.recv() => match msg {
                    Some(msg) => msg,
                    None => break,
                },
            };
            self.dispatch(msg, screen);
        }
        self.runner.shutdown();
    }

    fn dispatch(&mut self, msg: Msg, screen: &mut dyn Screen) {
        client_debug!("dispatch {}", msg_name(&msg));
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        let view = state.view();
        self.state = state;

        let mut pending = Vec::with_capacity(effects.len());
        for effect in effects {
            match effect {
                Effect::Notify { severity, message } => screen.notify(severity, &message),
                other => pending.push(other),
            }
        }
        self.runner.enqueue(pending);

        if was_dirty {
            screen.draw(&view);
        }
    }
}

fn msg_name(msg: &Msg) -> &'static str {
    match msg {
        Msg::InputChanged(_) => "InputChanged",
        Msg::SubmitClicked => "SubmitClicked",
        Msg::SubmitFinished(Ok(_)) => "SubmitFinished(ok)",
        Msg::SubmitFinished(Err(_)) => "SubmitFinished(err)",
        Msg::TasksFetched(Ok(_)) => "TasksFetched(ok)",
        Msg::TasksFetched(Err(_)) => "TasksFetched(err)",
    }
}

/// Each stdin line is an edit of the input field followed by a submit.
fn spawn_input_reader(msg_tx: mpsc::UnboundedSender<Msg>) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if msg_tx.send(Msg::InputChanged(line)).is_err()
                        || msg_tx.send(Msg::SubmitClicked).is_err()
                    {
                        break;
                    }
                }
                Ok(None) => {
                    client_info!("Input closed; still polling until interrupted");
                    break;
                }
                Err(err) => {
                    client_warn!("Failed to read input: {}", err);
                    break;
                }
            }
        }
    });
}

fn spawn_interrupt_watch(shutdown: CancellationToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => client_info!("Interrupted"),
            Err(err) => client_warn!("Cannot listen for Ctrl-C: {}", err),
        }
        shutdown.cancel();
    });
}
