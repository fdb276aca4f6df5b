use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use client_logging::{client_debug, client_info, client_warn};
use parafetch_core::Task;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::{ApiError, TaskApi};

#[derive(Debug, Clone)]
pub struct PollSettings {
    pub interval: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
        }
    }
}

/// Receives the outcome of every fetch cycle, periodic or out-of-band.
pub trait TaskListSink: Send + Sync {
    fn deliver(&self, result: Result<Vec<Task>, ApiError>);
}

/// Control over a running polling loop.
///
/// Dropping the handle leaves the loop running; call [`PollingHandle::stop`].
#[derive(Clone)]
pub struct PollingHandle {
    shared: Arc<Shared>,
    cancel: CancellationToken,
}

struct Shared {
    api: Arc<dyn TaskApi>,
    sink: Arc<dyn TaskListSink>,
    cycles: AtomicU64,
}

/// Start polling: one cycle right away, then one per interval until stopped.
///
/// Each cycle is spawned on its own, so a slow fetch never delays the next
/// tick and cycles may overlap. Must be called from within a tokio runtime.
pub fn start_polling(
    api: Arc<dyn TaskApi>,
    sink: Arc<dyn TaskListSink>,
    settings: PollSettings,
) -> PollingHandle {
    let handle = PollingHandle {
        shared: Arc::new(Shared {
            api,
            sink,
            cycles: AtomicU64::new(0),
        }),
        cancel: CancellationToken::new(),
    };

    let shared = handle.shared.clone();
    let cancel = handle.cancel.clone();
    client_info!("Polling every {:?}", settings.interval);
    tokio::spawn(async move {
        // The first tick completes immediately.
        let mut ticker = tokio::time::interval(settings.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    tokio::spawn(run_cycle(shared.clone(), "periodic"));
                }
            }
        }
        client_info!("Polling stopped");
    });

    handle
}

impl PollingHandle {
    /// Run one extra cycle now. The periodic timer is not reset.
    pub fn refresh_now(&self) {
        if self.is_stopped() {
            return;
        }
        tokio::spawn(run_cycle(self.shared.clone(), "out-of-band"));
    }

    /// Stop the periodic loop. Cycles already in flight still deliver.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Number of cycles started so far.
    pub fn cycles_started(&self) -> u64 {
        self.shared.cycles.load(Ordering::Relaxed)
    }
}

async fn run_cycle(shared: Arc<Shared>, origin: &'static str) {
    let cycle = shared.cycles.fetch_add(1, Ordering::Relaxed) + 1;
    client_debug!("Fetch cycle {} ({}) started", cycle, origin);

    let result = shared.api.list_tasks().await;
    match &result {
        Ok(tasks) => client_debug!("Fetch cycle {} returned {} tasks", cycle, tasks.len()),
        Err(err) => client_warn!("Fetch cycle {} failed: {}", cycle, err),
    }
    shared.sink.deliver(result);
}
