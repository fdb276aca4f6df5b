use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use parafetch_core::{DownloadRequest, Task};
use parafetch_engine::{
    start_polling, ApiError, FailureKind, PollSettings, SubmitReceipt, TaskApi, TaskListSink,
};
use tokio::sync::mpsc;
use tokio::time::Instant;

type FetchResult = Result<Vec<Task>, ApiError>;

/// Replays scripted list results, then keeps answering with an empty list.
struct ScriptedApi {
    script: Mutex<VecDeque<FetchResult>>,
    delay: Duration,
    list_calls: AtomicUsize,
}

impl ScriptedApi {
    fn new(script: Vec<FetchResult>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            delay: Duration::ZERO,
            list_calls: AtomicUsize::new(0),
        }
    }

    fn slow(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::new(Vec::new())
        }
    }
}

#[async_trait::async_trait]
impl TaskApi for ScriptedApi {
    async fn submit(&self, _request: &DownloadRequest) -> Result<SubmitReceipt, ApiError> {
        Ok(SubmitReceipt::default())
    }

    async fn list_tasks(&self) -> FetchResult {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

struct ChannelSink {
    tx: mpsc::UnboundedSender<FetchResult>,
}

impl ChannelSink {
    fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<FetchResult>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Arc::new(Self { tx }), rx)
    }
}

impl TaskListSink for ChannelSink {
    fn deliver(&self, result: FetchResult) {
        let _ = self.tx.send(result);
    }
}

fn task(url: &str) -> Task {
    Task {
        id: None,
        url: url.to_string(),
        output_path: String::new(),
        threads: None,
        status: Some("running".to_string()),
        submit_time: Some("2024-05-01T10:00:00Z".to_string()),
        finish_time: None,
        error: None,
    }
}

#[tokio::test(start_paused = true)]
async fn first_cycle_is_immediate_then_every_interval() {
    let api = Arc::new(ScriptedApi::new(Vec::new()));
    let (sink, mut rx) = ChannelSink::new();
    let started = Instant::now();

    let handle = start_polling(api.clone(), sink, PollSettings::default());

    rx.recv().await.expect("first cycle");
    assert_eq!(started.elapsed(), Duration::ZERO);

    rx.recv().await.expect("second cycle");
    assert_eq!(started.elapsed(), Duration::from_secs(5));

    rx.recv().await.expect("third cycle");
    assert_eq!(started.elapsed(), Duration::from_secs(10));

    assert_eq!(api.list_calls.load(Ordering::SeqCst), 3);
    handle.stop();
}

#[tokio::test(start_paused = true)]
async fn failed_cycle_does_not_stop_polling() {
    let api = Arc::new(ScriptedApi::new(vec![
        Err(ApiError::new(FailureKind::HttpStatus(503), "503 Service Unavailable")),
        Ok(vec![task("https://example.com/a.zip")]),
    ]));
    let (sink, mut rx) = ChannelSink::new();
    let handle = start_polling(api, sink, PollSettings::default());

    let first = rx.recv().await.expect("first cycle");
    assert_eq!(first.unwrap_err().kind, FailureKind::HttpStatus(503));

    let second = rx.recv().await.expect("second cycle");
    let tasks = second.expect("recovered");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].url, "https://example.com/a.zip");

    handle.stop();
}

#[tokio::test(start_paused = true)]
async fn refresh_now_runs_out_of_band_without_resetting_timer() {
    let api = Arc::new(ScriptedApi::new(Vec::new()));
    let (sink, mut rx) = ChannelSink::new();
    let started = Instant::now();
    let handle = start_polling(api, sink, PollSettings::default());
    rx.recv().await.expect("initial cycle");

    tokio::time::sleep(Duration::from_secs(3)).await;
    handle.refresh_now();
    rx.recv().await.expect("out-of-band cycle");
    assert_eq!(started.elapsed(), Duration::from_secs(3));

    rx.recv().await.expect("periodic cycle");
    assert_eq!(started.elapsed(), Duration::from_secs(5));
    assert_eq!(handle.cycles_started(), 3);

    handle.stop();
}

#[tokio::test(start_paused = true)]
async fn slow_cycles_overlap_instead_of_skipping() {
    let api = Arc::new(ScriptedApi::slow(Duration::from_secs(12)));
    let (sink, mut rx) = ChannelSink::new();
    let handle = start_polling(api.clone(), sink, PollSettings::default());

    tokio::time::sleep(Duration::from_secs(11)).await;
    assert_eq!(handle.cycles_started(), 3);
    assert_eq!(api.list_calls.load(Ordering::SeqCst), 3);
    assert!(rx.try_recv().is_err());

    handle.stop();
    // In-flight cycles still deliver after stop.
    rx.recv().await.expect("late delivery");
}

#[tokio::test(start_paused = true)]
async fn stop_ends_the_periodic_loop() {
    let api = Arc::new(ScriptedApi::new(Vec::new()));
    let (sink, mut rx) = ChannelSink::new();
    let handle = start_polling(api.clone(), sink, PollSettings::default());
    rx.recv().await.expect("initial cycle");

    handle.stop();
    assert!(handle.is_stopped());
    tokio::time::sleep(Duration::from_secs(30)).await;

    assert!(rx.try_recv().is_err());
    assert_eq!(api.list_calls.load(Ordering::SeqCst), 1);

    handle.refresh_now();
    tokio::task::yield_now().await;
    assert_eq!(api.list_calls.load(Ordering::SeqCst), 1);
}
