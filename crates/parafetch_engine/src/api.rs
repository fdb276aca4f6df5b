use std::time::Duration;

use client_logging::{client_debug, client_info};
use parafetch_core::{DownloadRequest, Task};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde_json::Value;
use url::Url;

use crate::{ApiError, FailureKind, SubmitReceipt};

pub const DOWNLOAD_ENDPOINT: &str = "api/download";
pub const TASKS_ENDPOINT: &str = "api/tasks";

const REJECTED_FALLBACK: &str = "failed to submit task";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// The backend's HTTP contract, as far as this client uses it.
#[async_trait::async_trait]
pub trait TaskApi: Send + Sync {
    async fn submit(&self, request: &DownloadRequest) -> Result<SubmitReceipt, ApiError>;

    async fn list_tasks(&self) -> Result<Vec<Task>, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTaskApi {
    client: reqwest::Client,
    base: Url,
}

impl ReqwestTaskApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let mut base = Url::parse(&settings.base_url)
            .map_err(|err| ApiError::new(FailureKind::InvalidBaseUrl, err.to_string()))?;
        // Endpoints are joined relative to the base, keep any path prefix.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|err| ApiError::new(FailureKind::InvalidBaseUrl, err.to_string()))
    }
}

#[async_trait::async_trait]
impl TaskApi for ReqwestTaskApi {
    async fn submit(&self, request: &DownloadRequest) -> Result<SubmitReceipt, ApiError> {
        let url = self.endpoint(DOWNLOAD_ENDPOINT)?;
        let body = serde_json::to_vec(request)
            .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))?;

        client_debug!(
            "POST {} url={} output_path={} threads={}",
            url,
            request.url,
            request.output_path,
            request.threads
        );
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        let receipt = parse_submit_reply(status, &bytes)?;
        client_info!(
            "Submission accepted status={} task_id={:?}",
            status.as_u16(),
            receipt.task_id
        );
        Ok(receipt)
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let url = self.endpoint(TASKS_ENDPOINT)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        decode_task_list(&bytes)
    }
}

/// An empty body and a JSON `null` both mean "no tasks".
fn decode_task_list(bytes: &[u8]) -> Result<Vec<Task>, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    let tasks: Option<Vec<Task>> = serde_json::from_slice(bytes)
        .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))?;
    Ok(tasks.unwrap_or_default())
}

fn parse_submit_reply(status: StatusCode, bytes: &[u8]) -> Result<SubmitReceipt, ApiError> {
    let parsed = serde_json::from_slice::<Value>(bytes);
    if status.is_success() {
        if let Err(err) = &parsed {
            return Err(ApiError::new(
                FailureKind::Decode,
                format!("unreadable submit reply: {err}"),
            ));
        }
    }
    // Failure bodies that are not JSON carry nothing beyond the status code.
    let reply = parsed.ok();
    let field = |name: &str| {
        reply
            .as_ref()
            .and_then(|value| value.get(name))
            .and_then(value_to_string)
    };

    let rejected = FailureKind::Rejected {
        status: status.as_u16(),
    };
    if let Some(message) = field("error") {
        return Err(ApiError::new(rejected, message));
    }
    if !status.is_success() {
        return Err(ApiError::new(rejected, REJECTED_FALLBACK));
    }

    Ok(SubmitReceipt {
        task_id: field("task_id"),
        message: field("message"),
    })
}

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ApiError::new(FailureKind::Decode, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
