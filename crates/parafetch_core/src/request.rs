use serde::Serialize;

use crate::ControllerError;

pub const DEFAULT_OUTPUT_PREFIX: &str = "/app/downloads";
pub const DEFAULT_THREADS: u32 = 8;
pub const FALLBACK_FILENAME: &str = "unknown_file";

/// Fixed submission parameters. None of these come from the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionSettings {
    pub output_prefix: String,
    pub threads: u32,
    pub fallback_filename: String,
}

impl Default for SubmissionSettings {
    fn default() -> Self {
        Self {
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
            threads: DEFAULT_THREADS,
            fallback_filename: FALLBACK_FILENAME.to_string(),
        }
    }
}

/// Body of `POST /api/download`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadRequest {
    pub url: String,
    pub output_path: String,
    pub threads: u32,
}

/// Turn raw user input into a submission payload.
///
/// Only emptiness is checked; malformed URLs go to the backend unchanged.
pub fn build_request(
    raw: &str,
    settings: &SubmissionSettings,
) -> Result<DownloadRequest, ControllerError> {
    let url = raw.trim();
    if url.is_empty() {
        return Err(ControllerError::EmptyInput);
    }

    let filename = derive_filename(url, &settings.fallback_filename);
    let prefix = settings.output_prefix.trim_end_matches('/');
    Ok(DownloadRequest {
        url: url.to_string(),
        output_path: format!("{prefix}/{filename}"),
        threads: settings.threads,
    })
}

/// Everything after the last `/`, or `fallback` when that is empty.
pub fn derive_filename<'a>(url: &'a str, fallback: &'a str) -> &'a str {
    let tail = match url.rfind('/') {
        Some(idx) => &url[idx + 1..],
        None => url,
    };
    if tail.is_empty() {
        fallback
    } else {
        tail
    }
}
