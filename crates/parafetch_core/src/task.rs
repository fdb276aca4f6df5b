use serde::{Deserialize, Deserializer};

/// Label shown for a task whose status is absent or empty.
pub const QUEUED_LABEL: &str = "queued";

/// A server-tracked download job, exactly as the backend reported it.
///
/// Tasks are only ever decoded from a task list response; the client never
/// builds or edits one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Task {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    pub url: String,
    #[serde(default)]
    pub output_path: String,
    #[serde(default)]
    pub threads: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub submit_time: Option<String>,
    #[serde(default)]
    pub finish_time: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Ids arrive as strings or bare numbers depending on the backend version.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
    Float(f64),
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawId>::deserialize(deserializer)?;
    Ok(raw.and_then(|id| match id {
        RawId::Text(text) if text.trim().is_empty() => None,
        RawId::Text(text) => Some(text),
        RawId::Signed(n) => Some(n.to_string()),
        RawId::Unsigned(n) => Some(n.to_string()),
        RawId::Float(n) => Some(n.to_string()),
    }))
}

impl Task {
    /// Raw status, or `None` when the server sent nothing usable.
    pub fn status(&self) -> Option<&str> {
        self.status
            .as_deref()
            .map(str::trim)
            .filter(|status| !status.is_empty())
    }

    pub fn status_label(&self) -> &str {
        self.status().unwrap_or(QUEUED_LABEL)
    }

    pub fn status_category(&self) -> StatusCategory {
        StatusCategory::classify(self.status())
    }
}

/// Visual classification of a server status. The status set is open, so
/// anything unrecognised is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StatusCategory {
    Queued,
    Running,
    Completed,
    Failed,
    Other(String),
}

impl StatusCategory {
    pub fn classify(status: Option<&str>) -> Self {
        let Some(raw) = status else {
            return StatusCategory::Queued;
        };
        match raw.to_ascii_lowercase().as_str() {
            "" | "queued" | "pending" => StatusCategory::Queued,
            "running" | "downloading" | "uploading" | "merging" => StatusCategory::Running,
            "completed" | "done" => StatusCategory::Completed,
            "failed" | "error" => StatusCategory::Failed,
            _ => StatusCategory::Other(raw.to_string()),
        }
    }
}
