use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The only document type the upload workflow accepts.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// One backend-produced analysis result for a single uploaded document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightRecord {
    pub id: String,
    pub file_name: String,
    pub upload_date: String,
    pub insight_type: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub recommendation: Option<String>,
    #[serde(default)]
    pub top_words: Option<Vec<String>>,
}

/// A candidate document chosen by the user, as inspected by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub path: PathBuf,
    pub size_bytes: u64,
    pub content_type: String,
}

impl SelectedFile {
    pub fn is_pdf(&self) -> bool {
        self.content_type.eq_ignore_ascii_case(PDF_CONTENT_TYPE)
    }
}

/// Why a request to the analysis backend did not produce data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestFailure {
    /// Non-success HTTP status.
    Server { status: u16, status_text: String },
    /// The backend could not be reached or timed out.
    Transport { message: String },
    /// A success status carried a body that is not the expected JSON.
    InvalidResponse { message: String },
}

impl RequestFailure {
    pub(crate) fn upload_message(&self) -> String {
        match self {
            RequestFailure::Server { status_text, .. } => format!("Upload failed: {status_text}"),
            RequestFailure::Transport { message } | RequestFailure::InvalidResponse { message } => {
                non_empty_or(message, "Failed to analyze resume")
            }
        }
    }

    pub(crate) fn history_message(&self) -> String {
        match self {
            RequestFailure::Server {
                status,
                status_text,
            } => format!("Failed to fetch analysis history ({status} {status_text})"),
            RequestFailure::Transport { message } | RequestFailure::InvalidResponse { message } => {
                non_empty_or(message, "An error occurred")
            }
        }
    }
}

fn non_empty_or(message: &str, fallback: &str) -> String {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}
