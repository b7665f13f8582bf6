use std::error::Error as StdError;

use insight_core::{AttemptId, InsightRecord, RequestId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Synthetic progress for an in-flight upload.
    ProgressTick { attempt: AttemptId, increment: f64 },
    UploadSettled {
        attempt: AttemptId,
        result: Result<InsightRecord, ApiError>,
    },
    InsightsSettled {
        request: RequestId,
        result: Result<Vec<InsightRecord>, ApiError>,
    },
    /// The cosmetic post-success delay elapsed.
    ProgressClearDue { attempt: AttemptId },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{status} {reason}")]
    HttpStatus { status: u16, reason: String },
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("{0}")]
    Network(String),
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("cannot read {path}: {message}")]
    File { path: String, message: String },
    #[error("http client setup failed: {0}")]
    Client(String),
}

impl ApiError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        let message = with_root_cause(&err);
        if err.is_timeout() {
            return ApiError::Timeout(message);
        }
        if err.is_decode() {
            return ApiError::Decode(message);
        }
        if err.is_builder() {
            return ApiError::Client(message);
        }
        ApiError::Network(message)
    }
}

/// Top-level message followed by the innermost source, when they differ.
fn with_root_cause(err: &dyn StdError) -> String {
    let top = err.to_string();
    let mut root = err.source();
    while let Some(next) = root.and_then(|cause| cause.source()) {
        root = Some(next);
    }
    match root.map(ToString::to_string) {
        Some(cause) if !cause.is_empty() && !top.contains(&cause) => format!("{top}: {cause}"),
        _ => top,
    }
}

#[cfg(test)]
mod tests {
    use super::with_root_cause;
    use std::fmt;

    #[derive(Debug)]
    struct Layer {
        message: &'static str,
        source: Option<Box<Layer>>,
    }

    impl fmt::Display for Layer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.message)
        }
    }

    impl std::error::Error for Layer {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            self.source
                .as_deref()
                .map(|layer| layer as &(dyn std::error::Error + 'static))
        }
    }

    #[test]
    fn appends_innermost_cause() {
        let err = Layer {
            message: "error sending request",
            source: Some(Box::new(Layer {
                message: "client error (Connect)",
                source: Some(Box::new(Layer {
                    message: "Connection refused (os error 111)",
                    source: None,
                })),
            })),
        };
        assert_eq!(
            with_root_cause(&err),
            "error sending request: Connection refused (os error 111)"
        );
    }

    #[test]
    fn plain_errors_are_unchanged() {
        let err = Layer {
            message: "builder error",
            source: None,
        };
        assert_eq!(with_root_cause(&err), "builder error");
    }
}
