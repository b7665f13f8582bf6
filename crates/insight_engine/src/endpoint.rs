use thiserror::Error;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointError {
    #[error("api base url is empty")]
    Empty,
    #[error("api base url {value:?} is invalid: {reason}")]
    Invalid { value: String, reason: String },
    #[error("api base url must use http or https, got {0}")]
    UnsupportedScheme(String),
    #[error("api base url must not carry a query or fragment")]
    HasQueryOrFragment,
}

/// The two backend routes this client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    UploadResume,
    Insights,
}

impl Endpoint {
    pub const fn segment(self) -> &'static str {
        match self {
            Endpoint::UploadResume => "upload-resume",
            Endpoint::Insights => "insights",
        }
    }
}

/// Validated base location of the analysis backend.
///
/// Always ends with `/` so endpoint segments append under any path prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBase {
    url: Url,
}

impl ApiBase {
    pub fn parse(raw: &str) -> Result<Self, EndpointError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(EndpointError::Empty);
        }

        let mut url = Url::parse(trimmed).map_err(|err| EndpointError::Invalid {
            value: trimmed.to_string(),
            reason: err.to_string(),
        })?;
        match url.scheme() {
            "http" | "https" => {}
            other => return Err(EndpointError::UnsupportedScheme(other.to_string())),
        }
        if url.cannot_be_a_base() {
            return Err(EndpointError::Invalid {
                value: trimmed.to_string(),
                reason: "cannot be used as a base".to_string(),
            });
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(EndpointError::HasQueryOrFragment);
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(Self { url })
    }

    pub fn as_url(&self) -> &Url {
        &self.url
    }

    pub fn endpoint(&self, endpoint: Endpoint) -> Url {
        let mut url = self.url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(endpoint.segment());
        }
        url
    }
}
