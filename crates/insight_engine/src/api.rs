use std::time::Duration;

use insight_core::{InsightRecord, SelectedFile};
use insight_logging::{insight_debug, insight_info};
use reqwest::multipart::{Form, Part};
use serde_json::from_slice;
use tokio_util::io::ReaderStream;

use crate::{ApiBase, ApiError, Endpoint};

/// Multipart field name the analysis endpoint reads the document from.
pub const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub connect_timeout: Duration,
    /// Covers the whole exchange, including server-side analysis time.
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
        }
    }
}

#[async_trait::async_trait]
pub trait InsightApi: Send + Sync {
    async fn upload_resume(&self, file: &SelectedFile) -> Result<InsightRecord, ApiError>;

    async fn list_insights(&self) -> Result<Vec<InsightRecord>, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestInsightApi {
    base: ApiBase,
    client: reqwest::Client,
}

impl ReqwestInsightApi {
    pub fn new(base: ApiBase, settings: &ClientSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::Client(err.to_string()))?;
        Ok(Self { base, client })
    }

    async fn build_form(file: &SelectedFile) -> Result<Form, ApiError> {
        let file_error = |err: std::io::Error| ApiError::File {
            path: file.path.display().to_string(),
            message: err.to_string(),
        };
        let handle = tokio::fs::File::open(&file.path).await.map_err(file_error)?;
        let length = handle.metadata().await.map_err(file_error)?.len();

        let body = reqwest::Body::wrap_stream(ReaderStream::new(handle));
        let part = Part::stream_with_length(body, length)
            .file_name(file.name.clone())
            .mime_str(&file.content_type)
            .map_err(ApiError::from_reqwest)?;
        Ok(Form::new().part(UPLOAD_FIELD, part))
    }
}

#[async_trait::async_trait]
impl InsightApi for ReqwestInsightApi {
    async fn upload_resume(&self, file: &SelectedFile) -> Result<InsightRecord, ApiError> {
        let url = self.base.endpoint(Endpoint::UploadResume);
        let form = Self::build_form(file).await?;
        insight_info!("POST {} file={} bytes={}", url, file.name, file.size_bytes);

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;
        let body = success_body(response).await?;
        from_slice(&body).map_err(|err| ApiError::Decode(err.to_string()))
    }

    async fn list_insights(&self) -> Result<Vec<InsightRecord>, ApiError> {
        let url = self.base.endpoint(Endpoint::Insights);
        insight_info!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;
        let body = success_body(response).await?;
        let records: Vec<InsightRecord> =
            from_slice(&body).map_err(|err| ApiError::Decode(err.to_string()))?;
        insight_debug!("Fetched {} insight records", records.len());
        Ok(records)
    }
}

async fn success_body(response: reqwest::Response) -> Result<Vec<u8>, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::HttpStatus {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
        });
    }
    let bytes = response.bytes().await.map_err(ApiError::from_reqwest)?;
    Ok(bytes.to_vec())
}
