//! Resume insight engine: HTTP client, synthetic progress and effect execution.
mod api;
mod endpoint;
mod engine;
mod estimator;
mod types;

pub use api::{ClientSettings, InsightApi, ReqwestInsightApi, UPLOAD_FIELD};
pub use endpoint::{ApiBase, Endpoint, EndpointError};
pub use engine::EngineHandle;
pub use estimator::{ChannelEventSink, EstimatorSettings, EventSink, ProgressEstimator};
pub use types::{ApiError, EngineEvent};
