use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex, PoisonError};
use std::thread;

use insight_core::{AttemptId, RequestId, SelectedFile};
use insight_logging::{insight_debug, insight_error, insight_info};
use tokio_util::sync::CancellationToken;

use crate::estimator::{EstimatorSettings, EventSink, ProgressEstimator};
use crate::{EngineEvent, InsightApi};

enum EngineCommand {
    UploadResume {
        attempt: AttemptId,
        file: SelectedFile,
    },
    FetchInsights {
        request: RequestId,
    },
    ReleaseUpload {
        attempt: AttemptId,
    },
    ClearProgressAfter {
        attempt: AttemptId,
    },
}

/// Cancellation tokens of the estimators that are currently running.
#[derive(Clone, Default)]
struct EstimatorRegistry {
    tokens: Arc<Mutex<HashMap<AttemptId, CancellationToken>>>,
}

impl EstimatorRegistry {
    fn register(&self, attempt: AttemptId) -> CancellationToken {
        let token = CancellationToken::new();
        self.lock().insert(attempt, token.clone());
        token
    }

    fn remove(&self, attempt: AttemptId) {
        self.lock().remove(&attempt);
    }

    fn release(&self, attempt: AttemptId) -> bool {
        match self.lock().remove(&attempt) {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<AttemptId, CancellationToken>> {
        self.tokens.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Executes upload and history requests on a background tokio runtime.
///
/// Results are reported through the [`EventSink`] given at construction.
/// Dropping the handle closes the command channel and shuts the runtime down.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(
        api: Arc<dyn InsightApi>,
        settings: EstimatorSettings,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    insight_error!("Failed to start engine runtime: {}", err);
                    return;
                }
            };
            let registry = EstimatorRegistry::default();
            while let Ok(command) = cmd_rx.recv() {
                if let EngineCommand::ReleaseUpload { attempt } = command {
                    let released = registry.release(attempt);
                    insight_debug!("Release attempt {} (estimator running: {})", attempt, released);
                    continue;
                }
                // Registered before spawning so a following release always finds the token.
                let token = match &command {
                    EngineCommand::UploadResume { attempt, .. } => Some(registry.register(*attempt)),
                    _ => None,
                };
                let api = api.clone();
                let sink = sink.clone();
                let settings = settings.clone();
                let registry = registry.clone();
                runtime.spawn(async move {
                    handle_command(api.as_ref(), &settings, &registry, sink, command, token)
                        .await;
                });
            }
            insight_info!("Engine command channel closed; shutting down");
        });

        Self { cmd_tx }
    }

    pub fn submit_resume(&self, attempt: AttemptId, file: SelectedFile) {
        self.send(EngineCommand::UploadResume { attempt, file });
    }

    pub fn fetch_insights(&self, request: RequestId) {
        self.send(EngineCommand::FetchInsights { request });
    }

    /// Stops the estimator of an attempt whose view went away. The request keeps running.
    pub fn release_upload(&self, attempt: AttemptId) {
        self.send(EngineCommand::ReleaseUpload { attempt });
    }

    pub fn schedule_progress_clear(&self, attempt: AttemptId) {
        self.send(EngineCommand::ClearProgressAfter { attempt });
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            insight_error!("Engine is not running; command dropped");
        }
    }
}

async fn handle_command(
    api: &dyn InsightApi,
    settings: &EstimatorSettings,
    registry: &EstimatorRegistry,
    sink: Arc<dyn EventSink>,
    command: EngineCommand,
    token: Option<CancellationToken>,
) {
    match command {
        EngineCommand::UploadResume { attempt, file } => {
            let token = token.unwrap_or_default();
            let estimator = ProgressEstimator::start(attempt, settings, sink.clone(), token);
            let result = api.upload_resume(&file).await;
            estimator.stop().await;
            registry.remove(attempt);
            sink.emit(EngineEvent::UploadSettled { attempt, result });
        }
        EngineCommand::FetchInsights { request } => {
            let result = api.list_insights().await;
            sink.emit(EngineEvent::InsightsSettled { request, result });
        }
        EngineCommand::ClearProgressAfter { attempt } => {
            tokio::time::sleep(settings.clear_delay).await;
            sink.emit(EngineEvent::ProgressClearDue { attempt });
        }
        EngineCommand::ReleaseUpload { attempt } => {
            registry.release(attempt);
        }
    }
}
