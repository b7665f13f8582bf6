use std::sync::{mpsc, Arc};
use std::thread;

use insight_core::{Effect, Msg, RequestFailure};
use insight_engine::{
    ApiError, ChannelEventSink, EngineEvent, EngineHandle, EstimatorSettings, InsightApi,
};
use insight_logging::{insight_info, insight_warn};

use super::app::AppEvent;

/// Runs core effects on the engine and feeds engine events back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(
        api: Arc<dyn InsightApi>,
        settings: EstimatorSettings,
        app_tx: mpsc::Sender<AppEvent>,
    ) -> Self {
        let (event_tx, event_rx) = mpsc::channel();
        let engine = EngineHandle::new(api, settings, Arc::new(ChannelEventSink::new(event_tx)));
        spawn_event_pump(event_rx, app_tx);
        Self { engine }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitResume { attempt, file } => {
                    insight_info!(
                        "SubmitResume attempt={} file={} bytes={}",
                        attempt,
                        file.name,
                        file.size_bytes
                    );
                    self.engine.submit_resume(attempt, file);
                }
                Effect::ReleaseUpload { attempt } => self.engine.release_upload(attempt),
                Effect::ScheduleProgressClear { attempt } => {
                    self.engine.schedule_progress_clear(attempt)
                }
                Effect::FetchInsights { request } => {
                    insight_info!("FetchInsights request={}", request);
                    self.engine.fetch_insights(request);
                }
            }
        }
    }
}

fn spawn_event_pump(event_rx: mpsc::Receiver<EngineEvent>, app_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        while let Ok(event) = event_rx.recv() {
            if app_tx.send(AppEvent::Core(event_to_msg(event))).is_err() {
                break;
            }
        }
    });
}

pub(crate) fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ProgressTick { attempt, increment } => {
            Msg::UploadProgressTick { attempt, increment }
        }
        EngineEvent::UploadSettled { attempt, result } => match result {
            Ok(record) => Msg::UploadSucceeded { attempt, record },
            Err(err) => {
                insight_warn!("Upload attempt {} failed: {}", attempt, err);
                Msg::UploadFailed {
                    attempt,
                    failure: to_failure(err),
                }
            }
        },
        EngineEvent::InsightsSettled { request, result } => match result {
            Ok(records) => Msg::InsightsLoaded { request, records },
            Err(err) => {
                insight_warn!("History request {} failed: {}", request, err);
                Msg::InsightsFailed {
                    request,
                    failure: to_failure(err),
                }
            }
        },
        EngineEvent::ProgressClearDue { attempt } => Msg::ProgressClearDue { attempt },
    }
}

fn to_failure(err: ApiError) -> RequestFailure {
    match err {
        ApiError::HttpStatus { status, reason } => RequestFailure::Server {
            status,
            status_text: reason,
        },
        ApiError::Decode(message) => RequestFailure::InvalidResponse { message },
        other => RequestFailure::Transport {
            message: other.to_string(),
        },
    }
}
