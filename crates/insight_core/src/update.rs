use insight_logging::{insight_debug, insight_info};

use crate::state::{
    HistoryState, Mounted, UploadState, PROGRESS_ADVANCE_LIMIT, PROGRESS_CEILING,
    PROGRESS_COMPLETE,
};
use crate::{
    ActiveView, AppState, AttemptId, Effect, HistoryPhase, Msg, RequestId, SelectedFile,
    UploadPhase,
};

pub const ERROR_NOT_PDF: &str = "Only PDF files are accepted";
pub const ERROR_NO_FILE: &str = "Please select a PDF file first";
pub const ERROR_MULTIPLE_FILES: &str = "Please select a single PDF file";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Navigate(target) => navigate(&mut state, target),
        Msg::FilesDropped(mut files) => {
            match files.len() {
                0 => {}
                1 => select_file(&mut state, files.remove(0)),
                count => {
                    insight_debug!("Rejected drop of {} files", count);
                    reject_selection(&mut state, ERROR_MULTIPLE_FILES.to_string());
                }
            }
            Vec::new()
        }
        Msg::FilePicked(file) => {
            select_file(&mut state, file);
            Vec::new()
        }
        Msg::SelectionFailed { reason } => {
            reject_selection(&mut state, reason);
            Vec::new()
        }
        Msg::AnalyzeClicked => analyze(&mut state),
        Msg::ResetClicked => {
            let reset = match state.upload_mut() {
                Some(upload) if upload.phase != UploadPhase::Submitting => {
                    *upload = UploadState::default();
                    true
                }
                _ => false,
            };
            if reset {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::UploadProgressTick { attempt, increment } => {
            if let Some(upload) = submitting(&mut state, attempt) {
                if upload.progress_estimate < PROGRESS_ADVANCE_LIMIT {
                    let next = upload.progress_estimate + increment.max(0.0);
                    upload.progress_estimate = next.min(PROGRESS_CEILING);
                    state.mark_dirty();
                }
            }
            Vec::new()
        }
        Msg::UploadSucceeded { attempt, record } => {
            match submitting(&mut state, attempt) {
                Some(upload) => {
                    insight_info!("Upload attempt {} succeeded for {}", attempt, record.file_name);
                    upload.phase = UploadPhase::Succeeded;
                    upload.progress_estimate = PROGRESS_COMPLETE;
                    upload.last_result = Some(record);
                    state.mark_dirty();
                    vec![Effect::ScheduleProgressClear { attempt }]
                }
                None => {
                    insight_debug!("Ignoring stale upload result for attempt {}", attempt);
                    Vec::new()
                }
            }
        }
        Msg::UploadFailed { attempt, failure } => {
            match submitting(&mut state, attempt) {
                Some(upload) => {
                    insight_info!("Upload attempt {} failed: {:?}", attempt, failure);
                    upload.phase = UploadPhase::Failed;
                    upload.progress_estimate = 0.0;
                    upload.last_error = Some(failure.upload_message());
                    state.mark_dirty();
                }
                None => insight_debug!("Ignoring stale upload failure for attempt {}", attempt),
            }
            Vec::new()
        }
        Msg::ProgressClearDue { attempt } => {
            let cleared = match state.upload_mut() {
                Some(upload)
                    if upload.is_current(attempt) && upload.phase == UploadPhase::Succeeded =>
                {
                    upload.progress_estimate = 0.0;
                    true
                }
                _ => false,
            };
            if cleared {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::InsightsLoaded { request, records } => {
            settle_history(&mut state, request, HistoryPhase::Loaded(records));
            Vec::new()
        }
        Msg::InsightsFailed { request, failure } => {
            let message = failure.history_message();
            settle_history(&mut state, request, HistoryPhase::LoadFailed(message));
            Vec::new()
        }
        Msg::RetryClicked => retry_history(&mut state),
        Msg::ViewDetailsClicked { id } => {
            // Detail drill-down is not offered; the action is acknowledged only.
            insight_info!("View details requested for insight {}", id);
            Vec::new()
        }
        Msg::Tick => Vec::new(),
    };

    (state, effects)
}

fn navigate(state: &mut AppState, target: ActiveView) -> Vec<Effect> {
    if state.active_view() == target {
        return Vec::new();
    }

    let mut effects = Vec::with_capacity(2);
    let next = match target {
        ActiveView::Upload => Mounted::Upload(UploadState::default()),
        ActiveView::History => {
            let request = state.allocate_request();
            effects.push(Effect::FetchInsights { request });
            Mounted::History(HistoryState {
                phase: HistoryPhase::Loading,
                request,
            })
        }
    };

    if let Mounted::Upload(previous) = state.mount(next) {
        if previous.phase == UploadPhase::Submitting {
            if let Some(attempt) = previous.attempt {
                insight_debug!("Upload view unmounted during attempt {}", attempt);
                effects.insert(0, Effect::ReleaseUpload { attempt });
            }
        }
    }
    effects
}

fn select_file(state: &mut AppState, file: SelectedFile) {
    let Some(upload) = state.upload_mut() else {
        return;
    };
    if upload.phase != UploadPhase::Empty {
        insight_debug!("Ignoring file selection in phase {:?}", upload.phase);
        return;
    }

    if file.is_pdf() {
        upload.last_error = None;
        upload.selected_file = Some(file);
        upload.phase = UploadPhase::FileSelected;
    } else {
        insight_debug!(
            "Rejected {} with content type {}",
            file.name,
            file.content_type
        );
        upload.last_error = Some(ERROR_NOT_PDF.to_string());
    }
    state.mark_dirty();
}

fn reject_selection(state: &mut AppState, reason: String) {
    let Some(upload) = state.upload_mut() else {
        return;
    };
    if upload.phase != UploadPhase::Empty {
        return;
    }
    upload.last_error = Some(reason);
    state.mark_dirty();
}

fn analyze(state: &mut AppState) -> Vec<Effect> {
    let phase = match state.upload() {
        Some(upload) => upload.phase,
        None => return Vec::new(),
    };

    match phase {
        UploadPhase::Empty => {
            if let Some(upload) = state.upload_mut() {
                upload.last_error = Some(ERROR_NO_FILE.to_string());
            }
            state.mark_dirty();
            Vec::new()
        }
        UploadPhase::FileSelected => {
            let attempt = state.allocate_attempt();
            let Some(upload) = state.upload_mut() else {
                return Vec::new();
            };
            let Some(file) = upload.selected_file.clone() else {
                return Vec::new();
            };
            upload.phase = UploadPhase::Submitting;
            upload.attempt = Some(attempt);
            upload.last_error = None;
            upload.progress_estimate = 0.0;
            state.mark_dirty();
            insight_info!("Submitting {} as attempt {}", file.name, attempt);
            vec![Effect::SubmitResume { attempt, file }]
        }
        UploadPhase::Submitting | UploadPhase::Succeeded | UploadPhase::Failed => Vec::new(),
    }
}

fn submitting(state: &mut AppState, attempt: AttemptId) -> Option<&mut UploadState> {
    state
        .upload_mut()
        .filter(|upload| upload.is_current(attempt) && upload.phase == UploadPhase::Submitting)
}

fn settle_history(state: &mut AppState, request: RequestId, phase: HistoryPhase) {
    let settled = match state.history_mut() {
        Some(history) if history.request == request && history.phase == HistoryPhase::Loading => {
            history.phase = phase;
            true
        }
        _ => false,
    };
    if settled {
        state.mark_dirty();
    } else {
        insight_debug!("Ignoring stale history result for request {}", request);
    }
}

fn retry_history(state: &mut AppState) -> Vec<Effect> {
    let failed = matches!(state.history_phase(), Some(HistoryPhase::LoadFailed(_)));
    if !failed {
        return Vec::new();
    }

    let request = state.allocate_request();
    if let Some(history) = state.history_mut() {
        history.phase = HistoryPhase::Loading;
        history.request = request;
    }
    state.mark_dirty();
    vec![Effect::FetchInsights { request }]
}
