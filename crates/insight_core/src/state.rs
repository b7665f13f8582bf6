use chrono::{FixedOffset, Offset, Utc};

use crate::view_model::{AppViewModel, HistoryView, InsightCardView, UploadView};
use crate::{InsightRecord, SelectedFile};

/// Correlates an upload submission with its engine results.
pub type AttemptId = u64;
/// Correlates a history fetch with its engine result.
pub type RequestId = u64;

/// Synthetic progress only advances while below this value.
pub const PROGRESS_ADVANCE_LIMIT: f64 = 95.0;
/// Synthetic progress never reports more than this before settlement.
pub const PROGRESS_CEILING: f64 = 99.0;
pub const PROGRESS_COMPLETE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Upload,
    History,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadPhase {
    #[default]
    Empty,
    FileSelected,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct UploadState {
    pub(crate) phase: UploadPhase,
    pub(crate) selected_file: Option<SelectedFile>,
    pub(crate) progress_estimate: f64,
    pub(crate) last_error: Option<String>,
    pub(crate) last_result: Option<InsightRecord>,
    pub(crate) attempt: Option<AttemptId>,
}

impl UploadState {
    pub(crate) fn is_current(&self, attempt: AttemptId) -> bool {
        self.attempt == Some(attempt)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryPhase {
    Loading,
    Loaded(Vec<InsightRecord>),
    LoadFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HistoryState {
    pub(crate) phase: HistoryPhase,
    pub(crate) request: RequestId,
}

/// The mounted workflow. Exactly one is alive at a time.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Mounted {
    Upload(UploadState),
    History(HistoryState),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    mounted: Mounted,
    next_attempt: AttemptId,
    next_request: RequestId,
    utc_offset: FixedOffset,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mounted: Mounted::Upload(UploadState::default()),
            next_attempt: 1,
            next_request: 1,
            utc_offset: Utc.fix(),
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dates in insight cards are shown in this offset.
    pub fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.utc_offset = offset;
        self
    }

    pub fn active_view(&self) -> ActiveView {
        match self.mounted {
            Mounted::Upload(_) => ActiveView::Upload,
            Mounted::History(_) => ActiveView::History,
        }
    }

    pub fn upload_phase(&self) -> Option<UploadPhase> {
        self.upload().map(|upload| upload.phase)
    }

    pub fn progress_estimate(&self) -> Option<f64> {
        self.upload().map(|upload| upload.progress_estimate)
    }

    pub fn history_phase(&self) -> Option<&HistoryPhase> {
        match &self.mounted {
            Mounted::History(history) => Some(&history.phase),
            Mounted::Upload(_) => None,
        }
    }

    pub fn view(&self) -> AppViewModel {
        let offset = &self.utc_offset;
        let (upload, history) = match &self.mounted {
            Mounted::Upload(upload) => (Some(UploadView::from_state(upload, offset)), None),
            Mounted::History(history) => {
                let view = match &history.phase {
                    HistoryPhase::Loading => HistoryView::Loading,
                    HistoryPhase::LoadFailed(message) => HistoryView::Failed {
                        message: message.clone(),
                    },
                    HistoryPhase::Loaded(records) if records.is_empty() => HistoryView::Empty,
                    HistoryPhase::Loaded(records) => HistoryView::Loaded {
                        cards: records
                            .iter()
                            .map(|record| InsightCardView::new(record, offset))
                            .collect(),
                    },
                };
                (None, Some(view))
            }
        };
        AppViewModel {
            active: self.active_view(),
            upload,
            history,
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn upload(&self) -> Option<&UploadState> {
        match &self.mounted {
            Mounted::Upload(upload) => Some(upload),
            Mounted::History(_) => None,
        }
    }

    pub(crate) fn upload_mut(&mut self) -> Option<&mut UploadState> {
        match &mut self.mounted {
            Mounted::Upload(upload) => Some(upload),
            Mounted::History(_) => None,
        }
    }

    pub(crate) fn history_mut(&mut self) -> Option<&mut HistoryState> {
        match &mut self.mounted {
            Mounted::History(history) => Some(history),
            Mounted::Upload(_) => None,
        }
    }

    pub(crate) fn mount(&mut self, mounted: Mounted) -> Mounted {
        self.mark_dirty();
        std::mem::replace(&mut self.mounted, mounted)
    }

    pub(crate) fn allocate_attempt(&mut self) -> AttemptId {
        let id = self.next_attempt;
        self.next_attempt += 1;
        id
    }

    pub(crate) fn allocate_request(&mut self) -> RequestId {
        let id = self.next_request;
        self.next_request += 1;
        id
    }
}
