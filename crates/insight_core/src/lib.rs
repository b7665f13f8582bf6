//! Resume insight core: pure workflow state machines and view-model helpers.
mod effect;
mod msg;
mod record;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use record::{InsightRecord, RequestFailure, SelectedFile, PDF_CONTENT_TYPE};
pub use state::{
    ActiveView, AppState, AttemptId, HistoryPhase, RequestId, UploadPhase, PROGRESS_CEILING,
};
pub use update::{update, ERROR_MULTIPLE_FILES, ERROR_NOT_PDF, ERROR_NO_FILE};
pub use view_model::{
    format_upload_date, AppViewModel, HistoryView, InsightBadge, InsightCardView,
    SelectedFileView, UploadView, INVALID_DATE,
};
