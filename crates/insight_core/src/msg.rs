use crate::{ActiveView, AttemptId, InsightRecord, RequestFailure, RequestId, SelectedFile};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User switched the navigation shell.
    Navigate(ActiveView),
    /// User dropped one or more files onto the upload area.
    FilesDropped(Vec<SelectedFile>),
    /// User chose a file through the picker.
    FilePicked(SelectedFile),
    /// The platform could not inspect the chosen path.
    SelectionFailed { reason: String },
    /// User clicked Analyze Resume.
    AnalyzeClicked,
    /// User clicked Remove or Upload Another Resume.
    ResetClicked,
    /// Synthetic progress estimator fired for an attempt.
    UploadProgressTick { attempt: AttemptId, increment: f64 },
    /// The analysis endpoint returned a record.
    UploadSucceeded {
        attempt: AttemptId,
        record: InsightRecord,
    },
    /// The analysis request failed.
    UploadFailed {
        attempt: AttemptId,
        failure: RequestFailure,
    },
    /// Cosmetic delay after success elapsed.
    ProgressClearDue { attempt: AttemptId },
    /// History endpoint returned the collection.
    InsightsLoaded {
        request: RequestId,
        records: Vec<InsightRecord>,
    },
    /// History request failed.
    InsightsFailed {
        request: RequestId,
        failure: RequestFailure,
    },
    /// User clicked Retry on the history error panel.
    RetryClicked,
    /// User clicked View Details on a card.
    ViewDetailsClicked { id: String },
    /// UI/render tick to coalesce rendering.
    Tick,
}
