use crate::{AttemptId, RequestId, SelectedFile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Stream the file to the analysis endpoint and run the progress estimator.
    SubmitResume {
        attempt: AttemptId,
        file: SelectedFile,
    },
    /// The upload workflow was unmounted; stop its estimator.
    ReleaseUpload { attempt: AttemptId },
    /// Deliver `Msg::ProgressClearDue` after the cosmetic delay.
    ScheduleProgressClear { attempt: AttemptId },
    /// Fetch the full insight collection.
    FetchInsights { request: RequestId },
}
