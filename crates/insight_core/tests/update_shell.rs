use std::path::PathBuf;
use std::sync::Once;

use insight_core::{
    update, ActiveView, AppState, Effect, HistoryPhase, InsightRecord, Msg, SelectedFile,
    UploadPhase,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(insight_logging::initialize_for_tests);
}

fn pdf() -> SelectedFile {
    SelectedFile {
        name: "cv.pdf".to_string(),
        path: PathBuf::from("cv.pdf"),
        size_bytes: 10,
        content_type: "application/pdf".to_string(),
    }
}

#[test]
fn starts_on_upload_view_without_effects() {
    let state = AppState::new();
    let view = state.view();

    assert_eq!(view.active, ActiveView::Upload);
    assert!(view.upload.is_some());
    assert!(view.history.is_none());
    assert_eq!(state.upload_phase(), Some(UploadPhase::Empty));
}

#[test]
fn navigating_to_active_view_is_a_no_op() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::FilePicked(pdf()));
    let before = state.clone();
    let (next, effects) = update(state, Msg::Navigate(ActiveView::Upload));

    assert!(effects.is_empty());
    assert_eq!(next, before);
}

#[test]
fn switching_views_remounts_fresh_components() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::FilePicked(pdf()));
    let (state, effects) = update(state, Msg::Navigate(ActiveView::History));
    assert_eq!(effects, vec![Effect::FetchInsights { request: 1 }]);
    assert_eq!(state.active_view(), ActiveView::History);
    assert!(state.view().upload.is_none());

    let (state, effects) = update(state, Msg::Navigate(ActiveView::Upload));
    assert!(effects.is_empty());
    // Upload state does not survive the round trip.
    assert_eq!(state.upload_phase(), Some(UploadPhase::Empty));
    assert_eq!(state.view().upload.unwrap().selected_file, None);

    let (state, effects) = update(state, Msg::Navigate(ActiveView::History));
    assert_eq!(effects, vec![Effect::FetchInsights { request: 2 }]);
    assert_eq!(state.history_phase(), Some(&HistoryPhase::Loading));
}

#[test]
fn leaving_during_submission_releases_the_estimator() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::FilePicked(pdf()));
    let (state, _) = update(state, Msg::AnalyzeClicked);
    let (state, effects) = update(state, Msg::Navigate(ActiveView::History));

    assert_eq!(
        effects,
        vec![
            Effect::ReleaseUpload { attempt: 1 },
            Effect::FetchInsights { request: 1 },
        ]
    );

    // The upload settles while history is mounted; nothing changes.
    let before = state.clone();
    let (state, effects) = update(
        state,
        Msg::UploadSucceeded {
            attempt: 1,
            record: InsightRecord {
                id: "1".to_string(),
                file_name: "cv.pdf".to_string(),
                upload_date: "2024-01-01T00:00:00Z".to_string(),
                insight_type: "AI Summary".to_string(),
                summary: None,
                recommendation: None,
                top_words: None,
            },
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state, before);
}

#[test]
fn history_results_after_leaving_are_ignored() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Navigate(ActiveView::History));
    let (state, _) = update(state, Msg::Navigate(ActiveView::Upload));
    let before = state.clone();

    let (state, effects) = update(
        state,
        Msg::InsightsLoaded {
            request: 1,
            records: Vec::new(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state, before);
}

#[test]
fn leaving_a_settled_upload_emits_no_release() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::FilePicked(pdf()));
    let (state, effects) = update(state, Msg::Navigate(ActiveView::History));
    assert_eq!(effects, vec![Effect::FetchInsights { request: 1 }]);
    assert!(state.view().history.is_some());
}
