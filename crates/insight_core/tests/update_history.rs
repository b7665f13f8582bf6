use std::sync::Once;

use insight_core::{
    update, ActiveView, AppState, Effect, HistoryPhase, HistoryView, InsightRecord, Msg,
    RequestFailure,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(insight_logging::initialize_for_tests);
}

fn record(id: &str, insight_type: &str) -> InsightRecord {
    InsightRecord {
        id: id.to_string(),
        file_name: format!("{id}.pdf"),
        upload_date: "2024-05-20T09:30:00Z".to_string(),
        insight_type: insight_type.to_string(),
        summary: None,
        recommendation: None,
        top_words: Some(vec!["rust".to_string()]),
    }
}

/// Navigates to history and returns the request id of the mount fetch.
fn open_history() -> (AppState, u64) {
    let (state, effects) = update(AppState::new(), Msg::Navigate(ActiveView::History));
    let request = match effects.as_slice() {
        [Effect::FetchInsights { request }] => *request,
        other => panic!("unexpected effects {other:?}"),
    };
    (state, request)
}

fn connection_refused() -> RequestFailure {
    RequestFailure::Transport {
        message: "error sending request for url (http://127.0.0.1:9/insights)".to_string(),
    }
}

#[test]
fn mount_issues_exactly_one_fetch_and_shows_loading() {
    init_logging();
    let (state, _request) = open_history();
    assert_eq!(state.history_phase(), Some(&HistoryPhase::Loading));
    assert_eq!(state.view().history, Some(HistoryView::Loading));

    // Ticks while loading never re-issue the fetch.
    let (_state, effects) = update(state, Msg::Tick);
    assert!(effects.is_empty());
}

#[test]
fn empty_collection_renders_empty_state() {
    init_logging();
    let (state, request) = open_history();
    let (state, effects) = update(
        state,
        Msg::InsightsLoaded {
            request,
            records: Vec::new(),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.history_phase(), Some(&HistoryPhase::Loaded(Vec::new())));
    assert_eq!(state.view().history, Some(HistoryView::Empty));
}

#[test]
fn records_render_in_server_order() {
    init_logging();
    let (state, request) = open_history();
    let records = vec![
        record("c", "AI Summary"),
        record("a", "Frequent Words"),
        record("b", "Something Else"),
    ];
    let (state, _) = update(
        state,
        Msg::InsightsLoaded {
            request,
            records: records.clone(),
        },
    );

    let Some(HistoryView::Loaded { cards }) = state.view().history else {
        panic!("expected loaded history");
    };
    let ids: Vec<_> = cards.iter().map(|card| card.id.as_str()).collect();
    assert_eq!(ids, vec!["c", "a", "b"]);
    assert_eq!(cards[0].file_name, "c.pdf");
    assert_eq!(cards[2].top_words, vec!["rust".to_string()]);
    assert_eq!(cards[1].summary, None);
}

#[test]
fn transport_failure_shows_message_and_retry_refetches_once() {
    init_logging();
    let (state, request) = open_history();
    let (state, effects) = update(
        state,
        Msg::InsightsFailed {
            request,
            failure: connection_refused(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(
        state.view().history,
        Some(HistoryView::Failed {
            message: "error sending request for url (http://127.0.0.1:9/insights)".to_string(),
        })
    );

    let (state, effects) = update(state, Msg::RetryClicked);
    assert_eq!(effects.len(), 1);
    let retry_request = match effects.as_slice() {
        [Effect::FetchInsights { request }] => *request,
        other => panic!("unexpected effects {other:?}"),
    };
    assert_ne!(retry_request, request);
    assert_eq!(state.history_phase(), Some(&HistoryPhase::Loading));

    // Retry while already loading is not offered.
    let (state, effects) = update(state, Msg::RetryClicked);
    assert!(effects.is_empty());

    let (state, _) = update(
        state,
        Msg::InsightsLoaded {
            request: retry_request,
            records: vec![record("x", "AI Summary")],
        },
    );
    assert!(matches!(
        state.view().history,
        Some(HistoryView::Loaded { ref cards }) if cards.len() == 1
    ));
}

#[test]
fn server_failure_message_includes_status() {
    init_logging();
    let (state, request) = open_history();
    let (state, _) = update(
        state,
        Msg::InsightsFailed {
            request,
            failure: RequestFailure::Server {
                status: 503,
                status_text: "Service Unavailable".to_string(),
            },
        },
    );
    assert_eq!(
        state.history_phase(),
        Some(&HistoryPhase::LoadFailed(
            "Failed to fetch analysis history (503 Service Unavailable)".to_string()
        ))
    );
}

#[test]
fn stale_results_are_ignored() {
    init_logging();
    let (state, request) = open_history();
    let (state, _) = update(
        state,
        Msg::InsightsFailed {
            request,
            failure: connection_refused(),
        },
    );
    let (mut state, _) = update(state, Msg::RetryClicked);
    assert!(state.consume_dirty());

    // Result of the superseded request arrives late.
    let (mut state, _) = update(
        state,
        Msg::InsightsLoaded {
            request,
            records: vec![record("old", "AI Summary")],
        },
    );
    assert_eq!(state.history_phase(), Some(&HistoryPhase::Loading));
    assert!(!state.consume_dirty());
}

#[test]
fn retry_is_ignored_after_success() {
    init_logging();
    let (state, request) = open_history();
    let (state, _) = update(
        state,
        Msg::InsightsLoaded {
            request,
            records: Vec::new(),
        },
    );
    let (_state, effects) = update(state, Msg::RetryClicked);
    assert!(effects.is_empty());
}

#[test]
fn view_details_is_a_no_op() {
    init_logging();
    let (state, request) = open_history();
    let (mut state, _) = update(
        state,
        Msg::InsightsLoaded {
            request,
            records: vec![record("a", "AI Summary")],
        },
    );
    assert!(state.consume_dirty());
    let before = state.view();

    let (mut next, effects) = update(state, Msg::ViewDetailsClicked { id: "a".to_string() });
    assert!(effects.is_empty());
    assert_eq!(next.view(), before);
    assert!(!next.consume_dirty());
}
