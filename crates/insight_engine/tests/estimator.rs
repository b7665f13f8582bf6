use std::sync::{mpsc, Arc};
use std::time::Duration;

use insight_engine::{ChannelEventSink, EngineEvent, EstimatorSettings, ProgressEstimator};
use tokio_util::sync::CancellationToken;

fn fast_settings() -> EstimatorSettings {
    EstimatorSettings {
        interval: Duration::from_millis(10),
        max_step: 5.0,
        clear_delay: Duration::from_millis(10),
    }
}

fn tick_count(rx: &mpsc::Receiver<EngineEvent>) -> usize {
    rx.try_iter()
        .filter(|event| matches!(event, EngineEvent::ProgressTick { .. }))
        .count()
}

#[tokio::test]
async fn emits_bounded_increments_until_stopped() {
    let (tx, rx) = mpsc::channel();
    let sink = Arc::new(ChannelEventSink::new(tx));
    let estimator = ProgressEstimator::start(7, &fast_settings(), sink, CancellationToken::new());

    tokio::time::sleep(Duration::from_millis(80)).await;
    estimator.stop().await;

    let events: Vec<_> = rx.try_iter().collect();
    assert!(!events.is_empty());
    for event in events {
        match event {
            EngineEvent::ProgressTick { attempt, increment } => {
                assert_eq!(attempt, 7);
                assert!((0.0..5.0).contains(&increment), "increment {increment}");
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn external_cancellation_stops_ticks() {
    let (tx, rx) = mpsc::channel();
    let sink = Arc::new(ChannelEventSink::new(tx));
    let token = CancellationToken::new();
    let estimator = ProgressEstimator::start(1, &fast_settings(), sink, token.clone());

    tokio::time::sleep(Duration::from_millis(40)).await;
    token.cancel();
    assert!(estimator.is_cancelled());
    tokio::time::sleep(Duration::from_millis(20)).await;
    let _ = tick_count(&rx);

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(tick_count(&rx), 0);
}

#[tokio::test]
async fn dropping_the_estimator_cancels_it() {
    let (tx, rx) = mpsc::channel();
    let sink = Arc::new(ChannelEventSink::new(tx));
    let estimator = ProgressEstimator::start(2, &fast_settings(), sink, CancellationToken::new());

    tokio::time::sleep(Duration::from_millis(30)).await;
    drop(estimator);
    tokio::time::sleep(Duration::from_millis(20)).await;
    let _ = tick_count(&rx);

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(tick_count(&rx), 0);
}

#[tokio::test]
async fn zero_step_never_advances() {
    let (tx, rx) = mpsc::channel();
    let sink = Arc::new(ChannelEventSink::new(tx));
    let settings = EstimatorSettings {
        max_step: 0.0,
        ..fast_settings()
    };
    let estimator = ProgressEstimator::start(3, &settings, sink, CancellationToken::new());

    tokio::time::sleep(Duration::from_millis(40)).await;
    estimator.stop().await;

    for event in rx.try_iter() {
        if let EngineEvent::ProgressTick { increment, .. } = event {
            assert_eq!(increment, 0.0);
        }
    }
}
