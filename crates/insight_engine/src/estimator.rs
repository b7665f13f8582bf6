use std::sync::{mpsc, Arc};
use std::time::Duration;

use insight_core::AttemptId;
use rand::Rng;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::EngineEvent;

#[derive(Debug, Clone)]
pub struct EstimatorSettings {
    pub interval: Duration,
    /// Each tick adds a random amount in `[0, max_step)`.
    pub max_step: f64,
    /// Delay between a successful upload and the cosmetic progress reset.
    pub clear_delay: Duration,
}

impl Default for EstimatorSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(200),
            max_step: 5.0,
            clear_delay: Duration::from_millis(300),
        }
    }
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Repeating task that reports synthetic upload progress.
///
/// The task stops when its token is cancelled, when [`ProgressEstimator::stop`]
/// is awaited, or when the estimator is dropped. After `stop` returns no
/// further tick is emitted.
pub struct ProgressEstimator {
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl ProgressEstimator {
    /// Must be called from within a tokio runtime.
    pub fn start(
        attempt: AttemptId,
        settings: &EstimatorSettings,
        sink: Arc<dyn EventSink>,
        token: CancellationToken,
    ) -> Self {
        let period = settings.interval.max(Duration::from_millis(1));
        let max_step = settings.max_step;
        let task_token = token.clone();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick of an interval completes immediately.
            ticker.tick().await;
            loop {
                tokio::select! {
                    biased;
                    _ = task_token.cancelled() => break,
                    _ = ticker.tick() => {
                        sink.emit(EngineEvent::ProgressTick {
                            attempt,
                            increment: random_increment(max_step),
                        });
                    }
                }
            }
        });

        Self {
            token,
            task: Some(task),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Cancels the task and waits until it has exited.
    pub async fn stop(mut self) {
        self.token.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for ProgressEstimator {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

fn random_increment(max_step: f64) -> f64 {
    if max_step <= 0.0 || !max_step.is_finite() {
        return 0.0;
    }
    rand::thread_rng().gen_range(0.0..max_step)
}
