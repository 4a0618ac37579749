use crate::report::Stage;
use tracing::info;

/// Trait for reporting pipeline progress.
///
/// The CLI implements it with indicatif bars. All methods have default no-op
/// implementations.
pub trait ProgressReporter: Send + Sync {
    fn on_stage_start(&self, _stage: Stage, _total: usize) {}
    fn on_item_complete(&self, _stage: Stage, _done: usize, _total: usize) {}
    fn on_stage_complete(&self, _stage: Stage, _duration_secs: f64) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}

/// Emits one `Progress: NN.NN` line per processed item.
pub struct LogReporter;

impl ProgressReporter for LogReporter {
    fn on_item_complete(&self, stage: Stage, done: usize, total: usize) {
        info!(%stage, "Progress: {:.2}", percent(done, total));
    }

    fn on_stage_complete(&self, stage: Stage, duration_secs: f64) {
        info!(%stage, "Stage completed in {:.2}s", duration_secs);
    }
}

pub fn percent(done: usize, total: usize) -> f64 {
    if total == 0 {
        return 100.0;
    }
    done as f64 / total as f64 * 100.0
}
