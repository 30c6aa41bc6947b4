use log::info;
use std::sync::Arc;

/// An optional sink for progress notifications of long-running searches.
///
/// Every method has an empty default implementation, so reporters only implement the events
/// they care about. Notifications never influence the results, and `()` can be used to
/// ignore them entirely.
pub trait ProgressReporter: Send + Sync {
    /// Called after each enumerated candidate (`scanned` counts from one).
    fn candidates_scanned(&self, _scanned: usize) {}

    /// Called by the deduplication supervisor whenever a chunk result is collected.
    fn chunk_completed(&self, _round: usize, _completed: usize, _dispatched: usize) {}
}

/// A shareable handle to a [`ProgressReporter`].
pub type SharedProgress = Arc<dyn ProgressReporter>;

impl ProgressReporter for () {}

/// Reports progress through the `log` facade (at `info` level).
#[derive(Copy, Clone, Debug)]
pub struct LogProgress {
    /// Only every `every`-th scanned candidate is reported.
    pub every: usize,
}

impl Default for LogProgress {
    fn default() -> Self {
        LogProgress { every: 100_000 }
    }
}

impl ProgressReporter for LogProgress {
    fn candidates_scanned(&self, scanned: usize) {
        if self.every > 0 && scanned % self.every == 0 {
            info!("Scanned combinations: {scanned}");
        }
    }

    fn chunk_completed(&self, round: usize, completed: usize, dispatched: usize) {
        info!("[round:{round}] Collected results for {completed}/{dispatched} chunks.");
    }
}

/// A [`SharedProgress`] that ignores all notifications.
pub fn no_progress() -> SharedProgress {
    Arc::new(())
}
