use soliton_core::Observer;

use crate::traits::HasSample;

/// Number of progress reports over a full run.
const REPORTS: usize = 100;

/// Reports run progress through `tracing`.
///
/// Every `every` steps, and on the final step, an `info` event is emitted
/// with the step, the percentage complete, and the current `x`. The logger
/// never asks the run to stop.
#[derive(Debug, Clone)]
pub struct ProgressLogger {
    total: usize,
    every: usize,
    reported: usize,
}

impl ProgressLogger {
    /// Creates a logger that reports about a hundred times over `total` steps.
    pub fn new(total: usize) -> Self {
        Self::every(total, total / REPORTS)
    }

    /// Creates a logger that reports every `every` steps.
    ///
    /// An interval of zero is treated as one.
    pub fn every(total: usize, every: usize) -> Self {
        Self {
            total,
            every: every.max(1),
            reported: 0,
        }
    }

    /// Returns how many progress events have been emitted.
    pub fn reported(&self) -> usize {
        self.reported
    }

    fn percent(&self, step: usize) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            100.0 * step as f64 / self.total as f64
        }
    }
}

impl<E: HasSample, A> Observer<E, A> for ProgressLogger {
    fn observe(&mut self, event: &E) -> Option<A> {
        let step = event.step();
        if step % self.every != 0 && step != self.total {
            return None;
        }

        self.reported += 1;
        tracing::info!(
            step,
            total = self.total,
            percent = self.percent(step),
            x = event.sample().x,
            "integration progress"
        );
        None
    }
}
