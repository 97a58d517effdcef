use soliton_core::Sample;

/// Indicates how the run terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Completed all requested steps.
    Complete,

    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// The result of an integration run.
#[derive(Debug, Clone)]
pub struct Solution {
    /// How the run terminated.
    pub status: Status,

    /// Samples from each step, starting with the initial state.
    pub samples: Vec<Sample>,

    /// Number of integration steps completed.
    pub steps: usize,
}

impl Solution {
    /// Returns the last recorded sample.
    #[must_use]
    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }
}
