use soliton_core::Sample;

/// Event emitted by [`run`](super::run) for each recorded sample.
///
/// Step 0 is the initial state before any integration.
/// Steps 1..N are emitted after each integration step.
#[derive(Debug, Clone, Copy)]
pub struct Event<'a> {
    /// The step number (0 for initial, 1..N for integration steps).
    pub step: usize,

    /// The sample recorded at this step.
    pub sample: &'a Sample,
}
