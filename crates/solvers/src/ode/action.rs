/// Control actions supported by [`run`](super::run).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the run early and return the samples so far.
    StopEarly,
}
