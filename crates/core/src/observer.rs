/// Watches a run sample by sample.
///
/// A run hands each event `E` to its observer and continues unless the
/// observer answers with an action `A`. Events and actions are defined by
/// the run; for ODE runs they are a step number plus sample, and a request to
/// stop.
///
/// Any `FnMut(&E) -> Option<A>` closure is an observer, and `()` never acts.
pub trait Observer<E, A> {
    /// Inspects `event`, returning `Some(action)` to steer the run.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

/// A no-op observer that always returns `None`.
impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}
