use soliton_core::{Observer, StateVector};
use soliton_solvers::ode::DEFAULT_STABILITY_THRESHOLD;

use crate::traits::{CanStopEarly, HasSample};

/// Stops a run as soon as a stability factor leaves `1 ± threshold`.
///
/// The stability function is evaluated on every observed sample. The first
/// step whose factor satisfies `|factor - 1| >= threshold` is recorded and
/// the run is asked to stop.
///
/// Observers are moved into the run, so to inspect the monitor afterwards
/// forward events to it from a closure:
///
/// ```
/// use soliton_core::{Observer, StateVector};
/// use soliton_observers::StabilityMonitor;
/// use soliton_solvers::ode::{self, Action, Event, Integrator, Method};
///
/// let field = |_x: f64, y: &StateVector| y.clone();
/// let mut integrator = Integrator::new(Method::Euler, StateVector::from([1.0]), field, 0.1)?;
///
/// // Growth relative to the initial value.
/// let mut monitor = StabilityMonitor::new(|_x, y: &StateVector| y[0]).with_threshold(0.5);
/// let solution = ode::run(&mut integrator, 100, |event: &Event<'_>| -> Option<Action> {
///     monitor.observe(event)
/// })?;
///
/// assert_eq!(monitor.unstable_at(), Some(5));
/// assert_eq!(solution.samples.len(), 6);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct StabilityMonitor<S> {
    stability: S,
    threshold: f64,
    last_factor: Option<f64>,
    unstable_at: Option<usize>,
}

impl<S> StabilityMonitor<S>
where
    S: Fn(f64, &StateVector) -> f64,
{
    /// Creates a monitor using [`DEFAULT_STABILITY_THRESHOLD`].
    pub fn new(stability: S) -> Self {
        Self {
            stability,
            threshold: DEFAULT_STABILITY_THRESHOLD,
            last_factor: None,
            unstable_at: None,
        }
    }

    /// Sets the allowed distance of the factor from 1.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Returns the threshold in use.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Returns the factor computed for the most recent sample.
    pub fn last_factor(&self) -> Option<f64> {
        self.last_factor
    }

    /// Returns the first step found to be unstable, if any.
    pub fn unstable_at(&self) -> Option<usize> {
        self.unstable_at
    }
}

impl<E, A, S> Observer<E, A> for StabilityMonitor<S>
where
    E: HasSample,
    A: CanStopEarly,
    S: Fn(f64, &StateVector) -> f64,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        let sample = event.sample();
        let factor = (self.stability)(sample.x, &sample.y);
        self.last_factor = Some(factor);

        if (factor - 1.0).abs() < self.threshold {
            return None;
        }

        tracing::warn!(
            step = event.step(),
            x = sample.x,
            factor,
            threshold = self.threshold,
            "stability factor out of range, stopping"
        );
        self.unstable_at.get_or_insert(event.step());
        Some(A::stop_early())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use soliton_core::Sample;
    use soliton_solvers::ode::{self, Action, Event, Integrator, Method, Status};

    #[test]
    fn stable_samples_continue() {
        let mut monitor = StabilityMonitor::new(|_x, _y: &StateVector| 1.001);
        let sample = Sample::new(0.0, StateVector::from([1.0]));
        let event = Event {
            step: 0,
            sample: &sample,
        };

        let action: Option<Action> = monitor.observe(&event);

        assert_eq!(action, None);
        assert_eq!(monitor.unstable_at(), None);
        assert_relative_eq!(monitor.last_factor().unwrap(), 1.001);
    }

    #[test]
    fn boundary_factor_is_unstable() {
        let mut monitor = StabilityMonitor::new(|_x, _y: &StateVector| 1.5).with_threshold(0.5);
        let sample = Sample::new(2.0, StateVector::from([1.0]));
        let event = Event {
            step: 3,
            sample: &sample,
        };

        let action: Option<Action> = monitor.observe(&event);

        assert_eq!(action, Some(Action::StopEarly));
        assert_eq!(monitor.unstable_at(), Some(3));
    }

    #[test]
    fn stops_a_growing_run() {
        // Euler on dy/dx = y with y0 = 1 gives 1.1^n; 1.1^5 > 1.5.
        let field = |_x: f64, y: &StateVector| y.clone();
        let mut integrator =
            Integrator::new(Method::Euler, StateVector::from([1.0]), field, 0.1).unwrap();
        let mut monitor = StabilityMonitor::new(|_x, y: &StateVector| y[0]).with_threshold(0.5);

        let solution = ode::run(&mut integrator, 50, |event: &Event<'_>| -> Option<Action> {
            monitor.observe(event)
        })
        .unwrap();

        assert_eq!(solution.status, Status::StoppedByObserver);
        assert_eq!(monitor.unstable_at(), Some(5));
        assert_eq!(solution.samples.len(), 6);
    }
}
