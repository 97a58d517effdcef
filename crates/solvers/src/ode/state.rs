use std::fmt;

use soliton_core::{Sample, StateVector, VectorField};

use super::Error;

/// The default tolerance used by [`OdeState::is_stable`].
pub const DEFAULT_STABILITY_THRESHOLD: f64 = 0.01;

/// A diagnostic function of `(x, y)` expected to stay near 1 while an
/// integration is numerically stable.
pub type StabilityFn = Box<dyn Fn(f64, &StateVector) -> f64 + Send + Sync>;

/// The state shared by every integration method.
///
/// Holds the initial and current `(x, y)` values, the step interval, and an
/// optional stability condition. After `k` steps, the current `x` equals the
/// initial `x` plus `k` intervals.
pub struct OdeState {
    initial: Sample,
    current: Sample,
    interval: f64,
    stability: Option<StabilityFn>,
}

impl OdeState {
    /// Creates a state starting at `x = 0` with the given initial `y`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInterval`] if `interval` is not finite and
    /// positive.
    pub fn new(initial_y: StateVector, interval: f64) -> Result<Self, Error> {
        validate_interval(interval)?;

        let initial = Sample::new(0.0, initial_y);
        Ok(Self {
            current: initial.clone(),
            initial,
            interval,
            stability: None,
        })
    }

    /// Sets the initial independent variable and resets to it.
    #[must_use]
    pub fn starting_at(mut self, x: f64) -> Self {
        self.initial.x = x;
        self.reset();
        self
    }

    /// Returns the current independent variable.
    #[must_use]
    pub fn x(&self) -> f64 {
        self.current.x
    }

    /// Returns the current dependent variable.
    #[must_use]
    pub fn y(&self) -> &StateVector {
        &self.current.y
    }

    /// Returns the current `(x, y)` pair.
    #[must_use]
    pub fn current(&self) -> &Sample {
        &self.current
    }

    /// Returns the initial `(x, y)` pair.
    #[must_use]
    pub fn initial(&self) -> &Sample {
        &self.initial
    }

    /// Returns the step interval.
    #[must_use]
    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Changes the step interval used by subsequent steps.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInterval`] if `interval` is not finite and
    /// positive.
    pub fn set_interval(&mut self, interval: f64) -> Result<(), Error> {
        validate_interval(interval)?;
        self.interval = interval;
        Ok(())
    }

    /// Restores the current values to the initial values.
    ///
    /// The stability condition is kept.
    pub fn reset(&mut self) {
        self.current = self.initial.clone();
    }

    /// Attaches a stability condition, replacing any previous one.
    pub fn set_stability_fn<S>(&mut self, stability: S)
    where
        S: Fn(f64, &StateVector) -> f64 + Send + Sync + 'static,
    {
        self.stability = Some(Box::new(stability));
    }

    /// Removes the stability condition.
    pub fn clear_stability_fn(&mut self) {
        self.stability = None;
    }

    /// Returns `true` if a stability condition is attached.
    #[must_use]
    pub fn has_stability_fn(&self) -> bool {
        self.stability.is_some()
    }

    /// Evaluates the stability condition at the current `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingStabilityFunction`] if no stability condition
    /// is attached.
    pub fn stability_factor(&self) -> Result<f64, Error> {
        let stability = self
            .stability
            .as_ref()
            .ok_or(Error::MissingStabilityFunction)?;
        Ok(stability(self.current.x, &self.current.y))
    }

    /// Returns `true` if the stability factor is within
    /// [`DEFAULT_STABILITY_THRESHOLD`] of 1.
    #[must_use]
    pub fn is_stable(&self) -> bool {
        self.is_stable_within(DEFAULT_STABILITY_THRESHOLD)
    }

    /// Returns `true` if `|stability_factor - 1| < threshold`.
    ///
    /// Returns `false` when no stability condition is attached.
    #[must_use]
    pub fn is_stable_within(&self, threshold: f64) -> bool {
        self.stability_factor()
            .is_ok_and(|factor| (factor - 1.0).abs() < threshold)
    }

    /// Evaluates `field` at the current `(x, y)`.
    pub(crate) fn slope<F: VectorField>(&self, field: &F) -> Result<StateVector, Error> {
        evaluate(field, self.current.x, &self.current.y)
    }

    /// Moves forward one interval and replaces the current `y`.
    pub(crate) fn commit(&mut self, next: StateVector) {
        self.current.x += self.interval;
        self.current.y = next;
    }
}

impl fmt::Debug for OdeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OdeState")
            .field("initial", &self.initial)
            .field("current", &self.current)
            .field("interval", &self.interval)
            .field("has_stability_fn", &self.stability.is_some())
            .finish()
    }
}

/// Evaluates `field` at `(x, y)` and checks the result has the length of `y`.
pub(crate) fn evaluate<F: VectorField>(
    field: &F,
    x: f64,
    y: &StateVector,
) -> Result<StateVector, Error> {
    let slope = field.evaluate(x, y).map_err(Error::field)?;
    if slope.len() != y.len() {
        return Err(Error::LengthMismatch {
            expected: y.len(),
            found: slope.len(),
        });
    }
    Ok(slope)
}

fn validate_interval(interval: f64) -> Result<(), Error> {
    if interval.is_finite() && interval > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidInterval(interval))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn state() -> OdeState {
        OdeState::new(StateVector::from([1.0, 2.0]), 0.1).expect("valid interval")
    }

    #[test]
    fn starts_at_zero_by_default() {
        let state = state();

        assert_eq!(state.x(), 0.0);
        assert_eq!(state.y(), &StateVector::from([1.0, 2.0]));
        assert_eq!(state.current(), state.initial());
    }

    #[test]
    fn commit_advances_by_one_interval() {
        let mut state = state().starting_at(2.0);

        state.commit(StateVector::from([3.0, 4.0]));
        state.commit(StateVector::from([5.0, 6.0]));

        assert_relative_eq!(state.x(), 2.2, epsilon = 1e-12);
        assert_eq!(state.y(), &StateVector::from([5.0, 6.0]));
    }

    #[test]
    fn reset_restores_initial_values_exactly() {
        let mut state = state().starting_at(0.7);
        let initial = state.initial().clone();

        for _ in 0..5 {
            state.commit(StateVector::from([9.0, 9.0]));
        }
        state.reset();

        assert_eq!(state.x().to_bits(), initial.x.to_bits());
        assert_eq!(state.current(), &initial);
    }

    #[test]
    fn reset_keeps_stability_fn() {
        let mut state = state();
        state.set_stability_fn(|_x, _y| 1.0);

        state.reset();

        assert!(state.has_stability_fn());
    }

    #[test]
    fn rejects_invalid_intervals() {
        for interval in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            let result = OdeState::new(StateVector::from([1.0]), interval);
            assert!(matches!(result, Err(Error::InvalidInterval(_))));
        }

        let mut state = state();
        assert!(state.set_interval(-1.0).is_err());
        assert!(state.set_interval(0.5).is_ok());
        assert_relative_eq!(state.interval(), 0.5);
    }

    #[test]
    fn stability_factor_requires_a_function() {
        let state = state();

        assert!(matches!(
            state.stability_factor(),
            Err(Error::MissingStabilityFunction)
        ));
        assert!(!state.is_stable());
        assert!(!state.is_stable_within(f64::INFINITY));
    }

    #[test]
    fn stability_factor_uses_current_values() {
        let mut state = state();
        state.set_stability_fn(|x, y| x + y[0]);

        assert_relative_eq!(state.stability_factor().unwrap(), 1.0);

        state.commit(StateVector::from([2.0, 0.0]));

        assert_relative_eq!(state.stability_factor().unwrap(), 2.1, epsilon = 1e-12);
    }

    #[test]
    fn stability_threshold_is_strict() {
        let mut state = state();

        state.set_stability_fn(|_x, _y| 1.005);
        assert!(state.is_stable());

        state.set_stability_fn(|_x, _y| 1.5);
        assert!(!state.is_stable_within(0.5));
        assert!(state.is_stable_within(0.5 + 1e-9));

        state.set_stability_fn(|_x, _y| 0.75);
        assert!(!state.is_stable_within(0.25));
    }

    #[test]
    fn evaluate_rejects_wrong_length() {
        let field = |_x: f64, _y: &StateVector| StateVector::from([1.0]);

        let result = evaluate(&field, 0.0, &StateVector::from([1.0, 2.0]));

        assert!(matches!(
            result,
            Err(Error::LengthMismatch {
                expected: 2,
                found: 1
            })
        ));
    }
}
