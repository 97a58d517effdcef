use crate::StateVector;

/// A value an explicit method can move along its slope.
///
/// `step(slope, delta)` returns `self + slope · delta`. Every update in the
/// Euler, leapfrog, and Runge-Kutta methods is of this form, including the
/// intermediate Runge-Kutta stages.
pub trait StepIntegrable<Delta> {
    /// The slope type, `dy/dx` for a step in `x`.
    type Derivative;

    /// Returns `self + derivative · delta`.
    #[must_use]
    fn step(&self, derivative: Self::Derivative, delta: Delta) -> Self;
}

/// The slope type of `T` for steps of `Delta`.
pub type DerivativeOf<T, Delta> = <T as StepIntegrable<Delta>>::Derivative;

/// Element-wise `y + slope · delta`.
///
/// # Panics
///
/// Panics if `derivative` and `self` differ in length.
impl StepIntegrable<f64> for StateVector {
    type Derivative = StateVector;

    fn step(&self, derivative: StateVector, delta: f64) -> Self {
        self + &(derivative * delta)
    }
}
