use soliton_core::VectorField;

use super::{Error, OdeState};

/// A single-step integration strategy.
///
/// A strategy advances an [`OdeState`] by exactly one interval using the
/// vector field `f(x, y)`. Strategies that keep history beyond the current
/// state (such as [`Leapfrog`](super::Leapfrog)) clear it in [`Step::reset`].
pub trait Step {
    /// Advances `state` by one interval.
    ///
    /// On error the state is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the vector field fails or returns a vector whose
    /// length differs from the state.
    fn advance<F: VectorField>(&mut self, state: &mut OdeState, field: &F) -> Result<(), Error>;

    /// Clears any history kept between steps.
    fn reset(&mut self) {}
}
