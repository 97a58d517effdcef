use soliton_core::{StepIntegrable, VectorField};

use super::{Error, OdeState, Step};

/// Explicit (forward) Euler.
///
/// ```text
/// y_{n+1} = y_n + h * f(x_n, y_n)
/// x_{n+1} = x_n + h
/// ```
///
/// First order, one field evaluation per step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Euler;

impl Step for Euler {
    fn advance<F: VectorField>(&mut self, state: &mut OdeState, field: &F) -> Result<(), Error> {
        let slope = state.slope(field)?;
        let next = state.y().step(slope, state.interval());
        state.commit(next);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use soliton_core::StateVector;

    fn linear_field(_x: f64, y: &StateVector) -> StateVector {
        StateVector::from([y[0] + 2.0 * y[1], 3.0 * y[0] + 4.0 * y[1]])
    }

    #[test]
    fn first_step() {
        let mut state = OdeState::new(StateVector::from([1.0, 2.0]), 0.1).unwrap();

        Euler.advance(&mut state, &linear_field).unwrap();

        assert_relative_eq!(state.x(), 0.1, epsilon = 1e-4);
        assert_relative_eq!(state.y()[0], 1.5, epsilon = 1e-4);
        assert_relative_eq!(state.y()[1], 3.1, epsilon = 1e-4);
    }

    #[test]
    fn exponential_growth_converges_from_below() {
        // dy/dx = y on [0, 1]; Euler gives (1 + h)^n, just under e.
        let mut state = OdeState::new(StateVector::from([1.0]), 0.001).unwrap();
        let field = |_x: f64, y: &StateVector| y.clone();

        for _ in 0..1000 {
            Euler.advance(&mut state, &field).unwrap();
        }

        let expected = 1.001_f64.powi(1000);
        assert_relative_eq!(state.y()[0], expected, epsilon = 1e-9);
        assert!(state.y()[0] < std::f64::consts::E);
    }
}
