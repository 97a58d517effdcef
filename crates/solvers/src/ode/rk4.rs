use soliton_core::{StepIntegrable, VectorField};

use super::{Error, OdeState, Step, state::evaluate};

/// Classical fourth-order Runge-Kutta.
///
/// ```text
/// k1 = f(x,       y)
/// k2 = f(x + h/2, y + h/2 * k1)
/// k3 = f(x + h/2, y + h/2 * k2)
/// k4 = f(x + h,   y + h   * k3)
///
/// y_{n+1} = y_n + h/6 * (k1 + 2 k2 + 2 k3 + k4)
/// ```
///
/// Four field evaluations per step, no history beyond the current state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rk4;

impl Step for Rk4 {
    fn advance<F: VectorField>(&mut self, state: &mut OdeState, field: &F) -> Result<(), Error> {
        let h = state.interval();
        let half = 0.5 * h;
        let x = state.x();
        let y = state.y();

        let k1 = evaluate(field, x, y)?;
        let k2 = evaluate(field, x + half, &(y + &(&k1 * half)))?;
        let k3 = evaluate(field, x + half, &(y + &(&k2 * half)))?;
        let k4 = evaluate(field, x + h, &(y + &(&k3 * h)))?;

        let slope = k1 + k2 * 2.0 + k3 * 2.0 + k4;
        let next = y.step(slope, h / 6.0);

        state.commit(next);
        Ok(())
    }
}
