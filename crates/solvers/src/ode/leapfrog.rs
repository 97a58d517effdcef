use soliton_core::{Sample, StepIntegrable, VectorField};

use super::{Error, Euler, OdeState, Step};

/// Where a [`Leapfrog`] integrator is in its two-phase life cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Phase {
    /// No step taken yet; the next step is an Euler step.
    #[default]
    Bootstrapping,

    /// At least one step taken; `previous` is the state one interval back.
    SteadyState { previous: Sample },
}

/// Leapfrog (explicit midpoint) integration.
///
/// ```text
/// y_{n+1} = y_{n-1} + 2h * f(x_n, y_n)
/// ```
///
/// Second order and time-reversible, but needs the state one interval back.
/// The first step has no such state, so it is a full Euler step of size `h`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Leapfrog {
    phase: Phase,
}

impl Leapfrog {
    /// Creates a leapfrog integrator in the [`Phase::Bootstrapping`] phase.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Returns the state one interval back, if a step has been taken.
    #[must_use]
    pub fn previous(&self) -> Option<&Sample> {
        match &self.phase {
            Phase::Bootstrapping => None,
            Phase::SteadyState { previous } => Some(previous),
        }
    }
}

impl Step for Leapfrog {
    fn advance<F: VectorField>(&mut self, state: &mut OdeState, field: &F) -> Result<(), Error> {
        let before = state.current().clone();

        match &self.phase {
            Phase::Bootstrapping => Euler.advance(state, field)?,
            Phase::SteadyState { previous } => {
                let slope = state.slope(field)?;
                let next = previous.y.step(slope, 2.0 * state.interval());
                state.commit(next);
            }
        }

        self.phase = Phase::SteadyState { previous: before };
        Ok(())
    }

    fn reset(&mut self) {
        self.phase = Phase::Bootstrapping;
    }
}
