//! Fixed-step integrators for first-order ODEs `dy/dx = f(x, y)`.
//!
//! Three explicit methods share the [`OdeState`] contract and the [`Step`]
//! trait:
//!
//! - [`Euler`] — first order, one field evaluation per step
//! - [`Leapfrog`] — second order, bootstrapped with one Euler step
//! - [`Rk4`] — classical fourth-order Runge-Kutta
//!
//! [`Integrator`] binds one of them, chosen by [`Method`], to a state and a
//! vector field. [`run`] drives an integrator for a number of steps and
//! records every sample:
//!
//! ```text
//! samples[0]     = (x0, y0)
//! samples[n]     = integrator.iterate()    for n in 1..=steps
//! ```
//!
//! # Example
//!
//! ```
//! use soliton_core::StateVector;
//! use soliton_solvers::ode::{self, Integrator, Method, Status};
//!
//! let field = |_x: f64, y: &StateVector| y.clone();
//! let mut integrator = Integrator::new(Method::Rk4, StateVector::from([1.0]), field, 0.1)?;
//!
//! let solution = ode::run_unobserved(&mut integrator, 10)?;
//!
//! assert_eq!(solution.status, Status::Complete);
//! assert_eq!(solution.samples.len(), 11);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod action;
mod error;
mod euler;
mod event;
mod integrator;
mod leapfrog;
mod method;
mod rk4;
mod solution;
mod state;
mod step;

#[cfg(test)]
mod tests;

pub use action::Action;
pub use error::{Error, Failure};
pub use euler::Euler;
pub use event::Event;
pub use integrator::Integrator;
pub use leapfrog::{Leapfrog, Phase};
pub use method::Method;
pub use rk4::Rk4;
pub use solution::{Solution, Status};
pub use state::{DEFAULT_STABILITY_THRESHOLD, OdeState, StabilityFn};
pub use step::Step;

use soliton_core::{Observer, VectorField};

/// Runs `steps` integration steps and records every sample.
///
/// # Algorithm
///
/// 1. Record the integrator's current `(x, y)` as sample 0.
/// 2. For each step:
///    - Call [`Integrator::iterate`].
///    - Record the returned sample.
///    - Emit an [`Event`] to the observer.
///    - If the observer returns [`Action::StopEarly`], terminate.
/// 3. Return the solution with `steps + 1` samples.
///
/// # Observer
///
/// The observer receives an [`Event`] for the initial sample and after each
/// step, and may return [`Action::StopEarly`] to end the run early.
///
/// # Errors
///
/// Returns a [`Failure`] if a step fails. The run is not retried; the
/// failure carries the samples recorded before the failing step.
pub fn run<F, Obs>(
    integrator: &mut Integrator<F>,
    steps: usize,
    mut observer: Obs,
) -> Result<Solution, Failure>
where
    F: VectorField,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    let mut samples = Vec::with_capacity(steps + 1);
    samples.push(integrator.current().clone());

    let event = Event {
        step: 0,
        sample: &samples[0],
    };
    if let Some(Action::StopEarly) = observer.observe(&event) {
        return Ok(Solution {
            status: Status::StoppedByObserver,
            samples,
            steps: 0,
        });
    }

    for step in 1..=steps {
        let sample = match integrator.iterate() {
            Ok(sample) => sample,
            Err(error) => {
                return Err(Failure {
                    step,
                    samples,
                    error,
                });
            }
        };
        samples.push(sample);

        let event = Event {
            step,
            sample: &samples[step],
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(Solution {
                status: Status::StoppedByObserver,
                samples,
                steps: step,
            });
        }
    }

    Ok(Solution {
        status: Status::Complete,
        samples,
        steps,
    })
}

/// Runs `steps` integration steps without observation.
///
/// This is a convenience wrapper around [`run`] that discards events.
///
/// # Errors
///
/// Returns a [`Failure`] if a step fails.
pub fn run_unobserved<F: VectorField>(
    integrator: &mut Integrator<F>,
    steps: usize,
) -> Result<Solution, Failure> {
    run(integrator, steps, ())
}
