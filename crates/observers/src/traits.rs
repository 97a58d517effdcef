//! Capability traits for generic observers.
//!
//! These traits abstract over solver-specific event and action types, so an
//! observer can be written once against the capabilities it needs.
//!
//! # Event traits
//!
//! - [`HasSample`] — events that carry a step number and an `(x, y)` sample
//!
//! # Action traits
//!
//! - [`CanStopEarly`] — actions that can signal early termination
//!
//! # Example
//!
//! ```rust
//! use soliton_core::Observer;
//! use soliton_observers::traits::{CanStopEarly, HasSample};
//!
//! struct StopPast {
//!     x_max: f64,
//! }
//!
//! impl<E: HasSample, A: CanStopEarly> Observer<E, A> for StopPast {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         (event.sample().x > self.x_max).then(A::stop_early)
//!     }
//! }
//! ```

use soliton_core::Sample;
use soliton_solvers::ode;

/// An event that carries a recorded sample.
pub trait HasSample {
    /// Returns the step number, 0 for the initial sample.
    fn step(&self) -> usize;

    /// Returns the sample recorded at this step.
    fn sample(&self) -> &Sample;
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that stops the solver early.
    fn stop_early() -> Self;
}

impl HasSample for ode::Event<'_> {
    fn step(&self) -> usize {
        self.step
    }

    fn sample(&self) -> &Sample {
        self.sample
    }
}

impl CanStopEarly for ode::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}
