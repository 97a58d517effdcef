//! Core traits and types for integrating discretized wave equations.
//!
//! This crate defines the shared abstractions that solvers, observers, and
//! equation builders build on:
//!
//! - [`StateVector`] — the dependent variable `y` of `dy/dx = f(x, y)`
//! - [`VectorField`] — the right-hand side `f(x, y)`
//! - [`Sample`] — a recorded `(x, y)` pair
//! - [`Observer`] — receives solver events and optionally returns control actions
//! - [`StepIntegrable`] — a value that can be stepped by `derivative * delta`
//! - [`sparse::SparseMatrix`] — compressed row storage with a checked
//!   matrix-vector product

mod field;
mod observer;
mod sample;
mod state;
mod step;

pub mod sparse;

pub use field::{FallibleField, VectorField};
pub use observer::Observer;
pub use sample::Sample;
pub use state::StateVector;
pub use step::{DerivativeOf, StepIntegrable};
