//! Numerical solvers for first-order ODEs `dy/dx = f(x, y)`.
//!
//! # Modules
//!
//! - [`ode`] — fixed-step explicit integrators (Euler, leapfrog, RK4), a
//!   uniform [`ode::Integrator`] façade over them, and the [`ode::run`] loop
//!   that records a solution.

pub mod ode;
