//! Reusable observers for integration runs.
//!
//! This crate provides [`Observer`] implementations and capability traits that
//! work with the events emitted by [`soliton_solvers::ode::run`].
//!
//! # Modules
//!
//! - [`traits`] — Capability traits for generic observers
//!   ([`HasSample`], [`CanStopEarly`])
//!
//! # Observers
//!
//! - [`StabilityMonitor`] — stops a run once a stability factor drifts away
//!   from 1
//! - [`ProgressLogger`] — reports run progress through `tracing`
//!
//! [`Observer`]: soliton_core::Observer
//! [`HasSample`]: traits::HasSample
//! [`CanStopEarly`]: traits::CanStopEarly

pub mod traits;

mod progress;
mod stability;

pub use progress::ProgressLogger;
pub use stability::StabilityMonitor;
