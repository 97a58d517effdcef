//! Korteweg-de Vries equations on a periodic grid.
//!
//! The KdV equation `u_t + 6 u u_x + u_xxx = 0` is discretized in space with
//! centered finite differences, turning it into a large ODE system that the
//! integrators in [`soliton_solvers::ode`] advance in time.
//!
//! - [`field`]: sparse right-hand sides for the full, dispersionless, and
//!   diffusive equations
//! - [`scenario`]: default parameters and initial conditions for soliton
//!   propagation, collision, wave breaking, and shock formation
//! - [`Simulation`]: wires a scenario's field into an integrator and runs it
//! - [`output`]: comma-delimited result files
//!
//! # Example
//!
//! ```
//! use soliton_kdv::{Simulation, scenario::{Parameters, Propagation}};
//!
//! let params = Propagation {
//!     number_of_spatial_points: 50,
//!     number_of_temporal_points: 11,
//!     ..Propagation::default()
//! };
//!
//! let solution = Simulation::for_scenario(&params).run_unobserved(params.initial_condition()?)?;
//!
//! assert_eq!(solution.samples.len(), 11);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
pub mod field;
pub mod output;
pub mod scenario;
mod simulation;

pub use error::{FieldError, ParameterError, SimulationError};
pub use field::{KdvField, Variant};
pub use simulation::Simulation;
