use soliton_core::sparse;
use soliton_solvers::ode;
use thiserror::Error;

use crate::Variant;

/// Errors that can occur when building a KdV field.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum FieldError {
    #[error("spatial interval must be finite and positive, got {0}")]
    InvalidSpacing(f64),

    #[error("a periodic grid needs at least one point")]
    EmptyGrid,

    #[error(transparent)]
    Sparse(#[from] sparse::Error),
}

/// Errors that can occur when validating or editing scenario parameters.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParameterError {
    #[error("{name} must be finite and positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },

    #[error("{name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: f64 },

    #[error("{name} must lie in [0, 1], got {value}")]
    OutsideUnitInterval { name: &'static str, value: f64 },

    #[error("{name} must be at least {min}, got {value}")]
    TooFew {
        name: &'static str,
        min: usize,
        value: usize,
    },

    #[error("{name} must be at most {max}, got {value}")]
    TooMany {
        name: &'static str,
        max: usize,
        value: usize,
    },

    #[error("{name} must be a non-negative integer, got {value}")]
    NotACount { name: String, value: f64 },

    #[error("unknown parameter `{0}`")]
    UnknownParameter(String),

    #[error("unknown scenario `{0}`")]
    UnknownScenario(String),

    #[error("unknown equation `{0}`")]
    UnknownEquation(String),

    #[error("the {0} equation is not available for this scenario")]
    UnsupportedEquation(Variant),
}

/// Errors that can occur while running a simulation.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Parameters(#[from] ParameterError),

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error(transparent)]
    Integrator(#[from] ode::Error),

    #[error(transparent)]
    Run(#[from] ode::Failure),
}
