use std::error::Error as StdError;

use thiserror::Error;

use soliton_core::Sample;

use super::Method;

/// Errors that can occur while setting up or stepping an integrator.
#[derive(Debug, Error)]
pub enum Error {
    #[error("'{0}' is not a supported method for the numerical solution of ODEs")]
    UnsupportedMethod(String),

    #[error("the {method} method does not support `{operation}`")]
    UnsupportedOperation {
        method: Method,
        operation: &'static str,
    },

    #[error("no stability condition function has been set")]
    MissingStabilityFunction,

    #[error("interval must be finite and positive, got {0}")]
    InvalidInterval(f64),

    #[error("vector field returned {found} values for a state of length {expected}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("vector field error: {0}")]
    Field(#[source] Box<dyn StdError + Send + Sync>),
}

impl Error {
    pub(crate) fn field<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Field(Box::new(err))
    }
}

/// A run that aborted because a step failed.
///
/// Carries the samples recorded before the failing step so callers can
/// inspect how far the integration got.
#[derive(Debug, Error)]
#[error("integration failed at step {step}")]
pub struct Failure {
    /// The step that failed (1 for the first integration step).
    pub step: usize,

    /// Samples recorded before the failure, starting with the initial state.
    pub samples: Vec<Sample>,

    /// The error raised by the failing step.
    #[source]
    pub error: Error,
}
