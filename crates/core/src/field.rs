use std::convert::Infallible;

use crate::StateVector;

/// The right-hand side `f(x, y)` of an ODE `dy/dx = f(x, y)`.
///
/// A vector field is a pure function of the independent variable `x` and the
/// state `y`. It may fail, for example when `y` does not match the dimension
/// of a matrix the field was built from.
///
/// Closures of the form `Fn(f64, &StateVector) -> StateVector` implement this
/// trait as infallible fields. Wrap a closure returning `Result` in
/// [`FallibleField`] to use it as a fallible field.
pub trait VectorField {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Evaluates the field at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the field cannot be evaluated at `(x, y)`.
    fn evaluate(&self, x: f64, y: &StateVector) -> Result<StateVector, Self::Error>;
}

impl<F> VectorField for F
where
    F: Fn(f64, &StateVector) -> StateVector,
{
    type Error = Infallible;

    fn evaluate(&self, x: f64, y: &StateVector) -> Result<StateVector, Self::Error> {
        Ok(self(x, y))
    }
}

/// Adapts a closure returning `Result` into a [`VectorField`].
#[derive(Debug, Clone, Copy)]
pub struct FallibleField<F>(pub F);

impl<F, E> VectorField for FallibleField<F>
where
    F: Fn(f64, &StateVector) -> Result<StateVector, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    type Error = E;

    fn evaluate(&self, x: f64, y: &StateVector) -> Result<StateVector, Self::Error> {
        (self.0)(x, y)
    }
}
