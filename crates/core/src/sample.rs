use crate::StateVector;

/// A recorded `(x, y)` pair from an integration run.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// The independent variable (typically time).
    pub x: f64,

    /// The dependent variable at `x`.
    pub y: StateVector,
}

impl Sample {
    /// Creates a new sample from an independent and dependent value.
    pub fn new(x: f64, y: StateVector) -> Self {
        Self { x, y }
    }
}
