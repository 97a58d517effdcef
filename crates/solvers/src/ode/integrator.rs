use soliton_core::{Sample, StateVector, VectorField};

use super::{Error, Euler, Leapfrog, Method, OdeState, Rk4, Step};

/// The strategy bound to an [`Integrator`] at construction.
#[derive(Debug, Clone)]
enum Strategy {
    Euler(Euler),
    Leapfrog(Leapfrog),
    Rk4(Rk4),
}

impl Strategy {
    fn for_method(method: Method) -> Self {
        match method {
            Method::Euler => Self::Euler(Euler),
            Method::Leapfrog => Self::Leapfrog(Leapfrog::new()),
            Method::Rk4 => Self::Rk4(Rk4),
        }
    }

    fn advance<F: VectorField>(&mut self, state: &mut OdeState, field: &F) -> Result<(), Error> {
        match self {
            Self::Euler(step) => step.advance(state, field),
            Self::Leapfrog(step) => step.advance(state, field),
            Self::Rk4(step) => step.advance(state, field),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Euler(step) => step.reset(),
            Self::Leapfrog(step) => step.reset(),
            Self::Rk4(step) => step.reset(),
        }
    }
}

/// Integrates `dy/dx = f(x, y)` with a method chosen once at construction.
///
/// The integrator owns the [`OdeState`] and the vector field for the length
/// of one run. Every operation is forwarded to the selected strategy; an
/// operation the strategy lacks fails with [`Error::UnsupportedOperation`].
///
/// # Example
///
/// ```
/// use soliton_core::StateVector;
/// use soliton_solvers::ode::Integrator;
///
/// let field = |_x: f64, y: &StateVector| y * -1.0;
/// let mut integrator = Integrator::named("rk4", StateVector::from([1.0]), field, 0.01)?;
///
/// let sample = integrator.iterate()?;
/// assert!((sample.y[0] - (-0.01_f64).exp()).abs() < 1e-10);
/// # Ok::<(), soliton_solvers::ode::Error>(())
/// ```
#[derive(Debug)]
pub struct Integrator<F> {
    method: Method,
    strategy: Strategy,
    state: OdeState,
    field: F,
}

impl<F: VectorField> Integrator<F> {
    /// Creates an integrator starting at `x = 0`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInterval`] if `interval` is not finite and
    /// positive.
    pub fn new(
        method: Method,
        initial: StateVector,
        field: F,
        interval: f64,
    ) -> Result<Self, Error> {
        Ok(Self {
            method,
            strategy: Strategy::for_method(method),
            state: OdeState::new(initial, interval)?,
            field,
        })
    }

    /// Creates an integrator from a method identifier such as `"rk4"`.
    ///
    /// See [`Method`]'s `FromStr` impl for the accepted spellings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedMethod`] if `method` names no supported
    /// method, or [`Error::InvalidInterval`] for a bad interval.
    pub fn named(
        method: &str,
        initial: StateVector,
        field: F,
        interval: f64,
    ) -> Result<Self, Error> {
        Self::new(method.parse()?, initial, field, interval)
    }

    /// Sets the initial independent variable and resets to it.
    #[must_use]
    pub fn starting_at(mut self, x: f64) -> Self {
        self.state = self.state.starting_at(x);
        self.strategy.reset();
        self
    }

    /// Advances one interval and returns a copy of the new `(x, y)` pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the vector field fails or returns a vector of the
    /// wrong length. The integrator is left at its previous values.
    pub fn iterate(&mut self) -> Result<Sample, Error> {
        self.strategy.advance(&mut self.state, &self.field)?;
        Ok(self.state.current().clone())
    }

    /// Restores the initial values and clears any method history.
    pub fn reset(&mut self) {
        self.state.reset();
        self.strategy.reset();
    }

    /// Returns the selected method.
    #[must_use]
    pub fn method(&self) -> Method {
        self.method
    }

    /// Returns the underlying state.
    #[must_use]
    pub fn state(&self) -> &OdeState {
        &self.state
    }

    /// Returns the vector field being integrated.
    #[must_use]
    pub fn field(&self) -> &F {
        &self.field
    }

    /// Returns the current `(x, y)` pair.
    #[must_use]
    pub fn current(&self) -> &Sample {
        self.state.current()
    }

    /// Returns the current independent variable.
    #[must_use]
    pub fn x(&self) -> f64 {
        self.state.x()
    }

    /// Returns the current dependent variable.
    #[must_use]
    pub fn y(&self) -> &StateVector {
        self.state.y()
    }

    /// Returns the step interval.
    #[must_use]
    pub fn interval(&self) -> f64 {
        self.state.interval()
    }

    /// Changes the step interval used by subsequent steps.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInterval`] if `interval` is not finite and
    /// positive.
    pub fn set_interval(&mut self, interval: f64) -> Result<(), Error> {
        self.state.set_interval(interval)
    }

    /// Attaches a stability condition, see [`OdeState::set_stability_fn`].
    pub fn set_stability_fn<S>(&mut self, stability: S)
    where
        S: Fn(f64, &StateVector) -> f64 + Send + Sync + 'static,
    {
        self.state.set_stability_fn(stability);
    }

    /// Evaluates the stability condition at the current values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingStabilityFunction`] if none is attached.
    pub fn stability_factor(&self) -> Result<f64, Error> {
        self.state.stability_factor()
    }

    /// See [`OdeState::is_stable`].
    #[must_use]
    pub fn is_stable(&self) -> bool {
        self.state.is_stable()
    }

    /// See [`OdeState::is_stable_within`].
    #[must_use]
    pub fn is_stable_within(&self, threshold: f64) -> bool {
        self.state.is_stable_within(threshold)
    }

    /// Returns the state one interval back, as tracked by leapfrog.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedOperation`] for methods that keep no
    /// history.
    pub fn previous(&self) -> Result<Option<&Sample>, Error> {
        match &self.strategy {
            Strategy::Leapfrog(leapfrog) => Ok(leapfrog.previous()),
            Strategy::Euler(_) | Strategy::Rk4(_) => Err(Error::UnsupportedOperation {
                method: self.method,
                operation: "previous",
            }),
        }
    }
}
