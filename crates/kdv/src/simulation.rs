use soliton_core::{Observer, StateVector};
use soliton_solvers::ode::{self, Action, Event, Integrator, Method, Solution};

use crate::{KdvField, SimulationError, Variant, scenario::{Grid, Parameters}};

/// Integrates a KdV variant on a grid, RK4 unless told otherwise.
///
/// A run takes `temporal_points - 1` steps of `t_interval`, so the solution
/// holds `temporal_points` samples with the initial condition first. The
/// field is sized from the initial condition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Simulation {
    grid: Grid,
    variant: Variant,
    method: Method,
}

impl Simulation {
    /// Creates a simulation using [`Method::Rk4`].
    pub fn new(grid: Grid, variant: Variant) -> Self {
        Self {
            grid,
            variant,
            method: Method::Rk4,
        }
    }

    /// Creates a simulation for a scenario's grid and equation.
    pub fn for_scenario<P: Parameters + ?Sized>(params: &P) -> Self {
        Self::new(params.grid(), params.variant())
    }

    /// Selects the integration method.
    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// Builds the field and an integrator positioned at `t = 0`.
    ///
    /// # Errors
    ///
    /// Fails if the grid is invalid or the field cannot be built.
    pub fn integrator(
        &self,
        initial: StateVector,
    ) -> Result<Integrator<KdvField>, SimulationError> {
        self.grid.validate()?;
        let field = KdvField::new(self.variant, self.grid.x_interval, initial.len())?;
        tracing::debug!(
            variant = %self.variant,
            spacing = self.grid.x_interval,
            points = field.points(),
            "built KdV field"
        );
        Ok(Integrator::new(self.method, initial, field, self.grid.t_interval)?)
    }

    /// Runs the simulation from `initial`, reporting each sample to `observer`.
    ///
    /// # Errors
    ///
    /// Fails if the integrator cannot be built or a step fails; a step
    /// failure carries the samples recorded before it.
    pub fn run<Obs>(&self, initial: StateVector, observer: Obs) -> Result<Solution, SimulationError>
    where
        Obs: for<'a> Observer<Event<'a>, Action>,
    {
        let mut integrator = self.integrator(initial)?;
        let steps = self.grid.iterations();

        tracing::info!(
            method = %self.method,
            variant = %self.variant,
            points = integrator.y().len(),
            steps,
            "starting simulation"
        );

        let solution = ode::run(&mut integrator, steps, observer)?;

        tracing::info!(
            status = ?solution.status,
            steps = solution.steps,
            t = integrator.x(),
            "simulation finished"
        );
        Ok(solution)
    }

    /// Runs the simulation without observation.
    ///
    /// # Errors
    ///
    /// See [`Simulation::run`].
    pub fn run_unobserved(&self, initial: StateVector) -> Result<Solution, SimulationError> {
        self.run(initial, ())
    }
}
