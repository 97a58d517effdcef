//! Physical scenarios: default parameters and initial conditions.
//!
//! Each scenario is a flat, validated parameter set that knows which
//! [`Variant`] of the equation it integrates and how to build its initial
//! state on the grid:
//!
//! - [`Propagation`]: a single soliton travelling along the ring
//! - [`Collision`]: two solitons of different speeds overtaking each other
//! - [`WaveBreaking`]: a half-period sine pulse that breaks into solitons
//! - [`ShockWave`]: a soliton under the dispersionless or diffusive equation
//!
//! Parameters are addressed by name, so they can be edited uniformly from a
//! configuration file or the command line.

mod collision;
mod grid;
mod propagation;
mod shock_wave;
mod wave_breaking;

use std::{f64::consts::PI, fmt, str::FromStr};

use soliton_core::StateVector;

pub use collision::Collision;
pub use grid::{Grid, MAX_SPATIAL_POINTS, MAX_TEMPORAL_POINTS};
pub use propagation::Propagation;
pub use shock_wave::ShockWave;
pub use wave_breaking::WaveBreaking;

use crate::{ParameterError, Variant};

/// A named, validated set of scenario parameters.
pub trait Parameters {
    /// Returns the discretization grid.
    fn grid(&self) -> Grid;

    /// Returns the equation variant integrated by this scenario.
    fn variant(&self) -> Variant;

    /// Checks every parameter.
    ///
    /// # Errors
    ///
    /// Returns the first invalid parameter found.
    fn validate(&self) -> Result<(), ParameterError>;

    /// Builds the initial state, one value per spatial point.
    ///
    /// # Errors
    ///
    /// Returns a [`ParameterError`] if the parameters are invalid.
    fn initial_condition(&self) -> Result<StateVector, ParameterError>;

    /// Returns every parameter as a `(name, value)` pair, sorted by name.
    fn table(&self) -> Vec<(&'static str, String)>;

    /// Sets a numeric parameter by name.
    ///
    /// Point counts must be non-negative integers.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::UnknownParameter`] for names this scenario
    /// does not have, or [`ParameterError::NotACount`] for fractional counts.
    fn set(&mut self, name: &str, value: f64) -> Result<(), ParameterError>;
}

/// Identifies one of the built-in scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScenarioKind {
    Propagation,
    Collision,
    WaveBreaking,
    ShockWave,
}

impl ScenarioKind {
    /// All scenarios, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Propagation,
        Self::Collision,
        Self::WaveBreaking,
        Self::ShockWave,
    ];

    /// Returns the snake-case name used in file names and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Propagation => "propagation",
            Self::Collision => "collision",
            Self::WaveBreaking => "wave_breaking",
            Self::ShockWave => "shock_wave",
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScenarioKind {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| ParameterError::UnknownScenario(s.to_owned()))
    }
}

/// One of the built-in scenarios with its parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Scenario {
    Propagation(Propagation),
    Collision(Collision),
    WaveBreaking(WaveBreaking),
    ShockWave(ShockWave),
}

impl Scenario {
    /// Returns the scenario of the given kind with its default parameters.
    pub fn defaults(kind: ScenarioKind) -> Self {
        match kind {
            ScenarioKind::Propagation => Self::Propagation(Propagation::default()),
            ScenarioKind::Collision => Self::Collision(Collision::default()),
            ScenarioKind::WaveBreaking => Self::WaveBreaking(WaveBreaking::default()),
            ScenarioKind::ShockWave => Self::ShockWave(ShockWave::default()),
        }
    }

    /// Returns which scenario this is.
    pub fn kind(&self) -> ScenarioKind {
        match self {
            Self::Propagation(_) => ScenarioKind::Propagation,
            Self::Collision(_) => ScenarioKind::Collision,
            Self::WaveBreaking(_) => ScenarioKind::WaveBreaking,
            Self::ShockWave(_) => ScenarioKind::ShockWave,
        }
    }

    /// Returns the scenario's snake-case name.
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Returns the parameters as a trait object.
    pub fn parameters(&self) -> &dyn Parameters {
        match self {
            Self::Propagation(params) => params,
            Self::Collision(params) => params,
            Self::WaveBreaking(params) => params,
            Self::ShockWave(params) => params,
        }
    }

    /// Returns the parameters as a mutable trait object.
    pub fn parameters_mut(&mut self) -> &mut dyn Parameters {
        match self {
            Self::Propagation(params) => params,
            Self::Collision(params) => params,
            Self::WaveBreaking(params) => params,
            Self::ShockWave(params) => params,
        }
    }
}

impl Parameters for Scenario {
    fn grid(&self) -> Grid {
        self.parameters().grid()
    }

    fn variant(&self) -> Variant {
        self.parameters().variant()
    }

    fn validate(&self) -> Result<(), ParameterError> {
        self.parameters().validate()
    }

    fn initial_condition(&self) -> Result<StateVector, ParameterError> {
        self.parameters().initial_condition()
    }

    fn table(&self) -> Vec<(&'static str, String)> {
        self.parameters().table()
    }

    fn set(&mut self, name: &str, value: f64) -> Result<(), ParameterError> {
        self.parameters_mut().set(name, value)
    }
}

/// Implements grid access for scenarios that store the grid as the four flat
/// fields `x_interval`, `t_interval`, `number_of_spatial_points` and
/// `number_of_temporal_points`.
macro_rules! flat_grid {
    ($($scenario:ty),+ $(,)?) => {$(
        impl $scenario {
            fn flat_grid(&self) -> Grid {
                Grid {
                    x_interval: self.x_interval,
                    t_interval: self.t_interval,
                    spatial_points: self.number_of_spatial_points,
                    temporal_points: self.number_of_temporal_points,
                }
            }

            /// Applies [`Grid::set_shared`] to the flat fields.
            fn set_grid_parameter(
                &mut self,
                name: &str,
                value: f64,
            ) -> Option<Result<(), ParameterError>> {
                let mut grid = self.flat_grid();
                let result = grid.set_shared(name, value)?;
                self.x_interval = grid.x_interval;
                self.t_interval = grid.t_interval;
                self.number_of_spatial_points = grid.spatial_points;
                self.number_of_temporal_points = grid.temporal_points;
                Some(result)
            }
        }
    )+};
}

flat_grid!(Propagation, Collision, WaveBreaking, ShockWave);

/// Evaluates the single-soliton solution of the KdV equation.
///
/// ```text
/// u(x, t; α) = 12 α² sech²(α (x − 4 α² t))
/// ```
///
/// The soliton travels right at speed `4α²` with height `12α²`.
pub fn soliton(x: f64, t: f64, alpha: f64) -> f64 {
    let alpha2 = alpha * alpha;
    let sech = 1.0 / (alpha * (x - 4.0 * alpha2 * t)).cosh();
    12.0 * alpha2 * sech * sech
}

/// Samples a soliton at `t = 0` centred `position · N` points into the grid.
fn soliton_profile(grid: &Grid, alpha: f64, position: f64) -> impl Iterator<Item = f64> {
    let centre = grid.spatial_points as f64 * position;
    let spacing = grid.x_interval;
    (0..grid.spatial_points).map(move |n| soliton(spacing * (n as f64 - centre), 0.0, alpha))
}

/// Samples `amplitude · sin(2π x / period)` at `x = n h`.
fn sine_point(amplitude: f64, period: f64, x: f64) -> f64 {
    amplitude * (2.0 * PI / period * x).sin()
}

fn check_positive(name: &'static str, value: f64) -> Result<(), ParameterError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ParameterError::NotPositive { name, value })
    }
}

fn check_finite(name: &'static str, value: f64) -> Result<(), ParameterError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ParameterError::NotFinite { name, value })
    }
}

fn check_fraction(name: &'static str, value: f64) -> Result<(), ParameterError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ParameterError::OutsideUnitInterval { name, value })
    }
}

/// Converts a point count given as a number.
fn to_count(name: &str, value: f64) -> Result<usize, ParameterError> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= usize::MAX as f64 {
        Ok(value as usize)
    } else {
        Err(ParameterError::NotACount {
            name: name.to_owned(),
            value,
        })
    }
}

/// Builds a parameter table from the grid entries plus `extra`, sorted by name.
fn table_with(grid: &Grid, extra: Vec<(&'static str, String)>) -> Vec<(&'static str, String)> {
    let mut table = vec![
        ("number_of_spatial_points", grid.spatial_points.to_string()),
        ("number_of_temporal_points", grid.temporal_points.to_string()),
        ("t_interval", grid.t_interval.to_string()),
        ("x_interval", grid.x_interval.to_string()),
    ];
    table.extend(extra);
    table.sort_by_key(|(name, _)| *name);
    table
}
