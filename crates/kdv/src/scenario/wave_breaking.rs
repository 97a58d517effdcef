#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use soliton_core::StateVector;

use crate::{ParameterError, Variant};

use super::{
    Grid, Parameters, check_finite, check_fraction, check_positive, sine_point, table_with,
};

/// A positive half-period sine pulse that breaks up into solitons.
///
/// The ring holds `floor(offset · N) + 1` leading zeros, then the pulse
/// sampled every `x_interval` over half a period, then zeros up to `N`
/// points. A pulse that would run past the end of the ring is cut off.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct WaveBreaking {
    pub x_interval: f64,
    pub t_interval: f64,
    pub number_of_spatial_points: usize,
    pub number_of_temporal_points: usize,
    pub amplitude: f64,
    pub period: f64,
    /// Start of the pulse as a fraction of the ring.
    pub spatial_offset: f64,
}

impl Default for WaveBreaking {
    fn default() -> Self {
        let grid = Grid::default();
        Self {
            x_interval: grid.x_interval,
            t_interval: grid.t_interval,
            number_of_spatial_points: 600,
            number_of_temporal_points: grid.temporal_points,
            amplitude: 1.0,
            period: 20.0,
            spatial_offset: 0.1,
        }
    }
}

impl WaveBreaking {
    /// Returns the number of points sampled from the sine pulse.
    pub fn pulse_points(&self) -> usize {
        (self.period / 2.0 / self.x_interval) as usize
    }

    /// Returns the number of zeros ahead of the pulse.
    pub fn leading_zeros(&self) -> usize {
        (self.spatial_offset * self.number_of_spatial_points as f64) as usize + 1
    }
}

impl Parameters for WaveBreaking {
    fn grid(&self) -> Grid {
        self.flat_grid()
    }

    fn variant(&self) -> Variant {
        Variant::Full
    }

    fn validate(&self) -> Result<(), ParameterError> {
        self.grid().validate()?;
        check_finite("amplitude", self.amplitude)?;
        check_positive("period", self.period)?;
        check_fraction("spatial_offset", self.spatial_offset)
    }

    fn initial_condition(&self) -> Result<StateVector, ParameterError> {
        self.validate()?;

        let points = self.number_of_spatial_points;
        let pulse_points = self.pulse_points();
        if self.leading_zeros().saturating_add(pulse_points) > points {
            tracing::warn!(
                points,
                pulse_points,
                leading_zeros = self.leading_zeros(),
                "sine pulse does not fit on the ring, truncating"
            );
        }

        let mut y = vec![0.0; self.leading_zeros()];
        y.extend(
            (0..pulse_points.min(points))
                .map(|n| sine_point(self.amplitude, self.period, n as f64 * self.x_interval)),
        );
        y.resize(points, 0.0);
        Ok(StateVector::from(y))
    }

    fn table(&self) -> Vec<(&'static str, String)> {
        table_with(
            &self.grid(),
            vec![
                ("amplitude", self.amplitude.to_string()),
                ("period", self.period.to_string()),
                ("spatial_offset", self.spatial_offset.to_string()),
            ],
        )
    }

    fn set(&mut self, name: &str, value: f64) -> Result<(), ParameterError> {
        if let Some(result) = self.set_grid_parameter(name, value) {
            return result;
        }
        match name {
            "amplitude" => self.amplitude = value,
            "period" => self.period = value,
            "spatial_offset" => self.spatial_offset = value,
            _ => return Err(ParameterError::UnknownParameter(name.to_owned())),
        }
        Ok(())
    }
}
