#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use soliton_core::StateVector;

use crate::{ParameterError, Variant};

use super::{Grid, Parameters, check_finite, check_positive, soliton_profile, table_with};

/// Two solitons of different heights on one ring.
///
/// The taller soliton is faster, so with the defaults it starts behind the
/// shorter one and overtakes it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct Collision {
    pub x_interval: f64,
    pub t_interval: f64,
    pub number_of_spatial_points: usize,
    pub number_of_temporal_points: usize,
    pub alpha1: f64,
    pub alpha2: f64,
    pub spatial_offset1: f64,
    pub spatial_offset2: f64,
}

impl Default for Collision {
    fn default() -> Self {
        let grid = Grid::default();
        Self {
            x_interval: grid.x_interval,
            t_interval: grid.t_interval,
            number_of_spatial_points: 400,
            number_of_temporal_points: 2000,
            alpha1: 1.5,
            alpha2: 0.6,
            spatial_offset1: 0.1,
            spatial_offset2: 0.3,
        }
    }
}

impl Parameters for Collision {
    fn grid(&self) -> Grid {
        self.flat_grid()
    }

    fn variant(&self) -> Variant {
        Variant::Full
    }

    fn validate(&self) -> Result<(), ParameterError> {
        self.grid().validate()?;
        check_positive("alpha1", self.alpha1)?;
        check_positive("alpha2", self.alpha2)?;
        check_finite("spatial_offset1", self.spatial_offset1)?;
        check_finite("spatial_offset2", self.spatial_offset2)
    }

    fn initial_condition(&self) -> Result<StateVector, ParameterError> {
        self.validate()?;
        let grid = self.grid();
        let first = soliton_profile(&grid, self.alpha1, self.spatial_offset1);
        let second = soliton_profile(&grid, self.alpha2, self.spatial_offset2);
        Ok(first.zip(second).map(|(a, b)| a + b).collect())
    }

    fn table(&self) -> Vec<(&'static str, String)> {
        table_with(
            &self.grid(),
            vec![
                ("alpha1", self.alpha1.to_string()),
                ("alpha2", self.alpha2.to_string()),
                ("spatial_offset1", self.spatial_offset1.to_string()),
                ("spatial_offset2", self.spatial_offset2.to_string()),
            ],
        )
    }

    fn set(&mut self, name: &str, value: f64) -> Result<(), ParameterError> {
        if let Some(result) = self.set_grid_parameter(name, value) {
            return result;
        }
        match name {
            "alpha1" => self.alpha1 = value,
            "alpha2" => self.alpha2 = value,
            "spatial_offset1" => self.spatial_offset1 = value,
            "spatial_offset2" => self.spatial_offset2 = value,
            _ => return Err(ParameterError::UnknownParameter(name.to_owned())),
        }
        Ok(())
    }
}
