#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use soliton_core::StateVector;

use crate::{ParameterError, Variant};

use super::{Grid, Parameters, check_finite, check_positive, soliton_profile, table_with};

/// A single soliton travelling along the ring under the full KdV equation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct Propagation {
    pub x_interval: f64,
    pub t_interval: f64,
    pub number_of_spatial_points: usize,
    pub number_of_temporal_points: usize,
    /// Soliton parameter; height `12α²`, speed `4α²`.
    pub alpha: f64,
    /// Initial peak position as a fraction of the ring.
    pub spatial_position: f64,
}

impl Default for Propagation {
    fn default() -> Self {
        let grid = Grid::default();
        Self {
            x_interval: grid.x_interval,
            t_interval: grid.t_interval,
            number_of_spatial_points: grid.spatial_points,
            number_of_temporal_points: grid.temporal_points,
            alpha: 1.5,
            spatial_position: 0.3,
        }
    }
}

impl Parameters for Propagation {
    fn grid(&self) -> Grid {
        self.flat_grid()
    }

    fn variant(&self) -> Variant {
        Variant::Full
    }

    fn validate(&self) -> Result<(), ParameterError> {
        self.grid().validate()?;
        check_positive("alpha", self.alpha)?;
        check_finite("spatial_position", self.spatial_position)
    }

    fn initial_condition(&self) -> Result<StateVector, ParameterError> {
        self.validate()?;
        Ok(soliton_profile(&self.grid(), self.alpha, self.spatial_position).collect())
    }

    fn table(&self) -> Vec<(&'static str, String)> {
        table_with(
            &self.grid(),
            vec![
                ("alpha", self.alpha.to_string()),
                ("spatial_position", self.spatial_position.to_string()),
            ],
        )
    }

    fn set(&mut self, name: &str, value: f64) -> Result<(), ParameterError> {
        if let Some(result) = self.set_grid_parameter(name, value) {
            return result;
        }
        match name {
            "alpha" => self.alpha = value,
            "spatial_position" => self.spatial_position = value,
            _ => return Err(ParameterError::UnknownParameter(name.to_owned())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn peak_sits_at_the_requested_position() {
        let params = Propagation::default();

        let y = params.initial_condition().unwrap();

        // 200 points at 30% puts the peak exactly on point 60.
        assert_eq!(y.len(), 200);
        assert_relative_eq!(y[60], 27.0);
        assert_relative_eq!(y[59], y[61], epsilon = 1e-12);
        assert!(y[0] < 1e-5);
        assert!(y[199] < 1e-6);
    }

    #[test]
    fn table_is_sorted_by_name() {
        let names: Vec<_> = Propagation::default()
            .table()
            .into_iter()
            .map(|(name, _)| name)
            .collect();

        assert_eq!(
            names,
            vec![
                "alpha",
                "number_of_spatial_points",
                "number_of_temporal_points",
                "spatial_position",
                "t_interval",
                "x_interval",
            ]
        );
    }

    #[test]
    fn invalid_alpha_is_rejected() {
        let params = Propagation {
            alpha: 0.0,
            ..Propagation::default()
        };

        assert!(matches!(
            params.initial_condition(),
            Err(ParameterError::NotPositive { name: "alpha", .. })
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_toml_keeps_defaults() {
        let params: Propagation =
            toml::from_str("alpha = 0.8\nnumber_of_spatial_points = 64\n").unwrap();

        assert_relative_eq!(params.alpha, 0.8);
        assert_eq!(params.number_of_spatial_points, 64);
        assert_relative_eq!(params.spatial_position, 0.3);
        assert_relative_eq!(params.t_interval, 0.001);

        assert!(toml::from_str::<Propagation>("alpha1 = 0.8").is_err());
    }
}
