#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use soliton_core::StateVector;

use crate::{ParameterError, Variant};

use super::{Grid, Parameters, check_finite, check_positive, soliton_profile, table_with};

/// A soliton profile evolved without dispersion, so it steepens into a shock.
///
/// The `equation` selects between the pure [`Variant::Dispersionless`] form
/// and the [`Variant::Diffusive`] form, which smooths the shock front.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct ShockWave {
    pub x_interval: f64,
    pub t_interval: f64,
    pub number_of_spatial_points: usize,
    pub number_of_temporal_points: usize,
    pub alpha: f64,
    pub spatial_position: f64,
    pub equation: Variant,
}

impl Default for ShockWave {
    fn default() -> Self {
        let grid = Grid::default();
        Self {
            x_interval: grid.x_interval,
            t_interval: grid.t_interval,
            number_of_spatial_points: grid.spatial_points,
            number_of_temporal_points: grid.temporal_points,
            alpha: 0.7,
            spatial_position: 0.2,
            equation: Variant::Dispersionless,
        }
    }
}

impl ShockWave {
    /// Selects the equation variant.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::UnsupportedEquation`] for [`Variant::Full`],
    /// whose dispersion prevents shock formation.
    pub fn set_equation(&mut self, equation: Variant) -> Result<(), ParameterError> {
        check_equation(equation)?;
        self.equation = equation;
        Ok(())
    }
}

fn check_equation(equation: Variant) -> Result<(), ParameterError> {
    match equation {
        Variant::Dispersionless | Variant::Diffusive => Ok(()),
        Variant::Full => Err(ParameterError::UnsupportedEquation(equation)),
    }
}

impl Parameters for ShockWave {
    fn grid(&self) -> Grid {
        self.flat_grid()
    }

    fn variant(&self) -> Variant {
        self.equation
    }

    fn validate(&self) -> Result<(), ParameterError> {
        self.grid().validate()?;
        check_positive("alpha", self.alpha)?;
        check_finite("spatial_position", self.spatial_position)?;
        check_equation(self.equation)
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
                ("equation", self.equation.to_string()),
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
    fn defaults_use_the_dispersionless_equation() {
        let params = ShockWave::default();

        let y = params.initial_condition().unwrap();

        assert_eq!(params.variant(), Variant::Dispersionless);
        assert_relative_eq!(y[40], 12.0 * 0.49, epsilon = 1e-12);
    }

    #[test]
    fn only_shock_forming_equations_are_accepted() {
        let mut params = ShockWave::default();

        params.set_equation(Variant::Diffusive).unwrap();
        assert_eq!(params.variant(), Variant::Diffusive);

        assert!(matches!(
            params.set_equation(Variant::Full),
            Err(ParameterError::UnsupportedEquation(Variant::Full))
        ));
        assert_eq!(params.variant(), Variant::Diffusive);

        params.equation = Variant::Full;
        assert!(params.validate().is_err());
    }

    #[test]
    fn equation_appears_in_the_table() {
        let table = ShockWave::default().table();

        assert!(table.contains(&("equation", "dispersionless".to_owned())));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn equation_reads_from_toml() {
        let params: ShockWave = toml::from_str("equation = \"diffusive\"").unwrap();

        assert_eq!(params.equation, Variant::Diffusive);
        assert_relative_eq!(params.alpha, 0.7);
    }
}
