use crate::ParameterError;

use super::{check_positive, to_count};

/// Largest accepted number of spatial points.
pub const MAX_SPATIAL_POINTS: usize = 1 << 20;

/// Largest accepted number of time samples.
pub const MAX_TEMPORAL_POINTS: usize = 1 << 24;

/// A uniform space-time grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    /// Distance between neighbouring spatial points.
    pub x_interval: f64,
    /// Time step.
    pub t_interval: f64,
    /// Number of points on the periodic spatial ring.
    pub spatial_points: usize,
    /// Number of time samples, including the initial condition.
    pub temporal_points: usize,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            x_interval: 0.1,
            t_interval: 0.001,
            spatial_points: 200,
            temporal_points: 1000,
        }
    }
}

impl Grid {
    /// Checks that both intervals are positive and both counts are non-zero
    /// and at most [`MAX_SPATIAL_POINTS`] and [`MAX_TEMPORAL_POINTS`].
    ///
    /// # Errors
    ///
    /// Returns the first invalid field found.
    pub fn validate(&self) -> Result<(), ParameterError> {
        check_positive("x_interval", self.x_interval)?;
        check_positive("t_interval", self.t_interval)?;
        check_count("number_of_spatial_points", self.spatial_points, MAX_SPATIAL_POINTS)?;
        check_count("number_of_temporal_points", self.temporal_points, MAX_TEMPORAL_POINTS)
    }

    /// Sets one of the grid parameters shared by every scenario.
    ///
    /// Returns `None` if `name` is not a grid parameter, so callers can fall
    /// through to their own parameters. Counts must be non-negative integers;
    /// the value is not otherwise validated.
    pub fn set_shared(&mut self, name: &str, value: f64) -> Option<Result<(), ParameterError>> {
        let result = match name {
            "x_interval" => {
                self.x_interval = value;
                Ok(())
            }
            "t_interval" => {
                self.t_interval = value;
                Ok(())
            }
            "number_of_spatial_points" => {
                to_count(name, value).map(|count| self.spatial_points = count)
            }
            "number_of_temporal_points" => {
                to_count(name, value).map(|count| self.temporal_points = count)
            }
            _ => return None,
        };
        Some(result)
    }

    /// Returns the number of integration steps, one fewer than the samples.
    pub fn iterations(&self) -> usize {
        self.temporal_points.saturating_sub(1)
    }

    /// Returns the spatial coordinate of point `n`.
    pub fn position(&self, n: usize) -> f64 {
        n as f64 * self.x_interval
    }
}

fn check_count(name: &'static str, value: usize, max: usize) -> Result<(), ParameterError> {
    if value == 0 {
        Err(ParameterError::TooFew {
            name,
            min: 1,
            value,
        })
    } else if value > max {
        Err(ParameterError::TooMany { name, max, value })
    } else {
        Ok(())
    }
}
