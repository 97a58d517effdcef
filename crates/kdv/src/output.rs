//! Comma-delimited result files.
//!
//! A result file starts with one `name, value` line per parameter, followed
//! by a header row of spatial positions and one row per sample:
//!
//! ```text
//! alpha, 1.5
//! number_of_spatial_points, 3
//! , 0, 0.1, 0.2
//! 0, 0.1, 0.7, 0.1
//! 0.001, 0.11, 0.68, 0.11
//! ```
//!
//! The header row starts with an empty cell so each column lines up with the
//! time column of the sample rows.

use std::io::{self, Write};

use soliton_core::Sample;

use crate::scenario::Grid;

/// Writes a parameter table, position header, and samples to `writer`.
///
/// The last row is not newline-terminated.
///
/// # Errors
///
/// Returns any error raised by `writer`.
pub fn write_delimited<W: Write>(
    mut writer: W,
    parameters: &[(&str, String)],
    grid: &Grid,
    samples: &[Sample],
) -> io::Result<()> {
    for (name, value) in parameters {
        writeln!(writer, "{name}, {value}")?;
    }

    for n in 0..grid.spatial_points {
        write!(writer, ", {}", grid.position(n))?;
    }

    for sample in samples {
        write!(writer, "\n{}", sample.x)?;
        for value in &sample.y {
            write!(writer, ", {value}")?;
        }
    }

    writer.flush()
}

/// Returns `<scenario>_<timestamp>.csv`.
pub fn file_name(scenario: &str, timestamp: u64) -> String {
    format!("{scenario}_{timestamp}.csv")
}

#[cfg(test)]
mod tests {
    use super::*;

    use soliton_core::StateVector;

    #[test]
    fn writes_parameters_header_and_rows() {
        let grid = Grid {
            x_interval: 0.5,
            spatial_points: 3,
            ..Grid::default()
        };
        let parameters = [("alpha", "1.5".to_owned()), ("period", "20".to_owned())];
        let samples = [
            Sample::new(0.0, StateVector::from([1.0, 2.0, 3.0])),
            Sample::new(0.25, StateVector::from([1.5, 2.5, -3.5])),
        ];
        let mut buffer = Vec::new();

        write_delimited(&mut buffer, &parameters, &grid, &samples).unwrap();

        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "alpha, 1.5\nperiod, 20\n, 0, 0.5, 1\n0, 1, 2, 3\n0.25, 1.5, 2.5, -3.5"
        );
    }

    #[test]
    fn no_samples_leaves_only_the_header() {
        let grid = Grid {
            spatial_points: 2,
            x_interval: 0.25,
            ..Grid::default()
        };
        let mut buffer = Vec::new();

        write_delimited(&mut buffer, &[], &grid, &[]).unwrap();

        assert_eq!(String::from_utf8(buffer).unwrap(), ", 0, 0.25");
    }

    #[test]
    fn file_names_carry_the_scenario_and_timestamp() {
        assert_eq!(file_name("wave_breaking", 1_700_000_000), "wave_breaking_1700000000.csv");
    }
}
