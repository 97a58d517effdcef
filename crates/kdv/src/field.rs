//! Discretized Korteweg-de Vries right-hand sides on a periodic grid.
//!
//! With `N` points spaced `h` apart, indices wrap modulo `N` and three
//! centered-difference operators are assembled as sparse matrices:
//!
//! ```text
//! A: third derivative,  p = 1/(2h³),  [ p, -2p, 2p, -p] at [-2, -1, +1, +2]
//! B: first derivative,  q = 1/(4h),   [ q, -q]          at [-1, +1]
//! C: diffusion,         r = 1/h²,     [-r, 2r, -r]      at [-1,  0, +1]
//! ```
//!
//! Each [`Variant`] combines them into `dy/dt = f(y)`:
//!
//! - [`Variant::Full`]: `A·y + B·y²`
//! - [`Variant::Dispersionless`]: `B·y²`
//! - [`Variant::Diffusive`]: `B·y² + C·y`

use std::{collections::BTreeMap, fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use soliton_core::{StateVector, VectorField, sparse::{self, SparseMatrix}};

use crate::{FieldError, ParameterError};

/// Third-derivative stencil, in units of `p`.
const DISPERSION: [(isize, f64); 4] = [(-2, 1.0), (-1, -2.0), (1, 2.0), (2, -1.0)];

/// First-derivative stencil, in units of `q`.
const ADVECTION: [(isize, f64); 2] = [(-1, 1.0), (1, -1.0)];

/// Diffusion stencil, in units of `r`.
const DIFFUSION: [(isize, f64); 3] = [(-1, -1.0), (0, 2.0), (1, -1.0)];

/// The form of the KdV equation being integrated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Variant {
    /// Nonlinear advection plus third-order dispersion.
    Full,
    /// Nonlinear advection only, which steepens into shocks.
    Dispersionless,
    /// Nonlinear advection with a diffusion term in place of dispersion.
    Diffusive,
}

impl Variant {
    /// All variants, in declaration order.
    pub const ALL: [Self; 3] = [Self::Full, Self::Dispersionless, Self::Diffusive];

    /// Returns the lowercase name of the variant.
    pub fn name(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Dispersionless => "dispersionless",
            Self::Diffusive => "diffusive",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|variant| variant.name() == normalized)
            .ok_or_else(|| ParameterError::UnknownEquation(s.to_owned()))
    }
}

/// A KdV vector field over a periodic grid.
///
/// The field ignores the independent variable. Evaluating it on a state whose
/// length differs from the grid fails with [`sparse::Error::DimensionMismatch`].
#[derive(Debug, Clone, PartialEq)]
pub struct KdvField {
    variant: Variant,
    dispersion: Option<SparseMatrix>,
    advection: SparseMatrix,
    diffusion: Option<SparseMatrix>,
}

impl KdvField {
    /// Builds the field for `variant` on `points` grid points spaced `spacing`
    /// apart.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidSpacing`] if `spacing` is not finite and
    /// positive, or [`FieldError::EmptyGrid`] if `points` is zero.
    pub fn new(variant: Variant, spacing: f64, points: usize) -> Result<Self, FieldError> {
        if !spacing.is_finite() || spacing <= 0.0 {
            return Err(FieldError::InvalidSpacing(spacing));
        }
        if points == 0 {
            return Err(FieldError::EmptyGrid);
        }

        let p = 1.0 / (2.0 * spacing.powi(3));
        let q = 1.0 / (4.0 * spacing);
        let r = 1.0 / spacing.powi(2);

        let advection = periodic_stencil(points, &ADVECTION, q)?;
        let dispersion = match variant {
            Variant::Full => Some(periodic_stencil(points, &DISPERSION, p)?),
            Variant::Dispersionless | Variant::Diffusive => None,
        };
        let diffusion = match variant {
            Variant::Diffusive => Some(periodic_stencil(points, &DIFFUSION, r)?),
            Variant::Full | Variant::Dispersionless => None,
        };

        Ok(Self {
            variant,
            dispersion,
            advection,
            diffusion,
        })
    }

    /// Builds the full KdV field `A·y + B·y²`.
    ///
    /// # Errors
    ///
    /// See [`KdvField::new`].
    pub fn full(spacing: f64, points: usize) -> Result<Self, FieldError> {
        Self::new(Variant::Full, spacing, points)
    }

    /// Builds the dispersionless field `B·y²`.
    ///
    /// # Errors
    ///
    /// See [`KdvField::new`].
    pub fn dispersionless(spacing: f64, points: usize) -> Result<Self, FieldError> {
        Self::new(Variant::Dispersionless, spacing, points)
    }

    /// Builds the diffusive field `B·y² + C·y`.
    ///
    /// # Errors
    ///
    /// See [`KdvField::new`].
    pub fn diffusive(spacing: f64, points: usize) -> Result<Self, FieldError> {
        Self::new(Variant::Diffusive, spacing, points)
    }

    /// Returns the variant this field implements.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Returns the number of grid points.
    pub fn points(&self) -> usize {
        self.advection.rows()
    }

    /// Returns the third-derivative matrix `A`, present for [`Variant::Full`].
    pub fn dispersion(&self) -> Option<&SparseMatrix> {
        self.dispersion.as_ref()
    }

    /// Returns the first-derivative matrix `B`.
    pub fn advection(&self) -> &SparseMatrix {
        &self.advection
    }

    /// Returns the diffusion matrix `C`, present for [`Variant::Diffusive`].
    pub fn diffusion(&self) -> Option<&SparseMatrix> {
        self.diffusion.as_ref()
    }
}

impl VectorField for KdvField {
    type Error = sparse::Error;

    fn evaluate(&self, _x: f64, y: &StateVector) -> Result<StateVector, Self::Error> {
        let mut dy = self.advection.multiply(&y.squared())?;
        if let Some(dispersion) = &self.dispersion {
            dy = dy + dispersion.multiply(y)?;
        }
        if let Some(diffusion) = &self.diffusion {
            dy = dy + diffusion.multiply(y)?;
        }
        Ok(dy)
    }
}

/// Assembles a stencil as a square matrix on a ring of `points` points.
///
/// On rings shorter than the stencil, offsets that wrap onto the same column
/// are summed into a single entry.
fn periodic_stencil(
    points: usize,
    stencil: &[(isize, f64)],
    scale: f64,
) -> Result<SparseMatrix, sparse::Error> {
    let ring = points as isize;
    let mut entries = BTreeMap::new();

    for row in 0..points {
        for &(offset, coefficient) in stencil {
            let col = (row as isize + offset).rem_euclid(ring) as usize;
            *entries.entry((row, col)).or_insert(0.0) += coefficient * scale;
        }
    }

    SparseMatrix::square(
        points,
        entries
            .into_iter()
            .map(|((row, col), value)| (row, col, value)),
    )
}
