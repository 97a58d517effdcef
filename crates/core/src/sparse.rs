//! Sparse matrices in compressed row storage.
//!
//! A [`SparseMatrix`] stores only its nonzero entries, grouped by row:
//!
//! ```text
//! values          [v0, v1, v2, ...]    one per stored entry
//! column_indices  [c0, c1, c2, ...]    parallel to `values`
//! row_pointers    [0, p1, ..., nnz]    length rows + 1
//! ```
//!
//! Row `i` owns `values[row_pointers[i]..row_pointers[i + 1]]`. Rows with no
//! entries have an empty range.
//!
//! The only supported operation is a dimension-checked matrix-vector product
//! whose cost is proportional to the number of stored entries.
//!
//! # Example
//!
//! ```
//! use soliton_core::{StateVector, sparse::SparseMatrix};
//!
//! let matrix = SparseMatrix::new(3, 3, [(0, 1, 2.0), (2, 0, 3.0), (1, 2, 1.0), (0, 2, 5.0)])?;
//! let product = matrix.multiply(&StateVector::from([1.0, 2.0, 3.0]))?;
//!
//! assert_eq!(product, StateVector::from([19.0, 3.0, 3.0]));
//! # Ok::<(), soliton_core::sparse::Error>(())
//! ```

mod error;

pub use error::Error;

use crate::StateVector;

/// An immutable sparse matrix in compressed row storage.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrix {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
    column_indices: Vec<usize>,
    row_pointers: Vec<usize>,
}

impl SparseMatrix {
    /// Builds a `rows × cols` matrix from `(row, column, value)` entries.
    ///
    /// Entries may be supplied in any order. Rows with no entries are treated
    /// as all zeros.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if an entry lies outside the
    /// declared dimensions, or [`Error::DuplicateEntry`] if two entries share
    /// the same coordinates.
    pub fn new<I>(rows: usize, cols: usize, entries: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (usize, usize, f64)>,
    {
        let mut entries: Vec<_> = entries.into_iter().collect();

        if let Some(&(row, col, _)) = entries.iter().find(|(r, c, _)| *r >= rows || *c >= cols) {
            return Err(Error::IndexOutOfBounds {
                row,
                col,
                rows,
                cols,
            });
        }

        entries.sort_by_key(|&(row, col, _)| (row, col));

        if let Some(pair) = entries
            .windows(2)
            .find(|pair| (pair[0].0, pair[0].1) == (pair[1].0, pair[1].1))
        {
            return Err(Error::DuplicateEntry {
                row: pair[0].0,
                col: pair[0].1,
            });
        }

        // Count entries per row, then prefix-sum into offsets.
        let mut row_pointers = vec![0; rows + 1];
        for &(row, _, _) in &entries {
            row_pointers[row + 1] += 1;
        }
        for i in 0..rows {
            row_pointers[i + 1] += row_pointers[i];
        }

        let (column_indices, values) = entries.into_iter().map(|(_, col, v)| (col, v)).unzip();

        Ok(Self {
            rows,
            cols,
            values,
            column_indices,
            row_pointers,
        })
    }

    /// Builds an `n × n` matrix from `(row, column, value)` entries.
    ///
    /// # Errors
    ///
    /// See [`SparseMatrix::new`].
    pub fn square<I>(n: usize, entries: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (usize, usize, f64)>,
    {
        Self::new(n, n, entries)
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the number of stored entries.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Returns the stored values in row-major order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the column index of each stored value.
    #[must_use]
    pub fn column_indices(&self) -> &[usize] {
        &self.column_indices
    }

    /// Returns the row offsets into [`values`](Self::values).
    #[must_use]
    pub fn row_pointers(&self) -> &[usize] {
        &self.row_pointers
    }

    /// Returns the `(column, value)` pairs stored in `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.rows()`.
    pub fn row(&self, row: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let range = self.row_pointers[row]..self.row_pointers[row + 1];
        self.column_indices[range.clone()]
            .iter()
            .copied()
            .zip(self.values[range].iter().copied())
    }

    /// Multiplies the matrix by a vector.
    ///
    /// The result has one element per row, where element `i` is the sum of
    /// `value * vector[j]` over the entries `(i, j, value)` stored in row `i`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if `vector.len() != self.cols()`.
    pub fn multiply(&self, vector: &StateVector) -> Result<StateVector, Error> {
        self.multiply_slice(vector.as_slice())
    }

    /// Multiplies the matrix by a slice of values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if `vector.len() != self.cols()`.
    pub fn multiply_slice(&self, vector: &[f64]) -> Result<StateVector, Error> {
        if vector.len() != self.cols {
            return Err(Error::DimensionMismatch {
                expected: self.cols,
                found: vector.len(),
            });
        }

        Ok(self
            .row_pointers
            .windows(2)
            .map(|bounds| {
                (bounds[0]..bounds[1])
                    .map(|k| self.values[k] * vector[self.column_indices[k]])
                    .sum::<f64>()
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example() -> SparseMatrix {
        SparseMatrix::square(3, [(0, 1, 2.0), (2, 0, 3.0), (1, 2, 1.0), (0, 2, 5.0)])
            .expect("valid entries")
    }

    #[test]
    fn builds_compressed_rows() {
        let matrix = example();

        assert_eq!(matrix.values(), &[2.0, 5.0, 1.0, 3.0]);
        assert_eq!(matrix.column_indices(), &[1, 2, 2, 0]);
        assert_eq!(matrix.row_pointers(), &[0, 2, 3, 4]);
        assert_eq!(matrix.nnz(), 4);
    }

    #[test]
    fn repeated_products() {
        let matrix = example();

        let once = matrix.multiply(&StateVector::from([1.0, 2.0, 3.0])).unwrap();
        assert_eq!(once, StateVector::from([19.0, 3.0, 3.0]));

        let twice = matrix.multiply(&once).unwrap();
        assert_eq!(twice, StateVector::from([21.0, 3.0, 57.0]));
    }

    #[test]
    fn empty_rows_produce_zeros() {
        let matrix = SparseMatrix::new(4, 2, [(0, 0, 1.0), (3, 1, 2.0)]).unwrap();

        assert_eq!(matrix.row_pointers(), &[0, 1, 1, 1, 2]);
        assert_eq!(matrix.row(1).count(), 0);

        let product = matrix.multiply_slice(&[5.0, 7.0]).unwrap();
        assert_eq!(product, StateVector::from([5.0, 0.0, 0.0, 14.0]));
    }

    #[test]
    fn row_iterates_stored_entries() {
        let matrix = example();
        let row: Vec<_> = matrix.row(0).collect();

        assert_eq!(row, vec![(1, 2.0), (2, 5.0)]);
    }

    #[test]
    fn empty_matrix() {
        let matrix = SparseMatrix::square(0, Vec::new()).unwrap();

        assert_eq!(matrix.row_pointers(), &[0]);
        assert!(matrix.multiply(&StateVector::default()).unwrap().is_empty());
    }

    #[test]
    fn rejects_wrong_vector_length() {
        let matrix = example();
        let result = matrix.multiply(&StateVector::from([1.0, 2.0]));

        assert!(matches!(
            result,
            Err(Error::DimensionMismatch {
                expected: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn rejects_duplicate_entries() {
        let result = SparseMatrix::square(2, [(0, 1, 1.0), (1, 0, 2.0), (0, 1, 3.0)]);

        assert!(matches!(
            result,
            Err(Error::DuplicateEntry { row: 0, col: 1 })
        ));
    }

    #[test]
    fn rejects_out_of_bounds_entries() {
        let result = SparseMatrix::new(2, 3, [(0, 3, 1.0)]);

        assert!(matches!(
            result,
            Err(Error::IndexOutOfBounds { row: 0, col: 3, .. })
        ));
    }
}
