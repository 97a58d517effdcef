use thiserror::Error;

/// Errors that can occur when building or applying a sparse matrix.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("duplicate entry at ({row}, {col})")]
    DuplicateEntry { row: usize, col: usize },

    #[error("entry ({row}, {col}) lies outside a {rows}x{cols} matrix")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("vector has length {found}, expected {expected}")]
    DimensionMismatch { expected: usize, found: usize },
}
