//! Error types returned by [`crate::dlx::Matrix`] operations.

use thiserror::Error;

/// Formats the upper bound of an [`DlxError::IndexOutOfRange`], which may
/// be absent when the matrix has no valid indices at all (e.g. no rows
/// have been appended yet).
fn describe_max(max: Option<usize>) -> String {
    match max {
        Some(m) => format!("max {m}"),
        None => "no valid indices (none appended yet)".to_string(),
    }
}

/// Errors returned by the DLX engine's public operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DlxError {
    /// [`Matrix::new`](crate::dlx::Matrix::new) was called with a
    /// non-positive number of primary columns.
    #[error("primary column count must be positive")]
    InvalidArgument,

    /// A row or column index passed to [`Matrix::add_row`](crate::dlx::Matrix::add_row)
    /// or [`Matrix::add_to_solution`](crate::dlx::Matrix::add_to_solution) fell
    /// outside the matrix's declared bounds.
    #[error("index {index} out of range ({})", describe_max(*max))]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The largest valid index, or `None` if there are no valid
        /// indices to compare against (e.g. no rows appended yet).
        max: Option<usize>,
    },

    /// [`Matrix::add_row`](crate::dlx::Matrix::add_row) was given column
    /// indices that were not strictly ascending.
    #[error("row column indices must be strictly ascending (index {index} did not increase past {previous})")]
    NotAscending {
        /// The index immediately preceding the offending one.
        previous: usize,
        /// The offending index.
        index: usize,
    },

    /// [`Matrix::add_to_solution`](crate::dlx::Matrix::add_to_solution) was
    /// called with a row whose columns are already covered.
    #[error("row {0} is already covered and cannot be added to the solution")]
    AlreadyCovered(usize),
}
