use thiserror::Error;

use super::Axis;

/// Errors from [`crate::parse_grid`] and [`crate::RasterGrid::from_values`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum GridError {
    /// The text ended before all six header lines were read.
    #[error("grid header has {found} of 6 lines")]
    MissingHeaderLines {
        /// Number of header lines present.
        found: usize,
    },
    /// A header line did not name a known key or had no value.
    #[error("line {line}: unrecognised header entry `{entry}`")]
    UnknownHeaderKey {
        /// One-based line number.
        line: usize,
        /// Offending line, trimmed.
        entry: String,
    },
    /// The same header field (or both anchors of one axis) appeared twice.
    #[error("line {line}: header field `{key}` is already defined")]
    DuplicateHeaderKey {
        /// One-based line number.
        line: usize,
        /// Key that was repeated.
        key: &'static str,
    },
    /// A required header field never appeared.
    #[error("grid header is missing `{key}`")]
    MissingHeaderField {
        /// Key that was absent.
        key: &'static str,
    },
    /// Neither the corner nor the centre was given for an axis.
    #[error("grid header defines neither corner nor centre for the {axis} axis")]
    MissingAnchor {
        /// Axis lacking an anchor.
        axis: Axis,
    },
    /// A header value or cell could not be parsed as a number.
    #[error("line {line}: `{token}` is not a valid number")]
    InvalidNumber {
        /// One-based line number.
        line: usize,
        /// Token that failed to parse.
        token: String,
    },
    /// Column or row count was zero.
    #[error("grid dimensions must be positive, got {ncols}x{nrows}")]
    InvalidDimensions {
        /// Declared column count.
        ncols: usize,
        /// Declared row count.
        nrows: usize,
    },
    /// Cell size was zero, negative or not finite.
    #[error("cell size must be positive and finite, got `{value}`")]
    InvalidCellSize {
        /// Textual form of the rejected value.
        value: String,
    },
    /// The number of cells differs from `ncols * nrows`.
    #[error("grid declares {expected} cells but {actual} values were read")]
    DimensionMismatch {
        /// `ncols * nrows`.
        expected: usize,
        /// Values actually present.
        actual: usize,
    },
}
