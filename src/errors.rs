//! Error types produced while importing trusses or configuring the scene.

use thiserror::Error;

/// Error returned when a truss description cannot be imported.
///
/// Any variant aborts the whole import. The line number is 1-based and counts every
/// input line, including blank and comment lines, so it matches what an editor shows.
///
/// # Examples
///
/// ```
/// use trussview::{parse_lines, ImportError};
///
/// let error = parse_lines(["node, A, foo, 2"]).expect_err("bad x coordinate");
/// assert!(matches!(error, ImportError::InvalidNumber { line: 1, .. }));
/// ```
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ImportError {
    /// Returned when a numeric field is not a finite floating point value.
    #[error("line {line}: {record} field `{field}` is not a number (found {value:?})")]
    InvalidNumber {
        /// Line on which the record appears.
        line: usize,
        /// Record keyword, e.g. `node`.
        record: &'static str,
        /// Name of the offending field.
        field: &'static str,
        /// Raw text of the field.
        value: String,
    },
    /// Returned when a record is too short to carry a required field.
    #[error("line {line}: {record} record is missing field `{field}`")]
    MissingField {
        /// Line on which the record appears.
        line: usize,
        /// Record keyword, e.g. `material`.
        record: &'static str,
        /// Name of the absent field.
        field: &'static str,
    },
}

/// Error returned when a [`SceneConfig`](crate::SceneConfig) is unusable.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Returned when the grid spacing would never advance.
    #[error("grid spacing must be positive (received {0})")]
    NonPositiveGridSpacing(f64),
    /// Returned when the hatch pitch of the roller glyph would never advance.
    #[error("hatch pitch must be positive (received {0})")]
    NonPositiveHatchPitch(f64),
    /// Returned when a size or offset that must not be negative is.
    #[error("{name} must not be negative (received {value})")]
    Negative {
        /// Configuration key.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// Returned when the JSON document cannot be decoded.
    #[error("invalid scene configuration: {0}")]
    Json(#[from] serde_json::Error),
}
