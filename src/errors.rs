//! Error types produced while building or loading structure geometry.

use thiserror::Error;

/// Error returned when placement or deformation geometry cannot be built.
///
/// Every variant is a load-time failure: a structure that fails any of these
/// checks is rejected as a whole rather than rendered partially.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GeometryError {
    /// Returned when an element's reference vector is parallel to its axis.
    #[error("element {element} has a reference vector parallel to its axis; local frame is undefined")]
    DegenerateFrame {
        /// Position of the offending element in the element list.
        element: usize,
    },
    /// Returned when two parallel input arrays disagree in length.
    #[error("{what}: expected {expected} entries, found {found}")]
    DimensionMismatch {
        /// Description of the mismatched arrays.
        what: &'static str,
        /// Number of entries required.
        expected: usize,
        /// Number of entries supplied.
        found: usize,
    },
    /// Returned when both endpoints of an element coincide.
    #[error("element {element} has zero length")]
    ZeroLengthElement {
        /// Position of the offending element in the element list.
        element: usize,
    },
    /// Returned when an element references a node that does not exist.
    #[error("element {element} references node {node}, which does not exist")]
    UnknownNode {
        /// Position of the offending element in the element list.
        element: usize,
        /// The missing node index.
        node: usize,
    },
    /// Returned when a node strip would hold fewer than two points.
    #[error("node strips need at least 2 points (received {0})")]
    InvalidInterpolationCount(usize),
    /// Returned when the deformation scale is not a finite number.
    #[error("deformation scale must be finite (received {0})")]
    InvalidScale(f32),
}

/// Error returned when a job description cannot be loaded.
///
/// # Examples
///
/// ```
/// use trussview::{Job, JobError};
///
/// let error = Job::from_json_str(r#"{"nodes": [], "elems": [], "props": []}"#)
///     .expect_err("empty node table is rejected");
/// assert!(matches!(error, JobError::MissingTable("nodes")));
/// ```
#[derive(Debug, Error)]
pub enum JobError {
    /// Returned when the job file cannot be read.
    #[error("cannot read job file: {0}")]
    Io(#[from] std::io::Error),
    /// Returned when the job file is not valid JSON or has the wrong shape.
    #[error("cannot parse job description: {0}")]
    Json(#[from] serde_json::Error),
    /// Returned when a required table is empty.
    #[error("no data was loaded for table {0}")]
    MissingTable(&'static str),
    /// Returned when a row holds the wrong number of values.
    #[error("row {row} in {table} has {found} values, expected {expected}")]
    InvalidRow {
        /// Name of the table holding the row.
        table: &'static str,
        /// Position of the row in its table.
        row: usize,
        /// Number of values the row must hold.
        expected: usize,
        /// Number of values found.
        found: usize,
    },
    /// Returned when the loaded structure fails geometric validation.
    #[error("invalid structure: {0}")]
    Geometry(#[from] GeometryError),
}
