//! Error types for matrix construction, input loading and ranking.
//!
//! Every fallible operation in the crate returns [`Result`]. Nothing here
//! prints or terminates the process; the binary decides what a failure
//! means for the exit status.

use std::path::PathBuf;

use thiserror::Error;

use crate::pagerank::RankResult;

/// Errors produced by the matrix, engine, config and input layers.
#[derive(Error, Debug)]
pub enum RankError {
    /// A matrix was requested with a zero row or column count.
    #[error("The row and column of the matrix must be more than 0. Found : row : {rows}, col : {cols}")]
    InvalidDimension { rows: usize, cols: usize },

    /// A flat value sequence could not be laid out as an n×n grid.
    #[error("the size of an array must be square. 1x1, or 2x2, or 3x3, etc... Found : {len}")]
    NotSquare { len: usize },

    /// Read or write outside the matrix.
    #[error("Out of Boundary. Found : row : {row}, col : {col} (matrix is {rows}x{cols})")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Operands of a binary matrix operation have incompatible shapes.
    #[error("cannot {op} a {}x{} matrix with a {}x{} matrix", .left.0, .left.1, .right.0, .right.1)]
    DimensionMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    /// The input source could not be opened or read.
    #[error("Failed to open a file : \"{}\"", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input holds more numbers than the configured buffer allows.
    #[error("input holds more than {limit} values")]
    InputTooLarge { limit: usize },

    /// Link matrices must be `n × n`.
    #[error("link matrix must be square, found {rows}x{cols}")]
    NonSquareLinks { rows: usize, cols: usize },

    /// The link matrix does not have the configured number of pages.
    #[error("expected a link matrix for {expected} pages, found {found}")]
    PageCountMismatch { expected: usize, found: usize },

    /// The configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configuration file is not valid JSON for [`crate::RankConfig`].
    #[error("malformed configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// The iteration bound was reached before the rank vector settled.
    ///
    /// `partial` holds the normalized estimate at the point the run stopped,
    /// with `converged == false`, when that estimate could be normalized.
    #[error("rank vector did not converge after {iterations} iterations (last delta {delta:e})")]
    NotConverged {
        iterations: usize,
        delta: f64,
        partial: Option<Box<RankResult>>,
    },

    /// An iteration produced a NaN or infinite rank entry.
    #[error("rank vector became non-finite at iteration {iteration}")]
    NonFiniteRank { iteration: usize },

    /// The converged rank vector cannot be normalized.
    #[error("rank vector sums to {sum}, cannot normalize")]
    DegenerateRank { sum: f64 },
}

/// Result type alias for rapid-pagerank.
pub type Result<T> = std::result::Result<T, RankError>;
