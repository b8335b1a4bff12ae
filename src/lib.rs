//! # rapid-pagerank
//!
//! PageRank for small, hand-authored link graphs, computed by power
//! iteration over a dense transition matrix.
//!
//! ```rust
//! use rapid_pagerank::{DenseMatrix, RankEngine};
//!
//! let links = DenseMatrix::from_flat(&[
//!     0.0, 1.0, 1.0, 0.0,
//!     0.0, 0.0, 0.0, 1.0,
//!     1.0, 0.0, 0.0, 1.0,
//!     1.0, 0.0, 0.0, 0.0,
//! ])?;
//! let result = RankEngine::default().rank(links)?;
//! assert!((result.scores.sum() - 1.0).abs() < 1e-9);
//! print!("{}", result.format_ranked());
//! # Ok::<(), rapid_pagerank::RankError>(())
//! ```

/// Emit a `tracing` event when the `tracing` feature is enabled. When
/// disabled, this is a no-op and the compiler eliminates it.
macro_rules! trace_event {
    ($level:ident, $($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        tracing::$level!($($arg)+);
    };
}

pub mod config;
pub mod errors;
pub mod io;
pub mod matrix;
pub mod pagerank;

pub use config::RankConfig;
pub use errors::{RankError, Result};
pub use matrix::DenseMatrix;
pub use pagerank::{RankEngine, RankResult, RankState};
