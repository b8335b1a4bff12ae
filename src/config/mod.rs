//! Ranking configuration.
//!
//! A [`RankConfig`] carries the damping probability, the iteration bound,
//! the convergence tolerance and the input limits. It can be built in code
//! with the `with_*` methods or loaded from JSON; every field is optional
//! in the JSON form and falls back to its default.
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "damping": 0.85,
//!   "max_iterations": 10000,
//!   "tolerance": 0.00005,
//!   "page_count": 4,
//!   "max_input_values": 2500
//! }
//! ```

pub mod issue;
pub mod validation;

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{RankError, Result};
use crate::matrix::EQ_TOLERANCE;

/// Default probability of following a link rather than teleporting.
pub const DEFAULT_DAMPING: f64 = 0.85;

/// Default upper bound on power-iteration steps.
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Default cap on how many numbers one input source may hold.
pub const DEFAULT_MAX_INPUT_VALUES: usize = 2500;

/// Parameters for one ranking run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankConfig {
    /// Damping factor `d`; the transition matrix is `d·links + (1-d)·teleport`.
    pub damping: f64,

    /// Maximum number of power-iteration steps before giving up.
    pub max_iterations: usize,

    /// Entrywise tolerance for declaring two successive rank vectors equal.
    pub tolerance: f64,

    /// When set, the link matrix must describe exactly this many pages.
    pub page_count: Option<usize>,

    /// Maximum count of numbers accepted from an input source.
    pub max_input_values: usize,

    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: EQ_TOLERANCE,
            page_count: None,
            max_input_values: DEFAULT_MAX_INPUT_VALUES,
            unknown_fields: HashMap::new(),
        }
    }
}

impl RankConfig {
    /// Create a config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set the maximum iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Require the link matrix to have exactly `pages` pages
    pub fn with_page_count(mut self, pages: usize) -> Self {
        self.page_count = Some(pages);
        self
    }

    /// Set the input value cap
    pub fn with_max_input_values(mut self, limit: usize) -> Self {
        self.max_input_values = limit;
        self
    }

    /// Parse a config from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a config from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| RankError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Run the default validation rules and fail on the first report with
    /// errors. Warnings are returned to the caller.
    pub fn validate(&self) -> Result<validation::ValidationReport> {
        let report = validation::ValidationEngine::with_defaults().validate(self);
        if report.has_errors() {
            let msg = report
                .errors()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(RankError::InvalidConfig(msg));
        }
        Ok(report)
    }
}
