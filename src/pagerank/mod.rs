//! PageRank over dense link matrices
//!
//! This module provides the power-iteration engine, its observer hooks and
//! the result type it hands back.

pub mod engine;
pub mod observer;

use serde::Serialize;

use crate::matrix::{page_label, DenseMatrix};

pub use engine::{RankEngine, RankRun, RankState, Step};
pub use observer::{IterationHistory, NoopObserver, RankObserver};

/// Result of a PageRank computation
#[derive(Debug, Clone)]
pub struct RankResult {
    /// Normalized `n × 1` rank vector, entries sum to 1
    pub scores: DenseMatrix,
    /// Number of iterations performed
    pub iterations: usize,
    /// Largest entry change on the final step
    pub delta: f64,
    /// Whether the fixed point was reached. `false` only on the partial
    /// result carried by [`RankError::NotConverged`](crate::RankError::NotConverged).
    pub converged: bool,
}

impl RankResult {
    /// Create a new rank result
    pub fn new(scores: DenseMatrix, iterations: usize, delta: f64, converged: bool) -> Self {
        Self {
            scores,
            iterations,
            delta,
            converged,
        }
    }

    /// Number of ranked pages
    pub fn pages(&self) -> usize {
        self.scores.rows()
    }

    /// Get the score for a specific page
    pub fn score(&self, page: usize) -> f64 {
        self.scores.as_slice().get(page).copied().unwrap_or(0.0)
    }

    /// Page labels in rank-vector order
    pub fn labels(&self) -> Vec<String> {
        (0..self.pages()).map(page_label).collect()
    }

    /// Get top N pages by score
    pub fn top_n(&self, n: usize) -> Vec<(usize, f64)> {
        let mut indexed: Vec<_> = self.scores.iter().enumerate().collect();
        indexed.sort_by(|a, b| b.1.total_cmp(&a.1));
        indexed.truncate(n);
        indexed
    }

    /// One `Page X : pp.pp%` line per page
    pub fn format_ranked(&self) -> String {
        self.scores.format_ranked()
    }

    /// Serializable summary for machine consumers
    pub fn to_report(&self) -> RankReport {
        RankReport {
            pages: self
                .scores
                .iter()
                .enumerate()
                .map(|(i, score)| PageScore {
                    label: page_label(i),
                    score,
                    percent: score * 100.0,
                })
                .collect(),
            iterations: self.iterations,
            delta: self.delta,
            converged: self.converged,
        }
    }
}

/// One page in a [`RankReport`].
#[derive(Debug, Clone, Serialize)]
pub struct PageScore {
    pub label: String,
    pub score: f64,
    pub percent: f64,
}

/// JSON-friendly view of a [`RankResult`].
#[derive(Debug, Clone, Serialize)]
pub struct RankReport {
    pub pages: Vec<PageScore>,
    pub iterations: usize,
    pub delta: f64,
    pub converged: bool,
}
