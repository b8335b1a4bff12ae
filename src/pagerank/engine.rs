//! Power-iteration PageRank on a dense transition matrix
//!
//! A run moves through three states. While **Building**, raw 0/1 link
//! indicators become a column-stochastic matrix that is blended with a
//! uniform teleportation matrix under the damping factor. While
//! **Iterating**, the rank vector is repeatedly multiplied by the
//! transition matrix. Once two successive vectors agree within the
//! tolerance the run is **Converged** and the vector is normalized to sum
//! to one.

use std::fmt;

use super::observer::{NoopObserver, RankObserver};
use super::RankResult;
use crate::config::RankConfig;
use crate::errors::{RankError, Result};
use crate::matrix::DenseMatrix;

/// Where a [`RankRun`] currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankState {
    Building,
    Iterating,
    Converged,
}

impl fmt::Display for RankState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Building => "building",
            Self::Iterating => "iterating",
            Self::Converged => "converged",
        })
    }
}

/// Outcome of one [`RankRun::step`], carrying the step's max entry change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    Continue(f64),
    Converged(f64),
}

/// Validated PageRank settings, ready to rank any number of link matrices.
#[derive(Debug, Clone, Default)]
pub struct RankEngine {
    config: RankConfig,
}

impl RankEngine {
    /// Create an engine, rejecting configs that fail validation.
    pub fn new(config: RankConfig) -> Result<Self> {
        let report = config.validate()?;
        #[cfg(feature = "tracing")]
        for warning in report.warnings() {
            tracing::warn!(%warning, "config warning");
        }
        #[cfg(not(feature = "tracing"))]
        let _ = report;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RankConfig {
        &self.config
    }

    /// Build the transition matrix and seed the rank vector.
    ///
    /// `links` holds raw link indicators: entry `(i, j)` is `1.0` when page
    /// `j` links to page `i`.
    pub fn build(&self, mut links: DenseMatrix) -> Result<RankRun> {
        let (rows, cols) = links.shape();
        if !links.is_square() {
            return Err(RankError::NonSquareLinks { rows, cols });
        }
        if let Some(expected) = self.config.page_count {
            if rows != expected || cols != expected {
                return Err(RankError::PageCountMismatch {
                    expected,
                    found: if rows != expected { rows } else { cols },
                });
            }
        }

        links.normalize_columns_to_stochastic();

        let mut teleport = DenseMatrix::square(rows)?;
        teleport.fill_uniform_teleportation();

        let d = self.config.damping;
        links *= d;
        teleport *= 1.0 - d;
        let transition = links.checked_add(&teleport)?;

        let mut rank = DenseMatrix::zeros(rows, 1)?;
        rank.increment();

        trace_event!(debug, pages = rows, damping = d, "transition matrix built");

        Ok(RankRun {
            transition,
            rank,
            state: RankState::Iterating,
            iterations: 0,
            delta: f64::INFINITY,
            max_iterations: self.config.max_iterations,
            tolerance: self.config.tolerance,
        })
    }

    /// Rank a link matrix end to end.
    pub fn rank(&self, links: DenseMatrix) -> Result<RankResult> {
        self.rank_with_observer(links, &mut NoopObserver)
    }

    /// Rank a flat, row-major `n²` sequence of link indicators.
    pub fn rank_values(&self, values: &[f64]) -> Result<RankResult> {
        self.rank(DenseMatrix::from_flat(values)?)
    }

    /// Rank a link matrix, reporting progress to `observer`.
    pub fn rank_with_observer(
        &self,
        links: DenseMatrix,
        observer: &mut impl RankObserver,
    ) -> Result<RankResult> {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("rank", pages = links.rows()).entered();

        observer.on_state(RankState::Building);
        let mut run = self.build(links)?;
        observer.on_state(RankState::Iterating);

        loop {
            match run.step()? {
                Step::Continue(delta) => observer.on_iteration(run.iterations(), delta),
                Step::Converged(delta) => {
                    observer.on_iteration(run.iterations(), delta);
                    break;
                }
            }
        }

        observer.on_state(RankState::Converged);
        run.finish()
    }
}

/// One in-progress ranking: the fixed transition matrix and the current
/// rank estimate.
#[derive(Debug, Clone)]
pub struct RankRun {
    transition: DenseMatrix,
    rank: DenseMatrix,
    state: RankState,
    iterations: usize,
    delta: f64,
    max_iterations: usize,
    tolerance: f64,
}

impl RankRun {
    pub fn state(&self) -> RankState {
        self.state
    }

    /// The damped, blended transition matrix
    pub fn transition(&self) -> &DenseMatrix {
        &self.transition
    }

    /// The current (unnormalized) rank estimate
    pub fn rank_vector(&self) -> &DenseMatrix {
        &self.rank
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Max entry change on the most recent step
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Advance one power-iteration step.
    ///
    /// Fails with [`RankError::NotConverged`] once the iteration bound is
    /// used up, and with [`RankError::NonFiniteRank`] when the new estimate
    /// holds a NaN or infinity. Stepping a converged run is a no-op.
    pub fn step(&mut self) -> Result<Step> {
        if self.state == RankState::Converged {
            return Ok(Step::Converged(self.delta));
        }
        if self.iterations >= self.max_iterations {
            trace_event!(
                warn,
                iterations = self.iterations,
                delta = self.delta,
                "iteration bound reached"
            );
            return Err(self.not_converged());
        }

        let candidate = self.transition.checked_mul(&self.rank)?;
        self.iterations += 1;
        if !candidate.is_finite() {
            trace_event!(warn, iteration = self.iterations, "rank vector is not finite");
            return Err(RankError::NonFiniteRank {
                iteration: self.iterations,
            });
        }
        self.delta = candidate
            .max_abs_diff(&self.rank)
            .unwrap_or(f64::INFINITY);
        let settled = candidate.approx_eq(&self.rank, self.tolerance);
        self.rank = candidate;

        trace_event!(trace, iteration = self.iterations, delta = self.delta, "step");

        if settled {
            self.state = RankState::Converged;
            trace_event!(debug, iterations = self.iterations, "converged");
            Ok(Step::Converged(self.delta))
        } else {
            Ok(Step::Continue(self.delta))
        }
    }

    /// Normalize the converged vector so its entries sum to one.
    pub fn finish(self) -> Result<RankResult> {
        if self.state != RankState::Converged {
            return Err(self.not_converged());
        }
        self.normalized()
    }

    /// The current estimate scaled to sum to one
    fn normalized(&self) -> Result<RankResult> {
        let sum = self.rank.sum();
        if !sum.is_finite() || sum <= 0.0 {
            return Err(RankError::DegenerateRank { sum });
        }
        let mut scores = self.rank.clone();
        scores *= 1.0 / sum;
        Ok(RankResult::new(
            scores,
            self.iterations,
            self.delta,
            self.state == RankState::Converged,
        ))
    }

    fn not_converged(&self) -> RankError {
        RankError::NotConverged {
            iterations: self.iterations,
            delta: self.delta,
            partial: self.normalized().ok().map(Box::new),
        }
    }
}
