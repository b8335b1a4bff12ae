//! Rank observer: hooks for logging, profiling and debugging.
//!
//! Observers receive notifications at state transitions and after every
//! power-iteration step without coupling to the engine's arithmetic.

use super::engine::RankState;

/// Callbacks invoked while a [`RankRun`](super::RankRun) advances.
///
/// Every method has an empty default, so an observer only overrides what
/// it cares about.
pub trait RankObserver {
    /// The run entered `state`.
    fn on_state(&mut self, _state: RankState) {}

    /// Step `iteration` (1-based) finished with the given max entry change.
    fn on_iteration(&mut self, _iteration: usize, _delta: f64) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RankObserver for NoopObserver {}

/// Records the delta of every step and the states visited.
#[derive(Debug, Clone, Default)]
pub struct IterationHistory {
    pub deltas: Vec<f64>,
    pub states: Vec<RankState>,
}

impl IterationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded steps
    pub fn iterations(&self) -> usize {
        self.deltas.len()
    }
}

impl RankObserver for IterationHistory {
    fn on_state(&mut self, state: RankState) {
        self.states.push(state);
    }

    fn on_iteration(&mut self, _iteration: usize, delta: f64) {
        self.deltas.push(delta);
    }
}
