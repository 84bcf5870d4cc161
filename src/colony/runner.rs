//! Synchronous execution.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::Rng;

use super::config::AcoConfig;
use super::engine::{BestSolution, Colony, IterationStats};
use super::types::AcoProblem;
use crate::error::AcoResult;

/// Result of a colony run.
#[derive(Debug, Clone, PartialEq)]
pub struct AcoOutcome<S> {
    /// Best solution found, with its objective and discovery iteration.
    ///
    /// `None` only if the run was cancelled before any ant completed.
    pub best: Option<BestSolution<S>>,

    /// Number of iterations whose update pass was applied.
    pub iterations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Per-iteration convergence history.
    pub history: Vec<IterationStats>,
}

impl<S> AcoOutcome<S> {
    /// Objective of the best solution, if any.
    pub fn best_objective(&self) -> Option<f64> {
        self.best.as_ref().map(|b| b.objective)
    }
}

impl<P: AcoProblem, R: Rng> Colony<P, R> {
    /// Collects the current best record and history.
    pub fn outcome(&self) -> AcoOutcome<P::Solution> {
        AcoOutcome {
            best: self.best().cloned(),
            iterations: self.history().len(),
            cancelled: false,
            history: self.history().to_vec(),
        }
    }
}

/// Runs a colony to completion without exposing intermediate states.
pub struct AcoRunner;

impl AcoRunner {
    /// Runs the colony until the iteration budget is exhausted.
    ///
    /// # Errors
    /// Configuration errors, or an invariant violation raised mid-run.
    pub fn run<P: AcoProblem>(problem: P, config: &AcoConfig) -> AcoResult<AcoOutcome<P::Solution>> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs the colony with an optional cancellation token.
    ///
    /// The flag is checked before every atomic unit of work; when it is set
    /// the run stops and returns what has been found so far.
    pub fn run_with_cancel<P: AcoProblem>(
        problem: P,
        config: &AcoConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> AcoResult<AcoOutcome<P::Solution>> {
        let mut colony = Colony::new(problem, config.clone())?;
        let mut cancelled = false;

        loop {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            if !colony.advance()? {
                break;
            }
        }

        let mut outcome = colony.outcome();
        outcome.cancelled = cancelled;
        Ok(outcome)
    }
}
