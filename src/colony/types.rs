//! Core trait for ant colony problems.
//!
//! [`AcoProblem`] is the contract between the generic [`Colony`](super::Colony)
//! engine and a problem variant. The engine owns scheduling, pheromone
//! dynamics and best-solution tracking; the problem owns everything that
//! depends on what a "choice" means.

use rand::Rng;

use super::config::AcoConfig;
use super::pheromone::{Deposit, PheromoneMatrix};
use crate::error::AcoResult;

/// Direction of optimization for a problem's objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sense {
    /// Lower objective is better (tour distance).
    Minimize,
    /// Higher objective is better (knapsack value).
    Maximize,
}

impl Sense {
    /// Returns `true` if `candidate` is strictly better than `incumbent`.
    ///
    /// Ties never count as improvement.
    pub fn improves(self, candidate: f64, incumbent: f64) -> bool {
        match self {
            Sense::Minimize => candidate < incumbent,
            Sense::Maximize => candidate > incumbent,
        }
    }
}

/// Defines an ant colony optimization problem.
///
/// One ant is built with [`initialize_ant`](AcoProblem::initialize_ant) and
/// then driven by repeated [`construction_step`](AcoProblem::construction_step)
/// calls until [`is_complete`](AcoProblem::is_complete) reports `true`. Each
/// call must make exactly one atomic decision, since the engine suspends
/// between calls.
///
/// # Examples
///
/// ```ignore
/// struct Coin;
///
/// impl AcoProblem for Coin {
///     type Ant = Option<bool>;
///     type Solution = bool;
///
///     fn sense(&self) -> Sense { Sense::Maximize }
///     fn pheromone_shape(&self) -> (usize, usize) { (1, 2) }
///     fn initialize_ant<R: Rng>(&self, _rng: &mut R) -> Option<bool> { None }
///     fn construction_step<R: Rng>(
///         &self, ant: &mut Option<bool>, _trails: &PheromoneMatrix,
///         _config: &AcoConfig, rng: &mut R,
///     ) -> AcoResult<()> {
///         *ant = Some(rng.random_bool(0.5));
///         Ok(())
///     }
///     fn is_complete(&self, ant: &Option<bool>) -> bool { ant.is_some() }
///     fn objective(&self, ant: &Option<bool>) -> f64 { if *ant == Some(true) { 1.0 } else { 0.0 } }
///     fn solution(&self, ant: &Option<bool>) -> bool { *ant == Some(true) }
///     fn deposit_targets(&self, ant: &Option<bool>, q: f64) -> Vec<Deposit> {
///         vec![Deposit::new(0, usize::from(*ant == Some(true)), q)]
///     }
/// }
/// ```
pub trait AcoProblem {
    /// Per-ant construction state.
    type Ant: Clone + std::fmt::Debug;

    /// Completed solution representation, as stored in the best record.
    type Solution: Clone + std::fmt::Debug + PartialEq;

    /// Whether the objective is minimized or maximized.
    fn sense(&self) -> Sense;

    /// Shape `(rows, cols)` of the pheromone matrix.
    fn pheromone_shape(&self) -> (usize, usize);

    /// Creates a fresh ant for a new iteration.
    ///
    /// Any per-ant randomness that precedes construction (a start city, a
    /// visiting order) is drawn here.
    fn initialize_ant<R: Rng>(&self, rng: &mut R) -> Self::Ant;

    /// Makes one construction decision for an incomplete ant.
    ///
    /// # Errors
    /// Returns [`AcoError::InvariantViolation`](crate::error::AcoError::InvariantViolation)
    /// when the selection law is undefined for the current state.
    fn construction_step<R: Rng>(
        &self,
        ant: &mut Self::Ant,
        trails: &PheromoneMatrix,
        config: &AcoConfig,
        rng: &mut R,
    ) -> AcoResult<()>;

    /// Whether the ant has finished constructing its solution.
    fn is_complete(&self, ant: &Self::Ant) -> bool;

    /// Objective value of a completed ant.
    fn objective(&self, ant: &Self::Ant) -> f64;

    /// Extracts the solution of a completed ant.
    fn solution(&self, ant: &Self::Ant) -> Self::Solution;

    /// Trail contributions of a completed ant for deposit scale `q`.
    fn deposit_targets(&self, ant: &Self::Ant, q: f64) -> Vec<Deposit>;

    /// Extra contributions laid by the best-known solution each iteration.
    ///
    /// The default implementation adds nothing (no elitism).
    fn elite_targets(&self, _best: &Self::Solution, _q: f64) -> Vec<Deposit> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimize_strict() {
        assert!(Sense::Minimize.improves(9.0, 10.0));
        assert!(!Sense::Minimize.improves(10.0, 10.0));
        assert!(!Sense::Minimize.improves(11.0, 10.0));
        assert!(Sense::Minimize.improves(40.0, f64::INFINITY));
    }

    #[test]
    fn test_maximize_strict() {
        assert!(Sense::Maximize.improves(11.0, 10.0));
        assert!(!Sense::Maximize.improves(10.0, 10.0));
        assert!(!Sense::Maximize.improves(9.0, 10.0));
    }
}
