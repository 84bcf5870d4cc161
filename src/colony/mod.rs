//! Problem-agnostic ant colony engine.
//!
//! Users define a problem variant by implementing [`AcoProblem`], which
//! specifies how an ant is created, how it makes one decision, how its
//! result is scored and which trails it reinforces. The engine handles
//! scheduling, pheromone dynamics, best-solution tracking and convergence
//! statistics.
//!
//! # Key Types
//!
//! - [`AcoConfig`]: Colony parameters (population, budget, ρ, α, β, Q)
//! - [`Colony`]: Steppable controller; one [`advance`](Colony::advance) per
//!   atomic decision
//! - [`AcoRunner`]: Run-to-completion with optional cancellation
//! - [`PheromoneMatrix`]: Trail storage clamped to `[TAU_MIN, TAU_MAX]`
//!
//! # References
//!
//! - Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a
//!   Colony of Cooperating Agents"
//! - Stützle & Hoos (2000), "MAX-MIN Ant System"
//! - Leguizamón & Michalewicz (1999), "A New Version of Ant System for
//!   Subset Problems"

mod config;
mod engine;
mod pheromone;
mod runner;
mod types;

pub use config::{AcoConfig, TAU_MAX, TAU_MIN};
pub use engine::{BestSolution, Colony, ColonySnapshot, IterationStats, RunState};
pub use pheromone::{Deposit, PheromoneMatrix};
pub use runner::{AcoOutcome, AcoRunner};
pub use types::{AcoProblem, Sense};
