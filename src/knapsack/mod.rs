//! 0/1 Knapsack variant.
//!
//! - [`KnapsackInstance`]: items and capacity
//! - [`KnapsackProblem`]: per-ant shuffled Bernoulli trials, deposits that
//!   reward tight capacity use, and elitist reinforcement of the best-known
//!   selection
//!
//! # Example
//!
//! ```
//! use u_aco::colony::{AcoConfig, AcoRunner};
//! use u_aco::knapsack::{Item, KnapsackProblem};
//!
//! let items = vec![
//!     Item::new(0, 60.0, 10.0),
//!     Item::new(1, 100.0, 20.0),
//!     Item::new(2, 120.0, 30.0),
//! ];
//! let problem = KnapsackProblem::new(items, 50.0).unwrap();
//! let config = AcoConfig::default().with_seed(7);
//! let outcome = AcoRunner::run(problem, &config).unwrap();
//! assert!(outcome.best_objective().unwrap() <= 220.0);
//! ```

mod instance;
mod problem;

pub use instance::{Item, KnapsackInstance};
pub use problem::{selection_probability, KnapsackAnt, KnapsackProblem, SELECT, SKIP};

/// Colony over a knapsack instance with the default random source.
pub type KnapsackColony = crate::colony::Colony<KnapsackProblem>;
