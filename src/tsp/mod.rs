//! Traveling Salesman variant.
//!
//! - [`TspInstance`]: cities and their Euclidean distance matrix
//! - [`TspProblem`]: roulette-wheel tour construction with `Q / length`
//!   deposits on both directions of every traversed edge
//!
//! # Example
//!
//! ```
//! use u_aco::colony::{AcoConfig, Colony};
//! use u_aco::tsp::{City, TspProblem};
//!
//! let cities = vec![
//!     City::new(0.0, 0.0),
//!     City::new(10.0, 0.0),
//!     City::new(10.0, 10.0),
//!     City::new(0.0, 10.0),
//! ];
//! let problem = TspProblem::new(cities).unwrap();
//! let config = AcoConfig::default().with_ant_count(4).with_max_iterations(20).with_seed(1);
//! let mut colony = Colony::new(problem, config).unwrap();
//! colony.run_to_completion().unwrap();
//!
//! let best = colony.best().unwrap();
//! assert_eq!(best.solution.len(), 5);
//! assert!((best.objective - 40.0).abs() < 1e-9);
//! ```

mod instance;
mod problem;

pub use instance::{City, TspInstance};
pub use problem::{roulette_select, AntStatus, TspAnt, TspProblem};

/// Colony over a TSP instance with the default random source.
pub type TspColony = crate::colony::Colony<TspProblem>;
