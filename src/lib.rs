//! Steppable Ant Colony Optimization.
//!
//! A single pheromone-guided engine, parameterized over a problem variant:
//!
//! - **Colony**: Problem-agnostic controller. Spawns ants, drives them one
//!   decision at a time, tracks the best solution, applies evaporation,
//!   deposit, elitism and clamping as one batch per iteration, and records
//!   convergence history. [`Colony::advance`](colony::Colony::advance) performs
//!   exactly one atomic unit of work so a renderer can redraw between any two
//!   decisions; [`AcoRunner`](colony::AcoRunner) runs to completion.
//! - **TSP**: Roulette-wheel tour construction over unvisited cities.
//! - **Knapsack**: Independent Bernoulli trials over a per-ant shuffled item
//!   order, with capacity re-checked before every trial.
//!
//! New variants plug in by implementing [`AcoProblem`](colony::AcoProblem).
//!
//! # Architecture
//!
//! The engine performs no I/O. Instance parsing, rendering and charting are
//! left to consumers, which read the state through
//! [`Colony::snapshot`](colony::Colony::snapshot) between `advance` calls.

pub mod colony;
pub mod error;
pub mod knapsack;
pub mod random;
pub mod tsp;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{AcoError, AcoResult};
