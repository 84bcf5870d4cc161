//! Roulette-wheel tour construction.
//!
//! An ant starts at a uniformly random city. Each decision scores every
//! unvisited city `j` from the current city `i` as `τ(i,j)^α · η(i,j)^β`,
//! with `η = 1 / d(i,j)`, and draws the next city by roulette wheel. Once
//! every city is visited, one last decision closes the tour.

use rand::Rng;

use super::instance::{City, TspInstance};
use crate::colony::{AcoConfig, AcoProblem, Deposit, PheromoneMatrix, Sense};
use crate::error::{AcoError, AcoResult};

/// Desirability of moving between two coincident cities.
const COINCIDENT_HEURISTIC: f64 = 1e6;

/// Lifecycle of a tour-building ant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AntStatus {
    /// Only the start city has been placed.
    Unstarted,
    /// At least one move made, tour not yet closed.
    InProgress,
    /// Tour closed back to its start.
    Completed,
}

/// Construction state of one TSP ant.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TspAnt {
    /// Visited cities in order. A completed tour has `n + 1` entries and
    /// ends where it started.
    pub tour: Vec<usize>,
    /// `visited[j]` is set once city `j` is on the tour.
    pub visited: Vec<bool>,
    /// City the ant currently stands on.
    pub current: usize,
    /// Accumulated path length.
    pub distance: f64,
    /// Set by the closing move.
    pub completed: bool,
}

impl TspAnt {
    fn at(start: usize, n: usize) -> Self {
        let mut visited = vec![false; n];
        visited[start] = true;
        Self {
            tour: vec![start],
            visited,
            current: start,
            distance: 0.0,
            completed: false,
        }
    }

    /// City the tour started from.
    pub fn start(&self) -> usize {
        self.tour[0]
    }

    /// Number of distinct cities visited.
    pub fn visited_count(&self) -> usize {
        if self.completed {
            self.tour.len() - 1
        } else {
            self.tour.len()
        }
    }

    /// Where the ant is in its lifecycle.
    pub fn status(&self) -> AntStatus {
        if self.completed {
            AntStatus::Completed
        } else if self.tour.len() == 1 {
            AntStatus::Unstarted
        } else {
            AntStatus::InProgress
        }
    }
}

/// TSP variant of the colony.
///
/// Pheromones form a symmetric `n × n` matrix; the diagonal is never read.
#[derive(Debug, Clone)]
pub struct TspProblem {
    instance: TspInstance,
    /// Flattened `n × n` matrix of `1 / d(i, j)`.
    heuristic: Vec<f64>,
}

impl TspProblem {
    /// Builds the problem from city coordinates.
    pub fn new(cities: Vec<City>) -> AcoResult<Self> {
        Ok(Self::from_instance(TspInstance::new(cities)?))
    }

    /// Builds the problem from a validated instance.
    pub fn from_instance(instance: TspInstance) -> Self {
        let n = instance.len();
        let mut heuristic = vec![0.0; n * n];
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let d = instance.distance(i, j);
                heuristic[i * n + j] = if d > 0.0 {
                    1.0 / d
                } else {
                    COINCIDENT_HEURISTIC
                };
            }
        }
        Self {
            instance,
            heuristic,
        }
    }

    /// The underlying instance.
    pub fn instance(&self) -> &TspInstance {
        &self.instance
    }

    /// Heuristic desirability `η(i, j)`.
    #[inline]
    pub fn heuristic(&self, i: usize, j: usize) -> f64 {
        self.heuristic[i * self.instance.len() + j]
    }

    /// Unnormalized selection weights of every unvisited city, in index order.
    pub fn candidate_weights(
        &self,
        ant: &TspAnt,
        trails: &PheromoneMatrix,
        alpha: f64,
        beta: f64,
    ) -> Vec<(usize, f64)> {
        let i = ant.current;
        (0..self.instance.len())
            .filter(|&j| !ant.visited[j])
            .map(|j| {
                let tau = trails.get(i, j).powf(alpha);
                let eta = self.heuristic(i, j).powf(beta);
                (j, tau * eta)
            })
            .collect()
    }

    fn close_tour(&self, ant: &mut TspAnt) {
        let start = ant.start();
        ant.distance += self.instance.distance(ant.current, start);
        ant.tour.push(start);
        ant.current = start;
        ant.completed = true;
    }
}

/// Roulette-wheel selection over `(candidate, weight)` pairs.
///
/// Walks the candidates in order, accumulating `weight / total`, and returns
/// the first candidate with a positive weight whose cumulative probability
/// reaches `draw`. If rounding leaves the final cumulative value just below
/// `draw`, the last candidate with a positive weight is returned.
///
/// # Errors
/// [`AcoError::InvariantViolation`] if the weights do not sum to a positive
/// finite value.
pub fn roulette_select(weights: &[(usize, f64)], draw: f64) -> AcoResult<usize> {
    let total: f64 = weights.iter().map(|&(_, w)| w).sum();
    if !(total > 0.0 && total.is_finite()) {
        return Err(AcoError::invariant(format!(
            "roulette over {} candidates has total weight {total}",
            weights.len()
        )));
    }

    let mut cumulative = 0.0;
    for &(candidate, weight) in weights {
        let p = weight / total;
        cumulative += p;
        if p > 0.0 && cumulative >= draw {
            return Ok(candidate);
        }
    }

    weights
        .iter()
        .rev()
        .find(|&&(_, w)| w / total > 0.0)
        .map(|&(candidate, _)| candidate)
        .ok_or_else(|| AcoError::invariant("roulette found no candidate with positive probability"))
}

impl AcoProblem for TspProblem {
    type Ant = TspAnt;
    type Solution = Vec<usize>;

    fn sense(&self) -> Sense {
        Sense::Minimize
    }

    fn pheromone_shape(&self) -> (usize, usize) {
        let n = self.instance.len();
        (n, n)
    }

    fn initialize_ant<R: Rng>(&self, rng: &mut R) -> TspAnt {
        let n = self.instance.len();
        TspAnt::at(rng.random_range(0..n), n)
    }

    fn construction_step<R: Rng>(
        &self,
        ant: &mut TspAnt,
        trails: &PheromoneMatrix,
        config: &AcoConfig,
        rng: &mut R,
    ) -> AcoResult<()> {
        if ant.completed {
            return Ok(());
        }
        if ant.visited_count() == self.instance.len() {
            self.close_tour(ant);
            return Ok(());
        }

        let weights = self.candidate_weights(
            ant,
            trails,
            config.pheromone_influence,
            config.heuristic_influence,
        );
        let next = roulette_select(&weights, rng.random::<f64>())?;

        ant.distance += self.instance.distance(ant.current, next);
        ant.tour.push(next);
        ant.visited[next] = true;
        ant.current = next;
        Ok(())
    }

    fn is_complete(&self, ant: &TspAnt) -> bool {
        ant.completed
    }

    fn objective(&self, ant: &TspAnt) -> f64 {
        ant.distance
    }

    fn solution(&self, ant: &TspAnt) -> Vec<usize> {
        ant.tour.clone()
    }

    /// `Q / length` on both directions of every traversed edge. Zero-length
    /// tours (single city, all cities coincident) deposit nothing.
    fn deposit_targets(&self, ant: &TspAnt, q: f64) -> Vec<Deposit> {
        if ant.distance <= 0.0 {
            return Vec::new();
        }
        let delta = q / ant.distance;
        ant.tour
            .windows(2)
            .filter(|w| w[0] != w[1])
            .flat_map(|w| [Deposit::new(w[0], w[1], delta), Deposit::new(w[1], w[0], delta)])
            .collect()
    }
}
