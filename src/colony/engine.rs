//! Colony controller and step scheduler.
//!
//! [`Colony`] is an explicit state machine. Each call to
//! [`advance`](Colony::advance) performs exactly one atomic unit of work:
//!
//! 1. one construction decision of the current ant, or
//! 2. the hand-over from a completed ant to the next one, or
//! 3. once every ant is complete, the iteration-end pass: best-solution
//!    comparison, evaporation, deposit, elitist reinforcement, clamping,
//!    history append, and either a fresh set of ants or termination.
//!
//! Pheromones are only touched in step 3, as one batch, so a caller may stop
//! calling `advance` at any point and the colony stays consistent.

use log::{debug, info, trace};
use rand::Rng;

use super::config::AcoConfig;
use super::pheromone::PheromoneMatrix;
use super::types::{AcoProblem, Sense};
use crate::error::AcoResult;
use crate::random::{rng_from_seed, AcoRng};

/// Scheduler position inside a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunState {
    /// 0-based index of the running iteration.
    pub iteration: usize,
    /// Index of the ant being driven. Equals the ant count once every ant
    /// of the iteration has completed.
    pub current_ant: usize,
    /// Number of decisions the current ant has made.
    pub decision: usize,
    /// Set once the iteration budget is exhausted.
    pub finished: bool,
}

/// Best solution found so far.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BestSolution<S> {
    /// The solution itself.
    pub solution: S,
    /// Its objective value.
    pub objective: f64,
    /// 0-based iteration in which it was constructed.
    pub iteration: usize,
}

/// Convergence record appended at the end of each iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IterationStats {
    /// 0-based iteration index.
    pub iteration: usize,
    /// Best objective known at the end of the iteration.
    pub best_objective: f64,
    /// Mean objective over the iteration's completed ants.
    pub average_objective: f64,
}

/// Read-only view of a colony between two `advance` calls.
#[derive(Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(bound(serialize = "P::Ant: serde::Serialize, P::Solution: serde::Serialize"))
)]
pub struct ColonySnapshot<'a, P: AcoProblem> {
    /// Scheduler position.
    pub state: RunState,
    /// All ants of the running iteration, including partial ones.
    pub ants: &'a [P::Ant],
    /// Current trail levels.
    pub pheromone: &'a PheromoneMatrix,
    /// Best solution so far, if any ant has completed.
    pub best: Option<&'a BestSolution<P::Solution>>,
    /// Convergence history, one entry per finished iteration.
    pub history: &'a [IterationStats],
}

/// Steppable ant colony engine, generic over the problem variant and the
/// random source.
///
/// # Usage
///
/// ```ignore
/// let problem = TspProblem::new(cities)?;
/// let mut colony = Colony::new(problem, AcoConfig::default().with_seed(42))?;
/// while colony.advance()? {
///     render(&colony.snapshot());
/// }
/// println!("best: {:?}", colony.best());
/// ```
#[derive(Debug)]
pub struct Colony<P: AcoProblem, R = AcoRng> {
    problem: P,
    config: AcoConfig,
    rng: R,
    pheromone: PheromoneMatrix,
    ants: Vec<P::Ant>,
    state: RunState,
    best: Option<BestSolution<P::Solution>>,
    history: Vec<IterationStats>,
}

impl<P: AcoProblem> Colony<P, AcoRng> {
    /// Builds a colony seeded from `config.seed`.
    ///
    /// # Errors
    /// Returns a configuration error if `config` does not validate.
    pub fn new(problem: P, config: AcoConfig) -> AcoResult<Self> {
        config.validate()?;
        let rng = rng_from_seed(config.seed);
        Self::with_rng(problem, config, rng)
    }
}

impl<P: AcoProblem, R: Rng> Colony<P, R> {
    /// Builds a colony drawing from an injected random source.
    ///
    /// `config.seed` is ignored.
    ///
    /// # Errors
    /// Returns a configuration error if `config` does not validate.
    pub fn with_rng(problem: P, config: AcoConfig, rng: R) -> AcoResult<Self> {
        config.validate()?;
        let (rows, cols) = problem.pheromone_shape();
        let pheromone = PheromoneMatrix::new(rows, cols, config.initial_pheromone);
        let mut colony = Self {
            problem,
            config,
            rng,
            pheromone,
            ants: Vec::new(),
            state: RunState::default(),
            best: None,
            history: Vec::new(),
        };
        colony.spawn_ants();
        Ok(colony)
    }

    /// Performs one atomic unit of work.
    ///
    /// Returns `Ok(false)` once the run is finished; further calls are no-ops.
    ///
    /// # Errors
    /// Propagates invariant violations raised by a construction step. The
    /// failing decision is not applied.
    pub fn advance(&mut self) -> AcoResult<bool> {
        if self.state.finished {
            return Ok(false);
        }

        let idx = self.state.current_ant;
        if idx < self.ants.len() {
            if self.problem.is_complete(&self.ants[idx]) {
                self.state.current_ant += 1;
                self.state.decision = 0;
            } else {
                self.problem.construction_step(
                    &mut self.ants[idx],
                    &self.pheromone,
                    &self.config,
                    &mut self.rng,
                )?;
                self.state.decision += 1;
                trace!(
                    "iteration {} ant {} decision {}",
                    self.state.iteration,
                    idx,
                    self.state.decision
                );
                if self.problem.is_complete(&self.ants[idx]) {
                    self.consider_best(idx);
                }
            }
            return Ok(true);
        }

        self.finish_iteration();
        Ok(!self.state.finished)
    }

    /// Advances until the running iteration's update pass has been applied.
    ///
    /// Returns whether more work remains.
    pub fn advance_iteration(&mut self) -> AcoResult<bool> {
        let start = self.state.iteration;
        loop {
            let more = self.advance()?;
            if !more || self.state.iteration != start {
                return Ok(more);
            }
        }
    }

    /// Calls [`advance`](Self::advance) until the run is finished.
    pub fn run_to_completion(&mut self) -> AcoResult<()> {
        while self.advance()? {}
        Ok(())
    }

    /// Returns to iteration zero with fresh pheromones and ants.
    ///
    /// The instance, configuration and random stream are kept; the stream is
    /// not rewound, so a reset run explores a different sample path.
    pub fn reset_run(&mut self) {
        self.pheromone.fill(self.config.initial_pheromone);
        self.state = RunState::default();
        self.best = None;
        self.history.clear();
        self.spawn_ants();
        debug!("run reset");
    }

    /// Read-only view of the current state.
    pub fn snapshot(&self) -> ColonySnapshot<'_, P> {
        ColonySnapshot {
            state: self.state,
            ants: &self.ants,
            pheromone: &self.pheromone,
            best: self.best.as_ref(),
            history: &self.history,
        }
    }

    /// The problem being solved.
    pub fn problem(&self) -> &P {
        &self.problem
    }

    /// The validated configuration.
    pub fn config(&self) -> &AcoConfig {
        &self.config
    }

    /// Scheduler position.
    pub fn run_state(&self) -> RunState {
        self.state
    }

    /// Whether the iteration budget is exhausted.
    pub fn is_finished(&self) -> bool {
        self.state.finished
    }

    /// Ants of the running iteration.
    pub fn ants(&self) -> &[P::Ant] {
        &self.ants
    }

    /// Current trail levels.
    pub fn pheromone(&self) -> &PheromoneMatrix {
        &self.pheromone
    }

    /// Best solution found so far.
    pub fn best(&self) -> Option<&BestSolution<P::Solution>> {
        self.best.as_ref()
    }

    /// Convergence history.
    pub fn history(&self) -> &[IterationStats] {
        &self.history
    }

    fn spawn_ants(&mut self) {
        let problem = &self.problem;
        let rng = &mut self.rng;
        self.ants = (0..self.config.ant_count)
            .map(|_| problem.initialize_ant(&mut *rng))
            .collect();
        self.state.current_ant = 0;
        self.state.decision = 0;
    }

    /// Strict-improvement update of the best record from ant `idx`.
    fn consider_best(&mut self, idx: usize) {
        let ant = &self.ants[idx];
        let objective = self.problem.objective(ant);
        let improved = match &self.best {
            None => true,
            Some(best) => self.problem.sense().improves(objective, best.objective),
        };
        if improved {
            info!(
                "new best {objective} at iteration {} (ant {idx})",
                self.state.iteration
            );
            self.best = Some(BestSolution {
                solution: self.problem.solution(ant),
                objective,
                iteration: self.state.iteration,
            });
        }
    }

    fn finish_iteration(&mut self) {
        // Already applied per ant while stepping; repeated here so ants that
        // completed without a decision are still considered.
        for idx in 0..self.ants.len() {
            if self.problem.is_complete(&self.ants[idx]) {
                self.consider_best(idx);
            }
        }

        self.update_pheromones();

        let stats = IterationStats {
            iteration: self.state.iteration,
            best_objective: self.best_objective(),
            average_objective: self.average_objective(),
        };
        debug!(
            "iteration {} done: best {} avg {}",
            stats.iteration, stats.best_objective, stats.average_objective
        );
        self.history.push(stats);

        if self.state.iteration + 1 < self.config.max_iterations {
            self.state.iteration += 1;
            self.spawn_ants();
        } else {
            self.state.finished = true;
            info!(
                "run finished after {} iterations, best {}",
                self.history.len(),
                stats.best_objective
            );
        }
    }

    /// Evaporation, per-ant deposit, elitist reinforcement, clamping.
    fn update_pheromones(&mut self) {
        let q = self.config.deposit_scale;
        self.pheromone.evaporate(self.config.evaporation_retention);

        for ant in &self.ants {
            if !self.problem.is_complete(ant) {
                continue;
            }
            for deposit in self.problem.deposit_targets(ant, q) {
                self.pheromone.deposit(deposit);
            }
        }

        if let Some(best) = &self.best {
            for deposit in self.problem.elite_targets(&best.solution, q) {
                self.pheromone.deposit(deposit);
            }
        }

        self.pheromone.clamp();
    }

    fn best_objective(&self) -> f64 {
        match (&self.best, self.problem.sense()) {
            (Some(best), _) => best.objective,
            (None, Sense::Minimize) => f64::INFINITY,
            (None, Sense::Maximize) => f64::NEG_INFINITY,
        }
    }

    fn average_objective(&self) -> f64 {
        let (sum, count) = self
            .ants
            .iter()
            .filter(|ant| self.problem.is_complete(ant))
            .fold((0.0, 0usize), |(sum, count), ant| {
                (sum + self.problem.objective(ant), count + 1)
            });
        if count == 0 {
            0.0
        } else {
            sum / count as f64
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
