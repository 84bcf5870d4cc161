//! Shuffled Bernoulli construction for the 0/1 knapsack.
//!
//! Each ant visits the items in its own random permutation. An item that no
//! longer fits is skipped without consuming randomness; otherwise the ant
//! includes it with probability
//!
//! ```text
//! p = τ_sel^α · η^β / (τ_sel^α · η^β + τ_skip^α),   η = value / weight
//! ```
//!
//! The skip trail carries no heuristic factor: desirability is only judged
//! for inclusion. Every trial re-checks the remaining capacity, so completed
//! selections are always feasible.

use rand::seq::SliceRandom;
use rand::Rng;

use super::instance::{Item, KnapsackInstance};
use crate::colony::{AcoConfig, AcoProblem, Deposit, PheromoneMatrix, Sense};
use crate::error::{AcoError, AcoResult};

/// Pheromone column of the "leave out" trail.
pub const SKIP: usize = 0;

/// Pheromone column of the "select" trail.
pub const SELECT: usize = 1;

/// Fraction of an ant's deposit laid on the skip trails of items it left out.
const SKIP_DEPOSIT_FACTOR: f64 = 0.1;

/// Multiple of Q the best-known selection adds to its select trails.
const ELITE_FACTOR: f64 = 2.0;

/// Construction state of one knapsack ant.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnapsackAnt {
    /// `selection[i]` is set if item `i` is packed.
    pub selection: Vec<bool>,
    /// Total value packed so far.
    pub value: f64,
    /// Total weight packed so far.
    pub weight: f64,
    /// Visiting order, a permutation of item indices.
    pub order: Vec<usize>,
    /// Position in `order` of the next item to evaluate.
    pub cursor: usize,
}

impl KnapsackAnt {
    /// Index of the item the next decision evaluates.
    pub fn current_item(&self) -> Option<usize> {
        self.order.get(self.cursor).copied()
    }

    /// Whether every item has been evaluated.
    pub fn is_complete(&self) -> bool {
        self.cursor >= self.order.len()
    }

    /// Number of packed items.
    pub fn selected_count(&self) -> usize {
        self.selection.iter().filter(|&&s| s).count()
    }
}

/// Probability that a fitting item is selected.
///
/// # Errors
/// [`AcoError::InvariantViolation`] when the law is undefined: a zero or
/// non-finite denominator, or a non-finite numerator.
///
/// # Examples
///
/// ```
/// use u_aco::knapsack::selection_probability;
///
/// // τ_sel = τ_skip = 1, η = 2, α = 1, β = 2  →  4 / (4 + 1)
/// let p = selection_probability(1.0, 1.0, 2.0, 1.0, 2.0).unwrap();
/// assert!((p - 0.8).abs() < 1e-12);
/// ```
pub fn selection_probability(
    tau_select: f64,
    tau_skip: f64,
    eta: f64,
    alpha: f64,
    beta: f64,
) -> AcoResult<f64> {
    let numerator = tau_select.powf(alpha) * eta.powf(beta);
    let denominator = numerator + tau_skip.powf(alpha);
    if !numerator.is_finite() || !(denominator > 0.0 && denominator.is_finite()) {
        return Err(AcoError::invariant(format!(
            "selection probability undefined: {numerator} / {denominator}"
        )));
    }
    Ok(numerator / denominator)
}

/// Knapsack variant of the colony.
///
/// Pheromones form an `n × 2` matrix: column [`SKIP`] and column [`SELECT`]
/// per item.
#[derive(Debug, Clone)]
pub struct KnapsackProblem {
    instance: KnapsackInstance,
    /// `value / weight` per item.
    heuristic: Vec<f64>,
}

impl KnapsackProblem {
    /// Builds the problem from items and a capacity.
    pub fn new(items: Vec<Item>, capacity: f64) -> AcoResult<Self> {
        Ok(Self::from_instance(KnapsackInstance::new(items, capacity)?))
    }

    /// Builds the problem from a validated instance.
    pub fn from_instance(instance: KnapsackInstance) -> Self {
        let heuristic = instance
            .items()
            .iter()
            .map(|item| item.value / item.weight)
            .collect();
        Self {
            instance,
            heuristic,
        }
    }

    /// The underlying instance.
    pub fn instance(&self) -> &KnapsackInstance {
        &self.instance
    }

    /// Heuristic desirability of item `i`.
    pub fn heuristic(&self, i: usize) -> f64 {
        self.heuristic[i]
    }

    /// Whether item `i` fits in the ant's remaining capacity.
    pub fn fits(&self, ant: &KnapsackAnt, i: usize) -> bool {
        ant.weight + self.instance.items()[i].weight <= self.instance.capacity()
    }
}

impl AcoProblem for KnapsackProblem {
    type Ant = KnapsackAnt;
    type Solution = Vec<bool>;

    fn sense(&self) -> Sense {
        Sense::Maximize
    }

    fn pheromone_shape(&self) -> (usize, usize) {
        (self.instance.len(), 2)
    }

    fn initialize_ant<R: Rng>(&self, rng: &mut R) -> KnapsackAnt {
        let n = self.instance.len();
        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(rng);
        KnapsackAnt {
            selection: vec![false; n],
            value: 0.0,
            weight: 0.0,
            order,
            cursor: 0,
        }
    }

    fn construction_step<R: Rng>(
        &self,
        ant: &mut KnapsackAnt,
        trails: &PheromoneMatrix,
        config: &AcoConfig,
        rng: &mut R,
    ) -> AcoResult<()> {
        let Some(i) = ant.current_item() else {
            return Ok(());
        };

        if self.fits(ant, i) {
            let p = selection_probability(
                trails.get(i, SELECT),
                trails.get(i, SKIP),
                self.heuristic[i],
                config.pheromone_influence,
                config.heuristic_influence,
            )?;
            if rng.random::<f64>() < p {
                let item = &self.instance.items()[i];
                ant.selection[i] = true;
                ant.value += item.value;
                ant.weight += item.weight;
            }
        }

        ant.cursor += 1;
        Ok(())
    }

    fn is_complete(&self, ant: &KnapsackAnt) -> bool {
        ant.is_complete()
    }

    fn objective(&self, ant: &KnapsackAnt) -> f64 {
        ant.value
    }

    fn solution(&self, ant: &KnapsackAnt) -> Vec<bool> {
        ant.selection.clone()
    }

    /// `Q / (1 + unused capacity)` on the select trail of every packed item,
    /// a tenth of it on the skip trail of every other item.
    fn deposit_targets(&self, ant: &KnapsackAnt, q: f64) -> Vec<Deposit> {
        let delta = q / (1.0 + (self.instance.capacity() - ant.weight));
        ant.selection
            .iter()
            .enumerate()
            .map(|(i, &chosen)| {
                if chosen {
                    Deposit::new(i, SELECT, delta)
                } else {
                    Deposit::new(i, SKIP, delta * SKIP_DEPOSIT_FACTOR)
                }
            })
            .collect()
    }

    fn elite_targets(&self, best: &Vec<bool>, q: f64) -> Vec<Deposit> {
        best.iter()
            .enumerate()
            .filter(|&(_, &chosen)| chosen)
            .map(|(i, _)| Deposit::new(i, SELECT, ELITE_FACTOR * q))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colony::Colony;

    fn items() -> Vec<Item> {
        vec![
            Item::new(0, 60.0, 10.0),
            Item::new(1, 100.0, 20.0),
            Item::new(2, 120.0, 30.0),
            Item::new(3, 30.0, 25.0),
        ]
    }

    #[test]
    fn test_single_item_probability_by_hand() {
        // value 10, weight 4 → η = 2.5; τ_sel = 3, τ_skip = 0.5; α = 2, β = 1.5
        let eta: f64 = 2.5;
        let num = 9.0 * eta.powf(1.5);
        let expected = num / (num + 0.25);
        let p = selection_probability(3.0, 0.5, eta, 2.0, 1.5).unwrap();
        assert!((p - expected).abs() < 1e-12);

        // Same law through a problem and its pheromone matrix.
        let problem = KnapsackProblem::new(vec![Item::new(7, 10.0, 4.0)], 5.0).unwrap();
        let mut trails = PheromoneMatrix::new(1, 2, 1.0);
        trails.deposit(Deposit::new(0, SELECT, 2.0));
        trails.deposit(Deposit::new(0, SKIP, -0.5));
        let p = selection_probability(
            trails.get(0, SELECT),
            trails.get(0, SKIP),
            problem.heuristic(0),
            2.0,
            1.5,
        )
        .unwrap();
        assert!((p - expected).abs() < 1e-12);
    }

    #[test]
    fn test_probability_with_zero_exponents() {
        // α = β = 0 turns every factor into 1.
        let p = selection_probability(5.0, 0.1, 7.0, 0.0, 0.0).unwrap();
        assert!((p - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_probability_undefined_is_invariant_violation() {
        // Zero-value item with β > 0 and a skip trail that underflows.
        let err = selection_probability(1.0, 0.01, 0.0, 400.0, 1.0).unwrap_err();
        assert!(matches!(err, AcoError::InvariantViolation { .. }));
    }

    #[test]
    fn test_zero_capacity_always_empty() {
        let problem = KnapsackProblem::new(items(), 0.0).unwrap();
        let config = AcoConfig::default()
            .with_ant_count(5)
            .with_max_iterations(10)
            .with_seed(9);
        let mut colony = Colony::new(problem, config).unwrap();

        while colony.advance().unwrap() {
            for ant in colony.ants() {
                assert_eq!(ant.selected_count(), 0);
                assert_eq!(ant.value, 0.0);
                assert_eq!(ant.weight, 0.0);
            }
        }
        let best = colony.best().unwrap();
        assert_eq!(best.objective, 0.0);
        assert!(best.solution.iter().all(|&s| !s));
        assert!(colony
            .history()
            .iter()
            .all(|h| h.best_objective == 0.0 && h.average_objective == 0.0));
    }

    #[test]
    fn test_ant_order_is_permutation() {
        let problem = KnapsackProblem::new(items(), 50.0).unwrap();
        let mut rng = crate::random::create_rng(4);
        let ant = problem.initialize_ant(&mut rng);
        let mut order = ant.order.clone();
        order.sort_unstable();
        assert_eq!(order, vec![0, 1, 2, 3]);
        assert_eq!(ant.current_item(), Some(ant.order[0]));
        assert!(!ant.is_complete());
    }

    #[test]
    fn test_one_item_per_decision_and_feasible() {
        let problem = KnapsackProblem::new(items(), 45.0).unwrap();
        let config = AcoConfig::default();
        let trails = PheromoneMatrix::new(4, 2, 1.0);
        let mut rng = crate::random::create_rng(12);

        let mut ant = problem.initialize_ant(&mut rng);
        for step in 1..=4 {
            problem
                .construction_step(&mut ant, &trails, &config, &mut rng)
                .unwrap();
            assert_eq!(ant.cursor, step);
            assert!(ant.weight <= 45.0);
        }
        assert!(problem.is_complete(&ant));
        assert_eq!(ant.current_item(), None);
        assert!(problem.instance().is_feasible(&ant.selection));
        assert_eq!(problem.instance().total_value(&ant.selection), ant.value);
    }

    #[test]
    fn test_deposit_targets() {
        let problem = KnapsackProblem::new(items(), 50.0).unwrap();
        let ant = KnapsackAnt {
            selection: vec![true, false, true, false],
            value: 180.0,
            weight: 40.0,
            order: vec![0, 1, 2, 3],
            cursor: 4,
        };
        // Q / (1 + (50 - 40)) = 11 / 11 = 1
        let deposits = problem.deposit_targets(&ant, 11.0);
        assert_eq!(
            deposits,
            vec![
                Deposit::new(0, SELECT, 1.0),
                Deposit::new(1, SKIP, 0.1),
                Deposit::new(2, SELECT, 1.0),
                Deposit::new(3, SKIP, 0.1),
            ]
        );
    }

    #[test]
    fn test_elite_targets() {
        let problem = KnapsackProblem::new(items(), 50.0).unwrap();
        let elite = problem.elite_targets(&vec![false, true, true, false], 5.0);
        assert_eq!(
            elite,
            vec![Deposit::new(1, SELECT, 10.0), Deposit::new(2, SELECT, 10.0)]
        );
    }

    #[test]
    fn test_elitism_reinforces_best_select_trails() {
        let problem = KnapsackProblem::new(items(), 50.0).unwrap();
        let config = AcoConfig::default()
            .with_ant_count(4)
            .with_max_iterations(2)
            .with_seed(31);
        let mut colony = Colony::new(problem, config).unwrap();
        colony.advance_iteration().unwrap();

        // 2Q = 200 on top of anything else pushes every chosen trail to the cap.
        let best = colony.best().unwrap().solution.clone();
        for (i, &chosen) in best.iter().enumerate() {
            if chosen {
                assert_eq!(colony.pheromone().get(i, SELECT), crate::colony::TAU_MAX);
            }
        }
        assert!(colony.pheromone().is_bounded());
    }
}
