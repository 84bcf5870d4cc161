//! Property tests for colony invariants over random instances.

use proptest::prelude::*;
use u_aco::colony::{AcoConfig, Colony, TAU_MAX, TAU_MIN};
use u_aco::knapsack::{Item, KnapsackProblem};
use u_aco::tsp::{City, TspProblem};

fn tsp_colony(
    coords: &[(u8, u8)],
    ants: usize,
    iterations: usize,
    beta: f64,
    seed: u64,
) -> Colony<TspProblem> {
    let cities = coords
        .iter()
        .map(|&(x, y)| City::new(f64::from(x), f64::from(y)))
        .collect();
    let config = AcoConfig::default()
        .with_ant_count(ants)
        .with_max_iterations(iterations)
        .with_heuristic_influence(beta)
        .with_seed(seed);
    Colony::new(TspProblem::new(cities).unwrap(), config).unwrap()
}

fn knapsack_colony(
    items: &[(u8, u8)],
    capacity: u8,
    ants: usize,
    iterations: usize,
    seed: u64,
) -> Colony<KnapsackProblem> {
    let items = items
        .iter()
        .enumerate()
        .map(|(id, &(value, weight))| Item::new(id, f64::from(value), f64::from(weight)))
        .collect();
    let config = AcoConfig::default()
        .with_ant_count(ants)
        .with_max_iterations(iterations)
        .with_seed(seed);
    Colony::new(KnapsackProblem::new(items, f64::from(capacity)).unwrap(), config).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn tsp_completed_tours_visit_every_city_once(
        coords in prop::collection::vec((0u8..100, 0u8..100), 1..9),
        ants in 1usize..5,
        iterations in 1usize..5,
        beta in 0.0f64..5.0,
        seed in any::<u64>(),
    ) {
        let n = coords.len();
        let mut colony = tsp_colony(&coords, ants, iterations, beta, seed);
        loop {
            let at_boundary = colony.run_state().current_ant == ants;
            if at_boundary {
                for ant in colony.ants() {
                    prop_assert!(ant.completed);
                    prop_assert_eq!(ant.tour.len(), n + 1);
                    prop_assert_eq!(ant.tour[0], ant.tour[n]);
                    let mut seen = ant.tour[..n].to_vec();
                    seen.sort_unstable();
                    prop_assert_eq!(seen, (0..n).collect::<Vec<_>>());
                }
            }
            if !colony.advance().unwrap() {
                break;
            }
        }
    }

    #[test]
    fn tsp_pheromone_bounded_and_best_non_increasing(
        coords in prop::collection::vec((0u8..100, 0u8..100), 2..9),
        ants in 1usize..5,
        iterations in 1usize..8,
        seed in any::<u64>(),
    ) {
        let mut colony = tsp_colony(&coords, ants, iterations, 2.0, seed);
        while colony.advance_iteration().unwrap() {
            prop_assert!(colony.pheromone().values().iter().all(|v| (TAU_MIN..=TAU_MAX).contains(v)));
        }
        prop_assert!(colony.pheromone().is_bounded());
        prop_assert_eq!(colony.history().len(), iterations);
        for w in colony.history().windows(2) {
            prop_assert!(w[1].best_objective <= w[0].best_objective);
        }
    }

    #[test]
    fn knapsack_selections_fit_capacity(
        items in prop::collection::vec((0u8..50, 1u8..20), 1..12),
        capacity in 0u8..60,
        ants in 1usize..5,
        iterations in 1usize..6,
        seed in any::<u64>(),
    ) {
        let mut colony = knapsack_colony(&items, capacity, ants, iterations, seed);
        let cap = f64::from(capacity);
        loop {
            for ant in colony.ants() {
                prop_assert!(ant.weight <= cap);
                let packed: f64 = ant
                    .selection
                    .iter()
                    .zip(&items)
                    .filter(|(s, _)| **s)
                    .map(|(_, &(_, w))| f64::from(w))
                    .sum();
                prop_assert_eq!(packed, ant.weight);
            }
            if !colony.advance().unwrap() {
                break;
            }
        }
        let best = colony.best().unwrap();
        prop_assert!(colony.problem().instance().is_feasible(&best.solution));
        for w in colony.history().windows(2) {
            prop_assert!(w[1].best_objective >= w[0].best_objective);
        }
        prop_assert!(colony.pheromone().is_bounded());
    }

    #[test]
    fn stepping_and_run_to_completion_agree(
        items in prop::collection::vec((0u8..50, 1u8..20), 1..10),
        capacity in 0u8..60,
        seed in any::<u64>(),
    ) {
        let mut stepped = knapsack_colony(&items, capacity, 3, 4, seed);
        while stepped.advance().unwrap() {
            let _ = stepped.snapshot();
        }
        let mut direct = knapsack_colony(&items, capacity, 3, 4, seed);
        direct.run_to_completion().unwrap();

        let (a, b) = (stepped.best().unwrap(), direct.best().unwrap());
        prop_assert_eq!(&a.solution, &b.solution);
        prop_assert_eq!(a.objective, b.objective);
        prop_assert_eq!(a.iteration, b.iteration);
    }
}
