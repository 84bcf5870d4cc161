//! Browser bindings.
//!
//! Exposes one handle per problem variant to JavaScript. A renderer calls
//! `advance()` from its animation loop and reads `snapshot()` between calls;
//! the configuration is passed as a plain object whose keys mirror
//! [`AcoConfig`], either snake_case or camelCase (`antCount`,
//! `evaporationRetention`, ...). Missing keys take their defaults; unknown
//! keys are rejected.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::colony::{AcoConfig, AcoProblem, Colony};
use crate::error::AcoError;
use crate::knapsack::{Item, KnapsackProblem};
use crate::tsp::{City, TspProblem};

fn js_error(err: AcoError) -> JsError {
    JsError::new(&err.to_string())
}

fn parse_config(config: JsValue) -> Result<AcoConfig, JsError> {
    if config.is_undefined() || config.is_null() {
        return Ok(AcoConfig::default());
    }
    serde_wasm_bindgen::from_value(config).map_err(|e| JsError::new(&e.to_string()))
}

fn snapshot_value<P>(colony: &Colony<P>) -> Result<JsValue, JsError>
where
    P: AcoProblem,
    P::Ant: Serialize,
    P::Solution: Serialize,
{
    serde_wasm_bindgen::to_value(&colony.snapshot()).map_err(|e| JsError::new(&e.to_string()))
}

/// TSP colony handle.
#[wasm_bindgen]
pub struct TspColonyHandle {
    inner: Colony<TspProblem>,
}

#[wasm_bindgen]
impl TspColonyHandle {
    /// Builds a colony from parallel coordinate arrays.
    #[wasm_bindgen(constructor)]
    pub fn new(xs: Vec<f64>, ys: Vec<f64>, config: JsValue) -> Result<TspColonyHandle, JsError> {
        if xs.len() != ys.len() {
            return Err(js_error(AcoError::invalid_instance(format!(
                "{} x coordinates but {} y coordinates",
                xs.len(),
                ys.len()
            ))));
        }
        let cities = xs.into_iter().zip(ys).map(|(x, y)| City::new(x, y)).collect();
        let problem = TspProblem::new(cities).map_err(js_error)?;
        let inner = Colony::new(problem, parse_config(config)?).map_err(js_error)?;
        Ok(Self { inner })
    }

    /// One atomic unit of work; `false` once finished.
    pub fn advance(&mut self) -> Result<bool, JsError> {
        self.inner.advance().map_err(js_error)
    }

    /// Advances through the rest of the running iteration.
    #[wasm_bindgen(js_name = advanceIteration)]
    pub fn advance_iteration(&mut self) -> Result<bool, JsError> {
        self.inner.advance_iteration().map_err(js_error)
    }

    /// Runs to completion.
    #[wasm_bindgen(js_name = runToCompletion)]
    pub fn run_to_completion(&mut self) -> Result<(), JsError> {
        self.inner.run_to_completion().map_err(js_error)
    }

    /// Back to iteration zero.
    #[wasm_bindgen(js_name = resetRun)]
    pub fn reset_run(&mut self) {
        self.inner.reset_run();
    }

    /// Serialized [`ColonySnapshot`](crate::colony::ColonySnapshot).
    pub fn snapshot(&self) -> Result<JsValue, JsError> {
        snapshot_value(&self.inner)
    }

    /// Best tour length, if any ant has completed.
    #[wasm_bindgen(js_name = bestObjective)]
    pub fn best_objective(&self) -> Option<f64> {
        self.inner.best().map(|b| b.objective)
    }

    /// Whether the iteration budget is exhausted.
    #[wasm_bindgen(getter)]
    pub fn finished(&self) -> bool {
        self.inner.is_finished()
    }
}

/// Knapsack colony handle.
#[wasm_bindgen]
pub struct KnapsackColonyHandle {
    inner: Colony<KnapsackProblem>,
}

#[wasm_bindgen]
impl KnapsackColonyHandle {
    /// Builds a colony from parallel value/weight arrays; item ids are the
    /// array positions.
    #[wasm_bindgen(constructor)]
    pub fn new(
        values: Vec<f64>,
        weights: Vec<f64>,
        capacity: f64,
        config: JsValue,
    ) -> Result<KnapsackColonyHandle, JsError> {
        if values.len() != weights.len() {
            return Err(js_error(AcoError::invalid_instance(format!(
                "{} values but {} weights",
                values.len(),
                weights.len()
            ))));
        }
        let items = values
            .into_iter()
            .zip(weights)
            .enumerate()
            .map(|(id, (value, weight))| Item::new(id, value, weight))
            .collect();
        let problem = KnapsackProblem::new(items, capacity).map_err(js_error)?;
        let inner = Colony::new(problem, parse_config(config)?).map_err(js_error)?;
        Ok(Self { inner })
    }

    /// One atomic unit of work; `false` once finished.
    pub fn advance(&mut self) -> Result<bool, JsError> {
        self.inner.advance().map_err(js_error)
    }

    /// Advances through the rest of the running iteration.
    #[wasm_bindgen(js_name = advanceIteration)]
    pub fn advance_iteration(&mut self) -> Result<bool, JsError> {
        self.inner.advance_iteration().map_err(js_error)
    }

    /// Runs to completion.
    #[wasm_bindgen(js_name = runToCompletion)]
    pub fn run_to_completion(&mut self) -> Result<(), JsError> {
        self.inner.run_to_completion().map_err(js_error)
    }

    /// Back to iteration zero.
    #[wasm_bindgen(js_name = resetRun)]
    pub fn reset_run(&mut self) {
        self.inner.reset_run();
    }

    /// Serialized [`ColonySnapshot`](crate::colony::ColonySnapshot).
    pub fn snapshot(&self) -> Result<JsValue, JsError> {
        snapshot_value(&self.inner)
    }

    /// Best packed value, if any ant has completed.
    #[wasm_bindgen(js_name = bestObjective)]
    pub fn best_objective(&self) -> Option<f64> {
        self.inner.best().map(|b| b.objective)
    }

    /// Weight of the best selection.
    #[wasm_bindgen(js_name = bestWeight)]
    pub fn best_weight(&self) -> Option<f64> {
        self.inner
            .best()
            .map(|b| self.inner.problem().instance().total_weight(&b.solution))
    }

    /// Whether the iteration budget is exhausted.
    #[wasm_bindgen(getter)]
    pub fn finished(&self) -> bool {
        self.inner.is_finished()
    }
}
