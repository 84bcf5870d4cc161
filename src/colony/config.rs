//! Colony configuration.
//!
//! [`AcoConfig`] holds every numeric parameter that shapes construction and
//! pheromone dynamics. It is validated once, when a
//! [`Colony`](super::Colony) is built.

use crate::error::AcoError;

/// Lower bound every pheromone cell is clamped to after an update pass.
pub const TAU_MIN: f64 = 0.01;

/// Upper bound every pheromone cell is clamped to after an update pass.
pub const TAU_MAX: f64 = 10.0;

/// Configuration for an ant colony run.
///
/// # Defaults
///
/// ```
/// use u_aco::colony::AcoConfig;
///
/// let config = AcoConfig::default();
/// assert_eq!(config.ant_count, 10);
/// assert_eq!(config.max_iterations, 100);
/// assert!(config.validate().is_ok());
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_aco::colony::AcoConfig;
///
/// let config = AcoConfig::default()
///     .with_ant_count(20)
///     .with_max_iterations(250)
///     .with_evaporation_retention(0.8)
///     .with_pheromone_influence(1.0)
///     .with_heuristic_influence(2.5)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct AcoConfig {
    /// Number of ants spawned per iteration.
    #[cfg_attr(feature = "serde", serde(alias = "antCount", alias = "numAnts"))]
    pub ant_count: usize,

    /// Number of iterations before the run terminates.
    #[cfg_attr(feature = "serde", serde(alias = "maxIterations"))]
    pub max_iterations: usize,

    /// Retention factor ρ in (0, 1]; every trail is multiplied by it
    /// once per iteration. 1.0 disables evaporation.
    #[cfg_attr(feature = "serde", serde(alias = "evaporationRetention", alias = "rho"))]
    pub evaporation_retention: f64,

    /// Exponent α applied to pheromone trails.
    #[cfg_attr(feature = "serde", serde(alias = "pheromoneInfluence", alias = "alpha"))]
    pub pheromone_influence: f64,

    /// Exponent β applied to heuristic desirability.
    #[cfg_attr(feature = "serde", serde(alias = "heuristicInfluence", alias = "beta"))]
    pub heuristic_influence: f64,

    /// Deposit scale Q.
    #[cfg_attr(feature = "serde", serde(alias = "depositScale", alias = "Q"))]
    pub deposit_scale: f64,

    /// Trail level every cell starts at (and returns to on reset).
    #[cfg_attr(feature = "serde", serde(alias = "initialPheromone"))]
    pub initial_pheromone: f64,

    /// Random seed for reproducibility.
    ///
    /// `None` draws a seed from OS entropy.
    pub seed: Option<u64>,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            ant_count: 10,
            max_iterations: 100,
            evaporation_retention: 0.5,
            pheromone_influence: 1.0,
            heuristic_influence: 3.0,
            deposit_scale: 100.0,
            initial_pheromone: 1.0,
            seed: None,
        }
    }
}

impl AcoConfig {
    /// Sets the number of ants per iteration.
    pub fn with_ant_count(mut self, n: usize) -> Self {
        self.ant_count = n;
        self
    }

    /// Sets the iteration budget.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the retention factor ρ.
    pub fn with_evaporation_retention(mut self, rho: f64) -> Self {
        self.evaporation_retention = rho;
        self
    }

    /// Sets the pheromone exponent α.
    pub fn with_pheromone_influence(mut self, alpha: f64) -> Self {
        self.pheromone_influence = alpha;
        self
    }

    /// Sets the heuristic exponent β.
    pub fn with_heuristic_influence(mut self, beta: f64) -> Self {
        self.heuristic_influence = beta;
        self
    }

    /// Sets the deposit scale Q.
    pub fn with_deposit_scale(mut self, q: f64) -> Self {
        self.deposit_scale = q;
        self
    }

    /// Sets the initial trail level.
    pub fn with_initial_pheromone(mut self, tau0: f64) -> Self {
        self.initial_pheromone = tau0;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), AcoError> {
        if self.ant_count == 0 {
            return Err(AcoError::config("ant_count must be at least 1"));
        }
        if self.max_iterations == 0 {
            return Err(AcoError::config("max_iterations must be at least 1"));
        }
        let rho = self.evaporation_retention;
        if !(rho > 0.0 && rho <= 1.0) {
            return Err(AcoError::config(format!(
                "evaporation_retention must be in (0, 1], got {rho}"
            )));
        }
        if !(self.pheromone_influence >= 0.0 && self.pheromone_influence.is_finite()) {
            return Err(AcoError::config(format!(
                "pheromone_influence must be finite and >= 0, got {}",
                self.pheromone_influence
            )));
        }
        if !(self.heuristic_influence >= 0.0 && self.heuristic_influence.is_finite()) {
            return Err(AcoError::config(format!(
                "heuristic_influence must be finite and >= 0, got {}",
                self.heuristic_influence
            )));
        }
        if !(self.deposit_scale > 0.0 && self.deposit_scale.is_finite()) {
            return Err(AcoError::config(format!(
                "deposit_scale must be finite and > 0, got {}",
                self.deposit_scale
            )));
        }
        if !(TAU_MIN..=TAU_MAX).contains(&self.initial_pheromone) {
            return Err(AcoError::config(format!(
                "initial_pheromone must be in [{TAU_MIN}, {TAU_MAX}], got {}",
                self.initial_pheromone
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AcoConfig::default();
        assert!((config.evaporation_retention - 0.5).abs() < 1e-12);
        assert!((config.deposit_scale - 100.0).abs() < 1e-12);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_ants() {
        let config = AcoConfig::default().with_ant_count(0);
        assert!(matches!(config.validate(), Err(AcoError::Config { .. })));
    }

    #[test]
    fn test_validate_zero_iterations() {
        let config = AcoConfig::default().with_max_iterations(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_retention_bounds() {
        assert!(AcoConfig::default()
            .with_evaporation_retention(0.0)
            .validate()
            .is_err());
        assert!(AcoConfig::default()
            .with_evaporation_retention(1.5)
            .validate()
            .is_err());
        assert!(AcoConfig::default()
            .with_evaporation_retention(f64::NAN)
            .validate()
            .is_err());
        assert!(AcoConfig::default()
            .with_evaporation_retention(1.0)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_negative_exponents() {
        assert!(AcoConfig::default()
            .with_pheromone_influence(-1.0)
            .validate()
            .is_err());
        assert!(AcoConfig::default()
            .with_heuristic_influence(-0.1)
            .validate()
            .is_err());
        assert!(AcoConfig::default()
            .with_pheromone_influence(0.0)
            .with_heuristic_influence(0.0)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_deposit_scale() {
        assert!(AcoConfig::default()
            .with_deposit_scale(0.0)
            .validate()
            .is_err());
        assert!(AcoConfig::default()
            .with_deposit_scale(f64::INFINITY)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_initial_pheromone_within_bounds() {
        assert!(AcoConfig::default()
            .with_initial_pheromone(0.001)
            .validate()
            .is_err());
        assert!(AcoConfig::default()
            .with_initial_pheromone(TAU_MAX)
            .validate()
            .is_ok());
    }
}
