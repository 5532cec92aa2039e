use serde::{Deserialize, Serialize};

/// Raised when planner hyperparameters are invalid at construction time.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("population size must be greater than zero")]
    EmptyPopulation,
}

/// Immutable hyperparameters for one planner instance.
///
/// Only `population_size` is validated; the remaining fields are accepted
/// as given. Construct via [`PlannerConfig::new`] or start from
/// [`PlannerConfig::default`] and adjust.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    population_size: usize,
    horizon: usize,
    generations: usize,
    mutation_rate: f64,
    max_score: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            population_size: 20,
            horizon: 5,
            generations: 15,
            mutation_rate: 0.2,
            max_score: 50.0,
        }
    }
}

impl PlannerConfig {
    /// Creates a validated config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyPopulation`] when `population_size` is
    /// zero.
    pub fn new(
        population_size: usize,
        horizon: usize,
        generations: usize,
        mutation_rate: f64,
    ) -> Result<Self, ConfigError> {
        if population_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        Ok(Self {
            population_size,
            horizon,
            generations,
            mutation_rate,
            ..Self::default()
        })
    }

    /// Replaces the fitness normalization scale (see [`Self::max_score`]).
    #[must_use]
    pub fn with_max_score(mut self, max_score: f64) -> Self {
        self.max_score = max_score;
        self
    }

    /// Number of individuals per generation. Always greater than zero.
    #[must_use]
    pub fn population_size(&self) -> usize {
        self.population_size
    }

    /// Gene-sequence length: how many future steps each plan covers.
    #[must_use]
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Termination budget: the engine runs exactly this many generations
    /// per decision, checked at generation granularity. A generation-count
    /// budget (rather than a wall-clock deadline) keeps seeded runs
    /// reproducible.
    #[must_use]
    pub fn generations(&self) -> usize {
        self.generations
    }

    /// Advisory mutation-rate hyperparameter.
    ///
    /// The current engine mutates every non-elite child exactly once per
    /// generation regardless of this value; the field is carried so tuned
    /// configs round-trip unchanged.
    #[must_use]
    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    /// Scale constant dividing the relative score margin into a normalized
    /// fitness. Game-dependent (roughly the achievable score range);
    /// defaults to 50.
    #[must_use]
    pub fn max_score(&self) -> f64 {
        self.max_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_population_is_rejected() {
        let err = PlannerConfig::new(0, 5, 15, 0.2).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyPopulation));
    }

    #[test]
    fn other_fields_are_accepted_as_given() {
        // Only the population size is validated.
        let config = PlannerConfig::new(1, 0, 0, -3.0).unwrap();
        assert_eq!(config.horizon(), 0);
        assert_eq!(config.generations(), 0);
        assert_eq!(config.mutation_rate(), -3.0);
    }

    #[test]
    fn serde_roundtrip_preserves_all_fields() {
        let config = PlannerConfig::new(32, 8, 40, 0.35)
            .unwrap()
            .with_max_score(200.0);
        let json = serde_json::to_string(&config).unwrap();
        let restored: PlannerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);
    }
}
