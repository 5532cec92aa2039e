use std::collections::HashMap;

use rand::Rng;

/// Multiplicative decay applied to every currently-valid action's weight on
/// each observation.
const DECAY_RATE: f64 = 0.9;

/// Laplace smoothing constant added to each valid action's weight when
/// deriving probabilities.
const SMOOTHING: f64 = 1.0;

/// Decayed-frequency predictor of opponents' actions.
///
/// One model tracks every opponent: per opponent id it keeps a map from
/// host action id to a non-negative weight. Each observation first decays
/// all currently-valid actions' weights by [`DECAY_RATE`], then increments
/// the observed action's weight by one, so recent behavior dominates. The
/// derived distribution is a Laplace-smoothed categorical restricted to the
/// valid set, which keeps it well-defined (and summing to one) even with no
/// history at all.
#[derive(Debug, Clone, Default)]
pub struct OpponentModel {
    weights: HashMap<usize, HashMap<usize, f64>>,
}

impl OpponentModel {
    /// Creates an empty model tracking no opponents.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts tracking `opponent` with an empty history.
    ///
    /// The evaluator only simulates moves for tracked opponents; untracked
    /// actors end a rollout's opponent phase early.
    pub fn track(&mut self, opponent: usize) {
        self.weights.entry(opponent).or_default();
    }

    /// Whether `opponent` has been tracked (or observed) this episode.
    #[must_use]
    pub fn is_tracked(&self, opponent: usize) -> bool {
        self.weights.contains_key(&opponent)
    }

    /// Records that `opponent` played `action` when `valid_actions` were on
    /// offer.
    ///
    /// Every action in `valid_actions` decays first (weights absent from
    /// the map are zero and stay zero), then `action`'s weight grows by
    /// one. The increment applies even when `action` is missing from
    /// `valid_actions`; `tests::observing_outside_the_valid_set_still_counts`
    /// pins that behavior down.
    pub fn observe(&mut self, opponent: usize, action: usize, valid_actions: &[usize]) {
        let counts = self.weights.entry(opponent).or_default();
        for &valid in valid_actions {
            if let Some(weight) = counts.get_mut(&valid) {
                *weight *= DECAY_RATE;
            }
        }
        *counts.entry(action).or_insert(0.0) += 1.0;
    }

    /// Smoothed probability of each action in `valid_actions`, in the same
    /// order. Deterministic given the stored weights.
    ///
    /// The result sums to one whenever `valid_actions` is nonempty.
    #[must_use]
    pub fn distribution(&self, opponent: usize, valid_actions: &[usize]) -> Vec<f64> {
        let counts = self.weights.get(&opponent);
        let weight_of = |action: usize| {
            counts
                .and_then(|c| c.get(&action))
                .copied()
                .unwrap_or(0.0)
        };
        let total: f64 = valid_actions
            .iter()
            .map(|&a| weight_of(a) + SMOOTHING)
            .sum();
        valid_actions
            .iter()
            .map(|&a| (weight_of(a) + SMOOTHING) / total)
            .collect()
    }

    /// Samples one action for `opponent` from its smoothed distribution
    /// over `valid_actions`.
    ///
    /// Draws a single uniform value and walks `valid_actions` in order,
    /// returning the first action whose cumulative mass reaches the draw.
    /// If floating-point rounding leaves the walk short, falls back to a
    /// uniform pick.
    ///
    /// # Panics
    ///
    /// Panics if `valid_actions` is empty.
    pub fn sample<R>(&self, opponent: usize, valid_actions: &[usize], rng: &mut R) -> usize
    where
        R: Rng + ?Sized,
    {
        assert!(!valid_actions.is_empty(), "cannot sample from no actions");
        let probs = self.distribution(opponent, valid_actions);

        let draw = rng.random::<f64>();
        let mut cumulative = 0.0;
        for (&action, prob) in valid_actions.iter().zip(probs) {
            cumulative += prob;
            if draw <= cumulative {
                return action;
            }
        }
        valid_actions[rng.random_range(0..valid_actions.len())]
    }

    /// Forgets all weights and tracked opponents. Called once per episode.
    pub fn reset(&mut self) {
        self.weights.clear();
    }

    #[cfg(test)]
    fn weight(&self, opponent: usize, action: usize) -> f64 {
        self.weights
            .get(&opponent)
            .and_then(|c| c.get(&action))
            .copied()
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn distribution_sums_to_one_with_and_without_history() {
        let mut model = OpponentModel::new();
        let valid = [3, 5, 9];

        let sum: f64 = model.distribution(1, &valid).iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);

        for _ in 0..40 {
            model.observe(1, 5, &valid);
            model.observe(1, 9, &valid);
        }
        let sum: f64 = model.distribution(1, &valid).iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn observation_increments_taken_and_decays_the_rest() {
        let mut model = OpponentModel::new();
        let valid = [0, 1, 2];
        model.observe(2, 0, &valid);
        model.observe(2, 1, &valid);
        model.observe(2, 1, &valid);

        let before_taken = model.weight(2, 1);
        let before_other = model.weight(2, 0);
        model.observe(2, 1, &valid);

        assert!(model.weight(2, 1) > before_taken);
        assert_eq!(model.weight(2, 1), before_taken * DECAY_RATE + 1.0);
        assert_eq!(model.weight(2, 0), before_other * DECAY_RATE);
    }

    #[test]
    fn repeated_observations_skew_the_distribution() {
        let mut model = OpponentModel::new();
        let valid = [0, 1];
        for _ in 0..30 {
            model.observe(0, 1, &valid);
        }
        let probs = model.distribution(0, &valid);
        assert!(probs[1] > probs[0]);
        assert!(probs[1] > 0.8);
    }

    #[test]
    fn observing_outside_the_valid_set_still_counts() {
        // The taken action gains weight even when absent from the valid
        // set; this test locks that behavior in.
        let mut model = OpponentModel::new();
        model.observe(0, 7, &[0, 1, 2]);
        assert_eq!(model.weight(0, 7), 1.0);
    }

    #[test]
    fn sample_returns_only_valid_actions() {
        let mut model = OpponentModel::new();
        let mut rng = Pcg32::seed_from_u64(42);
        let valid = [4, 8, 15];
        for _ in 0..10 {
            model.observe(1, 8, &valid);
        }
        for _ in 0..200 {
            let action = model.sample(1, &valid, &mut rng);
            assert!(valid.contains(&action));
        }
    }

    #[test]
    fn sample_favors_the_observed_action() {
        let mut model = OpponentModel::new();
        let mut rng = Pcg32::seed_from_u64(9);
        let valid = [0, 1, 2];
        for _ in 0..50 {
            model.observe(3, 2, &valid);
        }
        let hits = (0..300)
            .filter(|_| model.sample(3, &valid, &mut rng) == 2)
            .count();
        assert!(hits > 150, "expected action 2 to dominate, got {hits}/300");
    }

    #[test]
    fn reset_forgets_everything() {
        let mut model = OpponentModel::new();
        model.track(1);
        model.observe(1, 0, &[0, 1]);
        model.reset();
        assert!(!model.is_tracked(1));
        assert_eq!(model.weight(1, 0), 0.0);
    }
}
