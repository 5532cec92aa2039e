use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use rand::Rng;
use rhea_game::ForwardModel;

use crate::{
    PlannerConfig,
    genome::{Individual, UNEVALUATED},
    opponent::OpponentModel,
};

/// Scores candidate plans by forward simulation.
///
/// One rollout clones the live state and replays the genome gene by gene,
/// re-resolving each positional gene against the current legal-action list
/// and letting the opponent model fill in other players' moves in between.
/// The result is a relative score margin normalized by the configured
/// `max_score`.
///
/// # Fault collapse
///
/// Anything that goes wrong inside a rollout — an out-of-range gene, an
/// empty action list, a host `advance` failure — collapses that plan's
/// fitness to [`f64::NEG_INFINITY`]. One broken candidate never aborts the
/// search.
///
/// # Caching
///
/// Fitness is cached per gene sequence (structural key, not object
/// identity) for the duration of one decision episode; the agent clears the
/// cache at every decision start. Cache hits skip simulation entirely and
/// leave the diagnostic counters untouched.
#[derive(Debug)]
pub struct Evaluator {
    config: PlannerConfig,
    cache: HashMap<Vec<usize>, f64>,
    evaluations: u64,
    total_eval_time: Duration,
}

impl Evaluator {
    #[must_use]
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            config,
            cache: HashMap::new(),
            evaluations: 0,
            total_eval_time: Duration::ZERO,
        }
    }

    /// Computes (or looks up) the fitness of `individual` from `state`, as
    /// seen by `player`.
    pub fn evaluate<M, R>(
        &mut self,
        individual: &Individual,
        model: &M,
        state: &M::State,
        player: usize,
        opponents: &OpponentModel,
        rng: &mut R,
    ) -> f64
    where
        M: ForwardModel,
        R: Rng + ?Sized,
    {
        if individual.genes().is_empty() {
            return UNEVALUATED;
        }
        if let Some(&cached) = self.cache.get(individual.genes()) {
            return cached;
        }

        let start = Instant::now();
        let fitness = self.simulate(individual, model, state, player, opponents, rng);
        self.total_eval_time += start.elapsed();
        self.evaluations += 1;

        self.cache.insert(individual.genes().to_vec(), fitness);
        fitness
    }

    /// Runs one rollout. Returns the sentinel for invalid or faulting
    /// plans.
    fn simulate<M, R>(
        &self,
        individual: &Individual,
        model: &M,
        state: &M::State,
        player: usize,
        opponents: &OpponentModel,
        rng: &mut R,
    ) -> f64
    where
        M: ForwardModel,
        R: Rng + ?Sized,
    {
        let mut sim = state.clone();

        let mut steps = 0;
        for &gene in individual.genes() {
            if model.is_terminal(&sim) || steps >= self.config.horizon() {
                break;
            }
            steps += 1;

            let available = model.legal_actions(&sim);
            if gene >= available.len() {
                // Covers the empty list as well: the plan asks for an
                // action that does not exist.
                return UNEVALUATED;
            }
            if model.advance(&mut sim, available[gene]).is_err() {
                return UNEVALUATED;
            }

            // Let modeled opponents move until it is our turn again. An
            // untracked actor ends the phase early; the rollout then
            // under-simulates rather than guessing.
            while !model.is_terminal(&sim) && model.current_player(&sim) != player {
                let actor = model.current_player(&sim);
                if !opponents.is_tracked(actor) {
                    break;
                }
                let valid = model.legal_actions(&sim);
                if valid.is_empty() {
                    // Non-terminal state offering no moves: host
                    // inconsistency, same penalty as a faulting advance.
                    return UNEVALUATED;
                }
                let action = opponents.sample(actor, &valid, rng);
                if model.advance(&mut sim, action).is_err() {
                    return UNEVALUATED;
                }
            }
        }

        self.relative_fitness(model, &sim, player)
    }

    /// Score margin over the opponents' mean, normalized by `max_score`.
    fn relative_fitness<M>(&self, model: &M, sim: &M::State, player: usize) -> f64
    where
        M: ForwardModel,
    {
        let my_score = model.score(sim, player);
        let mut total = 0.0;
        let mut count = 0;
        for other in 0..model.player_count(sim) {
            if other != player {
                total += model.score(sim, other);
                count += 1;
            }
        }
        let opponent_mean = if count == 0 {
            0.0
        } else {
            total / f64::from(count)
        };
        (my_score - opponent_mean) / self.config.max_score()
    }

    /// Drops all cached fitness values. Called at the start of every
    /// decision episode; the diagnostic counters survive.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Number of real simulations performed (cache hits excluded).
    #[must_use]
    pub fn evaluation_count(&self) -> u64 {
        self.evaluations
    }

    /// Mean wall time per real simulation, [`Duration::ZERO`] before the
    /// first one.
    #[must_use]
    pub fn average_evaluation_time(&self) -> Duration {
        match u32::try_from(self.evaluations) {
            Ok(count) if count > 0 => self.total_eval_time / count,
            _ => Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use crate::test_support::StubGame;

    use super::*;

    fn evaluator(horizon: usize) -> Evaluator {
        let config = PlannerConfig::new(4, horizon, 1, 0.2).unwrap();
        Evaluator::new(config)
    }

    #[test]
    fn empty_genome_is_invalid() {
        let game = StubGame::new(2, 4);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut evaluator = evaluator(3);

        let fitness = evaluator.evaluate(
            &Individual::new(vec![]),
            &game,
            &game.initial_state(),
            0,
            &OpponentModel::new(),
            &mut rng,
        );
        assert_eq!(fitness, f64::NEG_INFINITY);
        assert_eq!(evaluator.evaluation_count(), 0);
    }

    #[test]
    fn out_of_range_first_gene_is_invalid() {
        let game = StubGame::new(2, 4);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut evaluator = evaluator(3);

        // The stub offers 3 actions; gene 99 cannot resolve.
        let fitness = evaluator.evaluate(
            &Individual::new(vec![99, 0, 0]),
            &game,
            &game.initial_state(),
            0,
            &OpponentModel::new(),
            &mut rng,
        );
        assert_eq!(fitness, f64::NEG_INFINITY);
    }

    #[test]
    fn faulting_advance_is_collapsed_not_propagated() {
        let game = StubGame::new(2, 4).with_faulty_action(1);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut evaluator = evaluator(3);

        let fitness = evaluator.evaluate(
            &Individual::new(vec![1, 0, 0]),
            &game,
            &game.initial_state(),
            0,
            &OpponentModel::new(),
            &mut rng,
        );
        assert_eq!(fitness, f64::NEG_INFINITY);
    }

    #[test]
    fn fitness_is_the_normalized_relative_margin() {
        let game = StubGame::new(1, 3);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut evaluator = evaluator(3);

        // Single player: opponent mean is zero, so fitness is
        // score / max_score = (2 + 2 + 2) / 50.
        let fitness = evaluator.evaluate(
            &Individual::new(vec![2, 2, 2]),
            &game,
            &game.initial_state(),
            0,
            &OpponentModel::new(),
            &mut rng,
        );
        assert!((fitness - 6.0 / 50.0).abs() < 1e-12);
    }

    #[test]
    fn tracked_opponents_are_simulated() {
        let game = StubGame::new(2, 4);
        let mut rng = Pcg32::seed_from_u64(5);
        let mut evaluator = evaluator(2);
        let mut opponents = OpponentModel::new();
        opponents.track(1);

        let fitness = evaluator.evaluate(
            &Individual::new(vec![2, 2]),
            &game,
            &game.initial_state(),
            0,
            &opponents,
            &mut rng,
        );
        // Our two genes score 4; the sampled opponent scores 0..=4, so the
        // margin stays in [0, 4] and fitness within [0, 4/50].
        assert!(fitness.is_finite());
        assert!((0.0..=4.0 / 50.0).contains(&fitness));
    }

    #[test]
    fn cache_hit_skips_simulation_and_counters() {
        let game = StubGame::new(2, 4);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut evaluator = evaluator(3);
        let state = game.initial_state();
        let opponents = OpponentModel::new();

        let individual = Individual::new(vec![0, 1, 2]);
        let first = evaluator.evaluate(&individual, &game, &state, 0, &opponents, &mut rng);
        assert_eq!(evaluator.evaluation_count(), 1);

        // A structurally equal genome hits the cache even though it is a
        // different allocation.
        let twin = Individual::new(vec![0, 1, 2]);
        let second = evaluator.evaluate(&twin, &game, &state, 0, &opponents, &mut rng);
        assert_eq!(first, second);
        assert_eq!(evaluator.evaluation_count(), 1);
    }

    #[test]
    fn clearing_the_cache_forces_resimulation() {
        let game = StubGame::new(2, 4);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut evaluator = evaluator(3);
        let state = game.initial_state();
        let opponents = OpponentModel::new();
        let individual = Individual::new(vec![0, 0, 0]);

        evaluator.evaluate(&individual, &game, &state, 0, &opponents, &mut rng);
        evaluator.clear_cache();
        evaluator.evaluate(&individual, &game, &state, 0, &opponents, &mut rng);
        assert_eq!(evaluator.evaluation_count(), 2);
    }

    #[test]
    fn rollout_stops_at_the_horizon() {
        let game = StubGame::new(1, 100);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut evaluator = evaluator(2);

        // Five genes but horizon 2: only the first two apply.
        let fitness = evaluator.evaluate(
            &Individual::new(vec![2, 2, 2, 2, 2]),
            &game,
            &game.initial_state(),
            0,
            &OpponentModel::new(),
            &mut rng,
        );
        assert!((fitness - 4.0 / 50.0).abs() < 1e-12);
    }
}
