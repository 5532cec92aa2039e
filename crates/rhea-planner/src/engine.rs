use rand::Rng;
use rhea_game::ForwardModel;

use crate::{Evaluator, Individual, OpponentModel, PlannerConfig};

/// Raised when the chosen action is requested before any completed run.
#[derive(Debug, Clone, Copy, derive_more::Display, derive_more::Error)]
#[display("no evolved plan available; run the engine first")]
pub struct NotEvolvedYet;

/// Drives the generational search over candidate plans.
///
/// The engine is *idle* until [`run`](Self::run) completes at least one
/// generation, after which it is *evolved* and
/// [`next_action`](Self::next_action) yields the best plan's first gene.
/// Each `run` discards all previous population state.
#[derive(Debug)]
pub struct EvolutionEngine {
    config: PlannerConfig,
    population: Vec<Individual>,
    best: Option<Individual>,
}

impl EvolutionEngine {
    #[must_use]
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            config,
            population: Vec::new(),
            best: None,
        }
    }

    /// Evolves a fresh population for the configured number of generations
    /// and retains the best individual of the last evaluated generation.
    ///
    /// Every generation: evaluate all individuals, pick the best (ties
    /// keep the earliest-seen), then rebuild the population from
    /// `population_size - 1` tournament-selected, mutated children plus an
    /// unmutated clone of the best (elitism). The population size is
    /// invariant across generations.
    ///
    /// RNG draws happen in a fixed order — population initialization,
    /// then per generation: opponent sampling inside evaluation (in
    /// population order), then per child two tournament draws followed by
    /// the mutation locus and value. Reordering these draws breaks seed
    /// reproducibility.
    ///
    /// # Panics
    ///
    /// Panics if `legal_action_count` is zero; callers must decline empty
    /// decision points before running the search.
    pub fn run<M, R>(
        &mut self,
        model: &M,
        state: &M::State,
        legal_action_count: usize,
        player: usize,
        opponents: &OpponentModel,
        evaluator: &mut Evaluator,
        rng: &mut R,
    ) where
        M: ForwardModel,
        R: Rng + ?Sized,
    {
        assert!(legal_action_count > 0, "cannot plan over an empty action set");

        let size = self.config.population_size();
        self.population = (0..size)
            .map(|_| Individual::random(self.config.horizon(), legal_action_count, rng))
            .collect();
        self.best = None;

        for _ in 0..self.config.generations() {
            for individual in &mut self.population {
                let fitness =
                    evaluator.evaluate(&*individual, model, state, player, opponents, rng);
                individual.set_fitness(fitness);
            }

            let best = generation_best(&self.population);
            self.best = Some(best.clone());

            let mut next = Vec::with_capacity(size);
            while next.len() < size - 1 {
                let winner = tournament_select(&self.population, rng);
                let mut child = winner.clone_unevaluated();
                child.mutate(legal_action_count, rng);
                next.push(child);
            }
            next.push(best.clone_unevaluated());
            self.population = next;
        }
    }

    /// First gene of the best individual from the last run.
    ///
    /// # Errors
    ///
    /// [`NotEvolvedYet`] while idle (no run, or a run with a zero
    /// generation or zero horizon budget that retained no actionable
    /// plan).
    pub fn next_action(&self) -> Result<usize, NotEvolvedYet> {
        self.best
            .as_ref()
            .and_then(|best| best.genes().first().copied())
            .ok_or(NotEvolvedYet)
    }

    /// Best individual of the last evaluated generation, with its fitness.
    #[must_use]
    pub fn last_best(&self) -> Option<&Individual> {
        self.best.as_ref()
    }

    /// Current population; wholesale-replaced every generation.
    #[must_use]
    pub fn population(&self) -> &[Individual] {
        &self.population
    }
}

/// Maximum-fitness individual; ties keep the earliest-seen.
fn generation_best(population: &[Individual]) -> &Individual {
    let mut best = &population[0];
    for individual in &population[1..] {
        if individual.fitness() > best.fitness() {
            best = individual;
        }
    }
    best
}

/// Binary tournament: two uniform draws with replacement, strictly greater
/// fitness wins, a tie is won by the second draw. The asymmetric tie-break
/// is deliberate and load-bearing for seed reproducibility.
fn tournament_select<'a, R>(population: &'a [Individual], rng: &mut R) -> &'a Individual
where
    R: Rng + ?Sized,
{
    let first = &population[rng.random_range(0..population.len())];
    let second = &population[rng.random_range(0..population.len())];
    if first.fitness() > second.fitness() {
        first
    } else {
        second
    }
}
