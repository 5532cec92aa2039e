use rand::Rng;

/// Fitness value marking an individual as unevaluated or invalid.
pub(crate) const UNEVALUATED: f64 = f64::NEG_INFINITY;

/// A candidate plan: a fixed-length sequence of action indices plus a
/// fitness score.
///
/// Each gene is a *position* into the legal-action list at the simulation
/// step where it is consumed; the evaluator re-resolves positions every
/// step. Fitness starts at the sentinel ([`f64::NEG_INFINITY`]) and is only
/// meaningful after evaluation. The gene sequence's length never changes
/// over an individual's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    genes: Vec<usize>,
    fitness: f64,
}

impl Individual {
    /// Wraps a gene sequence into an unevaluated individual.
    #[must_use]
    pub fn new(genes: Vec<usize>) -> Self {
        Self {
            genes,
            fitness: UNEVALUATED,
        }
    }

    /// Creates an individual with `horizon` genes drawn uniformly from
    /// `[0, action_space)`.
    #[must_use]
    pub fn random<R>(horizon: usize, action_space: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let genes = (0..horizon)
            .map(|_| rng.random_range(0..action_space))
            .collect();
        Self::new(genes)
    }

    /// Deep-copies the gene sequence into a fresh individual with sentinel
    /// fitness.
    ///
    /// Offspring must re-earn their fitness; a stale parent score is never
    /// carried forward.
    #[must_use]
    pub fn clone_unevaluated(&self) -> Self {
        Self::new(self.genes.clone())
    }

    /// Overwrites one uniformly chosen locus with a uniformly random value
    /// in `[0, action_space)`. Exactly one gene changes per call (possibly
    /// to the same value it already held). An empty genome is left
    /// untouched.
    pub fn mutate<R>(&mut self, action_space: usize, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        if self.genes.is_empty() {
            return;
        }
        let locus = rng.random_range(0..self.genes.len());
        self.genes[locus] = rng.random_range(0..action_space);
    }

    /// The gene sequence.
    #[must_use]
    pub fn genes(&self) -> &[usize] {
        &self.genes
    }

    /// Current fitness; [`f64::NEG_INFINITY`] while unevaluated.
    #[must_use]
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}
