use std::time::Duration;

use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use rhea_game::ForwardModel;

use crate::{Evaluator, EvolutionEngine, OpponentModel, PlannerConfig, PlannerSeed};

/// Decision-making facade wiring the engine, evaluator, and opponent model
/// together for one planning player.
///
/// # Episode lifecycle
///
/// Call [`initialize`](Self::initialize) once at the start of each game
/// (it records which seat the agent plays, resets the opponent model, and
/// clears the fitness cache), then [`select_action`](Self::select_action)
/// on each of the agent's turns. Between its own turns, feed opponents'
/// observed moves through
/// [`observe_opponent_action`](Self::observe_opponent_action) so rollout
/// predictions track their recent behavior.
///
/// The agent is a pure in-process decision function: no state persists
/// across episodes beyond the diagnostic counters.
#[derive(Debug)]
pub struct RheaAgent {
    engine: EvolutionEngine,
    evaluator: Evaluator,
    opponents: OpponentModel,
    rng: Pcg32,
    player: usize,
}

impl RheaAgent {
    /// Creates an agent with a random seed.
    ///
    /// For replayable decisions use [`Self::with_seed`].
    #[must_use]
    pub fn new(config: PlannerConfig) -> Self {
        Self::with_seed(config, rand::rng().random())
    }

    /// Creates an agent whose every random draw is determined by `seed`.
    #[must_use]
    pub fn with_seed(config: PlannerConfig, seed: PlannerSeed) -> Self {
        Self {
            engine: EvolutionEngine::new(config),
            evaluator: Evaluator::new(config),
            opponents: OpponentModel::new(),
            rng: Pcg32::from_seed(seed.into_bytes()),
            player: 0,
        }
    }

    /// Starts a new episode from `state`.
    ///
    /// The agent plays whichever seat is to move in `state`; every other
    /// seat gets a fresh opponent model.
    pub fn initialize<M>(&mut self, model: &M, state: &M::State)
    where
        M: ForwardModel,
    {
        self.player = model.current_player(state);
        self.opponents.reset();
        for seat in 0..model.player_count(state) {
            if seat != self.player {
                self.opponents.track(seat);
            }
        }
        self.evaluator.clear_cache();
    }

    /// Runs the full evolution synchronously and returns the chosen action
    /// as a *position* into the host's current legal-action list.
    ///
    /// Returns `None` when the host offers no legal actions. When the best
    /// plan's first gene no longer resolves against the current list (an
    /// invalid plan can still win a generation of invalid plans), a
    /// uniformly random legal position is chosen instead of failing.
    pub fn select_action<M>(&mut self, model: &M, state: &M::State) -> Option<usize>
    where
        M: ForwardModel,
    {
        let legal = model.legal_actions(state);
        if legal.is_empty() {
            return None;
        }

        self.evaluator.clear_cache();
        self.engine.run(
            model,
            state,
            legal.len(),
            self.player,
            &self.opponents,
            &mut self.evaluator,
            &mut self.rng,
        );

        let choice = match self.engine.next_action() {
            Ok(position) if position < legal.len() => position,
            _ => self.rng.random_range(0..legal.len()),
        };
        Some(choice)
    }

    /// Out-of-band observation feed: `opponent` played `action` (a host
    /// action id) when `valid_actions` were on offer.
    ///
    /// Observations for seats that were never registered at
    /// [`initialize`](Self::initialize) are ignored.
    pub fn observe_opponent_action(
        &mut self,
        opponent: usize,
        action: usize,
        valid_actions: &[usize],
    ) {
        if self.opponents.is_tracked(opponent) {
            self.opponents.observe(opponent, action, valid_actions);
        }
    }

    /// The seat this agent plans for, as recorded by the last
    /// [`initialize`](Self::initialize).
    #[must_use]
    pub fn player(&self) -> usize {
        self.player
    }

    /// Total rollouts simulated over the agent's lifetime.
    #[must_use]
    pub fn evaluation_count(&self) -> u64 {
        self.evaluator.evaluation_count()
    }

    /// Mean wall time per rollout.
    #[must_use]
    pub fn average_evaluation_time(&self) -> Duration {
        self.evaluator.average_evaluation_time()
    }
}
