//! Deterministic stub forward model shared by the planner's unit tests.

use rhea_game::{AdvanceError, ForwardModel};

/// A trivial scoring game: every turn offers the same three actions
/// (ids 0, 1, 2) and playing action `a` adds `a` points to the current
/// player's score. The game ends after a fixed number of turns.
///
/// Action 2 is always the best move, so tests can predict what a working
/// planner must choose.
#[derive(Debug, Clone)]
pub(crate) struct StubGame {
    players: usize,
    max_turns: usize,
    faulty_action: Option<usize>,
}

#[derive(Debug, Clone)]
pub(crate) struct StubState {
    scores: Vec<f64>,
    turn: usize,
}

impl StubGame {
    pub(crate) fn new(players: usize, max_turns: usize) -> Self {
        Self {
            players,
            max_turns,
            faulty_action: None,
        }
    }

    /// Makes `advance` fail whenever the given action id is played.
    pub(crate) fn with_faulty_action(mut self, action: usize) -> Self {
        self.faulty_action = Some(action);
        self
    }

    pub(crate) fn initial_state(&self) -> StubState {
        StubState {
            scores: vec![0.0; self.players],
            turn: 0,
        }
    }
}

impl ForwardModel for StubGame {
    type State = StubState;

    fn is_terminal(&self, state: &Self::State) -> bool {
        state.turn >= self.max_turns
    }

    fn current_player(&self, state: &Self::State) -> usize {
        state.turn % self.players
    }

    fn player_count(&self, _state: &Self::State) -> usize {
        self.players
    }

    fn score(&self, state: &Self::State, player: usize) -> f64 {
        state.scores[player]
    }

    fn legal_actions(&self, state: &Self::State) -> Vec<usize> {
        if self.is_terminal(state) {
            return Vec::new();
        }
        vec![0, 1, 2]
    }

    fn advance(&self, state: &mut Self::State, action: usize) -> Result<(), AdvanceError> {
        if self.faulty_action == Some(action) {
            return Err(AdvanceError::new("stub fault"));
        }
        let player = self.current_player(state);
        #[expect(clippy::cast_precision_loss)]
        {
            state.scores[player] += action as f64;
        }
        state.turn += 1;
        Ok(())
    }
}
