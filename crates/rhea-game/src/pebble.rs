use crate::{AdvanceError, ForwardModel};

/// Bonus awarded to the player who takes the last pebble.
const LAST_PEBBLE_BONUS: f64 = 10.0;

/// Maximum number of pebbles a player may take in one turn.
const MAX_TAKE: usize = 3;

/// A minimal n-player pebble-taking game.
///
/// Players move in round-robin order. On each turn the current player takes
/// 1 to 3 pebbles from a shared pool (fewer when the pool is nearly empty),
/// scoring one point per pebble and a bonus for emptying the pool. The game
/// ends when the pool is empty.
///
/// The game exists to exercise the [`ForwardModel`] contract: its
/// legal-action list shrinks near the end of the pool, so positional action
/// indices genuinely change meaning between turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PebbleGame {
    players: usize,
}

/// State of a [`PebbleGame`] in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PebbleState {
    pool: usize,
    turn: usize,
    taken: Vec<usize>,
    bonus_winner: Option<usize>,
}

impl PebbleGame {
    /// Creates a game for `players` players starting from a pool of
    /// `pebbles` pebbles.
    ///
    /// # Panics
    ///
    /// Panics if `players` is zero.
    #[must_use]
    pub fn new(players: usize) -> Self {
        assert!(players > 0, "pebble game needs at least one player");
        Self { players }
    }

    /// Builds the initial state for a pool of `pebbles`.
    #[must_use]
    pub fn initial_state(&self, pebbles: usize) -> PebbleState {
        PebbleState {
            pool: pebbles,
            turn: 0,
            taken: vec![0; self.players],
            bonus_winner: None,
        }
    }
}

impl PebbleState {
    /// Pebbles remaining in the pool.
    #[must_use]
    pub fn pool(&self) -> usize {
        self.pool
    }

    /// Pebbles taken so far by `player`.
    #[must_use]
    pub fn taken(&self, player: usize) -> usize {
        self.taken[player]
    }
}

impl ForwardModel for PebbleGame {
    type State = PebbleState;

    fn is_terminal(&self, state: &Self::State) -> bool {
        state.pool == 0
    }

    fn current_player(&self, state: &Self::State) -> usize {
        state.turn % self.players
    }

    fn player_count(&self, _state: &Self::State) -> usize {
        self.players
    }

    fn score(&self, state: &Self::State, player: usize) -> f64 {
        #[expect(clippy::cast_precision_loss)]
        let mut score = state.taken[player] as f64;
        if state.bonus_winner == Some(player) {
            score += LAST_PEBBLE_BONUS;
        }
        score
    }

    fn legal_actions(&self, state: &Self::State) -> Vec<usize> {
        // Action id `k` means "take k + 1 pebbles"; the list shrinks as the
        // pool runs out.
        (0..state.pool.min(MAX_TAKE)).collect()
    }

    fn advance(&self, state: &mut Self::State, action: usize) -> Result<(), AdvanceError> {
        let take = action + 1;
        if take > state.pool || action >= MAX_TAKE {
            return Err(AdvanceError::new(format!(
                "cannot take {take} pebbles from a pool of {}",
                state.pool
            )));
        }
        let player = self.current_player(state);
        state.pool -= take;
        state.taken[player] += take;
        if state.pool == 0 {
            state.bonus_winner = Some(player);
        }
        state.turn += 1;
        Ok(())
    }
}
