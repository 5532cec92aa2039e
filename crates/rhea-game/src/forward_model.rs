use crate::AdvanceError;

/// Simulation capabilities a host game must expose to the planner.
///
/// # Action indexing
///
/// [`legal_actions`](Self::legal_actions) returns an **ordered** list of
/// host-side action ids. The planner's genomes index *positions* in that
/// list, not the ids themselves; positions are re-resolved against a fresh
/// `legal_actions` call at every simulation step, because the list changes
/// as the game progresses. The ids are what get fed back into
/// [`advance`](Self::advance) and what opponent models count.
///
/// # State contract
///
/// `State` is cloned once per rollout and then advanced **in place**; the
/// live state handed to the planner is never mutated. Implementations must
/// make `Clone` a genuinely independent deep copy.
pub trait ForwardModel {
    type State: Clone;

    /// Whether the game is over in `state`.
    fn is_terminal(&self, state: &Self::State) -> bool;

    /// The player whose turn it is in `state`.
    fn current_player(&self, state: &Self::State) -> usize;

    /// Total number of players (fixed for the whole game).
    fn player_count(&self, state: &Self::State) -> usize;

    /// Current score of `player` in `state`. Higher is better.
    fn score(&self, state: &Self::State, player: usize) -> f64;

    /// Ordered list of action ids legal for the current player.
    ///
    /// Must be empty exactly when no move is possible; a non-terminal state
    /// with an empty list is treated as a host inconsistency by callers.
    fn legal_actions(&self, state: &Self::State) -> Vec<usize>;

    /// Applies `action` (an id from [`legal_actions`](Self::legal_actions))
    /// to `state`, mutating it into the successor state.
    fn advance(&self, state: &mut Self::State, action: usize) -> Result<(), AdvanceError>;
}
