//! Host-game capability contract consumed by the RHEA planner.
//!
//! The planner never sees concrete game rules. It drives a game through the
//! [`ForwardModel`] trait: an ordered legal-action list, an in-place state
//! advance, and per-player scores. Anything implementing the trait can be
//! planned for.
//!
//! The crate also ships [`PebbleGame`], a deliberately small n-player game
//! used by the demo binary and the planner's integration tests.

pub use self::{forward_model::*, pebble::*};

mod forward_model;
mod pebble;

/// Returned by a host when an action cannot be applied to the current state.
///
/// The planner treats any advance failure during a rollout as an invalid
/// candidate plan; the error never escapes the search.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("cannot advance state: {reason}")]
pub struct AdvanceError {
    reason: String,
}

impl AdvanceError {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}
