//! Rolling-Horizon Evolutionary Algorithm (RHEA) planner for turn-based
//! multi-agent games.
//!
//! The planner chooses the next move for one player by evolving a
//! population of candidate action sequences ("genomes") and simulating each
//! of them forward through the host game's [`ForwardModel`]. Opponents'
//! moves during a rollout are filled in by a decayed-frequency
//! [`OpponentModel`]. After a fixed number of generations the first action
//! of the best surviving plan is returned.
//!
//! # Architecture
//!
//! ```text
//! RheaAgent (episode lifecycle, decision entry point)
//!     ↓ runs
//! EvolutionEngine (population, selection, mutation, elitism)
//!     ↓ scores via
//! Evaluator (rollouts, fitness cache, fault collapse)
//!     ↓ predicts opponents via
//! OpponentModel (decayed action frequencies)
//! ```
//!
//! # Determinism
//!
//! All randomness flows through one [`rand_pcg::Pcg32`] seeded by a
//! [`PlannerSeed`]. Population initialization, mutation, tournament
//! selection, and opponent sampling draw from that single generator in a
//! fixed order, so a seed plus a deterministic forward model reproduces a
//! decision exactly.
//!
//! # Failure policy
//!
//! A candidate plan that indexes a nonexistent action, or whose rollout
//! faults inside the host's `advance`, is collapsed to the fitness sentinel
//! ([`f64::NEG_INFINITY`]) and the search continues. Only construction-time
//! errors ([`ConfigError`]) and API misuse ([`NotEvolvedYet`]) surface to
//! the caller.
//!
//! [`ForwardModel`]: rhea_game::ForwardModel

pub use self::{
    agent::RheaAgent,
    config::{ConfigError, PlannerConfig},
    engine::{EvolutionEngine, NotEvolvedYet},
    evaluator::Evaluator,
    genome::Individual,
    opponent::OpponentModel,
    seed::{ParseSeedError, PlannerSeed},
};

mod agent;
mod config;
mod engine;
mod evaluator;
mod genome;
mod opponent;
mod seed;

#[cfg(test)]
mod test_support;
