//! Knowledge engine.
//!
//! Each player (and a spectator with no hand) keeps a `BeliefState`: which
//! holders every card may still be with, plus the disjunctive facts that do not
//! pin a card down yet. Observations flow in through the `KnowledgeEngine`,
//! which redacts them per observer, and every update is propagated to a
//! fixpoint.
//!
//! ## Key Types
//!
//! - `Holder`, `HolderSet`: A seat or the solution, and sets of them
//! - `Observation`: Facts established by the turn protocol
//! - `BeliefState`: One observer's knowledge, with `CardStatus` per card
//! - `KnowledgeEngine`: All observers of one game

pub mod holders;
pub mod observation;
pub mod belief;
pub mod engine;

pub use holders::{Holder, HolderSet};
pub use observation::Observation;
pub use belief::{BeliefDelta, BeliefState, CardStatus, Constraint, StatusChange};
pub use engine::KnowledgeEngine;
