//! Suggestion/accusation protocol.
//!
//! A `Turn` walks through move, optional suggestion, disproof resolution and
//! optional accusation. It enforces who may reveal what: a candidate holding a
//! suggested card must show one, and only a matching card.

pub mod turn;

pub use turn::{disproof_order, Turn, TurnContext, TurnPhase};
