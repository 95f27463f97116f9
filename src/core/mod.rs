//! Core engine types: players, RNG, configuration, errors, actions, state.
//!
//! These are the building blocks every other module depends on. Nothing here
//! knows the deduction rules.

pub mod player;
pub mod rng;
pub mod config;
pub mod error;
pub mod action;
pub mod state;

pub use player::{PlayerId, PlayerMap, MAX_PLAYERS};
pub use rng::{GameRng, GameRngState};
pub use config::{GameConfig, HouseRules, PlayerKind, MIN_PLAYERS};
pub use error::{ClueError, Inconsistency, Perspective, Result};
pub use action::{Action, ActionRecord};
pub use state::{PlayerStatus, PublicState};
