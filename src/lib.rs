//! # rust-clue
//!
//! A Cluedo engine: deal, board movement, the suggestion/disproof protocol,
//! and a per-player deduction engine driving heuristic computer players.
//!
//! ## Design Principles
//!
//! 1. **Sound knowledge**: every observer keeps its own `BeliefState`, fed only
//!    with what that observer witnessed. Beliefs only ever gain knowledge, and
//!    a contradiction is a hard error rather than a silent reset.
//!
//! 2. **Rules as a state machine**: a turn is a sequence of validated actions.
//!    The protocol decides who must act and what is legal; players only choose.
//!
//! 3. **One capability for every seat**: human and computer players implement
//!    the same `Player` trait, so the scheduler never branches on seat kind.
//!
//! 4. **Deterministic**: one seed fixes the deal, the dice and every AI
//!    decision.
//!
//! ## Modules
//!
//! - `core`: player ids, RNG, configuration, errors, actions, public state
//! - `cards`: the 21-card deck, the solution and the hands
//! - `board`: board graph and movement
//! - `knowledge`: observations, belief states and constraint propagation
//! - `protocol`: the turn state machine
//! - `ai`: heuristic decision policy
//! - `players`: the `Player` capability with AI and human seats
//! - `game`: scheduler, round logs and snapshots

pub mod core;
pub mod cards;
pub mod board;
pub mod knowledge;
pub mod protocol;
pub mod ai;
pub mod players;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, ClueError, GameConfig, GameRng, HouseRules, PlayerId, PlayerKind,
    PlayerMap, PlayerStatus, PublicState, Result,
};

pub use crate::cards::{Card, CardRegistry, Category, Room, Suspect, Triple, Weapon};

pub use crate::board::{Board, NodeId};

pub use crate::knowledge::{BeliefState, CardStatus, KnowledgeEngine, Observation};

pub use crate::protocol::{Turn, TurnPhase};

pub use crate::ai::AiPolicy;

pub use crate::players::{
    AiPlayer, DecisionProvider, HumanDecisionRequest, HumanDecisionResponse, HumanPlayer, Player,
    PlayerView,
};

pub use crate::game::{Game, GameBuilder, GameOutcome, GameSnapshot, RoundLog};
