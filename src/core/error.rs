//! Crate-wide error type.
//!
//! Errors split into two groups:
//!
//! - **Recoverable**: the acting player submitted something illegal
//!   (`InvalidMove`, `InvalidSuggestion`, `UnexpectedAction`,
//!   `AccusationNotAllowed`). The scheduler asks the same player again.
//! - **Fatal**: the game can no longer be trusted (`IllegalDisproof`,
//!   `KnowledgeInconsistency`, `Setup`). These abort the run and are surfaced
//!   to the caller.

use std::fmt;

use thiserror::Error;

use super::player::PlayerId;
use crate::board::NodeId;
use crate::cards::{Card, Category, Room};
use crate::knowledge::Holder;
use crate::protocol::TurnPhase;

/// Whose belief state detected an inconsistency.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Perspective {
    /// A seated player's own belief state.
    Player(PlayerId),
    /// The public-information view that sees no hand.
    Spectator,
}

impl fmt::Display for Perspective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Perspective::Player(p) => write!(f, "{p}"),
            Perspective::Spectator => f.write_str("spectator"),
        }
    }
}

/// Why propagation refused to continue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Inconsistency {
    /// Two different cards of one category were both placed in the solution.
    DuplicateSolution {
        category: Category,
        first: Card,
        second: Card,
    },
    /// Every card of a category was ruled out of the solution.
    NoSolutionCandidate { category: Category },
    /// A card was ruled out of every hand and of the solution.
    NoPossibleHolder { card: Card },
    /// A "holds at least one of" constraint lost all of its cards.
    UnsatisfiableConstraint { holder: PlayerId },
    /// More cards were assigned to a player than their hand holds.
    HandOverflow { player: PlayerId },
    /// Fewer cards remain possible for a player than their hand holds.
    HandUnderflow { player: PlayerId },
    /// A fact assigned a card to a holder already ruled out for it.
    Contradiction { card: Card, holder: Holder },
}

impl fmt::Display for Inconsistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inconsistency::DuplicateSolution { category, first, second } => {
                write!(f, "both {first} and {second} placed in the solution as the {category}")
            }
            Inconsistency::NoSolutionCandidate { category } => {
                write!(f, "no {category} card can be in the solution")
            }
            Inconsistency::NoPossibleHolder { card } => write!(f, "{card} has no possible holder"),
            Inconsistency::UnsatisfiableConstraint { holder } => {
                write!(f, "{holder} cannot hold any card of a disproved suggestion")
            }
            Inconsistency::HandOverflow { player } => {
                write!(f, "{player} is assigned more cards than their hand holds")
            }
            Inconsistency::HandUnderflow { player } => {
                write!(f, "{player} has fewer possible cards than their hand holds")
            }
            Inconsistency::Contradiction { card, holder } => {
                write!(f, "{card} was placed with {holder}, which was already ruled out")
            }
        }
    }
}

/// Every failure the engine can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClueError {
    #[error("invalid move for {player}: {destination} is not reachable with a roll of {roll}")]
    InvalidMove {
        player: PlayerId,
        destination: NodeId,
        roll: u8,
    },

    #[error("invalid suggestion by {player}: suggested the {suggested} while standing in {position}")]
    InvalidSuggestion {
        player: PlayerId,
        suggested: Room,
        position: NodeId,
    },

    #[error("illegal disproof by {player}: {reason}")]
    IllegalDisproof { player: PlayerId, reason: String },

    #[error("knowledge inconsistency for {perspective}: {reason}")]
    KnowledgeInconsistency {
        perspective: Perspective,
        reason: Inconsistency,
    },

    #[error("setup error: {0}")]
    Setup(String),

    #[error("{player} cannot {action} while the turn is in phase {phase}")]
    UnexpectedAction {
        player: PlayerId,
        action: &'static str,
        phase: TurnPhase,
    },

    #[error("{player} may not accuse from {position}")]
    AccusationNotAllowed { player: PlayerId, position: NodeId },
}

impl ClueError {
    /// True when the scheduler should ask the same player again.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ClueError::InvalidMove { .. }
                | ClueError::InvalidSuggestion { .. }
                | ClueError::UnexpectedAction { .. }
                | ClueError::AccusationNotAllowed { .. }
        )
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ClueError>;
