//! Turn actions and their history records.
//!
//! One turn is a short sequence of actions: a move, then optionally a
//! suggestion and the disproof it provokes, then optionally an accusation, then
//! the end of the turn. The protocol state machine decides which action is legal
//! when; this module only describes them.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::board::NodeId;
use crate::cards::{Card, Triple};

/// A single step of a turn.
///
/// ```
/// use rust_clue::cards::{Room, Suspect, Triple, Weapon};
/// use rust_clue::core::Action;
///
/// let suggest = Action::Suggest(Triple::new(Suspect::Plum, Weapon::Knife, Room::Hall));
/// assert_eq!(suggest.name(), "suggest");
/// assert!(!suggest.is_private());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Move the active token to `destination` (possibly where it already is).
    Move { destination: NodeId },

    /// Suggest a triple whose room is the active player's current room.
    Suggest(Triple),

    /// Decline to suggest this turn.
    SkipSuggestion,

    /// The current disproof candidate answers: `Some(card)` shows a card,
    /// `None` declares holding none of the suggested cards.
    Disprove(Option<Card>),

    /// Final, checked accusation.
    Accuse(Triple),

    /// Finish the turn without accusing.
    EndTurn,
}

impl Action {
    /// Short verb for diagnostics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Action::Move { .. } => "move",
            Action::Suggest(_) => "suggest",
            Action::SkipSuggestion => "skip the suggestion",
            Action::Disprove(_) => "disprove",
            Action::Accuse(_) => "accuse",
            Action::EndTurn => "end the turn",
        }
    }

    /// True when the action carries a card only some observers may see.
    #[must_use]
    pub fn is_private(&self) -> bool {
        matches!(self, Action::Disprove(Some(_)))
    }
}

/// A recorded action with metadata for history tracking.
///
/// Used for:
/// - Per-round logs handed to output collaborators
/// - Replay/debugging
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Round in which the action was taken (starts at 1).
    pub round: u32,

    /// Position within the game's action sequence.
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: Action, round: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            round,
            sequence,
        }
    }
}
