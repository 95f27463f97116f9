//! What a player sees when asked to decide, and the structured
//! request/response pairs exchanged with a human input collaborator.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::{Board, Destination, NodeId};
use crate::cards::{Card, Room, Suspect, Triple, Weapon};
use crate::core::{HouseRules, PlayerId, PublicState};
use crate::knowledge::BeliefState;

/// Read-only view handed to a player for one decision.
///
/// Holds the deciding seat's own belief state only; hidden cards of other
/// seats are never reachable from here.
#[derive(Clone, Copy, Debug)]
pub struct PlayerView<'a> {
    pub seat: PlayerId,
    pub belief: &'a BeliefState,
    pub board: &'a Board,
    pub public: &'a PublicState,
    pub rules: &'a HouseRules,
    pub round_cap: u32,
}

impl PlayerView<'_> {
    #[must_use]
    pub fn position(&self) -> NodeId {
        self.public.position(self.seat)
    }

    #[must_use]
    pub fn round(&self) -> u32 {
        self.public.round
    }

    /// Whether the house rules allow accusing from the current position.
    #[must_use]
    pub fn may_accuse_here(&self) -> bool {
        !self.rules.accuse_only_in_center || self.position() == self.board.center()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub player: PlayerId,
    pub roll: u8,
    pub position: NodeId,
    /// Legal destinations, the current node included.
    pub destinations: Vec<Destination>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionRequest {
    pub player: PlayerId,
    /// The room a suggestion must name.
    pub room: Room,
    /// Selectable suspects and weapons. A player may name cards of their own.
    pub suspects: [Suspect; 6],
    pub weapons: [Weapon; 6],
    /// Skipping is not allowed.
    pub required: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisproofRequest {
    pub player: PlayerId,
    pub suggester: PlayerId,
    pub triple: Triple,
    /// Cards of the player's hand that disprove `triple`. One of them must
    /// be shown.
    pub matching: SmallVec<[Card; 3]>,
    /// Starts at 1 and grows on every re-prompt.
    pub attempt: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccusationRequest {
    pub player: PlayerId,
    pub position: NodeId,
    /// False when the house rules forbid accusing from `position`.
    pub allowed: bool,
}

/// A decision the core needs from a human.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HumanDecisionRequest {
    Move(MoveRequest),
    Suggestion(SuggestionRequest),
    Disproof(DisproofRequest),
    Accusation(AccusationRequest),
}

impl HumanDecisionRequest {
    #[must_use]
    pub fn player(&self) -> PlayerId {
        match self {
            HumanDecisionRequest::Move(r) => r.player,
            HumanDecisionRequest::Suggestion(r) => r.player,
            HumanDecisionRequest::Disproof(r) => r.player,
            HumanDecisionRequest::Accusation(r) => r.player,
        }
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            HumanDecisionRequest::Move(_) => "move",
            HumanDecisionRequest::Suggestion(_) => "suggestion",
            HumanDecisionRequest::Disproof(_) => "disproof",
            HumanDecisionRequest::Accusation(_) => "accusation",
        }
    }
}

/// The human's answer. `None` means "skip" for suggestions and accusations
/// and "cannot disprove" for disproofs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HumanDecisionResponse {
    Move(NodeId),
    Suggest(Option<Triple>),
    Disprove(Option<Card>),
    Accuse(Option<Triple>),
}
