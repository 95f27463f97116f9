//! The player capability.
//!
//! The scheduler talks to every seat through `Player` and never branches on
//! whether a seat is human or computer controlled:
//!
//! - `AiPlayer` decides with the heuristic `AiPolicy`.
//! - `HumanPlayer` forwards each decision to a blocking `DecisionProvider`.

pub mod ai;
pub mod human;
pub mod request;

pub use ai::AiPlayer;
pub use human::{DecisionProvider, HumanPlayer};
pub use request::{
    AccusationRequest, DisproofRequest, HumanDecisionRequest, HumanDecisionResponse,
    MoveRequest, PlayerView, SuggestionRequest,
};

use crate::board::NodeId;
use crate::cards::{Card, Room, Triple};
use crate::core::{ClueError, PlayerId, PlayerKind};

/// One seat at the table.
///
/// Every decision gets a `PlayerView` of the deciding seat only. Returned
/// actions are validated by the turn protocol; a recoverable rejection is
/// reported through `on_rejected` before the same decision is asked again.
pub trait Player {
    fn kind(&self) -> PlayerKind;

    /// Destination for this turn's `roll`.
    fn choose_move(&mut self, view: &PlayerView<'_>, roll: u8) -> NodeId;

    /// Suggestion to make in `room`, or `None` to skip.
    fn choose_suggestion(&mut self, view: &PlayerView<'_>, room: Room) -> Option<Triple>;

    /// Accusation to make at the end of the turn, or `None`.
    fn choose_accusation(&mut self, view: &PlayerView<'_>) -> Option<Triple>;

    /// Card to show `suggester`. `matching` holds the cards of this seat's
    /// hand that disprove `triple`; it is empty when the seat cannot disprove.
    fn disclose_disproof(
        &mut self,
        view: &PlayerView<'_>,
        suggester: PlayerId,
        triple: &Triple,
        matching: &[Card],
    ) -> Option<Card>;

    /// The last decision was rejected with a recoverable error.
    fn on_rejected(&mut self, _error: &ClueError) {}
}
