use tracing::{debug, warn};

use super::request::{
    AccusationRequest, DisproofRequest, HumanDecisionRequest, HumanDecisionResponse,
    MoveRequest, SuggestionRequest,
};
use super::{Player, PlayerView};
use crate::board::NodeId;
use crate::cards::{Card, Room, Suspect, Triple, Weapon};
use crate::core::{ClueError, PlayerId, PlayerKind};

/// Prompts asked for a disproof card before the answer is handed to the
/// protocol as is.
pub const DEFAULT_MAX_PROMPTS: u32 = 16;

/// The blocking input collaborator behind a human seat.
pub trait DecisionProvider {
    fn decide(&mut self, request: &HumanDecisionRequest) -> HumanDecisionResponse;

    /// The previous response was rejected by the rules.
    fn rejected(&mut self, _error: &ClueError) {}
}

impl<F> DecisionProvider for F
where
    F: FnMut(&HumanDecisionRequest) -> HumanDecisionResponse,
{
    fn decide(&mut self, request: &HumanDecisionRequest) -> HumanDecisionResponse {
        self(request)
    }
}

/// Human-controlled seat.
///
/// Responses of the wrong kind count as "stay put" or "skip". A disproof
/// answer that does not disprove is asked again, up to `max_prompts` times.
#[derive(Clone, Debug)]
pub struct HumanPlayer<D> {
    seat: PlayerId,
    provider: D,
    max_prompts: u32,
}

impl<D: DecisionProvider> HumanPlayer<D> {
    #[must_use]
    pub fn new(seat: PlayerId, provider: D) -> Self {
        Self {
            seat,
            provider,
            max_prompts: DEFAULT_MAX_PROMPTS,
        }
    }

    #[must_use]
    pub fn with_max_prompts(mut self, max_prompts: u32) -> Self {
        self.max_prompts = max_prompts.max(1);
        self
    }

    #[must_use]
    pub fn provider(&self) -> &D {
        &self.provider
    }

    fn ask(&mut self, request: HumanDecisionRequest) -> HumanDecisionResponse {
        debug!(seat = %self.seat, request = request.kind(), "awaiting human decision");
        self.provider.decide(&request)
    }
}

impl<D: DecisionProvider> Player for HumanPlayer<D> {
    fn kind(&self) -> PlayerKind {
        PlayerKind::Human
    }

    fn choose_move(&mut self, view: &PlayerView<'_>, roll: u8) -> NodeId {
        let position = view.position();
        let request = HumanDecisionRequest::Move(MoveRequest {
            player: self.seat,
            roll,
            position,
            destinations: view.board.reachable(position, roll),
        });
        match self.ask(request) {
            HumanDecisionResponse::Move(destination) => destination,
            other => {
                warn!(seat = %self.seat, response = ?other, "expected a move, staying put");
                position
            }
        }
    }

    fn choose_suggestion(&mut self, view: &PlayerView<'_>, room: Room) -> Option<Triple> {
        let request = HumanDecisionRequest::Suggestion(SuggestionRequest {
            player: self.seat,
            room,
            suspects: Suspect::ALL,
            weapons: Weapon::ALL,
            required: view.rules.suggestion_required_on_entry,
        });
        match self.ask(request) {
            HumanDecisionResponse::Suggest(triple) => triple,
            other => {
                warn!(seat = %self.seat, response = ?other, "expected a suggestion, skipping");
                None
            }
        }
    }

    fn choose_accusation(&mut self, view: &PlayerView<'_>) -> Option<Triple> {
        let request = HumanDecisionRequest::Accusation(AccusationRequest {
            player: self.seat,
            position: view.position(),
            allowed: view.may_accuse_here(),
        });
        match self.ask(request) {
            HumanDecisionResponse::Accuse(triple) => triple,
            other => {
                warn!(seat = %self.seat, response = ?other, "expected an accusation, skipping");
                None
            }
        }
    }

    fn disclose_disproof(
        &mut self,
        _view: &PlayerView<'_>,
        suggester: PlayerId,
        triple: &Triple,
        matching: &[Card],
    ) -> Option<Card> {
        if matching.is_empty() {
            return None;
        }

        let mut answer = None;
        for attempt in 1..=self.max_prompts {
            let request = HumanDecisionRequest::Disproof(DisproofRequest {
                player: self.seat,
                suggester,
                triple: *triple,
                matching: matching.iter().copied().collect(),
                attempt,
            });
            answer = match self.ask(request) {
                HumanDecisionResponse::Disprove(card) => card,
                _ => None,
            };
            if answer.is_some_and(|card| matching.contains(&card)) {
                break;
            }
            warn!(seat = %self.seat, attempt, "disproof must show one of the matching cards");
        }
        answer
    }

    fn on_rejected(&mut self, error: &ClueError) {
        self.provider.rejected(error);
    }
}
