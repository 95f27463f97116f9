//! Turn state machine.
//!
//! ```text
//! AwaitingMove ──move──▶ AwaitingSuggestion ──suggest──▶ AwaitingDisproof(c₁)
//!      │                      │ skip                        │ decline ▶ AwaitingDisproof(c₂) …
//!      │ (not a card room)    ▼                             │ show / exhausted
//!      └───────────────▶ AwaitingAccusation ◀───────────────┘
//!                             │ accuse / end turn
//!                             ▼
//!                        TurnComplete
//! ```
//!
//! `Turn::apply` validates an action against the current phase, the board and
//! the hands, then mutates the public state and returns the observations the
//! action produced. A rejected action leaves both the turn and the public state
//! untouched.

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};
use std::fmt;
use tracing::{debug, info};

use crate::board::{Board, NodeId};
use crate::cards::{Card, CardRegistry, Triple};
use crate::core::{Action, ClueError, HouseRules, PlayerId, PublicState, Result};
use crate::knowledge::Observation;

/// Where a turn stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    AwaitingMove,
    AwaitingSuggestion,
    AwaitingDisproof { candidate: PlayerId },
    AwaitingAccusation,
    TurnComplete,
}

impl fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnPhase::AwaitingMove => f.write_str("awaiting move"),
            TurnPhase::AwaitingSuggestion => f.write_str("awaiting suggestion"),
            TurnPhase::AwaitingDisproof { candidate } => {
                write!(f, "awaiting disproof from {candidate}")
            }
            TurnPhase::AwaitingAccusation => f.write_str("awaiting accusation"),
            TurnPhase::TurnComplete => f.write_str("turn complete"),
        }
    }
}

/// Everything a turn reads or changes outside itself.
pub struct TurnContext<'a> {
    pub board: &'a Board,
    pub registry: &'a CardRegistry,
    pub rules: &'a HouseRules,
    pub public: &'a mut PublicState,
}

/// Players asked to disprove a suggestion by `suggester`, clockwise.
///
/// Eliminated players are skipped unless the house rule keeps them disproving.
#[must_use]
pub fn disproof_order(
    suggester: PlayerId,
    public: &PublicState,
    rules: &HouseRules,
) -> SmallVec<[PlayerId; 5]> {
    suggester
        .clockwise_after(public.player_count())
        .filter(|p| rules.eliminated_players_disprove || public.is_active(*p))
        .collect()
}

/// One player's turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    player: PlayerId,
    roll: u8,
    phase: TurnPhase,
    start: NodeId,
    entered_room: bool,
    suggestion: Option<Triple>,
    remaining: SmallVec<[PlayerId; 5]>,
    disproved_by: Option<PlayerId>,
    accusation: Option<(Triple, bool)>,
}

impl Turn {
    /// Start `player`'s turn after rolling `roll` while standing on `start`.
    #[must_use]
    pub fn begin(player: PlayerId, roll: u8, start: NodeId) -> Self {
        Self {
            player,
            roll,
            phase: TurnPhase::AwaitingMove,
            start,
            entered_room: false,
            suggestion: None,
            remaining: SmallVec::new(),
            disproved_by: None,
            accusation: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    #[must_use]
    pub fn roll(&self) -> u8 {
        self.roll
    }

    #[must_use]
    pub fn start(&self) -> NodeId {
        self.start
    }

    /// True when the move took the player into a different card room.
    #[must_use]
    pub fn entered_room(&self) -> bool {
        self.entered_room
    }

    #[must_use]
    pub fn suggestion(&self) -> Option<Triple> {
        self.suggestion
    }

    /// The player who must answer the suggestion now.
    #[must_use]
    pub fn disproof_candidate(&self) -> Option<PlayerId> {
        match self.phase {
            TurnPhase::AwaitingDisproof { candidate } => Some(candidate),
            _ => None,
        }
    }

    /// The player who showed a card, once one did.
    #[must_use]
    pub fn disproved_by(&self) -> Option<PlayerId> {
        self.disproved_by
    }

    /// The accusation made this turn and whether it was correct.
    #[must_use]
    pub fn accusation(&self) -> Option<(Triple, bool)> {
        self.accusation
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == TurnPhase::TurnComplete
    }

    /// Apply `action` taken by `actor`.
    ///
    /// Disproof actions come from the current candidate; every other action
    /// from the turn's player.
    pub fn apply(
        &mut self,
        actor: PlayerId,
        action: &Action,
        ctx: &mut TurnContext<'_>,
    ) -> Result<SmallVec<[Observation; 2]>> {
        let expected_actor = self.disproof_candidate().unwrap_or(self.player);
        if actor != expected_actor {
            return Err(self.unexpected(actor, action));
        }

        match (self.phase, action) {
            (TurnPhase::AwaitingMove, Action::Move { destination }) => {
                self.apply_move(*destination, ctx)
            }
            (TurnPhase::AwaitingSuggestion, Action::Suggest(triple)) => {
                self.apply_suggestion(*triple, ctx)
            }
            (TurnPhase::AwaitingSuggestion, Action::SkipSuggestion) => {
                if ctx.rules.suggestion_required_on_entry && self.entered_room {
                    return Err(self.unexpected(actor, action));
                }
                self.phase = TurnPhase::AwaitingAccusation;
                Ok(SmallVec::new())
            }
            (TurnPhase::AwaitingDisproof { candidate }, Action::Disprove(card)) => {
                self.apply_disproof(candidate, *card, ctx)
            }
            (TurnPhase::AwaitingAccusation, Action::Accuse(triple)) => {
                self.apply_accusation(*triple, ctx)
            }
            (TurnPhase::AwaitingAccusation, Action::EndTurn) => {
                self.phase = TurnPhase::TurnComplete;
                Ok(SmallVec::new())
            }
            _ => Err(self.unexpected(actor, action)),
        }
    }

    fn unexpected(&self, actor: PlayerId, action: &Action) -> ClueError {
        ClueError::UnexpectedAction {
            player: actor,
            action: action.name(),
            phase: self.phase,
        }
    }

    fn apply_move(
        &mut self,
        destination: NodeId,
        ctx: &mut TurnContext<'_>,
    ) -> Result<SmallVec<[Observation; 2]>> {
        let from = ctx.public.position(self.player);
        if !ctx.board.is_reachable(from, destination, self.roll) {
            return Err(ClueError::InvalidMove {
                player: self.player,
                destination,
                roll: self.roll,
            });
        }

        ctx.public.move_player(self.player, destination);
        self.entered_room = destination != from && ctx.board.is_room(destination);
        self.phase = if ctx.board.is_room(destination) {
            TurnPhase::AwaitingSuggestion
        } else {
            TurnPhase::AwaitingAccusation
        };
        debug!(player = %self.player, %from, to = %destination, roll = self.roll, "moved");
        Ok(SmallVec::new())
    }

    fn apply_suggestion(
        &mut self,
        triple: Triple,
        ctx: &mut TurnContext<'_>,
    ) -> Result<SmallVec<[Observation; 2]>> {
        let position = ctx.public.position(self.player);
        if ctx.board.room_at(position) != Some(triple.room) {
            return Err(ClueError::InvalidSuggestion {
                player: self.player,
                suggested: triple.room,
                position,
            });
        }

        if let Some(seat) = ctx.public.seat_of(triple.suspect) {
            ctx.public.move_player(seat, position);
        }
        ctx.public.move_weapon(triple.weapon, position);

        self.suggestion = Some(triple);
        self.remaining = disproof_order(self.player, ctx.public, ctx.rules);
        self.phase = self.next_disproof_phase();
        debug!(player = %self.player, suggestion = %triple, "suggested");

        Ok(smallvec![Observation::SuggestionMade {
            suggester: self.player,
            triple,
        }])
    }

    fn next_disproof_phase(&mut self) -> TurnPhase {
        if self.remaining.is_empty() {
            TurnPhase::AwaitingAccusation
        } else {
            TurnPhase::AwaitingDisproof {
                candidate: self.remaining.remove(0),
            }
        }
    }

    fn apply_disproof(
        &mut self,
        candidate: PlayerId,
        card: Option<Card>,
        ctx: &mut TurnContext<'_>,
    ) -> Result<SmallVec<[Observation; 2]>> {
        let Some(triple) = self.suggestion else {
            return Err(ClueError::UnexpectedAction {
                player: candidate,
                action: "disprove",
                phase: self.phase,
            });
        };
        let matching = ctx.registry.hand(candidate).matching(&triple);

        match card {
            None if !matching.is_empty() => Err(ClueError::IllegalDisproof {
                player: candidate,
                reason: format!("declined to disprove {triple} while holding a matching card"),
            }),
            None => {
                debug!(player = %candidate, suggester = %self.player, "cannot disprove");
                self.phase = self.next_disproof_phase();
                Ok(smallvec![Observation::DisproofDeclined {
                    player: candidate,
                    triple,
                }])
            }
            Some(card) if !matching.contains(&card) => Err(ClueError::IllegalDisproof {
                player: candidate,
                reason: format!("showed a card that does not disprove {triple}"),
            }),
            Some(card) => {
                debug!(player = %candidate, suggester = %self.player, "showed a card");
                self.disproved_by = Some(candidate);
                self.remaining.clear();
                self.phase = TurnPhase::AwaitingAccusation;
                Ok(smallvec![Observation::DisproofShown {
                    disprover: candidate,
                    suggester: self.player,
                    triple,
                    card: Some(card),
                }])
            }
        }
    }

    fn apply_accusation(
        &mut self,
        triple: Triple,
        ctx: &mut TurnContext<'_>,
    ) -> Result<SmallVec<[Observation; 2]>> {
        let position = ctx.public.position(self.player);
        if ctx.rules.accuse_only_in_center && position != ctx.board.center() {
            return Err(ClueError::AccusationNotAllowed {
                player: self.player,
                position,
            });
        }

        let correct = ctx.registry.solution().matches(&triple);
        if correct {
            ctx.public.crown(self.player);
            info!(player = %self.player, accusation = %triple, "correct accusation");
        } else {
            ctx.public.eliminate(self.player);
            info!(player = %self.player, accusation = %triple, "wrong accusation, player eliminated");
        }

        self.accusation = Some((triple, correct));
        self.phase = TurnPhase::TurnComplete;
        Ok(smallvec![Observation::AccusationMade {
            accuser: self.player,
            triple,
            correct,
        }])
    }
}
