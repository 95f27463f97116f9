//! Observable events.
//!
//! The protocol emits one `Observation` per fact it establishes. Not every
//! observer sees every fact in full: a hand is seen only by its owner, and a
//! shown card only by the two players involved (unless the house rule makes
//! it public). `Observation::view_for` produces what one observer sees.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Card, Triple};
use crate::core::{Perspective, PlayerId};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Observation {
    /// A player's own hand, seen at setup.
    HandRevealed {
        player: PlayerId,
        cards: SmallVec<[Card; 8]>,
    },

    /// `suggester` named `triple`. Reveals nothing about ownership.
    SuggestionMade { suggester: PlayerId, triple: Triple },

    /// `disprover` showed a card of `triple` to `suggester`. `card` is `None`
    /// in the views of observers who did not see it.
    DisproofShown {
        disprover: PlayerId,
        suggester: PlayerId,
        triple: Triple,
        card: Option<Card>,
    },

    /// `player` holds none of `triple`.
    DisproofDeclined { player: PlayerId, triple: Triple },

    /// `accuser` made a public accusation, right or wrong.
    AccusationMade {
        accuser: PlayerId,
        triple: Triple,
        correct: bool,
    },
}

impl Observation {
    /// What `observer` sees of this event, `None` when it sees nothing.
    ///
    /// With `reveal_all`, shown cards are public.
    ///
    /// ```
    /// use rust_clue::cards::{Card, Room, Suspect, Triple, Weapon};
    /// use rust_clue::core::{Perspective, PlayerId};
    /// use rust_clue::knowledge::Observation;
    ///
    /// let triple = Triple::new(Suspect::Green, Weapon::Rope, Room::Hall);
    /// let shown = Observation::DisproofShown {
    ///     disprover: PlayerId::new(1),
    ///     suggester: PlayerId::new(0),
    ///     triple,
    ///     card: Some(Card::from(Weapon::Rope)),
    /// };
    ///
    /// let bystander = shown.view_for(Perspective::Player(PlayerId::new(2)), false);
    /// assert!(matches!(bystander, Some(Observation::DisproofShown { card: None, .. })));
    /// ```
    #[must_use]
    pub fn view_for(&self, observer: Perspective, reveal_all: bool) -> Option<Observation> {
        match self {
            Observation::HandRevealed { player, .. } => {
                (observer == Perspective::Player(*player)).then(|| self.clone())
            }
            Observation::DisproofShown {
                disprover,
                suggester,
                triple,
                card,
            } => {
                let sees_card = reveal_all
                    || observer == Perspective::Player(*suggester)
                    || observer == Perspective::Player(*disprover);
                Some(Observation::DisproofShown {
                    disprover: *disprover,
                    suggester: *suggester,
                    triple: *triple,
                    card: if sees_card { *card } else { None },
                })
            }
            Observation::SuggestionMade { .. }
            | Observation::DisproofDeclined { .. }
            | Observation::AccusationMade { .. } => Some(self.clone()),
        }
    }

    /// Short label for logs. Never includes a private card.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Observation::HandRevealed { .. } => "hand_revealed",
            Observation::SuggestionMade { .. } => "suggestion_made",
            Observation::DisproofShown { .. } => "disproof_shown",
            Observation::DisproofDeclined { .. } => "disproof_declined",
            Observation::AccusationMade { .. } => "accusation_made",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Room, Suspect, Weapon};

    fn triple() -> Triple {
        Triple::new(Suspect::Scarlet, Weapon::Candlestick, Room::Library)
    }

    fn shown() -> Observation {
        Observation::DisproofShown {
            disprover: PlayerId::new(2),
            suggester: PlayerId::new(0),
            triple: triple(),
            card: Some(Card::from(Room::Library)),
        }
    }

    fn shown_card(view: Option<Observation>) -> Option<Card> {
        match view {
            Some(Observation::DisproofShown { card, .. }) => card,
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn test_hand_visible_only_to_owner() {
        let hand = Observation::HandRevealed {
            player: PlayerId::new(1),
            cards: SmallVec::from_slice(&[Card::from(Weapon::Rope)]),
        };
        assert!(hand.view_for(Perspective::Player(PlayerId::new(1)), false).is_some());
        assert!(hand.view_for(Perspective::Player(PlayerId::new(0)), true).is_none());
        assert!(hand.view_for(Perspective::Spectator, true).is_none());
    }

    #[test]
    fn test_shown_card_redaction() {
        let library = Some(Card::from(Room::Library));
        let obs = shown();
        assert_eq!(shown_card(obs.view_for(Perspective::Player(PlayerId::new(0)), false)), library);
        assert_eq!(shown_card(obs.view_for(Perspective::Player(PlayerId::new(2)), false)), library);
        assert_eq!(shown_card(obs.view_for(Perspective::Player(PlayerId::new(1)), false)), None);
        assert_eq!(shown_card(obs.view_for(Perspective::Spectator, false)), None);
        assert_eq!(shown_card(obs.view_for(Perspective::Spectator, true)), library);
    }

    #[test]
    fn test_public_events_pass_through() {
        let declined = Observation::DisproofDeclined {
            player: PlayerId::new(1),
            triple: triple(),
        };
        assert_eq!(declined.view_for(Perspective::Spectator, false), Some(declined.clone()));
        assert_eq!(declined.kind(), "disproof_declined");
    }
}
