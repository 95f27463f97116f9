use tracing::warn;

use super::{Player, PlayerView};
use crate::ai::AiPolicy;
use crate::board::NodeId;
use crate::cards::{Card, Room, Triple};
use crate::core::{ClueError, GameRng, PlayerId, PlayerKind};

/// Computer-controlled seat.
#[derive(Clone, Debug)]
pub struct AiPlayer {
    policy: AiPolicy,
    /// Set after a rejection: play the always-legal choice next.
    fallback: bool,
}

impl AiPlayer {
    #[must_use]
    pub fn new(seat: PlayerId, rng: GameRng) -> Self {
        Self {
            policy: AiPolicy::new(seat, rng),
            fallback: false,
        }
    }

    #[must_use]
    pub fn policy(&self) -> &AiPolicy {
        &self.policy
    }
}

impl Player for AiPlayer {
    fn kind(&self) -> PlayerKind {
        PlayerKind::Ai
    }

    fn choose_move(&mut self, view: &PlayerView<'_>, roll: u8) -> NodeId {
        if std::mem::take(&mut self.fallback) {
            return view.position();
        }
        self.policy.choose_move(view, roll)
    }

    fn choose_suggestion(&mut self, view: &PlayerView<'_>, room: Room) -> Option<Triple> {
        if std::mem::take(&mut self.fallback) {
            self.policy.record_suggestion_room(room);
            return None;
        }
        Some(self.policy.choose_suggestion(view.belief, room))
    }

    fn choose_accusation(&mut self, view: &PlayerView<'_>) -> Option<Triple> {
        if std::mem::take(&mut self.fallback) || !view.may_accuse_here() {
            return None;
        }
        self.policy.choose_accusation(view)
    }

    fn disclose_disproof(
        &mut self,
        view: &PlayerView<'_>,
        suggester: PlayerId,
        _triple: &Triple,
        matching: &[Card],
    ) -> Option<Card> {
        self.policy.choose_disproof_card(view.belief, matching, suggester)
    }

    fn on_rejected(&mut self, error: &ClueError) {
        warn!(seat = %self.policy.seat(), %error, "ai decision rejected, falling back");
        self.fallback = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::cards::{Suspect, Weapon};
    use crate::core::{HouseRules, PlayerMap, PublicState};
    use crate::knowledge::BeliefState;

    #[test]
    fn test_fallback_after_rejection() {
        let board = Board::classic();
        let public = PublicState::new(PlayerMap::with_value(3, 6), board.center());
        let belief = BeliefState::new(PlayerId::new(1), PlayerMap::with_value(3, 6));
        let rules = HouseRules::default();
        let view = PlayerView {
            seat: PlayerId::new(1),
            belief: &belief,
            board: &board,
            public: &public,
            rules: &rules,
            round_cap: 400,
        };
        let mut player = AiPlayer::new(PlayerId::new(1), GameRng::new(5));
        assert_eq!(player.kind(), PlayerKind::Ai);

        player.on_rejected(&ClueError::InvalidMove {
            player: PlayerId::new(1),
            destination: board.room_node(Room::Study),
            roll: 2,
        });
        assert_eq!(player.choose_move(&view, 2), board.center());
        // The fallback applies once.
        assert_ne!(player.choose_move(&view, 4), board.center());
    }

    #[test]
    fn test_disclose_picks_a_matching_card() {
        let board = Board::classic();
        let public = PublicState::new(PlayerMap::with_value(3, 6), board.center());
        let belief = BeliefState::new(PlayerId::new(1), PlayerMap::with_value(3, 6));
        let rules = HouseRules::default();
        let view = PlayerView {
            seat: PlayerId::new(1),
            belief: &belief,
            board: &board,
            public: &public,
            rules: &rules,
            round_cap: 400,
        };
        let mut player = AiPlayer::new(PlayerId::new(1), GameRng::new(5));
        let triple = Triple::new(Suspect::White, Weapon::Knife, Room::Hall);
        let matching = [Card::from(Weapon::Knife)];

        assert_eq!(
            player.disclose_disproof(&view, PlayerId::new(0), &triple, &matching),
            Some(Card::from(Weapon::Knife))
        );
        assert_eq!(player.disclose_disproof(&view, PlayerId::new(0), &triple, &[]), None);
    }
}
