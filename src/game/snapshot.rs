//! Read-only game state handed to output collaborators after every round.

use serde::{Deserialize, Serialize};

use crate::board::NodeId;
use crate::cards::{Card, Triple};
use crate::core::{PlayerId, PlayerMap, PlayerStatus, PublicState};
use crate::knowledge::{BeliefState, CardStatus, KnowledgeEngine};

/// How a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    /// A correct accusation.
    Winner(PlayerId),
    /// Every player made a wrong accusation.
    AllEliminated,
    /// `GameConfig::round_cap` rounds passed without a winner.
    RoundCapReached,
}

impl GameOutcome {
    #[must_use]
    pub fn winner(self) -> Option<PlayerId> {
        match self {
            GameOutcome::Winner(p) => Some(p),
            _ => None,
        }
    }
}

/// One observer's scoresheet: the status of every card by id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeliefTable {
    pub statuses: [CardStatus; Card::COUNT],
    /// The solution once this observer is certain of it.
    pub solved: Option<Triple>,
}

impl BeliefTable {
    #[must_use]
    pub fn of(belief: &BeliefState) -> Self {
        Self {
            statuses: belief.statuses(),
            solved: belief.solved(),
        }
    }

    #[must_use]
    pub fn status(&self, card: Card) -> CardStatus {
        self.statuses[card.index()]
    }

    #[must_use]
    pub fn known_count(&self) -> usize {
        self.statuses.iter().filter(|s| s.is_known()).count()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub round: u32,
    pub active_player: PlayerId,
    pub positions: PlayerMap<NodeId>,
    pub statuses: PlayerMap<PlayerStatus>,
    /// In `Weapon::ALL` order.
    pub weapon_locations: [NodeId; 6],
    pub beliefs: PlayerMap<BeliefTable>,
    pub spectator: BeliefTable,
    pub outcome: Option<GameOutcome>,
}

impl GameSnapshot {
    #[must_use]
    pub fn capture(
        public: &PublicState,
        knowledge: &KnowledgeEngine,
        outcome: Option<GameOutcome>,
    ) -> Self {
        Self {
            round: public.round,
            active_player: public.active_player,
            positions: public.positions.clone(),
            statuses: public.statuses.clone(),
            weapon_locations: public.weapon_locations,
            beliefs: PlayerMap::new(public.player_count(), |p| {
                BeliefTable::of(knowledge.belief(p))
            }),
            spectator: BeliefTable::of(knowledge.spectator()),
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::cards::CardRegistry;
    use crate::core::GameRng;

    #[test]
    fn test_capture_and_serialize() {
        let registry = CardRegistry::deal(3, &mut GameRng::new(9)).unwrap();
        let mut knowledge = KnowledgeEngine::new(registry.hand_sizes(), false);
        knowledge.seed_hands(&registry).unwrap();
        let public = PublicState::new(registry.hand_sizes(), Board::classic().center());

        let snapshot = GameSnapshot::capture(&public, &knowledge, None);
        assert_eq!(snapshot.round, 1);
        for (player, table) in snapshot.beliefs.iter() {
            assert!(table.known_count() >= registry.hand(player).len());
        }
        assert_eq!(snapshot.spectator.known_count(), 0);

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: GameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn test_outcome_winner() {
        assert_eq!(GameOutcome::Winner(PlayerId::new(2)).winner(), Some(PlayerId::new(2)));
        assert_eq!(GameOutcome::RoundCapReached.winner(), None);
    }
}
