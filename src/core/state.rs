//! Public game state.
//!
//! ## PublicState
//!
//! Everything every player can observe:
//! - Round, turn and active player
//! - Token positions (players and weapons)
//! - Player statuses, characters and hand sizes
//! - Action history
//!
//! Hidden information (the solution and the hands) lives in the
//! `CardRegistry`; nothing here reveals a card.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::ActionRecord;
use super::player::{PlayerId, PlayerMap};
use crate::board::NodeId;
use crate::cards::{Suspect, Weapon};

/// Where a player stands in the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerStatus {
    Active,
    /// Made one wrong accusation. Takes no more turns.
    Eliminated,
    /// Made the correct accusation. The game is over.
    Winner,
}

/// Public game state, observable by all players.
///
/// Uses `im` persistent data structures so snapshots clone in O(1).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicState {
    player_count: usize,

    /// Current round (starts at 1). One round is one turn per active player.
    pub round: u32,

    /// Turns started so far in the game.
    pub turn_number: u32,

    /// Action sequence across the game.
    pub action_sequence: u32,

    /// Player whose turn it is.
    pub active_player: PlayerId,

    /// Node of every player's token.
    pub positions: PlayerMap<NodeId>,

    pub statuses: PlayerMap<PlayerStatus>,

    /// Suspect played by each seat.
    pub characters: PlayerMap<Suspect>,

    /// Hand sizes (public knowledge).
    pub hand_sizes: PlayerMap<u8>,

    /// Node of every weapon token, in `Weapon::ALL` order.
    pub weapon_locations: [NodeId; 6],

    /// Every public action taken so far. Private actions (a shown card) are
    /// left out; see `Action::is_private`.
    pub action_history: Vector<ActionRecord>,
}

impl PublicState {
    /// Create the state at setup: every token on `start`, round 1, seat 0 to
    /// play.
    #[must_use]
    pub fn new(hand_sizes: PlayerMap<u8>, start: NodeId) -> Self {
        let player_count = hand_sizes.player_count();
        assert!(
            player_count <= Suspect::ALL.len(),
            "At most {} players supported",
            Suspect::ALL.len()
        );

        Self {
            player_count,
            round: 1,
            turn_number: 0,
            action_sequence: 0,
            active_player: PlayerId::new(0),
            positions: PlayerMap::with_value(player_count, start),
            statuses: PlayerMap::with_value(player_count, PlayerStatus::Active),
            characters: PlayerMap::new(player_count, |p| Suspect::ALL[p.index()]),
            hand_sizes,
            weapon_locations: [start; 6],
            action_history: Vector::new(),
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.player_count)
    }

    #[must_use]
    pub fn status(&self, player: PlayerId) -> PlayerStatus {
        self.statuses[player]
    }

    #[must_use]
    pub fn is_active(&self, player: PlayerId) -> bool {
        self.statuses[player] == PlayerStatus::Active
    }

    /// Players still taking turns, in seat order.
    pub fn active_players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.player_ids().filter(move |p| self.is_active(*p))
    }

    /// The seat playing `suspect`, if that suspect is at the table.
    #[must_use]
    pub fn seat_of(&self, suspect: Suspect) -> Option<PlayerId> {
        self.characters
            .iter()
            .find(|(_, c)| **c == suspect)
            .map(|(p, _)| p)
    }

    #[must_use]
    pub fn position(&self, player: PlayerId) -> NodeId {
        self.positions[player]
    }

    pub fn move_player(&mut self, player: PlayerId, destination: NodeId) {
        self.positions[player] = destination;
    }

    #[must_use]
    pub fn weapon_location(&self, weapon: Weapon) -> NodeId {
        self.weapon_locations[weapon.slot()]
    }

    pub fn move_weapon(&mut self, weapon: Weapon, destination: NodeId) {
        self.weapon_locations[weapon.slot()] = destination;
    }

    pub fn eliminate(&mut self, player: PlayerId) {
        self.statuses[player] = PlayerStatus::Eliminated;
    }

    pub fn crown(&mut self, player: PlayerId) {
        self.statuses[player] = PlayerStatus::Winner;
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.statuses
            .iter()
            .find(|(_, s)| **s == PlayerStatus::Winner)
            .map(|(p, _)| p)
    }

    // === Turn Advancement ===

    /// Hand the turn to `player`.
    pub fn begin_turn(&mut self, player: PlayerId) {
        self.active_player = player;
        self.turn_number += 1;
    }

    pub fn advance_round(&mut self) {
        self.round += 1;
    }

    // === Action History ===

    /// Record an action in history. Private actions are dropped.
    pub fn record_action(&mut self, record: ActionRecord) {
        if !record.action.is_private() {
            self.action_history.push_back(record);
        }
    }

    /// Get the next action sequence number and increment.
    pub fn next_sequence(&mut self) -> u32 {
        let seq = self.action_sequence;
        self.action_sequence += 1;
        seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Action;

    fn state(players: usize) -> PublicState {
        PublicState::new(PlayerMap::with_value(players, 6), NodeId::new(9))
    }

    #[test]
    fn test_public_state_new() {
        let state = state(3);

        assert_eq!(state.player_count(), 3);
        assert_eq!(state.round, 1);
        assert_eq!(state.active_player, PlayerId::new(0));
        assert_eq!(state.position(PlayerId::new(2)), NodeId::new(9));
        assert_eq!(state.weapon_location(Weapon::Rope), NodeId::new(9));
        assert_eq!(state.characters[PlayerId::new(1)], Suspect::Mustard);
        assert_eq!(state.active_players().count(), 3);
    }

    #[test]
    fn test_statuses() {
        let mut state = state(4);
        state.eliminate(PlayerId::new(1));
        assert!(!state.is_active(PlayerId::new(1)));
        assert_eq!(state.active_players().count(), 3);
        assert_eq!(state.winner(), None);

        state.crown(PlayerId::new(3));
        assert_eq!(state.winner(), Some(PlayerId::new(3)));
        assert_eq!(state.status(PlayerId::new(3)), PlayerStatus::Winner);
    }

    #[test]
    fn test_seat_of() {
        let state = state(3);
        assert_eq!(state.seat_of(Suspect::White), Some(PlayerId::new(2)));
        assert_eq!(state.seat_of(Suspect::Plum), None);
    }

    #[test]
    fn test_tokens_move() {
        let mut state = state(3);
        state.move_player(PlayerId::new(0), NodeId::new(1));
        state.move_weapon(Weapon::Knife, NodeId::new(1));
        assert_eq!(state.position(PlayerId::new(0)), NodeId::new(1));
        assert_eq!(state.weapon_location(Weapon::Knife), NodeId::new(1));
        assert_eq!(state.weapon_location(Weapon::Rope), NodeId::new(9));
    }

    #[test]
    fn test_history_and_sequence() {
        let mut state = state(3);
        state.begin_turn(PlayerId::new(0));
        let seq = state.next_sequence();
        state.record_action(ActionRecord::new(PlayerId::new(0), Action::EndTurn, state.round, seq));

        assert_eq!(state.next_sequence(), 1);
        assert_eq!(state.turn_number, 1);
        assert_eq!(state.action_history.len(), 1);

        let shown = Action::Disprove(Some(crate::cards::Card::from(Weapon::Rope)));
        state.record_action(ActionRecord::new(PlayerId::new(1), shown, state.round, 1));
        assert_eq!(state.action_history.len(), 1);

        let snapshot = state.clone();
        state.advance_round();
        assert_eq!(snapshot.round, 1);
        assert_eq!(state.round, 2);
    }
}
