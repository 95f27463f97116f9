//! Per-round action logs.
//!
//! A `RoundLog` is the omniscient record of one round for output
//! collaborators (scoresheets, replays): unlike the public action history it
//! keeps the card shown in each disproof.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, Triple};
use crate::core::{Action, ActionRecord, PlayerId};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundLog {
    round: u32,
    records: Vector<ActionRecord>,
    eliminations: Vec<PlayerId>,
    winner: Option<PlayerId>,
}

impl RoundLog {
    #[must_use]
    pub fn new(round: u32) -> Self {
        Self {
            round,
            records: Vector::new(),
            eliminations: Vec::new(),
            winner: None,
        }
    }

    /// Append an accepted action. Accusations also update the eliminations
    /// and the winner.
    pub fn push(&mut self, record: ActionRecord, correct_accusation: Option<bool>) {
        if matches!(record.action, Action::Accuse(_)) {
            match correct_accusation {
                Some(true) => self.winner = Some(record.player),
                Some(false) => self.eliminations.push(record.player),
                None => {}
            }
        }
        self.records.push_back(record);
    }

    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn records(&self) -> &Vector<ActionRecord> {
        &self.records
    }

    /// Players eliminated this round, in order.
    #[must_use]
    pub fn eliminations(&self) -> &[PlayerId] {
        &self.eliminations
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Suggestions of the round with the card shown against each, if any.
    pub fn suggestions(&self) -> impl Iterator<Item = (PlayerId, Triple, Option<(PlayerId, Card)>)> + '_ {
        self.records.iter().enumerate().filter_map(move |(i, record)| {
            let Action::Suggest(triple) = record.action else {
                return None;
            };
            let shown = self
                .records
                .iter()
                .skip(i + 1)
                .take_while(|r| matches!(r.action, Action::Disprove(_)))
                .find_map(|r| match r.action {
                    Action::Disprove(Some(card)) => Some((r.player, card)),
                    _ => None,
                });
            Some((record.player, triple, shown))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Room, Suspect, Weapon};

    fn p(i: u8) -> PlayerId {
        PlayerId::new(i)
    }

    #[test]
    fn test_log_tracks_accusations() {
        let triple = Triple::new(Suspect::Plum, Weapon::Rope, Room::Hall);
        let mut log = RoundLog::new(3);
        assert!(log.is_empty());

        log.push(ActionRecord::new(p(0), Action::Accuse(triple), 3, 0), Some(false));
        log.push(ActionRecord::new(p(1), Action::EndTurn, 3, 1), None);
        log.push(ActionRecord::new(p(2), Action::Accuse(triple), 3, 2), Some(true));

        assert_eq!(log.round(), 3);
        assert_eq!(log.records().len(), 3);
        assert_eq!(log.eliminations(), &[p(0)]);
        assert_eq!(log.winner(), Some(p(2)));
    }

    #[test]
    fn test_suggestions_pair_with_shown_card() {
        let first = Triple::new(Suspect::Plum, Weapon::Rope, Room::Hall);
        let second = Triple::new(Suspect::Green, Weapon::Knife, Room::Study);
        let rope = Card::from(Weapon::Rope);
        let mut log = RoundLog::new(1);
        log.push(ActionRecord::new(p(0), Action::Suggest(first), 1, 0), None);
        log.push(ActionRecord::new(p(1), Action::Disprove(None), 1, 1), None);
        log.push(ActionRecord::new(p(2), Action::Disprove(Some(rope)), 1, 2), None);
        log.push(ActionRecord::new(p(0), Action::EndTurn, 1, 3), None);
        log.push(ActionRecord::new(p(1), Action::Suggest(second), 1, 4), None);
        log.push(ActionRecord::new(p(2), Action::Disprove(None), 1, 5), None);

        let suggestions: Vec<_> = log.suggestions().collect();
        assert_eq!(
            suggestions,
            vec![(p(0), first, Some((p(2), rope))), (p(1), second, None)]
        );
    }
}
