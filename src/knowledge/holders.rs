//! Who may hold a card.
//!
//! Every card is held by exactly one *holder*: a seat or the solution envelope.
//! A `HolderSet` is the set of holders a card may still be with, packed into a
//! byte (bits `0..6` for seats, bit 7 for the solution). Deduction only ever
//! clears bits.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::{PlayerId, MAX_PLAYERS};

/// Place a card can be.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Holder {
    Player(PlayerId),
    Solution,
}

impl Holder {
    const SOLUTION_BIT: u8 = 1 << 7;

    const fn bit(self) -> u8 {
        match self {
            Holder::Player(p) => 1 << p.0,
            Holder::Solution => Self::SOLUTION_BIT,
        }
    }
}

impl fmt::Display for Holder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Holder::Player(p) => write!(f, "{p}"),
            Holder::Solution => f.write_str("the solution"),
        }
    }
}

/// Set of possible holders for one card.
///
/// ```
/// use rust_clue::core::PlayerId;
/// use rust_clue::knowledge::{Holder, HolderSet};
///
/// let mut set = HolderSet::all(3);
/// assert_eq!(set.len(), 4);
/// set.remove(Holder::Solution);
/// set.remove(Holder::Player(PlayerId::new(0)));
/// set.remove(Holder::Player(PlayerId::new(2)));
/// assert_eq!(set.single(), Some(Holder::Player(PlayerId::new(1))));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HolderSet(u8);

impl HolderSet {
    pub const EMPTY: HolderSet = HolderSet(0);

    /// Every seat of a `player_count` table plus the solution.
    #[must_use]
    pub fn all(player_count: usize) -> Self {
        let seats = player_count.min(MAX_PLAYERS);
        let players = ((1u16 << seats) - 1) as u8;
        HolderSet(players | Holder::SOLUTION_BIT)
    }

    #[must_use]
    pub const fn only(holder: Holder) -> Self {
        HolderSet(holder.bit())
    }

    #[must_use]
    pub const fn contains(self, holder: Holder) -> bool {
        self.0 & holder.bit() != 0
    }

    /// Remove `holder`; true if it was present.
    pub fn remove(&mut self, holder: Holder) -> bool {
        let present = self.contains(holder);
        self.0 &= !holder.bit();
        present
    }

    #[must_use]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The holder, when exactly one remains.
    #[must_use]
    pub fn single(self) -> Option<Holder> {
        if self.len() == 1 {
            self.iter().next()
        } else {
            None
        }
    }

    #[must_use]
    pub const fn is_only(self, holder: Holder) -> bool {
        self.0 == holder.bit()
    }

    /// Seats still possible, in seat order.
    pub fn players(self) -> impl Iterator<Item = PlayerId> {
        (0..MAX_PLAYERS as u8)
            .filter(move |i| self.0 & (1 << i) != 0)
            .map(PlayerId::new)
    }

    /// Number of seats still possible.
    #[must_use]
    pub const fn player_count(self) -> u32 {
        (self.0 & !Holder::SOLUTION_BIT).count_ones()
    }

    /// Every holder, seats first.
    pub fn iter(self) -> impl Iterator<Item = Holder> {
        let solution = self.contains(Holder::Solution).then_some(Holder::Solution);
        self.players().map(Holder::Player).chain(solution)
    }

    /// Raw bits, for compact tables.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }
}
