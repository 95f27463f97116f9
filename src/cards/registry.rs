//! Card & solution registry.
//!
//! The `CardRegistry` owns the hidden solution and every seat's private hand.
//! Both are fixed at setup: nothing in the crate mutates them afterwards.
//!
//! ## Deck partition
//!
//! The solution plus all hands is exactly the 21-card deck, the hands are
//! pairwise disjoint, and the solution has one card per category.
//! `CardRegistry::validate` checks this and every constructor calls it.

use smallvec::SmallVec;
use tracing::debug;

use super::card::{Card, Category, Room, Suspect, Triple, Weapon};
use crate::core::{ClueError, GameRng, PlayerId, PlayerMap, Result};

/// The hidden envelope. Only comparisons and the end-of-game reveal read it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution(Triple);

impl Solution {
    /// True when `triple` names the solution exactly.
    #[must_use]
    pub fn matches(&self, triple: &Triple) -> bool {
        self.0 == *triple
    }

    #[must_use]
    pub fn contains(&self, card: Card) -> bool {
        self.0.contains(card)
    }

    /// Open the envelope. For end-of-game reporting and tests; players never
    /// see this.
    #[must_use]
    pub fn reveal(&self) -> Triple {
        self.0
    }
}

/// A seat's private cards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Hand {
    cards: SmallVec<[Card; 8]>,
}

impl Hand {
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards of this hand that appear in `triple`, in category order.
    #[must_use]
    pub fn matching(&self, triple: &Triple) -> SmallVec<[Card; 3]> {
        triple
            .cards()
            .into_iter()
            .filter(|card| self.contains(*card))
            .collect()
    }
}

impl FromIterator<Card> for Hand {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut cards: SmallVec<[Card; 8]> = iter.into_iter().collect();
        cards.sort_unstable();
        Hand { cards }
    }
}

/// Owner of the solution and all hands.
#[derive(Clone, Debug)]
pub struct CardRegistry {
    solution: Solution,
    hands: PlayerMap<Hand>,
}

impl CardRegistry {
    /// Draw a uniformly random solution and deal the remaining 18 cards
    /// round-robin from seat 0.
    pub fn deal(player_count: usize, rng: &mut GameRng) -> Result<Self> {
        if !(1..=crate::core::MAX_PLAYERS).contains(&player_count) {
            return Err(ClueError::Setup(format!(
                "cannot deal to {player_count} players"
            )));
        }

        let suspect = Suspect::ALL[rng.gen_range_usize(0..Suspect::ALL.len())];
        let weapon = Weapon::ALL[rng.gen_range_usize(0..Weapon::ALL.len())];
        let room = Room::ALL[rng.gen_range_usize(0..Room::ALL.len())];
        let solution = Triple::new(suspect, weapon, room);

        let mut deck: Vec<Card> = Card::all().filter(|c| !solution.contains(*c)).collect();
        rng.shuffle(&mut deck);

        let mut hands: Vec<Vec<Card>> = vec![Vec::new(); player_count];
        for (i, card) in deck.into_iter().enumerate() {
            hands[i % player_count].push(card);
        }

        debug!(players = player_count, "dealt hands");
        Self::from_parts(solution, hands)
    }

    /// Build a registry from an explicit solution and hands (seat order).
    ///
    /// Fails with `ClueError::Setup` unless the deck partition holds.
    pub fn from_parts(solution: Triple, hands: Vec<Vec<Card>>) -> Result<Self> {
        if hands.is_empty() || hands.len() > crate::core::MAX_PLAYERS {
            return Err(ClueError::Setup(format!(
                "cannot seat {} hands",
                hands.len()
            )));
        }
        let registry = Self {
            solution: Solution(solution),
            hands: PlayerMap::from_vec(hands.into_iter().map(Hand::from_iter).collect()),
        };
        registry.validate()?;
        Ok(registry)
    }

    /// Check the deck-partition invariant.
    pub fn validate(&self) -> Result<()> {
        let mut owner: [Option<&'static str>; Card::COUNT] = [None; Card::COUNT];
        for card in self.solution.0.cards() {
            owner[card.index()] = Some("solution");
        }

        for (player, hand) in self.hands.iter() {
            for &card in hand.cards() {
                if owner[card.index()].is_some() {
                    return Err(ClueError::Setup(format!(
                        "{card} dealt to {player} is already in the solution or another hand"
                    )));
                }
                owner[card.index()] = Some("hand");
            }
        }

        if let Some(missing) = Card::all().find(|c| owner[c.index()].is_none()) {
            return Err(ClueError::Setup(format!("{missing} was never dealt")));
        }

        for category in Category::ALL {
            let in_solution = category.cards().filter(|c| self.solution.contains(*c)).count();
            if in_solution != 1 {
                return Err(ClueError::Setup(format!(
                    "solution holds {in_solution} {category} cards"
                )));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &Hand {
        &self.hands[player]
    }

    #[must_use]
    pub fn hands(&self) -> &PlayerMap<Hand> {
        &self.hands
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.hands.player_count()
    }

    /// Seat holding `card`, `None` when it is in the solution.
    #[must_use]
    pub fn holder_of(&self, card: Card) -> Option<PlayerId> {
        self.hands
            .iter()
            .find(|(_, hand)| hand.contains(card))
            .map(|(player, _)| player)
    }

    /// Public hand sizes, seat order.
    #[must_use]
    pub fn hand_sizes(&self) -> PlayerMap<u8> {
        PlayerMap::new(self.player_count(), |p| self.hands[p].len() as u8)
    }
}
