//! The fixed Cluedo deck: 6 suspects, 6 weapons, 9 rooms.
//!
//! `Card` is a dense id in `0..21` laid out category by category
//! (suspects `0..6`, weapons `6..12`, rooms `12..21`), so per-card tables can be
//! plain fixed-size arrays.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Card category. Each category contributes exactly one card to the solution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Suspect,
    Weapon,
    Room,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Suspect, Category::Weapon, Category::Room];

    /// Number of cards in this category.
    #[must_use]
    pub const fn size(self) -> usize {
        match self {
            Category::Suspect => 6,
            Category::Weapon => 6,
            Category::Room => 9,
        }
    }

    /// Dense id of the first card of this category.
    #[must_use]
    pub const fn offset(self) -> usize {
        match self {
            Category::Suspect => 0,
            Category::Weapon => 6,
            Category::Room => 12,
        }
    }

    /// Cards of this category in slot order.
    pub fn cards(self) -> impl Iterator<Item = Card> {
        (self.offset()..self.offset() + self.size()).map(|i| Card(i as u8))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::Suspect => "suspect",
            Category::Weapon => "weapon",
            Category::Room => "room",
        })
    }
}

macro_rules! card_enum {
    ($(#[$meta:meta])* $name:ident, $category:expr, [$($variant:ident => $label:literal),+ $(,)?]) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: [$name; $category.size()] = [$($name::$variant),+];

            /// Printed name on the card.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            /// Position within the category.
            #[must_use]
            pub const fn slot(self) -> usize {
                self as usize
            }
        }

        impl From<$name> for Card {
            fn from(value: $name) -> Card {
                Card(($category.offset() + value.slot()) as u8)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

card_enum!(
    /// Suspect cards. Seat `i` plays suspect `i`.
    Suspect,
    Category::Suspect,
    [
        Scarlet => "Miss Scarlet",
        Mustard => "Colonel Mustard",
        White => "Mrs White",
        Green => "Reverend Green",
        Peacock => "Mrs Peacock",
        Plum => "Professor Plum",
    ]
);

card_enum!(
    /// Weapon cards.
    Weapon,
    Category::Weapon,
    [
        Candlestick => "Candlestick",
        LeadPipe => "Lead Pipe",
        Wrench => "Wrench",
        Knife => "Knife",
        Revolver => "Revolver",
        Rope => "Rope",
    ]
);

card_enum!(
    /// Room cards. The central start room is a board node, not a card.
    Room,
    Category::Room,
    [
        Study => "Study",
        Hall => "Hall",
        Lounge => "Lounge",
        DiningRoom => "Dining Room",
        Kitchen => "Kitchen",
        BallRoom => "Ball Room",
        Conservatory => "Conservatory",
        BilliardRoom => "Billiard Room",
        Library => "Library",
    ]
);

/// One card of the deck, identified by its dense id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Card(u8);

impl Card {
    /// Size of the full deck.
    pub const COUNT: usize = 21;

    /// Card with dense id `index`, if it exists.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Card> {
        (index < Self::COUNT).then_some(Card(index as u8))
    }

    /// Dense id in `0..21`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub const fn category(self) -> Category {
        match self.0 {
            0..=5 => Category::Suspect,
            6..=11 => Category::Weapon,
            _ => Category::Room,
        }
    }

    /// Position within the category.
    #[must_use]
    pub const fn slot(self) -> usize {
        self.index() - self.category().offset()
    }

    /// The whole deck in id order.
    pub fn all() -> impl Iterator<Item = Card> {
        (0..Self::COUNT as u8).map(Card)
    }

    #[must_use]
    pub fn as_suspect(self) -> Option<Suspect> {
        match self.category() {
            Category::Suspect => Suspect::ALL.get(self.slot()).copied(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_weapon(self) -> Option<Weapon> {
        match self.category() {
            Category::Weapon => Weapon::ALL.get(self.slot()).copied(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_room(self) -> Option<Room> {
        match self.category() {
            Category::Room => Room::ALL.get(self.slot()).copied(),
            _ => None,
        }
    }

    /// Printed name on the card.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self.category() {
            Category::Suspect => Suspect::ALL[self.slot()].name(),
            Category::Weapon => Weapon::ALL[self.slot()].name(),
            Category::Room => Room::ALL[self.slot()].name(),
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One card per category: the solution, a suggestion, or an accusation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Triple {
    pub suspect: Suspect,
    pub weapon: Weapon,
    pub room: Room,
}

impl Triple {
    #[must_use]
    pub const fn new(suspect: Suspect, weapon: Weapon, room: Room) -> Self {
        Self { suspect, weapon, room }
    }

    /// The three cards in category order.
    #[must_use]
    pub fn cards(&self) -> [Card; 3] {
        [self.suspect.into(), self.weapon.into(), self.room.into()]
    }

    #[must_use]
    pub fn contains(&self, card: Card) -> bool {
        self.cards().contains(&card)
    }

    /// The card of `category`.
    #[must_use]
    pub fn card_of(&self, category: Category) -> Card {
        match category {
            Category::Suspect => self.suspect.into(),
            Category::Weapon => self.weapon.into(),
            Category::Room => self.room.into(),
        }
    }

    /// Build a triple from three cards, one per category, in any order.
    #[must_use]
    pub fn from_cards(cards: [Card; 3]) -> Option<Triple> {
        let suspect = cards.iter().find_map(|c| c.as_suspect())?;
        let weapon = cards.iter().find_map(|c| c.as_weapon())?;
        let room = cards.iter().find_map(|c| c.as_room())?;
        Some(Triple::new(suspect, weapon, room))
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in the {} with the {}", self.suspect, self.room, self.weapon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deck_layout() {
        assert_eq!(Card::all().count(), Card::COUNT);
        let sizes: usize = Category::ALL.iter().map(|c| c.size()).sum();
        assert_eq!(sizes, Card::COUNT);

        for category in Category::ALL {
            for (slot, card) in category.cards().enumerate() {
                assert_eq!(card.category(), category);
                assert_eq!(card.slot(), slot);
            }
        }
    }

    #[test]
    fn test_conversions() {
        let rope = Card::from(Weapon::Rope);
        assert_eq!(rope.index(), 11);
        assert_eq!(rope.as_weapon(), Some(Weapon::Rope));
        assert_eq!(rope.as_room(), None);

        let library = Card::from(Room::Library);
        assert_eq!(library.index(), 20);
        assert_eq!(library.as_room(), Some(Room::Library));

        assert_eq!(Card::from(Suspect::Scarlet).index(), 0);
        assert!(Card::from_index(21).is_none());
    }

    #[test]
    fn test_names() {
        assert_eq!(Card::from(Suspect::Green).name(), "Reverend Green");
        assert_eq!(Card::from(Room::DiningRoom).to_string(), "Dining Room");
        assert_eq!(Category::Weapon.to_string(), "weapon");
    }

    #[test]
    fn test_triple() {
        let t = Triple::new(Suspect::Plum, Weapon::Knife, Room::Hall);
        assert!(t.contains(Card::from(Weapon::Knife)));
        assert!(!t.contains(Card::from(Weapon::Rope)));
        assert_eq!(t.card_of(Category::Room), Card::from(Room::Hall));

        let mut cards = t.cards();
        cards.reverse();
        assert_eq!(Triple::from_cards(cards), Some(t));
        assert_eq!(t.to_string(), "Professor Plum in the Hall with the Knife");
    }
}
