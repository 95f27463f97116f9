//! Per-observer belief state and constraint propagation.
//!
//! A `BeliefState` keeps, for every card, the set of holders it may still be
//! with (see [`HolderSet`]). Stored as fixed per-category arrays (6/6/9),
//! indexed by the card's slot. Observations only clear bits, so entries move
//! from unknown towards known and never back.
//!
//! ## Propagation
//!
//! After every observation the state is closed under these rules until nothing
//! changes:
//!
//! 1. **Category closure**: one known solution card rules every other card of
//!    its category out of the solution; a single remaining candidate *is* the
//!    solution card. Two known solution cards in one category is fatal.
//! 2. **Disjunctions**: "P holds at least one of {A, B, C}" is dropped once P
//!    is known to hold one of them, and assigns the last card P can still hold.
//!    "Not all of {A, B, C} are in the solution" (a failed accusation) rules the
//!    third card out once two are known solution cards.
//! 3. **Hand sizes**: a player known to hold a full hand holds nothing else; a
//!    player who can hold exactly as many cards as their hand size holds all of
//!    them.
//!
//! Every productive pass clears at least one bit, so the loop is bounded by the
//! number of bits.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use super::holders::{Holder, HolderSet};
use super::observation::Observation;
use crate::cards::{Card, Category, Room, Suspect, Triple, Weapon};
use crate::core::{ClueError, Inconsistency, Perspective, PlayerId, PlayerMap, Result};

const MAX_PASSES: u32 = (Card::COUNT * 8) as u32;

/// What an observer knows about one card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardStatus {
    KnownInSolution,
    /// Not in the solution. `Some(p)` when the holder is known, `None` when it
    /// is only known that *someone* holds it.
    KnownHeld(Option<PlayerId>),
    Unknown,
}

impl CardStatus {
    fn from_holders(set: HolderSet) -> Self {
        if set.is_only(Holder::Solution) {
            CardStatus::KnownInSolution
        } else if !set.contains(Holder::Solution) {
            CardStatus::KnownHeld(match set.single() {
                Some(Holder::Player(p)) => Some(p),
                _ => None,
            })
        } else {
            CardStatus::Unknown
        }
    }

    #[must_use]
    pub fn is_known(self) -> bool {
        !matches!(self, CardStatus::Unknown)
    }

    /// True when `self` carries at least the knowledge of `earlier`.
    #[must_use]
    pub fn refines(self, earlier: CardStatus) -> bool {
        match (earlier, self) {
            (CardStatus::Unknown, _) => true,
            (CardStatus::KnownInSolution, CardStatus::KnownInSolution) => true,
            (CardStatus::KnownHeld(None), CardStatus::KnownHeld(_)) => true,
            (CardStatus::KnownHeld(Some(a)), CardStatus::KnownHeld(Some(b))) => a == b,
            _ => false,
        }
    }
}

/// A fact that does not pin down a single card yet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Constraint {
    /// `holder` has at least one of `cards` (an unseen disproof).
    AtLeastOne {
        holder: PlayerId,
        cards: SmallVec<[Card; 3]>,
    },
    /// The three cards are not all in the solution (a failed accusation).
    NotAllInSolution { cards: [Card; 3] },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub card: Card,
    pub before: CardStatus,
    pub after: CardStatus,
}

/// What one observation taught one observer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeliefDelta {
    pub changes: Vec<StatusChange>,
    pub constraints_added: usize,
    /// Propagation passes run for this observation.
    pub passes: u32,
}

impl BeliefDelta {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.constraints_added == 0
    }
}

/// One observer's knowledge about every card.
#[derive(Clone, Debug)]
pub struct BeliefState {
    perspective: Perspective,
    hand_sizes: PlayerMap<u8>,
    suspects: [HolderSet; 6],
    weapons: [HolderSet; 6],
    rooms: [HolderSet; 9],
    constraints: Vec<Constraint>,
    times_suggested: [u16; Card::COUNT],
    suggestion_count: u32,
    last_pass_count: u32,
}

impl BeliefState {
    /// Belief of the player in seat `observer`. Seed it with the player's own
    /// hand through `Observation::HandRevealed`.
    #[must_use]
    pub fn new(observer: PlayerId, hand_sizes: PlayerMap<u8>) -> Self {
        Self::with_perspective(Perspective::Player(observer), hand_sizes)
    }

    /// Belief built from public information only.
    #[must_use]
    pub fn spectator(hand_sizes: PlayerMap<u8>) -> Self {
        Self::with_perspective(Perspective::Spectator, hand_sizes)
    }

    fn with_perspective(perspective: Perspective, hand_sizes: PlayerMap<u8>) -> Self {
        let all = HolderSet::all(hand_sizes.player_count());
        Self {
            perspective,
            hand_sizes,
            suspects: [all; 6],
            weapons: [all; 6],
            rooms: [all; 9],
            constraints: Vec::new(),
            times_suggested: [0; Card::COUNT],
            suggestion_count: 0,
            last_pass_count: 0,
        }
    }

    #[must_use]
    pub fn perspective(&self) -> Perspective {
        self.perspective
    }

    /// Apply one observation and propagate to a fixpoint.
    pub fn observe(&mut self, observation: &Observation) -> Result<BeliefDelta> {
        let before = self.statuses();
        let mut constraints_added = 0;

        match observation {
            Observation::HandRevealed { player, cards } => {
                for &card in cards {
                    self.place(card, Holder::Player(*player))?;
                }
            }
            Observation::SuggestionMade { triple, .. } => {
                self.suggestion_count += 1;
                for card in triple.cards() {
                    self.times_suggested[card.index()] = self.times_suggested[card.index()].saturating_add(1);
                }
            }
            Observation::DisproofShown {
                disprover,
                triple,
                card,
                ..
            } => match card {
                Some(card) => {
                    self.place(*card, Holder::Player(*disprover))?;
                }
                None => {
                    self.constraints.push(Constraint::AtLeastOne {
                        holder: *disprover,
                        cards: SmallVec::from_slice(&triple.cards()),
                    });
                    constraints_added += 1;
                }
            },
            Observation::DisproofDeclined { player, triple } => {
                for card in triple.cards() {
                    self.rule_out(card, Holder::Player(*player))?;
                }
            }
            Observation::AccusationMade {
                triple,
                correct: true,
                ..
            } => {
                for card in triple.cards() {
                    self.place(card, Holder::Solution)?;
                }
            }
            Observation::AccusationMade {
                triple,
                correct: false,
                ..
            } => {
                self.constraints.push(Constraint::NotAllInSolution {
                    cards: triple.cards(),
                });
                constraints_added += 1;
            }
        }

        let passes = self.propagate()?;
        let after = self.statuses();
        let changes = Card::all()
            .filter(|card| before[card.index()] != after[card.index()])
            .map(|card| StatusChange {
                card,
                before: before[card.index()],
                after: after[card.index()],
            })
            .collect();

        Ok(BeliefDelta {
            changes,
            constraints_added,
            passes,
        })
    }

    // === Queries ===

    #[must_use]
    pub fn status(&self, card: Card) -> CardStatus {
        CardStatus::from_holders(self.holders(card))
    }

    /// Status of every card, by card id.
    #[must_use]
    pub fn statuses(&self) -> [CardStatus; Card::COUNT] {
        let mut out = [CardStatus::Unknown; Card::COUNT];
        for card in Card::all() {
            out[card.index()] = self.status(card);
        }
        out
    }

    #[must_use]
    pub fn possible_holders(&self, card: Card) -> HolderSet {
        self.holders(card)
    }

    /// Cards of `category` that may still be in the solution.
    #[must_use]
    pub fn solution_candidates(&self, category: Category) -> SmallVec<[Card; 9]> {
        category
            .cards()
            .filter(|card| self.holders(*card).contains(Holder::Solution))
            .collect()
    }

    /// The solution card of `category`, once known.
    #[must_use]
    pub fn known_solution(&self, category: Category) -> Option<Card> {
        category
            .cards()
            .find(|card| self.holders(*card).is_only(Holder::Solution))
    }

    /// The full solution, once every category is known.
    #[must_use]
    pub fn solved(&self) -> Option<Triple> {
        Triple::from_cards([
            self.known_solution(Category::Suspect)?,
            self.known_solution(Category::Weapon)?,
            self.known_solution(Category::Room)?,
        ])
    }

    /// Most plausible solution: known cards where known, otherwise the
    /// candidate the fewest players could be holding.
    #[must_use]
    pub fn best_guess(&self) -> Triple {
        let rank = |card: Card| {
            let set = self.holders(card);
            let tier = if set.is_only(Holder::Solution) {
                0
            } else if set.contains(Holder::Solution) {
                1
            } else {
                2
            };
            (tier, set.player_count(), card.index())
        };

        Triple::new(
            Suspect::ALL
                .into_iter()
                .min_by_key(|s| rank(Card::from(*s)))
                .unwrap_or(Suspect::Scarlet),
            Weapon::ALL
                .into_iter()
                .min_by_key(|w| rank(Card::from(*w)))
                .unwrap_or(Weapon::Candlestick),
            Room::ALL
                .into_iter()
                .min_by_key(|r| rank(Card::from(*r)))
                .unwrap_or(Room::Study),
        )
    }

    /// Cards known to be in `player`'s hand.
    #[must_use]
    pub fn cards_held_by(&self, player: PlayerId) -> SmallVec<[Card; 8]> {
        Card::all()
            .filter(|card| self.holders(*card).is_only(Holder::Player(player)))
            .collect()
    }

    #[must_use]
    pub fn hand_size(&self, player: PlayerId) -> u8 {
        self.hand_sizes[player]
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.hand_sizes.player_count()
    }

    /// Pending facts not yet reduced to single cards.
    #[must_use]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Suggestions observed so far.
    #[must_use]
    pub fn suggestion_count(&self) -> u32 {
        self.suggestion_count
    }

    /// How often `card` appeared in an observed suggestion.
    #[must_use]
    pub fn times_suggested(&self, card: Card) -> u16 {
        self.times_suggested[card.index()]
    }

    /// Passes the last propagation needed to reach its fixpoint.
    #[must_use]
    pub fn last_pass_count(&self) -> u32 {
        self.last_pass_count
    }

    // === Storage ===

    fn holders(&self, card: Card) -> HolderSet {
        match card.category() {
            Category::Suspect => self.suspects[card.slot()],
            Category::Weapon => self.weapons[card.slot()],
            Category::Room => self.rooms[card.slot()],
        }
    }

    fn holders_mut(&mut self, card: Card) -> &mut HolderSet {
        match card.category() {
            Category::Suspect => &mut self.suspects[card.slot()],
            Category::Weapon => &mut self.weapons[card.slot()],
            Category::Room => &mut self.rooms[card.slot()],
        }
    }

    fn inconsistent(&self, reason: Inconsistency) -> ClueError {
        ClueError::KnowledgeInconsistency {
            perspective: self.perspective,
            reason,
        }
    }

    /// Pin `card` to `holder`. True if anything changed.
    fn place(&mut self, card: Card, holder: Holder) -> Result<bool> {
        let current = self.holders(card);
        if !current.contains(holder) {
            return Err(self.inconsistent(Inconsistency::Contradiction { card, holder }));
        }
        *self.holders_mut(card) = HolderSet::only(holder);
        Ok(!current.is_only(holder))
    }

    /// Rule `holder` out for `card`. True if anything changed.
    fn rule_out(&mut self, card: Card, holder: Holder) -> Result<bool> {
        let set = self.holders_mut(card);
        let changed = set.remove(holder);
        if set.is_empty() {
            return Err(self.inconsistent(Inconsistency::NoPossibleHolder { card }));
        }
        Ok(changed)
    }

    // === Propagation ===

    fn propagate(&mut self) -> Result<u32> {
        let mut passes = 0;
        loop {
            passes += 1;
            let mut changed = self.close_categories()?;
            changed |= self.resolve_constraints()?;
            changed |= self.apply_hand_sizes()?;
            trace!(perspective = %self.perspective, pass = passes, changed, "propagation pass");
            if !changed || passes >= MAX_PASSES {
                break;
            }
        }
        self.last_pass_count = passes;
        Ok(passes)
    }

    fn close_categories(&mut self) -> Result<bool> {
        let mut changed = false;
        for category in Category::ALL {
            let mut known: Option<Card> = None;
            for card in category.cards() {
                if self.holders(card).is_only(Holder::Solution) {
                    if let Some(first) = known {
                        return Err(self.inconsistent(Inconsistency::DuplicateSolution {
                            category,
                            first,
                            second: card,
                        }));
                    }
                    known = Some(card);
                }
            }

            if let Some(solution) = known {
                for card in category.cards().filter(|c| *c != solution) {
                    changed |= self.rule_out(card, Holder::Solution)?;
                }
                continue;
            }

            match self.solution_candidates(category).as_slice() {
                [] => {
                    return Err(self.inconsistent(Inconsistency::NoSolutionCandidate { category }));
                }
                [last] => changed |= self.place(*last, Holder::Solution)?,
                _ => {}
            }
        }
        Ok(changed)
    }

    fn resolve_constraints(&mut self) -> Result<bool> {
        let mut changed = false;
        let pending = std::mem::take(&mut self.constraints);
        let mut kept = Vec::with_capacity(pending.len());

        for constraint in pending {
            match constraint {
                Constraint::AtLeastOne { holder, cards } => {
                    let who = Holder::Player(holder);
                    if cards.iter().any(|c| self.holders(*c).is_only(who)) {
                        continue;
                    }
                    let possible: SmallVec<[Card; 3]> = cards
                        .iter()
                        .copied()
                        .filter(|c| self.holders(*c).contains(who))
                        .collect();
                    match possible.as_slice() {
                        [] => {
                            return Err(self.inconsistent(Inconsistency::UnsatisfiableConstraint {
                                holder,
                            }));
                        }
                        [card] => changed |= self.place(*card, who)?,
                        _ => kept.push(Constraint::AtLeastOne {
                            holder,
                            cards: possible,
                        }),
                    }
                }
                Constraint::NotAllInSolution { cards } => {
                    if cards.iter().any(|c| !self.holders(*c).contains(Holder::Solution)) {
                        continue;
                    }
                    let open: SmallVec<[Card; 3]> = cards
                        .iter()
                        .copied()
                        .filter(|c| !self.holders(*c).is_only(Holder::Solution))
                        .collect();
                    match open.as_slice() {
                        [] => {
                            return Err(self.inconsistent(Inconsistency::Contradiction {
                                card: cards[2],
                                holder: Holder::Solution,
                            }));
                        }
                        [card] => changed |= self.rule_out(*card, Holder::Solution)?,
                        _ => kept.push(Constraint::NotAllInSolution { cards }),
                    }
                }
            }
        }

        self.constraints = kept;
        Ok(changed)
    }

    fn apply_hand_sizes(&mut self) -> Result<bool> {
        let mut changed = false;
        for index in 0..self.hand_sizes.player_count() {
            let player = PlayerId::new(index as u8);
            let size = usize::from(self.hand_sizes[player]);
            let who = Holder::Player(player);

            let mut held = 0;
            let mut possible = 0;
            for card in Card::all() {
                let set = self.holders(card);
                held += usize::from(set.is_only(who));
                possible += usize::from(set.contains(who));
            }

            if held > size {
                return Err(self.inconsistent(Inconsistency::HandOverflow { player }));
            }
            if possible < size {
                return Err(self.inconsistent(Inconsistency::HandUnderflow { player }));
            }

            if held == size && possible > held {
                for card in Card::all() {
                    if !self.holders(card).is_only(who) {
                        changed |= self.rule_out(card, who)?;
                    }
                }
            } else if possible == size && held < size {
                for card in Card::all() {
                    if self.holders(card).contains(who) {
                        changed |= self.place(card, who)?;
                    }
                }
            }
        }
        Ok(changed)
    }
}
