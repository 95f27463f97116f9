//! Heuristic decision policy for computer players.
//!
//! The policy reads one seat's `BeliefState` and never looks at hidden cards.
//! It is deliberately simple:
//!
//! - **Move**: score every reachable card room (unvisited bonus, plus how
//!   likely the room is the solution room, minus a penalty for the room of
//!   the last suggestion). With no room in reach, walk towards the best room.
//! - **Suggest**: in unresolved categories, name the candidate the fewest
//!   players are known about; in resolved ones, the known solution card.
//!   Repeats are avoided while alternatives remain.
//! - **Accuse**: once the solution is certain, or with a best guess when the
//!   forced-accusation window near the round cap is open.
//! - **Disprove**: show the card that leaks least.

use std::cmp::Reverse;

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::trace;

use crate::board::NodeId;
use crate::cards::{Card, Category, Room, Suspect, Triple, Weapon};
use crate::core::{GameRng, PlayerId};
use crate::knowledge::BeliefState;
use crate::players::PlayerView;

const UNVISITED_BONUS: f64 = 1.0;
const SOLUTION_ROOM_WEIGHT: f64 = 2.0;
const LAST_ROOM_PENALTY: f64 = 1.5;

/// Decision policy and memory of one AI seat.
#[derive(Clone, Debug)]
pub struct AiPolicy {
    seat: PlayerId,
    rng: GameRng,
    visited: [bool; 9],
    last_suggestion_room: Option<Room>,
    past_suggestions: FxHashSet<Triple>,
    /// Bitmask of seats each card was shown to, by card id.
    shown_to: [u8; Card::COUNT],
}

impl AiPolicy {
    #[must_use]
    pub fn new(seat: PlayerId, rng: GameRng) -> Self {
        Self {
            seat,
            rng,
            visited: [false; 9],
            last_suggestion_room: None,
            past_suggestions: FxHashSet::default(),
            shown_to: [0; Card::COUNT],
        }
    }

    #[must_use]
    pub fn seat(&self) -> PlayerId {
        self.seat
    }

    /// Pick a destination among `view`'s legal moves for `roll`.
    pub fn choose_move(&mut self, view: &PlayerView<'_>, roll: u8) -> NodeId {
        let position = view.position();
        let destinations = view.board.reachable(position, roll);

        if self.wants_to_accuse(view) && view.rules.accuse_only_in_center {
            let center = view.board.center();
            return self.closest_to(view, &destinations, center).unwrap_or(position);
        }

        let room_options: SmallVec<[(NodeId, f64); 10]> = destinations
            .iter()
            .filter_map(|d| {
                view.board
                    .room_at(d.node)
                    .map(|room| (d.node, self.room_score(view.belief, room)))
            })
            .collect();

        let chosen = if room_options.is_empty() {
            let target = self.best_room(view.belief);
            self.closest_to(view, &destinations, view.board.room_node(target))
        } else {
            self.pick_best(&room_options)
        }
        .unwrap_or(position);

        if let Some(room) = view.board.room_at(chosen) {
            self.visited[room.slot()] = true;
        }
        trace!(seat = %self.seat, from = %position, to = %chosen, roll, "ai move");
        chosen
    }

    /// Suggest in `room`, the room the seat stands in.
    pub fn choose_suggestion(&mut self, belief: &BeliefState, room: Room) -> Triple {
        let suspects: SmallVec<[Suspect; 6]> = self
            .ranked(belief, Category::Suspect)
            .iter()
            .filter_map(|c| c.as_suspect())
            .collect();
        let weapons: SmallVec<[Weapon; 6]> = self
            .ranked(belief, Category::Weapon)
            .iter()
            .filter_map(|c| c.as_weapon())
            .collect();

        let first = Triple::new(
            suspects.first().copied().unwrap_or(Suspect::Scarlet),
            weapons.first().copied().unwrap_or(Weapon::Candlestick),
            room,
        );
        let fresh = suspects
            .iter()
            .flat_map(|s| weapons.iter().map(move |w| Triple::new(*s, *w, room)))
            .find(|t| !self.past_suggestions.contains(t));

        let triple = fresh.unwrap_or(first);
        self.record_suggestion(triple);
        triple
    }

    /// Accuse when certain, or with a best guess inside the forced window.
    pub fn choose_accusation(&mut self, view: &PlayerView<'_>) -> Option<Triple> {
        if view.rules.accuse_only_in_center && view.position() != view.board.center() {
            return None;
        }
        if let Some(solution) = view.belief.solved() {
            return Some(solution);
        }
        self.forced_window_open(view).then(|| view.belief.best_guess())
    }

    /// Pick the card to show `suggester` among `matching` cards of the hand.
    ///
    /// Prefers a card `suggester` has already seen, then one anybody has seen,
    /// then a card from the category with the most open candidates.
    pub fn choose_disproof_card(
        &mut self,
        belief: &BeliefState,
        matching: &[Card],
        suggester: PlayerId,
    ) -> Option<Card> {
        let suggester_bit = 1u8 << suggester.0;
        let card = matching
            .iter()
            .copied()
            .find(|c| self.shown_to[c.index()] & suggester_bit != 0)
            .or_else(|| matching.iter().copied().find(|c| self.shown_to[c.index()] != 0))
            .or_else(|| {
                matching.iter().copied().max_by_key(|c| {
                    (
                        belief.solution_candidates(c.category()).len(),
                        Reverse(c.index()),
                    )
                })
            })?;

        self.shown_to[card.index()] |= suggester_bit;
        Some(card)
    }

    /// Remember a suggestion made in `triple.room`.
    pub fn record_suggestion(&mut self, triple: Triple) {
        self.past_suggestions.insert(triple);
        self.record_suggestion_room(triple.room);
    }

    pub fn record_suggestion_room(&mut self, room: Room) {
        self.last_suggestion_room = Some(room);
        self.visited[room.slot()] = true;
    }

    #[must_use]
    pub fn has_visited(&self, room: Room) -> bool {
        self.visited[room.slot()]
    }

    #[must_use]
    pub fn last_suggestion_room(&self) -> Option<Room> {
        self.last_suggestion_room
    }

    fn wants_to_accuse(&self, view: &PlayerView<'_>) -> bool {
        view.belief.solved().is_some() || self.forced_window_open(view)
    }

    fn forced_window_open(&self, view: &PlayerView<'_>) -> bool {
        view.rules
            .forced_accusation_window
            .is_some_and(|window| view.public.round.saturating_add(window) >= view.round_cap)
    }

    fn room_score(&self, belief: &BeliefState, room: Room) -> f64 {
        let mut score = 0.0;
        if !self.visited[room.slot()] {
            score += UNVISITED_BONUS;
        }
        let candidates = belief.solution_candidates(Category::Room);
        if candidates.contains(&Card::from(room)) {
            score += SOLUTION_ROOM_WEIGHT / candidates.len() as f64;
        }
        if self.last_suggestion_room == Some(room) {
            score -= LAST_ROOM_PENALTY;
        }
        score
    }

    fn best_room(&mut self, belief: &BeliefState) -> Room {
        let options: SmallVec<[(Room, f64); 9]> = Room::ALL
            .iter()
            .map(|room| (*room, self.room_score(belief, *room)))
            .collect();
        self.pick_best(&options).unwrap_or(Room::Study)
    }

    /// Highest score, ties broken at random.
    fn pick_best<T: Copy>(&mut self, options: &[(T, f64)]) -> Option<T> {
        let best = options
            .iter()
            .map(|(_, score)| *score)
            .fold(f64::NEG_INFINITY, f64::max);
        let ties: SmallVec<[T; 10]> = options
            .iter()
            .filter(|(_, score)| (*score - best).abs() < f64::EPSILON)
            .map(|(item, _)| *item)
            .collect();
        self.rng.choose(&ties).copied()
    }

    /// The destination closest to `target`, the cheaper walk on ties.
    fn closest_to(
        &self,
        view: &PlayerView<'_>,
        destinations: &[crate::board::Destination],
        target: NodeId,
    ) -> Option<NodeId> {
        destinations
            .iter()
            .min_by_key(|d| {
                (
                    view.board.distance(d.node, target).unwrap_or(u32::MAX),
                    Reverse(d.cost),
                    d.node,
                )
            })
            .map(|d| d.node)
    }

    /// Candidates of `category`, most informative first, then least suggested.
    fn ranked(&mut self, belief: &BeliefState, category: Category) -> SmallVec<[Card; 9]> {
        if let Some(card) = belief.known_solution(category) {
            return SmallVec::from_slice(&[card]);
        }
        let mut candidates = belief.solution_candidates(category);
        self.rng.shuffle(&mut candidates);
        candidates.sort_by_key(|c| {
            (
                Reverse(belief.possible_holders(*c).player_count()),
                belief.times_suggested(*c),
            )
        });
        candidates
    }
}
