//! Fan-out of observations to every observer.
//!
//! The engine owns one `BeliefState` per seat plus a spectator view, and
//! applies each observation to every observer that witnesses it, redacted to
//! what that observer may see.

use smallvec::SmallVec;
use tracing::debug;

use super::belief::{BeliefDelta, BeliefState};
use super::observation::Observation;
use crate::cards::CardRegistry;
use crate::core::{Perspective, PlayerId, PlayerMap, Result};

/// All belief states of one game.
#[derive(Clone, Debug)]
pub struct KnowledgeEngine {
    beliefs: PlayerMap<BeliefState>,
    spectator: BeliefState,
    reveal_shown_card_to_all: bool,
}

impl KnowledgeEngine {
    /// Fresh, all-unknown beliefs for a table with the given public hand sizes.
    #[must_use]
    pub fn new(hand_sizes: PlayerMap<u8>, reveal_shown_card_to_all: bool) -> Self {
        let beliefs = PlayerMap::new(hand_sizes.player_count(), |p| {
            BeliefState::new(p, hand_sizes.clone())
        });
        Self {
            beliefs,
            spectator: BeliefState::spectator(hand_sizes),
            reveal_shown_card_to_all,
        }
    }

    /// Show every player their own hand.
    pub fn seed_hands(&mut self, registry: &CardRegistry) -> Result<()> {
        for (player, hand) in registry.hands().iter() {
            self.broadcast(&Observation::HandRevealed {
                player,
                cards: SmallVec::from_slice(hand.cards()),
            })?;
        }
        Ok(())
    }

    /// Apply `observation` to every observer that witnesses it.
    ///
    /// Returns the delta of each witnessing observer, seats first, spectator
    /// last. The first inconsistency aborts the broadcast.
    pub fn broadcast(&mut self, observation: &Observation) -> Result<Vec<(Perspective, BeliefDelta)>> {
        let reveal_all = self.reveal_shown_card_to_all;
        let mut deltas = Vec::with_capacity(self.beliefs.player_count() + 1);

        let observers = self
            .beliefs
            .iter_mut()
            .map(|(p, belief)| (Perspective::Player(p), belief))
            .chain(std::iter::once((Perspective::Spectator, &mut self.spectator)));

        for (perspective, belief) in observers {
            let Some(view) = observation.view_for(perspective, reveal_all) else {
                continue;
            };
            let delta = belief.observe(&view)?;
            if !delta.changes.is_empty() {
                debug!(
                    observer = %perspective,
                    event = observation.kind(),
                    learned = delta.changes.len(),
                    passes = delta.passes,
                    "belief updated"
                );
            }
            deltas.push((perspective, delta));
        }
        Ok(deltas)
    }

    #[must_use]
    pub fn belief(&self, player: PlayerId) -> &BeliefState {
        &self.beliefs[player]
    }

    #[must_use]
    pub fn spectator(&self) -> &BeliefState {
        &self.spectator
    }

    #[must_use]
    pub fn beliefs(&self) -> &PlayerMap<BeliefState> {
        &self.beliefs
    }

    #[must_use]
    pub fn reveal_shown_card_to_all(&self) -> bool {
        self.reveal_shown_card_to_all
    }
}
