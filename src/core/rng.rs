//! Deterministic random number generation.
//!
//! Every random decision in a game (the hidden solution, the deal, dice rolls,
//! AI tie-breaks) is drawn from a `GameRng` derived from the configured seed, so
//! a seed fully reproduces a game.
//!
//! ## Context streams
//!
//! ```
//! use rust_clue::core::GameRng;
//!
//! let root = GameRng::new(7);
//! let mut deal = root.for_context("deal");
//! let mut dice = root.for_context("dice");
//!
//! // Rolling dice never disturbs the deal and vice versa.
//! let roll = dice.roll_dice(1, 6);
//! assert!((1..=6).contains(&roll));
//! let _ = deal.gen_range_usize(0..21);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Deterministic ChaCha8 RNG with forking and context streams.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Fork a private stream, e.g. for speculative AI simulation.
    ///
    /// Each fork yields a different but reproducible sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Self::new(fork_seed)
    }

    /// Derive an independent stream for a named concern.
    ///
    /// The same context always yields the same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Random usize in `range`.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Roll `count` dice with `sides` faces each and return the total.
    pub fn roll_dice(&mut self, count: u8, sides: u8) -> u8 {
        (0..count)
            .map(|_| self.inner.gen_range(1..=sides))
            .fold(0u8, u8::saturating_add)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Pick a uniformly random element, `None` for an empty slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Capture the stream position.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
        }
    }

    /// Resume a stream captured with [`GameRng::state`].
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
        }
    }
}

/// Serializable RNG position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    /// ChaCha8 word position.
    pub word_pos: u128,
    pub fork_counter: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..50 {
            assert_eq!(rng1.roll_dice(2, 6), rng2.roll_dice(2, 6));
        }
    }

    #[test]
    fn test_roll_dice_bounds() {
        let mut rng = GameRng::new(3);
        for _ in 0..200 {
            let single = rng.roll_dice(1, 6);
            assert!((1..=6).contains(&single));
            let pair = rng.roll_dice(2, 6);
            assert!((2..=12).contains(&pair));
        }
    }

    #[test]
    fn test_contexts_are_independent() {
        let rng = GameRng::new(42);
        let mut deal = rng.for_context("deal");
        let mut dice = rng.for_context("dice");

        let a: Vec<_> = (0..10).map(|_| deal.gen_range_usize(0..1000)).collect();
        let b: Vec<_> = (0..10).map(|_| dice.gen_range_usize(0..1000)).collect();
        assert_ne!(a, b);

        let mut deal_again = GameRng::new(42).for_context("deal");
        let c: Vec<_> = (0..10).map(|_| deal_again.gen_range_usize(0..1000)).collect();
        assert_eq!(a, c);
    }

    #[test]
    fn test_fork_is_deterministic() {
        let mut rng1 = GameRng::new(9);
        let mut rng2 = GameRng::new(9);
        let mut f1 = rng1.fork();
        let mut f2 = rng2.fork();
        assert_eq!(f1.gen_range_usize(0..10_000), f2.gen_range_usize(0..10_000));
        assert_eq!(rng1.state().fork_counter, 1);
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut rng = GameRng::new(42);
        let mut data: Vec<u8> = (0..21).collect();
        rng.shuffle(&mut data);
        data.sort_unstable();
        assert_eq!(data, (0..21).collect::<Vec<u8>>());
    }

    #[test]
    fn test_choose_empty() {
        let mut rng = GameRng::new(1);
        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());
        assert_eq!(rng.choose(&[5]), Some(&5));
    }

    #[test]
    fn test_state_restore() {
        let mut rng = GameRng::new(42);
        for _ in 0..37 {
            rng.roll_dice(1, 6);
        }
        let state = rng.state();
        let expected: Vec<_> = (0..10).map(|_| rng.roll_dice(1, 6)).collect();

        let mut restored = GameRng::from_state(&state);
        let actual: Vec<_> = (0..10).map(|_| restored.roll_dice(1, 6)).collect();
        assert_eq!(expected, actual);

        let json = serde_json::to_string(&state).unwrap();
        let back: GameRngState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, back);
    }
}
