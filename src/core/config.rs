//! Game configuration types.
//!
//! A table is configured once at setup:
//! - `GameConfig`: seat counts, round cap, seed, dice and re-solicitation limit
//! - `HouseRules`: the optional rule variants the engine supports
//!
//! Seat counts are clamped on construction, so a `GameConfig` always describes a
//! playable table. `validate` catches what clamping cannot fix (values set
//! directly through the public fields).

use serde::{Deserialize, Serialize};

use super::error::{ClueError, Result};
use super::player::{PlayerId, MAX_PLAYERS};

/// Fewest seats a game can be played with.
pub const MIN_PLAYERS: usize = 3;

/// Who controls a seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerKind {
    Human,
    Ai,
}

/// Optional rule variants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseRules {
    /// Eliminated players keep answering suggestions.
    pub eliminated_players_disprove: bool,

    /// The shown card is public instead of private to the suggester.
    pub reveal_shown_card_to_all: bool,

    /// A player who entered a new card room must suggest there.
    pub suggestion_required_on_entry: bool,

    /// Accusations may only be made from the center room.
    pub accuse_only_in_center: bool,

    /// When `Some(w)`, AI players make a best-guess accusation once
    /// `round + w >= round_cap`.
    pub forced_accusation_window: Option<u32>,
}

impl Default for HouseRules {
    fn default() -> Self {
        Self {
            eliminated_players_disprove: true,
            reveal_shown_card_to_all: false,
            suggestion_required_on_entry: false,
            accuse_only_in_center: false,
            forced_accusation_window: None,
        }
    }
}

impl HouseRules {
    #[must_use]
    pub fn with_eliminated_players_disprove(mut self, value: bool) -> Self {
        self.eliminated_players_disprove = value;
        self
    }

    #[must_use]
    pub fn with_reveal_shown_card_to_all(mut self, value: bool) -> Self {
        self.reveal_shown_card_to_all = value;
        self
    }

    #[must_use]
    pub fn with_suggestion_required_on_entry(mut self, value: bool) -> Self {
        self.suggestion_required_on_entry = value;
        self
    }

    #[must_use]
    pub fn with_accuse_only_in_center(mut self, value: bool) -> Self {
        self.accuse_only_in_center = value;
        self
    }

    #[must_use]
    pub fn with_forced_accusation_window(mut self, window: u32) -> Self {
        self.forced_accusation_window = Some(window);
        self
    }
}

/// Complete game configuration.
///
/// ```
/// use rust_clue::core::GameConfig;
///
/// // Too few seats: AI players are added.
/// let config = GameConfig::new(1, 0);
/// assert_eq!((config.human_players, config.ai_players), (1, 2));
///
/// // Too many seats: AI players are dropped.
/// let config = GameConfig::new(4, 5);
/// assert_eq!((config.human_players, config.ai_players), (4, 2));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seats controlled by a human collaborator. They sit first.
    pub human_players: usize,

    /// Seats controlled by the AI policy.
    pub ai_players: usize,

    /// Rounds played before the game ends without a winner.
    pub round_cap: u32,

    /// Root seed for every random stream of the game.
    pub seed: u64,

    pub dice_count: u8,
    pub die_sides: u8,

    /// How often one player is asked again after a recoverable error.
    pub max_resolicitations: u32,

    pub house_rules: HouseRules,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(0, 3)
    }
}

impl GameConfig {
    /// Create a configuration, clamping the seat counts to a playable table.
    ///
    /// Each count is clamped to `0..=6`. A table with fewer than 3 seats gets
    /// extra AI players; a table with more than 6 loses AI players (or becomes
    /// 6 AI players when there are no humans).
    #[must_use]
    pub fn new(human_players: usize, ai_players: usize) -> Self {
        let (human_players, ai_players) = clamp_seats(human_players, ai_players);
        Self {
            human_players,
            ai_players,
            round_cap: 400,
            seed: 42,
            dice_count: 1,
            die_sides: 6,
            max_resolicitations: 16,
            house_rules: HouseRules::default(),
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_round_cap(mut self, round_cap: u32) -> Self {
        self.round_cap = round_cap;
        self
    }

    #[must_use]
    pub fn with_house_rules(mut self, house_rules: HouseRules) -> Self {
        self.house_rules = house_rules;
        self
    }

    /// Roll `count` dice with `sides` faces each turn.
    #[must_use]
    pub fn with_dice(mut self, count: u8, sides: u8) -> Self {
        self.dice_count = count;
        self.die_sides = sides;
        self
    }

    #[must_use]
    pub fn with_max_resolicitations(mut self, attempts: u32) -> Self {
        self.max_resolicitations = attempts;
        self
    }

    /// Total number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.human_players + self.ai_players
    }

    /// Controller of every seat, humans first.
    #[must_use]
    pub fn seating(&self) -> Vec<(PlayerId, PlayerKind)> {
        PlayerId::all(self.player_count())
            .map(|p| {
                let kind = if p.index() < self.human_players {
                    PlayerKind::Human
                } else {
                    PlayerKind::Ai
                };
                (p, kind)
            })
            .collect()
    }

    /// Check the configuration can start a game.
    pub fn validate(&self) -> Result<()> {
        let count = self.player_count();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
            return Err(ClueError::Setup(format!(
                "{count} players is outside {MIN_PLAYERS}..={MAX_PLAYERS}"
            )));
        }
        if self.round_cap == 0 {
            return Err(ClueError::Setup("round cap must be positive".into()));
        }
        if self.dice_count == 0 || self.die_sides < 2 {
            return Err(ClueError::Setup(format!(
                "cannot roll {}d{}",
                self.dice_count, self.die_sides
            )));
        }
        Ok(())
    }
}

fn clamp_seats(human_players: usize, ai_players: usize) -> (usize, usize) {
    let humans = human_players.min(MAX_PLAYERS);
    let mut ai = ai_players.min(MAX_PLAYERS);

    if humans + ai < MIN_PLAYERS {
        ai = ai.max(MIN_PLAYERS - humans);
    } else if humans + ai > MAX_PLAYERS {
        ai = if humans > 0 { MAX_PLAYERS - humans } else { MAX_PLAYERS };
    }
    (humans, ai)
}
