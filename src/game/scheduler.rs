//! Turn scheduler and game loop.
//!
//! Rounds go clockwise from seat 0 over the players still in the game. For
//! every turn the scheduler rolls the dice, asks the active player for a move,
//! a suggestion and an accusation, asks the disproof candidates in order, and
//! hands each accepted action to the `Turn` state machine. The observations a
//! turn produces are broadcast to the knowledge engine before the next
//! decision is asked, so every player decides on up-to-date beliefs.
//!
//! A recoverable rejection (illegal move, wrong room, action out of phase) is
//! reported to the player and the same decision is asked again, at most
//! `GameConfig::max_resolicitations` times in a row. Everything else ends the
//! game with an error.

use im::Vector;
use tracing::{debug, info, warn};

use super::context::GameContext;
use super::log::RoundLog;
use super::snapshot::{GameOutcome, GameSnapshot};
use crate::cards::CardRegistry;
use crate::core::{
    Action, ActionRecord, ClueError, GameConfig, GameRng, PlayerId, PlayerKind, PlayerMap, Result,
};
use crate::knowledge::{BeliefState, KnowledgeEngine};
use crate::players::{AiPlayer, DecisionProvider, HumanPlayer, Player, PlayerView};
use crate::protocol::{Turn, TurnPhase};

/// Sets up a `Game`.
///
/// ```
/// use rust_clue::core::GameConfig;
/// use rust_clue::game::GameBuilder;
///
/// let mut game = GameBuilder::new(GameConfig::new(0, 4).with_seed(7)).build().unwrap();
/// let outcome = game.play().unwrap();
/// assert_eq!(game.outcome(), Some(outcome));
/// ```
pub struct GameBuilder {
    config: GameConfig,
    humans: Vec<Box<dyn Player>>,
    seats: Vec<(PlayerId, Box<dyn Player>)>,
    registry: Option<CardRegistry>,
}

impl GameBuilder {
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            humans: Vec::new(),
            seats: Vec::new(),
            registry: None,
        }
    }

    /// Attach the input collaborator of the next human seat.
    #[must_use]
    pub fn with_human<D: DecisionProvider + 'static>(mut self, provider: D) -> Self {
        let seat = PlayerId::new(self.humans.len() as u8);
        self.humans.push(Box::new(HumanPlayer::new(seat, provider)));
        self
    }

    /// Seat `player` at `seat`, whatever the configuration says about it.
    #[must_use]
    pub fn with_seat(mut self, seat: PlayerId, player: impl Player + 'static) -> Self {
        self.seats.push((seat, Box::new(player)));
        self
    }

    /// Play with a fixed deal instead of a seeded one.
    #[must_use]
    pub fn with_registry(mut self, registry: CardRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn build(self) -> Result<Game> {
        let GameBuilder {
            config,
            humans,
            mut seats,
            registry,
        } = self;
        config.validate()?;
        if humans.len() > config.human_players {
            return Err(ClueError::Setup(format!(
                "{} decision providers for {} human seats",
                humans.len(),
                config.human_players
            )));
        }

        let root = GameRng::new(config.seed);
        let registry = match registry {
            Some(registry) => registry,
            None => CardRegistry::deal(config.player_count(), &mut root.for_context("deal"))?,
        };

        let mut humans = humans.into_iter();
        let mut players: Vec<Box<dyn Player>> = Vec::with_capacity(config.player_count());
        for (seat, kind) in config.seating() {
            let assigned = seats
                .iter()
                .position(|(s, _)| *s == seat)
                .map(|i| seats.swap_remove(i).1);
            let human = if kind == PlayerKind::Human { humans.next() } else { None };
            let player = match (assigned, human, kind) {
                (Some(player), _, _) => player,
                (None, Some(player), _) => player,
                (None, None, PlayerKind::Ai) => Box::new(AiPlayer::new(
                    seat,
                    root.for_context(&format!("ai/{}", seat.index())),
                )) as Box<dyn Player>,
                (None, None, PlayerKind::Human) => {
                    return Err(ClueError::Setup(format!("no decision provider for {seat}")));
                }
            };
            players.push(player);
        }
        if let Some((seat, _)) = seats.first() {
            return Err(ClueError::Setup(format!("{seat} is not at the table")));
        }

        let context = GameContext::new(config, registry)?;
        let mut knowledge = KnowledgeEngine::new(
            context.registry().hand_sizes(),
            context.config().house_rules.reveal_shown_card_to_all,
        );
        knowledge.seed_hands(context.registry())?;

        info!(
            players = context.config().player_count(),
            humans = context.config().human_players,
            seed = context.config().seed,
            round_cap = context.config().round_cap,
            "game set up"
        );

        let round = context.public().round;
        Ok(Game {
            players: PlayerMap::from_vec(players),
            dice: root.for_context("dice"),
            context,
            knowledge,
            current_log: RoundLog::new(round),
            round_logs: Vector::new(),
            snapshots: Vector::new(),
            outcome: None,
        })
    }
}

/// A game in progress.
pub struct Game {
    context: GameContext,
    knowledge: KnowledgeEngine,
    players: PlayerMap<Box<dyn Player>>,
    dice: GameRng,
    current_log: RoundLog,
    round_logs: Vector<RoundLog>,
    snapshots: Vector<GameSnapshot>,
    outcome: Option<GameOutcome>,
}

impl Game {
    /// Play rounds until the game ends.
    pub fn play(&mut self) -> Result<GameOutcome> {
        loop {
            if let Some(outcome) = self.play_round()? {
                return Ok(outcome);
            }
        }
    }

    /// Play one full round and snapshot it. Returns the outcome once the game
    /// is over.
    pub fn play_round(&mut self) -> Result<Option<GameOutcome>> {
        if self.outcome.is_some() {
            return Ok(self.outcome);
        }

        let round = self.context.public().round;
        debug!(round, "round started");
        for seat in PlayerId::all(self.context.public().player_count()) {
            self.play_turn(seat)?;
            if self.outcome.is_some() {
                break;
            }
        }

        if self.outcome.is_none() && round >= self.context.config().round_cap {
            self.outcome = Some(GameOutcome::RoundCapReached);
        }

        let log = std::mem::replace(&mut self.current_log, RoundLog::new(round + 1));
        self.round_logs.push_back(log);
        let snapshot = self.snapshot();
        self.snapshots.push_back(snapshot);

        match self.outcome {
            Some(outcome) => info!(round, ?outcome, "game over"),
            None => self.context.public_mut().advance_round(),
        }
        Ok(self.outcome)
    }

    /// Play `seat`'s turn. Seats out of the game, and every seat once the
    /// game is over, are skipped.
    pub fn play_turn(&mut self, seat: PlayerId) -> Result<()> {
        if self.outcome.is_some() || !self.context.public().is_active(seat) {
            return Ok(());
        }

        let config = self.context.config();
        let roll = self.dice.roll_dice(config.dice_count, config.die_sides);
        let max_rejections = config.max_resolicitations;
        self.context.public_mut().begin_turn(seat);
        let mut turn = Turn::begin(seat, roll, self.context.public().position(seat));
        debug!(player = %seat, roll, "turn started");

        let mut rejections = 0;
        while !turn.is_complete() {
            let (actor, action) = self.solicit(&turn);
            match self.submit(&mut turn, actor, action) {
                Ok(()) => rejections = 0,
                Err(error) if error.is_recoverable() && rejections < max_rejections => {
                    warn!(player = %actor, %error, "action rejected, asking again");
                    self.players[actor].on_rejected(&error);
                    rejections += 1;
                }
                Err(error) => return Err(error),
            }
        }

        if self.outcome.is_none() && self.context.public().active_players().next().is_none() {
            self.outcome = Some(GameOutcome::AllEliminated);
        }
        Ok(())
    }

    /// Ask whoever must act next in `turn` for their action.
    fn solicit(&mut self, turn: &Turn) -> (PlayerId, Action) {
        let actor = turn.disproof_candidate().unwrap_or(turn.player());
        let config = self.context.config();
        let view = PlayerView {
            seat: actor,
            belief: self.knowledge.belief(actor),
            board: self.context.board(),
            public: self.context.public(),
            rules: &config.house_rules,
            round_cap: config.round_cap,
        };
        let player = &mut self.players[actor];

        let action = match turn.phase() {
            TurnPhase::AwaitingMove => Action::Move {
                destination: player.choose_move(&view, turn.roll()),
            },
            TurnPhase::AwaitingSuggestion => view
                .board
                .room_at(view.position())
                .and_then(|room| player.choose_suggestion(&view, room))
                .map_or(Action::SkipSuggestion, Action::Suggest),
            TurnPhase::AwaitingDisproof { .. } => {
                let card = turn.suggestion().and_then(|triple| {
                    let matching = self.context.registry().hand(actor).matching(&triple);
                    player.disclose_disproof(&view, turn.player(), &triple, &matching)
                });
                Action::Disprove(card)
            }
            TurnPhase::AwaitingAccusation => player
                .choose_accusation(&view)
                .map_or(Action::EndTurn, Action::Accuse),
            TurnPhase::TurnComplete => Action::EndTurn,
        };
        (actor, action)
    }

    /// Apply one action, log it and broadcast what it revealed.
    fn submit(&mut self, turn: &mut Turn, actor: PlayerId, action: Action) -> Result<()> {
        let observations = turn.apply(actor, &action, &mut self.context.turn_context())?;

        let public = self.context.public_mut();
        let sequence = public.next_sequence();
        let record = ActionRecord::new(actor, action, public.round, sequence);
        public.record_action(record.clone());

        let accusation = matches!(record.action, Action::Accuse(_))
            .then(|| turn.accusation().map(|(_, correct)| correct))
            .flatten();
        self.current_log.push(record, accusation);

        for observation in &observations {
            self.knowledge.broadcast(observation)?;
        }

        if accusation == Some(true) {
            self.outcome = Some(GameOutcome::Winner(actor));
        }
        Ok(())
    }

    /// Current state as a snapshot.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(self.context.public(), &self.knowledge, self.outcome)
    }

    /// One snapshot per completed round.
    #[must_use]
    pub fn snapshots(&self) -> &Vector<GameSnapshot> {
        &self.snapshots
    }

    /// One log per completed round.
    #[must_use]
    pub fn round_logs(&self) -> &Vector<RoundLog> {
        &self.round_logs
    }

    /// The log of the round in progress.
    #[must_use]
    pub fn current_log(&self) -> &RoundLog {
        &self.current_log
    }

    #[must_use]
    pub fn belief(&self, player: PlayerId) -> &BeliefState {
        self.knowledge.belief(player)
    }

    #[must_use]
    pub fn spectator(&self) -> &BeliefState {
        self.knowledge.spectator()
    }

    #[must_use]
    pub fn knowledge(&self) -> &KnowledgeEngine {
        &self.knowledge
    }

    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    #[must_use]
    pub fn context(&self) -> &GameContext {
        &self.context
    }

    #[must_use]
    pub fn player_kind(&self, seat: PlayerId) -> PlayerKind {
        self.players[seat].kind()
    }
}
