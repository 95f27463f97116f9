//! Everything one game owns: configuration, board, cards and public state.

use crate::board::Board;
use crate::cards::CardRegistry;
use crate::core::{ClueError, GameConfig, PublicState, Result};
use crate::protocol::TurnContext;

/// Owned game context. There are no globals: every collaborator reaches the
/// board and the cards through one of these.
#[derive(Clone, Debug)]
pub struct GameContext {
    config: GameConfig,
    board: Board,
    registry: CardRegistry,
    public: PublicState,
}

impl GameContext {
    /// Validate `config` and `registry` against each other and place every
    /// token on the center.
    pub fn new(config: GameConfig, registry: CardRegistry) -> Result<Self> {
        config.validate()?;
        registry.validate()?;
        if registry.player_count() != config.player_count() {
            return Err(ClueError::Setup(format!(
                "{} hands dealt for {} players",
                registry.player_count(),
                config.player_count()
            )));
        }

        let board = Board::classic();
        let public = PublicState::new(registry.hand_sizes(), board.center());
        Ok(Self {
            config,
            board,
            registry,
            public,
        })
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    #[must_use]
    pub fn public(&self) -> &PublicState {
        &self.public
    }

    pub(crate) fn public_mut(&mut self) -> &mut PublicState {
        &mut self.public
    }

    /// Borrow what a `Turn` needs to apply actions.
    pub fn turn_context(&mut self) -> TurnContext<'_> {
        TurnContext {
            board: &self.board,
            registry: &self.registry,
            rules: &self.config.house_rules,
            public: &mut self.public,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameRng, PlayerId};

    #[test]
    fn test_context_setup() {
        let config = GameConfig::new(0, 4);
        let registry = CardRegistry::deal(4, &mut GameRng::new(1)).unwrap();
        let ctx = GameContext::new(config, registry).unwrap();

        assert_eq!(ctx.public().player_count(), 4);
        assert_eq!(ctx.public().position(PlayerId::new(3)), ctx.board().center());
        assert_eq!(ctx.public().hand_sizes.values().map(|n| usize::from(*n)).sum::<usize>(), 18);
    }

    #[test]
    fn test_mismatched_registry() {
        let registry = CardRegistry::deal(3, &mut GameRng::new(1)).unwrap();
        let err = GameContext::new(GameConfig::new(0, 5), registry).unwrap_err();
        assert!(matches!(err, ClueError::Setup(_)));
    }
}
