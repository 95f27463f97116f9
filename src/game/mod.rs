//! Turn scheduler, game loop and the read-only results handed to output
//! collaborators (round logs and snapshots).

pub mod context;
pub mod log;
pub mod scheduler;
pub mod snapshot;

pub use context::GameContext;
pub use log::RoundLog;
pub use scheduler::{Game, GameBuilder};
pub use snapshot::{BeliefTable, GameOutcome, GameSnapshot};
