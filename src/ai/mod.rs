//! Computer players.

pub mod policy;

pub use policy::AiPolicy;
