//! Card system: the fixed deck and the hidden deal.
//!
//! ## Key Types
//!
//! - `Card`: Dense identifier of one of the 21 cards
//! - `Suspect`, `Weapon`, `Room`: Typed views of each category
//! - `Triple`: One card per category (solution, suggestion, accusation)
//! - `CardRegistry`: The solution and every private hand

pub mod card;
pub mod registry;

pub use card::{Card, Category, Room, Suspect, Triple, Weapon};
pub use registry::{CardRegistry, Hand, Solution};
