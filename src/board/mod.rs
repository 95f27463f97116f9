//! Board & movement model.
//!
//! The board is a weighted graph of rooms, corridors and secret passages.
//! `Board::reachable` resolves the legal destinations for a roll; everything
//! else (who moves, when) belongs to the turn protocol.

pub mod graph;

pub use graph::{Board, Destination, Node, NodeId, NodeKind};
