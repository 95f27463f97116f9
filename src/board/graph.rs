//! Board graph and movement resolution.
//!
//! The mansion is modelled as a small weighted graph: rooms, the central start
//! room and corridor segments are nodes, and an edge weight is the number of
//! squares walked between them. A roll of `n` reaches every node whose shortest
//! path costs at most `n`. Entering a room (or the center) ends movement, so
//! paths never pass *through* a room. Secret passages connect diagonally
//! opposite rooms and cost nothing.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::Room;

/// Board node identifier.
///
/// Room nodes use the room's slot as id (`0..9`), so `NodeId` and `Room`
/// convert without a lookup on the classic board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u8);

impl NodeId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node {}", self.0)
    }
}

/// What a node is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// A card room; suggestions are made here.
    Room(Room),
    /// The central start room. Not a card.
    Center,
    /// A corridor segment between rooms.
    Corridor,
}

impl NodeKind {
    /// Rooms and the center stop movement.
    #[must_use]
    pub fn stops_movement(self) -> bool {
        !matches!(self, NodeKind::Corridor)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub name: &'static str,
}

/// A legal destination for one roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Destination {
    pub node: NodeId,
    /// Squares walked. Zero for staying put or taking a passage.
    pub cost: u32,
    pub via_passage: bool,
}

/// The mansion graph.
#[derive(Clone, Debug)]
pub struct Board {
    nodes: Vec<Node>,
    edges: Vec<SmallVec<[(NodeId, u32); 6]>>,
    passages: FxHashMap<NodeId, NodeId>,
    rooms: [NodeId; 9],
    center: NodeId,
}

const CENTER: u8 = 9;

const CORRIDORS: [(u8, &str); 7] = [
    (10, "north-west corridor"),
    (11, "north corridor"),
    (12, "north-east corridor"),
    (13, "west corridor"),
    (14, "east corridor"),
    (15, "south-west corridor"),
    (16, "south corridor"),
];

// (a, b, squares). Rooms 0..9 in `Room::ALL` order, center 9, corridors 10..17.
const CLASSIC_EDGES: [(u8, u8, u32); 25] = [
    (10, 0, 2),
    (10, 1, 3),
    (10, 8, 3),
    (11, 1, 2),
    (11, 2, 3),
    (11, CENTER, 2),
    (12, 2, 2),
    (12, 3, 3),
    (13, 8, 2),
    (13, 7, 2),
    (13, CENTER, 3),
    (14, 3, 2),
    (14, CENTER, 3),
    (14, 4, 3),
    (15, 7, 2),
    (15, 6, 2),
    (15, 5, 3),
    (16, 5, 2),
    (16, CENTER, 2),
    (16, 4, 2),
    (10, 11, 2),
    (11, 12, 2),
    (10, 13, 3),
    (12, 14, 3),
    (15, 16, 2),
];

const CLASSIC_PASSAGES: [(Room, Room); 2] = [
    (Room::Study, Room::Kitchen),
    (Room::Lounge, Room::Conservatory),
];

impl Board {
    /// The classic mansion: nine rooms around the central start room, joined by
    /// seven corridor segments, with two secret passages.
    #[must_use]
    pub fn classic() -> Self {
        let mut nodes: Vec<Node> = Room::ALL
            .iter()
            .map(|room| Node {
                id: NodeId(room.slot() as u8),
                kind: NodeKind::Room(*room),
                name: room.name(),
            })
            .collect();
        nodes.push(Node {
            id: NodeId(CENTER),
            kind: NodeKind::Center,
            name: "Clue",
        });
        nodes.extend(CORRIDORS.iter().map(|&(id, name)| Node {
            id: NodeId(id),
            kind: NodeKind::Corridor,
            name,
        }));

        let mut edges = vec![SmallVec::new(); nodes.len()];
        for &(a, b, cost) in &CLASSIC_EDGES {
            edges[a as usize].push((NodeId(b), cost));
            edges[b as usize].push((NodeId(a), cost));
        }

        let mut passages = FxHashMap::default();
        for (a, b) in CLASSIC_PASSAGES {
            let (a, b) = (NodeId(a.slot() as u8), NodeId(b.slot() as u8));
            passages.insert(a, b);
            passages.insert(b, a);
        }

        let rooms = Room::ALL.map(|room| NodeId(room.slot() as u8));

        Self {
            nodes,
            edges,
            passages,
            rooms,
            center: NodeId(CENTER),
        }
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Node of a card room.
    #[must_use]
    pub fn room_node(&self, room: Room) -> NodeId {
        self.rooms[room.slot()]
    }

    /// The card room at `node`, if it is one.
    #[must_use]
    pub fn room_at(&self, node: NodeId) -> Option<Room> {
        match self.node(node)?.kind {
            NodeKind::Room(room) => Some(room),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_room(&self, node: NodeId) -> bool {
        self.room_at(node).is_some()
    }

    /// The central start room.
    #[must_use]
    pub fn center(&self) -> NodeId {
        self.center
    }

    /// The other end of the secret passage leaving `node`.
    #[must_use]
    pub fn secret_passage(&self, node: NodeId) -> Option<NodeId> {
        self.passages.get(&node).copied()
    }

    /// Every destination legal from `from` with a roll of `roll`, by node id.
    ///
    /// Always contains `from` itself (staying put) and the passage exit when
    /// `from` has one.
    #[must_use]
    pub fn reachable(&self, from: NodeId, roll: u8) -> Vec<Destination> {
        if self.node(from).is_none() {
            return Vec::new();
        }
        let dist = self.shortest_paths(from, Some(u32::from(roll)), true);

        let mut destinations: Vec<Destination> = dist
            .iter()
            .enumerate()
            .filter_map(|(i, d)| {
                d.map(|cost| Destination {
                    node: NodeId(i as u8),
                    cost,
                    via_passage: false,
                })
            })
            .collect();

        if let Some(exit) = self.secret_passage(from) {
            match destinations.iter_mut().find(|d| d.node == exit) {
                Some(existing) => {
                    existing.cost = 0;
                    existing.via_passage = true;
                }
                None => destinations.push(Destination {
                    node: exit,
                    cost: 0,
                    via_passage: true,
                }),
            }
        }

        destinations.sort_by_key(|d| d.node);
        destinations
    }

    /// True when `to` is a legal destination from `from` with `roll`.
    #[must_use]
    pub fn is_reachable(&self, from: NodeId, to: NodeId, roll: u8) -> bool {
        self.reachable(from, roll).iter().any(|d| d.node == to)
    }

    /// Fewest squares from `from` to `to` over any number of turns.
    ///
    /// Rooms do not stop the walk here and passages cost nothing, so this is a
    /// planning distance, not a single-move check.
    #[must_use]
    pub fn distance(&self, from: NodeId, to: NodeId) -> Option<u32> {
        if self.node(from).is_none() {
            return None;
        }
        self.shortest_paths(from, None, false)
            .get(to.index())
            .copied()
            .flatten()
    }

    fn shortest_paths(&self, start: NodeId, limit: Option<u32>, rooms_stop: bool) -> Vec<Option<u32>> {
        let mut dist: Vec<Option<u32>> = vec![None; self.nodes.len()];
        let mut heap: BinaryHeap<Reverse<(u32, NodeId)>> = BinaryHeap::new();
        dist[start.index()] = Some(0);
        heap.push(Reverse((0, start)));

        while let Some(Reverse((cost, node))) = heap.pop() {
            if dist[node.index()] != Some(cost) {
                continue;
            }
            if rooms_stop && node != start && self.nodes[node.index()].kind.stops_movement() {
                continue;
            }

            let passage = if rooms_stop {
                None
            } else {
                self.secret_passage(node).map(|exit| (exit, 0))
            };

            for &(next, step) in self.edges[node.index()].iter().chain(passage.iter()) {
                let next_cost = cost.saturating_add(step);
                if limit.is_some_and(|max| next_cost > max) {
                    continue;
                }
                if dist[next.index()].map_or(true, |d| next_cost < d) {
                    dist[next.index()] = Some(next_cost);
                    heap.push(Reverse((next_cost, next)));
                }
            }
        }
        dist
    }
}
