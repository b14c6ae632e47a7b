//! Act map graph and node traversal.
//!
//! A [`GameMap`] is a layered directed graph: every edge goes from a node in
//! row `r` to a node in row `r + 1`. Traversal is driven by the `available`
//! flag: row 0 starts available, and a node only becomes available when a
//! visited neighbour in the previous row connects to it.

use std::fmt;
use std::str::FromStr;

use strum::{Display, EnumIter, EnumString};

use crate::error::{ErrorSeverity, GameError};

/// What happens when the player enters a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "camelCase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum NodeType {
    Combat,
    EliteCombat,
    Boss,
    Rest,
    Shop,
    Event,
    ForgeUpgrade,
    Shrine,
}

impl NodeType {
    /// True for node types that open a combat encounter.
    pub const fn is_combat(&self) -> bool {
        matches!(self, Self::Combat | Self::EliteCombat | Self::Boss)
    }
}

/// Grid position of a node, rendered as `node-{row}-{column}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId {
    pub row: u32,
    pub column: u32,
}

impl NodeId {
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}-{}", self.row, self.column)
    }
}

impl FromStr for NodeId {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MapError::InvalidNodeId {
            input: s.to_owned(),
        };

        let rest = s.strip_prefix("node-").ok_or_else(invalid)?;
        let (row, column) = rest.split_once('-').ok_or_else(invalid)?;
        let row = row.parse().map_err(|_| invalid())?;
        let column = column.parse().map_err(|_| invalid())?;
        Ok(Self::new(row, column))
    }
}

/// One traversable point on the act map.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapNode {
    pub id: NodeId,
    pub node_type: NodeType,
    /// Directed edges to nodes in the next row, without duplicates.
    pub connections: Vec<NodeId>,
    pub visited: bool,
    pub available: bool,
}

impl MapNode {
    pub fn new(id: NodeId, node_type: NodeType) -> Self {
        Self {
            id,
            node_type,
            connections: Vec::new(),
            visited: false,
            available: id.row == 0,
        }
    }

    pub fn row(&self) -> u32 {
        self.id.row
    }

    pub fn column(&self) -> u32 {
        self.id.column
    }

    pub fn is_connected_to(&self, other: NodeId) -> bool {
        self.connections.contains(&other)
    }

    /// Adds an edge unless it already exists. Returns true when added.
    pub fn connect(&mut self, other: NodeId) -> bool {
        if self.is_connected_to(other) {
            return false;
        }
        self.connections.push(other);
        true
    }
}

/// Errors produced while traversing or addressing the map.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MapError {
    #[error("node {0} does not exist on this map")]
    UnknownNode(NodeId),

    #[error("node {0} is not available")]
    NodeUnavailable(NodeId),

    #[error("node {0} was already visited")]
    NodeAlreadyVisited(NodeId),

    #[error("malformed node id '{input}'")]
    InvalidNodeId { input: String },
}

impl GameError for MapError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownNode(_) => "MAP_UNKNOWN_NODE",
            Self::NodeUnavailable(_) => "MAP_NODE_UNAVAILABLE",
            Self::NodeAlreadyVisited(_) => "MAP_NODE_ALREADY_VISITED",
            Self::InvalidNodeId { .. } => "MAP_INVALID_NODE_ID",
        }
    }
}

/// Node graph for one act.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameMap {
    pub act: u32,
    /// Nodes ordered by row, then by first appearance within the row.
    pub nodes: Vec<MapNode>,
    pub current_node: Option<NodeId>,
    pub boss_node: NodeId,
}

impl GameMap {
    pub fn node(&self, id: NodeId) -> Option<&MapNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut MapNode> {
        self.nodes.iter_mut().find(|node| node.id == id)
    }

    pub fn available_nodes(&self) -> impl Iterator<Item = &MapNode> {
        self.nodes.iter().filter(|node| node.available)
    }

    pub fn nodes_in_row(&self, row: u32) -> impl Iterator<Item = &MapNode> {
        self.nodes.iter().filter(move |node| node.row() == row)
    }

    pub fn boss(&self) -> Option<&MapNode> {
        self.node(self.boss_node)
    }

    /// Checks that `id` can be entered right now.
    pub fn validate_selection(&self, id: NodeId) -> Result<&MapNode, MapError> {
        let node = self.node(id).ok_or(MapError::UnknownNode(id))?;
        if node.visited {
            return Err(MapError::NodeAlreadyVisited(id));
        }
        if !node.available {
            return Err(MapError::NodeUnavailable(id));
        }
        Ok(node)
    }

    /// Enters a node and returns its type.
    ///
    /// The node becomes visited and unavailable, its connections become
    /// available, and every other node that was available is closed so the
    /// player cannot backtrack to a sibling branch. Nothing changes on error.
    pub fn select(&mut self, id: NodeId) -> Result<NodeType, MapError> {
        let node = self.validate_selection(id)?;
        let node_type = node.node_type;
        let connections = node.connections.clone();

        for node in &mut self.nodes {
            if node.id == id {
                node.visited = true;
                node.available = false;
            } else if connections.contains(&node.id) {
                node.available = true;
            } else if node.available && !node.visited {
                node.available = false;
            }
        }
        self.current_node = Some(id);

        Ok(node_type)
    }
}
