use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Planar position in floor-local node units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Floor(pub String);

impl Floor {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Floor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Corridor,
    Room,
    Entrance,
    Stair,
    Lift,
    Other,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Corridor => "corridor",
            NodeType::Room => "room",
            NodeType::Entrance => "entrance",
            NodeType::Stair => "stair",
            NodeType::Lift => "lift",
            NodeType::Other => "other",
        }
    }

    /// Lenient parse used for hand-edited node tables. Unknown labels become `Other`.
    pub fn parse(s: &str) -> NodeType {
        match s.trim().to_ascii_lowercase().as_str() {
            "corridor" => NodeType::Corridor,
            "room" => NodeType::Room,
            "entrance" => NodeType::Entrance,
            "stair" | "stairs" | "staircase" => NodeType::Stair,
            "lift" | "elevator" => NodeType::Lift,
            "other" => NodeType::Other,
            unknown => {
                debug!(label = unknown, "unrecognised node type, treating as other");
                NodeType::Other
            }
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub floor: Floor,
    #[serde(rename = "type")]
    pub kind: NodeType,
    pub pos: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Node {
    pub fn new(id: impl Into<String>, floor: impl Into<String>, kind: NodeType, x: f64, y: f64) -> Self {
        Self { id: id.into(), floor: Floor::new(floor), kind, pos: Point::new(x, y), name: None }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn is_corridor(&self) -> bool {
        self.kind == NodeType::Corridor
    }
}

/// Node table keyed by id. Insertion order is the stable order every tie-break follows.
pub type NodeTable = IndexMap<String, Node>;

/// Builds a table from nodes, keeping the first occurrence of a duplicated id.
pub fn node_table(nodes: impl IntoIterator<Item = Node>) -> NodeTable {
    let mut table = NodeTable::new();
    for n in nodes {
        if !table.contains_key(&n.id) {
            table.insert(n.id.clone(), n);
        }
    }
    table
}

/// One directed row of the persisted edge table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeRow {
    pub from: String,
    pub to: String,
    pub distance: f64,
    pub accessible: bool,
}

/// Traversal order over floor labels. Listed floors come first in list order,
/// anything else follows lexicographically.
#[derive(Clone, Debug, Default)]
pub struct FloorOrder {
    listed: Vec<String>,
}

impl FloorOrder {
    pub fn new(listed: &[String]) -> Self {
        Self { listed: listed.to_vec() }
    }

    fn rank<'a>(&self, floor: &'a Floor) -> (usize, &'a str) {
        let idx = self.listed.iter().position(|l| l == floor.as_str()).unwrap_or(self.listed.len());
        (idx, floor.as_str())
    }

    pub fn sort(&self, floors: &mut [Floor]) {
        floors.sort_by(|a, b| self.rank(a).cmp(&self.rank(b)));
    }

    /// Groups nodes by floor, floors in traversal order and nodes in table order.
    pub fn group<'a>(&self, nodes: &'a NodeTable) -> Vec<(Floor, Vec<&'a Node>)> {
        let mut by_floor: IndexMap<Floor, Vec<&Node>> = IndexMap::new();
        for n in nodes.values() {
            by_floor.entry(n.floor.clone()).or_default().push(n);
        }
        let mut floors: Vec<Floor> = by_floor.keys().cloned().collect();
        self.sort(&mut floors);
        floors
            .into_iter()
            .map(|f| {
                let members = by_floor.swap_remove(&f).unwrap_or_default();
                (f, members)
            })
            .collect()
    }
}
