//! Cross-floor links between the same physical stair or lift.

use std::collections::BTreeMap;

use itertools::Itertools;

use crate::geometry::distance;
use crate::graph::EdgeSet;
use crate::models::{Floor, FloorOrder, Node, NodeTable, NodeType};
use crate::options::{VerticalOptions, VerticalSpan, VerticalWeight};

/// Equality class for vertical linking.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum VerticalKey {
    /// Stairs sharing a trailing number, e.g. `stair_gf_1` and `stair_ff_1`.
    Stair(String),
    /// All lifts form a single shaft class.
    Lift,
}

/// Trailing ASCII digits of an id, if any.
pub fn numeric_suffix(id: &str) -> Option<&str> {
    let start = id.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    if start == id.len() { None } else { Some(&id[start..]) }
}

pub fn vertical_key(node: &Node) -> Option<VerticalKey> {
    match node.kind {
        NodeType::Stair => numeric_suffix(&node.id).map(|s| VerticalKey::Stair(s.to_string())),
        NodeType::Lift => Some(VerticalKey::Lift),
        _ => None,
    }
}

/// Adds vertical links for every stair/lift group. Returns the number of new edges.
pub fn link_vertical(nodes: &NodeTable, order: &FloorOrder, opts: &VerticalOptions, edges: &mut EdgeSet) -> usize {
    let mut groups: BTreeMap<VerticalKey, Vec<&Node>> = BTreeMap::new();
    for n in nodes.values() {
        if let Some(key) = vertical_key(n) {
            groups.entry(key).or_default().push(n);
        }
    }

    let mut added = 0usize;
    for (key, members) in groups {
        let accessible = matches!(key, VerticalKey::Lift);
        for (a, b) in linked_pairs(&members, order, opts.span) {
            let weight = match opts.weight {
                VerticalWeight::Planar => distance(a.pos, b.pos),
                VerticalWeight::Zero => 0.0,
            };
            if edges.insert(&a.id, &b.id, weight, accessible) {
                added += 1;
            }
        }
    }
    added
}

fn linked_pairs<'a>(members: &[&'a Node], order: &FloorOrder, span: VerticalSpan) -> Vec<(&'a Node, &'a Node)> {
    match span {
        VerticalSpan::AllPairs => members
            .iter()
            .tuple_combinations()
            .filter(|(a, b)| a.floor != b.floor)
            .map(|(a, b)| (*a, *b))
            .collect(),
        VerticalSpan::Adjacent => {
            let mut floors: Vec<Floor> = members.iter().map(|n| n.floor.clone()).unique().collect();
            order.sort(&mut floors);
            let mut pairs = Vec::new();
            for (lower, upper) in floors.iter().tuple_windows() {
                for a in members.iter().filter(|n| &n.floor == lower) {
                    for b in members.iter().filter(|n| &n.floor == upper) {
                        pairs.push((*a, *b));
                    }
                }
            }
            pairs
        }
    }
}
