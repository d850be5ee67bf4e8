//! Edge synthesis: turns a node table (and optional floor plans) into a
//! deduplicated undirected edge set.
//!
//! Per floor, in floor order: corridor mesh, leaf attachment (with outside
//! nodes redirected through entrances), then connectivity repair. Vertical
//! stair/lift links are added once all floors are done.

pub mod vertical;

use tracing::{debug, info};

use crate::candidates::nearest_clear;
use crate::error::SynthError;
use crate::graph::EdgeSet;
use crate::models::{EdgeRow, Floor, FloorOrder, Node, NodeTable, NodeType};
use crate::obstruction::FloorPlans;
use crate::options::BuildOptions;
use crate::repair::repair_floor;

pub use vertical::{link_vertical, numeric_suffix, vertical_key, VerticalKey};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FloorSummary {
    pub floor: Floor,
    pub nodes: usize,
    pub corridors: usize,
    pub filtered: bool,
    pub mesh_edges: usize,
    pub leaf_edges: usize,
    pub redirected: usize,
    pub repair_edges: usize,
}

#[derive(Clone, Debug, Default)]
pub struct Synthesis {
    pub edges: EdgeSet,
    pub floors: Vec<FloorSummary>,
    pub vertical_edges: usize,
}

impl Synthesis {
    pub fn rows(&self) -> Vec<EdgeRow> {
        self.edges.to_rows()
    }
}

pub fn synthesize(nodes: &NodeTable, plans: &FloorPlans, opts: &BuildOptions) -> Result<Synthesis, SynthError> {
    opts.validate()?;
    let order = FloorOrder::new(&opts.floor_order);
    let mut edges = EdgeSet::new();
    let mut floors = Vec::new();

    for (floor, members) in order.group(nodes) {
        let summary = connect_floor(&floor, &members, plans, opts, &mut edges)?;
        info!(
            floor = %summary.floor,
            nodes = summary.nodes,
            corridors = summary.corridors,
            filtered = summary.filtered,
            mesh = summary.mesh_edges,
            leaf = summary.leaf_edges,
            redirected = summary.redirected,
            repaired = summary.repair_edges,
            "floor connected"
        );
        floors.push(summary);
    }

    let vertical_edges = link_vertical(nodes, &order, &opts.vertical, &mut edges);
    info!(vertical = vertical_edges, total = edges.len(), "edge synthesis complete");

    Ok(Synthesis { edges, floors, vertical_edges })
}

fn connect_floor(
    floor: &Floor,
    members: &[&Node],
    plans: &FloorPlans,
    opts: &BuildOptions,
    edges: &mut EdgeSet,
) -> Result<FloorSummary, SynthError> {
    let corridors: Vec<&Node> = members.iter().copied().filter(|n| n.is_corridor()).collect();
    let entrances: Vec<&Node> = members.iter().copied().filter(|n| n.kind == NodeType::Entrance).collect();
    let blocked = |a: &Node, b: &Node| plans.blocked(floor, a.pos, b.pos);

    let mut summary = FloorSummary {
        floor: floor.clone(),
        nodes: members.len(),
        corridors: corridors.len(),
        filtered: plans.has_plan(floor),
        ..FloorSummary::default()
    };

    for c in &corridors {
        for (d, other) in nearest_clear(c, &corridors, opts.corridor_neighbors, opts.max_radius, blocked) {
            if edges.insert(&c.id, &other.id, d, true) {
                summary.mesh_edges += 1;
            }
        }
    }

    for n in members.iter().filter(|n| !n.is_corridor()) {
        if opts.is_outside(&n.id) && !entrances.is_empty() {
            let via_entrance = nearest_clear(n, &entrances, opts.leaf_neighbors, opts.max_radius, blocked);
            let corridor_dist = nearest_clear(n, &corridors, 1, opts.max_radius, blocked).first().map(|(d, _)| *d);
            // doors win ties
            let prefer_entrance = match (via_entrance.first(), corridor_dist) {
                (Some((de, _)), Some(dc)) => *de <= dc,
                (Some(_), None) => true,
                (None, _) => false,
            };
            if prefer_entrance {
                debug!(floor = %floor, node = %n.id, "outside node attached via entrance");
                summary.redirected += 1;
                for (d, ent) in via_entrance {
                    if edges.insert(&n.id, &ent.id, d, true) {
                        summary.leaf_edges += 1;
                    }
                }
                continue;
            }
        }

        if corridors.is_empty() { continue; }
        let accessible = n.kind != NodeType::Stair;
        let picked = nearest_clear(n, &corridors, opts.leaf_neighbors, opts.max_radius, blocked);
        if picked.is_empty() {
            debug!(floor = %floor, node = %n.id, "no clear corridor in range, left for repair");
        }
        for (d, c) in picked {
            if edges.insert(&n.id, &c.id, d, accessible) {
                summary.leaf_edges += 1;
            }
        }
    }

    if opts.repair {
        summary.repair_edges = repair_floor(floor, members, edges, plans)?;
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::node_table;

    #[test]
    fn floor_without_corridors_relies_on_repair() {
        let nodes = node_table(vec![
            Node::new("room_a", "G", NodeType::Room, 0.0, 0.0),
            Node::new("room_b", "G", NodeType::Room, 6.0, 8.0),
        ]);
        let out = synthesize(&nodes, &FloorPlans::new(), &BuildOptions::default()).unwrap();
        assert_eq!(out.floors[0].mesh_edges + out.floors[0].leaf_edges, 0);
        assert_eq!(out.floors[0].repair_edges, 1);
        assert_eq!(out.edges.get("room_a", "room_b").unwrap().weight, 10.0);
    }

    #[test]
    fn repair_can_be_disabled() {
        let nodes = node_table(vec![
            Node::new("room_a", "G", NodeType::Room, 0.0, 0.0),
            Node::new("room_b", "G", NodeType::Room, 6.0, 8.0),
        ]);
        let opts = BuildOptions { repair: false, ..BuildOptions::default() };
        let out = synthesize(&nodes, &FloorPlans::new(), &opts).unwrap();
        assert!(out.edges.is_empty());
    }

    #[test]
    fn stair_attachment_is_inaccessible() {
        let nodes = node_table(vec![
            Node::new("c1", "G", NodeType::Corridor, 0.0, 0.0),
            Node::new("stair_gf_1", "G", NodeType::Stair, 2.0, 0.0),
            Node::new("lift_gf", "G", NodeType::Lift, -2.0, 0.0),
        ]);
        let out = synthesize(&nodes, &FloorPlans::new(), &BuildOptions::default()).unwrap();
        assert!(!out.edges.get("c1", "stair_gf_1").unwrap().accessible);
        assert!(out.edges.get("c1", "lift_gf").unwrap().accessible);
    }

    #[test]
    fn max_radius_limits_attachment() {
        let nodes = node_table(vec![
            Node::new("c1", "G", NodeType::Corridor, 0.0, 0.0),
            Node::new("c2", "G", NodeType::Corridor, 100.0, 0.0),
            Node::new("r1", "G", NodeType::Room, 10.0, 0.0),
        ]);
        let opts = BuildOptions { max_radius: Some(45.0), repair: false, ..BuildOptions::default() };
        let out = synthesize(&nodes, &FloorPlans::new(), &opts).unwrap();
        assert!(out.edges.contains("r1", "c1"));
        assert!(!out.edges.contains("r1", "c2"));
        assert!(!out.edges.contains("c1", "c2"));
    }

    #[test]
    fn rejects_invalid_options() {
        let opts = BuildOptions { max_radius: Some(-3.0), ..BuildOptions::default() };
        assert!(matches!(synthesize(&NodeTable::new(), &FloorPlans::new(), &opts), Err(SynthError::Config(_))));
    }
}
