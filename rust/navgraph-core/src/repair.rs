//! Per-floor connectivity repair.
//!
//! After the nearest-neighbour policies a floor can still fall apart into
//! islands (a wing whose corridors are all walled off from the rest, a room
//! with no clear corridor). Components are stitched one by one onto a growing
//! base via the closest corridor pair between them.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, warn};

use crate::error::SynthError;
use crate::geometry::distance;
use crate::graph::EdgeSet;
use crate::models::{Floor, Node, NodeType};
use crate::obstruction::FloorPlans;

/// Connected components of the floor-local subgraph. Each component lists
/// member indices in ascending order; components are ordered by their
/// smallest member, so the result does not depend on traversal order.
pub fn floor_components(members: &[&Node], edges: &EdgeSet) -> Vec<Vec<usize>> {
    let index_of: FxHashMap<&str, usize> = members.iter().enumerate().map(|(i, n)| (n.id.as_str(), i)).collect();

    let mut adj: Vec<Vec<usize>> = vec![Vec::new(); members.len()];
    for (a, b, _) in edges.iter() {
        if let (Some(&ia), Some(&ib)) = (index_of.get(a), index_of.get(b)) {
            adj[ia].push(ib);
            adj[ib].push(ia);
        }
    }

    let mut seen: FxHashSet<usize> = FxHashSet::default();
    let mut components = Vec::new();
    for start in 0..members.len() {
        if !seen.insert(start) { continue; }
        let mut comp = vec![start];
        let mut stack = vec![start];
        while let Some(u) = stack.pop() {
            for &v in &adj[u] {
                if seen.insert(v) {
                    comp.push(v);
                    stack.push(v);
                }
            }
        }
        comp.sort_unstable();
        components.push(comp);
    }
    components
}

struct Stitch {
    dist: f64,
    a: usize,
    b: usize,
}

/// Joins every component of the floor into one. Returns the number of edges added.
pub fn repair_floor(floor: &Floor, members: &[&Node], edges: &mut EdgeSet, plans: &FloorPlans) -> Result<usize, SynthError> {
    let components = floor_components(members, edges);
    if components.len() <= 1 { return Ok(0); }
    debug!(floor = %floor, components = components.len(), "stitching disconnected components");

    // corridor members of each component, or all members when it has none
    let mut anchors: Vec<Vec<usize>> = Vec::with_capacity(components.len());
    for comp in &components {
        if comp.is_empty() {
            return Err(SynthError::EmptyComponent(floor.clone()));
        }
        let corridors: Vec<usize> = comp.iter().copied().filter(|&i| members[i].is_corridor()).collect();
        anchors.push(if corridors.is_empty() { comp.clone() } else { corridors });
    }

    let mut added = 0usize;
    let mut base = anchors[0].clone();
    for subset in &anchors[1..] {
        let mut best_clear: Option<Stitch> = None;
        let mut best_any: Option<Stitch> = None;
        for &a in &base {
            for &b in subset {
                let d = distance(members[a].pos, members[b].pos);
                if best_any.as_ref().map_or(true, |s| d < s.dist) {
                    best_any = Some(Stitch { dist: d, a, b });
                }
                if best_clear.as_ref().map_or(true, |s| d < s.dist)
                    && !plans.blocked(floor, members[a].pos, members[b].pos)
                {
                    best_clear = Some(Stitch { dist: d, a, b });
                }
            }
        }

        let stitch = match (best_clear, best_any) {
            (Some(s), _) => s,
            (None, Some(s)) => {
                warn!(
                    floor = %floor,
                    from = %members[s.a].id,
                    to = %members[s.b].id,
                    "every stitch candidate crosses an obstruction, using nearest pair"
                );
                s
            }
            (None, None) => return Err(SynthError::EmptyComponent(floor.clone())),
        };

        let (na, nb) = (members[stitch.a], members[stitch.b]);
        let accessible = na.kind != NodeType::Stair && nb.kind != NodeType::Stair;
        if edges.insert(&na.id, &nb.id, stitch.dist, accessible) {
            added += 1;
        }
        debug!(floor = %floor, from = %na.id, to = %nb.id, distance = stitch.dist, "stitched components");
        base.extend_from_slice(subset);
    }
    Ok(added)
}
