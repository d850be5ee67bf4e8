use std::collections::BTreeMap;

use tracing::{info, warn};

use navgraph_core::{Floor, FloorPlans, ObstructionMap, ObstructionParams};

use super::config::FloorSource;

/// Loads every configured floor plan. Missing or undecodable images leave
/// their floor unfiltered; nothing here fails the run.
pub fn load_floor_plans(floors: &BTreeMap<String, FloorSource>, params: &ObstructionParams) -> FloorPlans {
    let mut plans = FloorPlans::new();
    for (label, src) in floors {
        let Some(path) = src.plan.as_ref() else { continue };
        let floor = Floor::new(label.as_str());
        if !path.exists() {
            warn!(floor = %floor, path = ?path, "floor plan not found, obstruction filtering disabled for floor");
            continue;
        }
        plans.insert_or_degrade(floor, ObstructionMap::open(path, src.scale(), params.clone()));
    }
    info!(floors = plans.len(), "floor plans loaded");
    plans
}
