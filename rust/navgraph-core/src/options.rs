use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_CORRIDOR_NEIGHBORS: usize = 5;
pub const DEFAULT_LEAF_NEIGHBORS: usize = 3;
pub const DEFAULT_DARK_THRESHOLD: u8 = 100;
pub const DEFAULT_MIN_DARK_RUN: usize = 3;
pub const DEFAULT_END_MARGIN: usize = 3;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstructionParams {
    /// Brightness strictly below this is a dark pixel.
    pub dark_threshold: u8,
    /// Consecutive dark pixels needed to call a segment blocked.
    pub min_dark_run: usize,
    /// Pixels skipped at each end of the segment (node markers).
    pub end_margin: usize,
}

impl Default for ObstructionParams {
    fn default() -> Self {
        Self {
            dark_threshold: DEFAULT_DARK_THRESHOLD,
            min_dark_run: DEFAULT_MIN_DARK_RUN,
            end_margin: DEFAULT_END_MARGIN,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalSpan {
    /// Link every pair of group members on different floors.
    #[default]
    AllPairs,
    /// Link only members on consecutive floors of the group.
    Adjacent,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalWeight {
    #[default]
    Planar,
    Zero,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerticalOptions {
    pub span: VerticalSpan,
    pub weight: VerticalWeight,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    pub corridor_neighbors: usize,
    pub leaf_neighbors: usize,
    /// Upper bound on same-floor connection length. None means unbounded.
    pub max_radius: Option<f64>,
    pub obstruction: ObstructionParams,
    /// Nodes physically outside the building; they attach via entrances.
    pub outside_nodes: BTreeSet<String>,
    pub floor_order: Vec<String>,
    pub vertical: VerticalOptions,
    pub repair: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            corridor_neighbors: DEFAULT_CORRIDOR_NEIGHBORS,
            leaf_neighbors: DEFAULT_LEAF_NEIGHBORS,
            max_radius: None,
            obstruction: ObstructionParams::default(),
            outside_nodes: BTreeSet::new(),
            floor_order: ["G", "1", "2", "3"].iter().map(|s| s.to_string()).collect(),
            vertical: VerticalOptions::default(),
            repair: true,
        }
    }
}

impl BuildOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(r) = self.max_radius {
            if !r.is_finite() || r < 0.0 {
                return Err(ConfigError::InvalidRadius(r));
            }
        }
        if self.obstruction.min_dark_run == 0 {
            return Err(ConfigError::ZeroDarkRun);
        }
        Ok(())
    }

    pub fn is_outside(&self, id: &str) -> bool {
        self.outside_nodes.contains(id)
    }
}
