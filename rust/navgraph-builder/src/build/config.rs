use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use navgraph_core::{BuildOptions, PixelScale, Point};

/// Per-floor input files. Relative paths resolve against the config file's directory.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FloorSource {
    pub nodes: Option<PathBuf>,
    pub plan: Option<PathBuf>,
    /// Node units per image pixel, `[x, y]`.
    pub units_per_px: Option<[f64; 2]>,
    /// Node-space coordinate of the plan's top-left pixel.
    pub origin: Option<[f64; 2]>,
}

impl FloorSource {
    pub fn scale(&self) -> PixelScale {
        let [sx, sy] = self.units_per_px.unwrap_or([1.0, 1.0]);
        let [ox, oy] = self.origin.unwrap_or([0.0, 0.0]);
        PixelScale::new(sx, sy).with_origin(Point::new(ox, oy))
    }
}

/// Command-line adjustments layered over a loaded config.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub corridor_neighbors: Option<usize>,
    pub leaf_neighbors: Option<usize>,
    pub max_radius: Option<f64>,
    /// Added to the configured outside nodes.
    pub outside: Vec<String>,
    pub no_repair: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    #[serde(flatten)]
    pub options: BuildOptions,
    pub floors: BTreeMap<String, FloorSource>,
}

impl BuilderConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).with_context(|| format!("reading config {:?}", path))?;
        let mut cfg: BuilderConfig =
            serde_json::from_str(&text).with_context(|| format!("parsing config {:?}", path))?;
        if let Some(dir) = path.parent() {
            cfg.resolve_paths(dir);
        }
        Ok(cfg)
    }

    pub fn apply_overrides(&mut self, o: Overrides) {
        let opts = &mut self.options;
        if let Some(n) = o.corridor_neighbors { opts.corridor_neighbors = n; }
        if let Some(n) = o.leaf_neighbors { opts.leaf_neighbors = n; }
        if o.max_radius.is_some() { opts.max_radius = o.max_radius; }
        opts.outside_nodes.extend(o.outside);
        if o.no_repair { opts.repair = false; }
    }

    /// True when at least one floor names its own node table.
    pub fn has_floor_nodes(&self) -> bool {
        self.floors.values().any(|f| f.nodes.is_some())
    }

    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |p: &mut Option<PathBuf>| {
            if let Some(joined) = p.as_ref().filter(|p| p.is_relative()).map(|rel| base.join(rel)) {
                *p = Some(joined);
            }
        };
        for src in self.floors.values_mut() {
            resolve(&mut src.nodes);
            resolve(&mut src.plan);
        }
    }
}
