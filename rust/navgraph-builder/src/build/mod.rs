pub mod config;
pub mod load_csv;
pub mod plans;
pub mod write_csv;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use navgraph_core::{synthesize, NodeTable, Synthesis};

use config::{BuilderConfig, Overrides};
use load_csv::{load_nodes_file, LoadReport};
use plans::load_floor_plans;
use write_csv::write_edges_file;

/// Fully resolved inputs of one builder run.
#[derive(Clone, Debug, Default)]
pub struct Job {
    /// Combined node table; required to exist when given.
    pub nodes: Option<PathBuf>,
    pub config: BuilderConfig,
    pub out_edges: PathBuf,
}

impl Job {
    /// Applies command-line overrides and checks that some node input exists.
    pub fn from_overrides(
        nodes: Option<PathBuf>,
        mut config: BuilderConfig,
        overrides: Overrides,
        out_edges: PathBuf,
    ) -> Result<Self> {
        config.apply_overrides(overrides);
        if nodes.is_none() && !config.has_floor_nodes() {
            bail!("no node input: pass --nodes or configure floors.<label>.nodes");
        }
        Ok(Job { nodes, config, out_edges })
    }
}

#[derive(Debug)]
pub struct RunSummary {
    pub load: LoadReport,
    pub synthesis: Synthesis,
}

pub fn load_node_table(job: &Job) -> Result<(NodeTable, LoadReport)> {
    let mut table = NodeTable::new();
    let mut report = LoadReport::default();

    if let Some(path) = &job.nodes {
        load_nodes_file(path, None, &mut table, &mut report)?;
    }
    for (label, src) in &job.config.floors {
        let Some(path) = src.nodes.as_ref() else { continue };
        if !path.exists() {
            warn!(floor = %label, path = ?path, "node table not found, floor excluded");
            continue;
        }
        if let Err(e) = load_nodes_file(path, Some(label.as_str()), &mut table, &mut report) {
            warn!(floor = %label, error = %e, "node table unreadable, floor excluded");
        }
    }
    Ok((table, report))
}

pub fn run(job: &Job) -> Result<RunSummary> {
    let (nodes, load) = load_node_table(job)?;
    if nodes.is_empty() {
        bail!("no nodes loaded");
    }
    info!(loaded = load.loaded, skipped = load.skipped, duplicates = load.duplicates, "node table ready");

    let plans = load_floor_plans(&job.config.floors, &job.config.options.obstruction);
    let synthesis = synthesize(&nodes, &plans, &job.config.options).context("edge synthesis failed")?;

    let rows = synthesis.rows();
    write_edges_file(&job.out_edges, &rows)?;
    info!(
        path = ?job.out_edges,
        directed = rows.len(),
        undirected = synthesis.edges.len(),
        skipped_rows = load.skipped,
        "wrote edges"
    );
    Ok(RunSummary { load, synthesis })
}
