use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use navgraph_builder::build::config::{BuilderConfig, Overrides};
use navgraph_builder::build::{run, Job};

#[derive(Parser, Debug)]
#[command(name = "navgraph-builder", version, about = "Build the campus navigation edge table from node positions and floor plans")]
struct Args {
    /// Combined node table (id,floor,type,x,y[,name])
    #[arg(long = "nodes", value_name = "PATH")]
    nodes: Option<PathBuf>,

    /// JSON build config (neighbor counts, outside nodes, per-floor files)
    #[arg(long = "config", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output edge table
    #[arg(long = "out-edges", value_name = "PATH")]
    out_edges: PathBuf,

    /// Nearest corridors each corridor connects to
    #[arg(long = "corridor-neighbors", value_name = "N")]
    corridor_neighbors: Option<usize>,

    /// Nearest corridors each non-corridor node connects to
    #[arg(long = "leaf-neighbors", value_name = "N")]
    leaf_neighbors: Option<usize>,

    /// Maximum same-floor connection length in node units
    #[arg(long = "max-radius", value_name = "UNITS")]
    max_radius: Option<f64>,

    /// Node id located outside the building (repeatable)
    #[arg(long = "outside", value_name = "ID")]
    outside: Vec<String>,

    /// Skip the per-floor connectivity repair pass
    #[arg(long = "no-repair")]
    no_repair: bool,
}

impl Args {
    fn into_job(self) -> Result<Job> {
        let config = match &self.config {
            Some(path) => BuilderConfig::load(path)?,
            None => BuilderConfig::default(),
        };
        let overrides = Overrides {
            corridor_neighbors: self.corridor_neighbors,
            leaf_neighbors: self.leaf_neighbors,
            max_radius: self.max_radius,
            outside: self.outside,
            no_repair: self.no_repair,
        };
        Job::from_overrides(self.nodes, config, overrides, self.out_edges)
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).with_ansi(false).json().finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    let args = Args::parse();
    info!(?args, core_version = navgraph_core::version(), "starting builder");

    let job = args.into_job()?;
    match run(&job) {
        Ok(summary) => {
            info!(
                floors = summary.synthesis.floors.len(),
                vertical = summary.synthesis.vertical_edges,
                edges = summary.synthesis.edges.len(),
                "done"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = ?e, "build failed");
            Err(e)
        }
    }
}
