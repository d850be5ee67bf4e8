pub mod candidates;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod models;
pub mod obstruction;
pub mod options;
pub mod repair;
pub mod synth;

pub use error::{ConfigError, ObstructionError, SynthError};
pub use graph::{EdgeAttrs, EdgeSet};
pub use models::{node_table, EdgeRow, Floor, FloorOrder, Node, NodeTable, NodeType, Point};
pub use obstruction::{FloorPlans, ObstructionMap, PixelScale};
pub use options::{BuildOptions, ObstructionParams, VerticalOptions, VerticalSpan, VerticalWeight};
pub use synth::{synthesize, FloorSummary, Synthesis};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
