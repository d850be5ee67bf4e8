pub mod edge_set;

pub use edge_set::{EdgeAttrs, EdgeSet};
