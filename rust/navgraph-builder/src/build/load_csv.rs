//! Node table loading. Malformed rows are skipped with a warning so one bad
//! line never aborts the run; the skip count is reported back to the caller.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::warn;

use navgraph_core::{Node, NodeTable, NodeType};

#[derive(Debug, Deserialize)]
struct NodeRecord {
    id: String,
    #[serde(default)]
    floor: String,
    #[serde(rename = "type", default)]
    kind: String,
    x: String,
    y: String,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: usize,
    pub duplicates: usize,
}

fn parse_coord(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn to_node(rec: NodeRecord, default_floor: Option<&str>) -> Result<Node, &'static str> {
    let id = rec.id.trim();
    if id.is_empty() { return Err("empty id"); }
    let floor = match rec.floor.trim() {
        "" => default_floor.ok_or("empty floor")?,
        f => f,
    };
    let x = parse_coord(&rec.x).ok_or("non-numeric x")?;
    let y = parse_coord(&rec.y).ok_or("non-numeric y")?;
    let mut node = Node::new(id, floor, NodeType::parse(&rec.kind), x, y);
    node.name = rec.name.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
    Ok(node)
}

/// Appends rows from `input` to `table`. Rows without a floor take `default_floor`.
pub fn read_nodes<R: Read>(
    input: R,
    source: &str,
    default_floor: Option<&str>,
    table: &mut NodeTable,
    report: &mut LoadReport,
) -> Result<()> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).flexible(true).from_reader(input);
    let headers = rdr.headers().with_context(|| format!("reading header of {source}"))?.clone();

    for rec in rdr.records() {
        let rec = match rec {
            Ok(r) => r,
            Err(e) => {
                warn!(source, error = %e, "unreadable node row, skipped");
                report.skipped += 1;
                continue;
            }
        };
        let line = rec.position().map(|p| p.line()).unwrap_or(0);
        let parsed = rec
            .deserialize::<NodeRecord>(Some(&headers))
            .map_err(|_| "missing column")
            .and_then(|r| to_node(r, default_floor));
        match parsed {
            Ok(node) => {
                if table.contains_key(&node.id) {
                    warn!(source, line, id = %node.id, "duplicate node id, keeping first");
                    report.duplicates += 1;
                } else {
                    table.insert(node.id.clone(), node);
                    report.loaded += 1;
                }
            }
            Err(reason) => {
                warn!(source, line, reason, "malformed node row, skipped");
                report.skipped += 1;
            }
        }
    }
    Ok(())
}

pub fn load_nodes_file(path: &Path, default_floor: Option<&str>, table: &mut NodeTable, report: &mut LoadReport) -> Result<()> {
    let f = File::open(path).with_context(|| format!("opening node table {:?}", path))?;
    read_nodes(f, &path.display().to_string(), default_floor, table, report)
}
