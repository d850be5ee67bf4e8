use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use navgraph_core::EdgeRow;

pub const EDGE_HEADER: [&str; 4] = ["from", "to", "distance", "accessible"];

#[derive(Serialize)]
struct EdgeCsvRow<'a> {
    from: &'a str,
    to: &'a str,
    distance: String,
    accessible: &'static str,
}

impl<'a> From<&'a EdgeRow> for EdgeCsvRow<'a> {
    fn from(r: &'a EdgeRow) -> Self {
        Self {
            from: &r.from,
            to: &r.to,
            distance: format!("{:.2}", r.distance),
            accessible: if r.accessible { "true" } else { "false" },
        }
    }
}

/// Writes the header and one line per directed row, in the given order.
pub fn write_edges<W: Write>(out: W, rows: &[EdgeRow]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(out);
    wtr.write_record(EDGE_HEADER)?;
    for r in rows {
        wtr.serialize(EdgeCsvRow::from(r))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_edges_file(path: &Path, rows: &[EdgeRow]) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {:?}", dir))?;
    }
    let f = File::create(path).with_context(|| format!("creating {:?}", path))?;
    write_edges(BufWriter::new(f), rows).with_context(|| format!("writing {:?}", path))
}
