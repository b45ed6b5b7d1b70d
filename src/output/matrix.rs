// CSV writers for the adjacency matrix and the node index map.
//
// Adjacency layout: a header row `id,<id_0>,...,<id_n-1>`, then one row per
// node `<id_i>,<w_i0>,...,<w_in-1>`. Weights use Rust's shortest round-trip
// float formatting, so reading the file back gives the exact same values.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::graph::network::TweetNetwork;
use crate::graph::similarity::AdjacencyMatrix;

/// Write the adjacency matrix of `network` to `path`.
pub fn write_adjacency_csv(network: &TweetNetwork, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_adjacency(file, network.node_ids(), network.adjacency())
        .with_context(|| format!("Failed to write adjacency matrix to {}", path.display()))?;

    info!(path = %path.display(), nodes = network.node_ids().len(), "Wrote adjacency matrix");
    Ok(())
}

/// Write the node index -> tweet id map of `network` to `path`.
pub fn write_node_map_csv(network: &TweetNetwork, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_node_map(file, network.node_ids())
        .with_context(|| format!("Failed to write node map to {}", path.display()))?;

    info!(path = %path.display(), "Wrote node map");
    Ok(())
}

/// Write an adjacency matrix labelled with `node_ids` to any writer.
pub fn write_adjacency<W: Write>(
    writer: W,
    node_ids: &[u64],
    matrix: &AdjacencyMatrix,
) -> Result<()> {
    if node_ids.len() != matrix.size() {
        anyhow::bail!(
            "{} node ids for a {}x{} matrix",
            node_ids.len(),
            matrix.size(),
            matrix.size()
        );
    }

    let mut csv = csv::Writer::from_writer(writer);

    let header = std::iter::once("id".to_string()).chain(node_ids.iter().map(u64::to_string));
    csv.write_record(header)?;

    for (i, id) in node_ids.iter().enumerate() {
        let row = std::iter::once(id.to_string()).chain(matrix.row(i).iter().map(f64::to_string));
        csv.write_record(row)?;
    }

    csv.flush()?;
    Ok(())
}

/// Write `node,id` rows to any writer.
pub fn write_node_map<W: Write>(writer: W, node_ids: &[u64]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["node", "id"])?;
    for (node, id) in node_ids.iter().enumerate() {
        csv.write_record([node.to_string(), id.to_string()])?;
    }
    csv.flush()?;
    Ok(())
}
