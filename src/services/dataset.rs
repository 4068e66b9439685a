//! Node and edge table loaders
//!
//! Two input shapes are supported:
//! - a CSV node table with coordinates (geo-distance pricing)
//! - a JSON dataset of stage membership lists plus explicit edges (fixed-edge pricing)

use std::collections::{BTreeMap, HashSet};
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use crate::defaults;
use crate::error::PlannerError;
use crate::types::{Edge, Node, TransportMode};

/// One row of the node CSV
#[derive(Debug, Deserialize)]
struct CsvNodeRow {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, alias = "nama_lokasi")]
    name: Option<String>,
    #[serde(alias = "stage_prioritas")]
    stage: u32,
    #[serde(alias = "latitude")]
    lat: f64,
    #[serde(alias = "longitude", alias = "lon")]
    lng: f64,
    #[serde(default, alias = "biaya_tetap")]
    entry_fee: Option<f64>,
}

/// Parse a node CSV. Rows without an `id` use their name as id.
pub fn parse_nodes_csv<R: Read>(reader: R) -> Result<Vec<Node>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut nodes = Vec::new();
    for (line, result) in reader.deserialize().enumerate() {
        let row: CsvNodeRow = result.with_context(|| format!("invalid node row {}", line + 1))?;
        let id = row
            .id
            .clone()
            .or_else(|| row.name.clone())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| anyhow::anyhow!("node row {} has neither id nor name", line + 1))?;
        let name = row.name.unwrap_or_else(|| id.clone());

        let mut node = Node::located(&id, &name, row.stage, row.lat, row.lng);
        node.entry_fee = row.entry_fee;
        nodes.push(node);
    }
    Ok(nodes)
}

pub fn load_nodes_csv(path: &Path) -> Result<Vec<Node>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("cannot open node table {}", path.display()))?;
    let nodes = parse_nodes_csv(file).with_context(|| format!("cannot parse {}", path.display()))?;
    info!("Loaded {} nodes from {}", nodes.len(), path.display());
    Ok(nodes)
}

#[derive(Debug, Deserialize)]
struct RawDataset {
    nodes: BTreeMap<String, Vec<String>>,
    edges: Vec<RawEdge>,
}

#[derive(Debug, Deserialize)]
struct RawEdge {
    from: String,
    to: String,
    cost: f64,
    #[serde(default = "default_edge_duration")]
    duration_hours: f64,
    mode: String,
    #[serde(default)]
    desc: Option<String>,
    #[serde(default)]
    capacity: Option<f64>,
}

fn default_edge_duration() -> f64 {
    defaults::EDGE_DURATION_HOURS
}

/// Nodes and edges of a fixed-edge dataset
#[derive(Debug, Clone)]
pub struct EdgeDataset {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// Parse a JSON edge dataset.
///
/// Stage keys look like `Stage_N`. They are ranked by N and the lowest one
/// becomes stage 0 (the origin stage).
pub fn parse_edge_dataset<R: Read>(reader: R) -> Result<EdgeDataset> {
    let raw: RawDataset = serde_json::from_reader(reader).context("invalid edge dataset")?;

    let mut keyed = raw
        .nodes
        .into_iter()
        .map(|(key, members)| -> Result<(u32, Vec<String>)> { Ok((stage_number(&key)?, members)) })
        .collect::<Result<Vec<_>>>()?;
    keyed.sort_by_key(|(number, _)| *number);

    let mut nodes = Vec::new();
    let mut known = HashSet::new();
    for (rank, (_, members)) in keyed.into_iter().enumerate() {
        for id in members {
            known.insert(id.clone());
            nodes.push(Node::unlocated(&id, rank as u32));
        }
    }

    let mut edges = Vec::with_capacity(raw.edges.len());
    for raw_edge in raw.edges {
        for id in [&raw_edge.from, &raw_edge.to] {
            if !known.contains(id) {
                return Err(PlannerError::UnknownNode(id.clone()).into());
            }
        }
        edges.push(Edge {
            mode: TransportMode::from_label(&raw_edge.mode),
            from: raw_edge.from,
            to: raw_edge.to,
            unit_cost: raw_edge.cost,
            unit_duration_hours: raw_edge.duration_hours,
            capacity: raw_edge.capacity,
            description: raw_edge.desc,
        });
    }

    Ok(EdgeDataset { nodes, edges })
}

pub fn load_edge_dataset(path: &Path) -> Result<EdgeDataset> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("cannot open edge dataset {}", path.display()))?;
    let dataset = parse_edge_dataset(std::io::BufReader::new(file))
        .with_context(|| format!("cannot parse {}", path.display()))?;
    info!(
        "Loaded {} nodes and {} edges from {}",
        dataset.nodes.len(),
        dataset.edges.len(),
        path.display()
    );
    Ok(dataset)
}

/// Number after the last underscore of a stage key, e.g. `Stage_3` -> 3
fn stage_number(key: &str) -> Result<u32> {
    key.rsplit('_')
        .next()
        .and_then(|n| n.trim().parse().ok())
        .ok_or_else(|| anyhow::anyhow!("stage key '{}' does not end with a stage number", key))
}
