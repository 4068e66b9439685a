//! Node table partitioned into priority stages

use std::collections::{BTreeMap, HashMap};

use tracing::warn;

use crate::error::{PlannerError, PlannerResult};
use crate::types::{Node, ORIGIN_STAGE};

/// Read-only node table shared by every optimization call
#[derive(Debug, Clone)]
pub struct Network {
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
    origin: usize,
    /// Node indices per populated stage in input order; stage 0 is just the origin.
    /// A stage number with no nodes has no entry.
    stages: BTreeMap<u32, Vec<usize>>,
}

impl Network {
    /// Build the stage partition.
    ///
    /// `origin_hint` is the canonical origin id. When it is absent or does not
    /// name a stage-0 node, the first stage-0 node in table order is used.
    pub fn new(nodes: Vec<Node>, origin_hint: Option<&str>) -> PlannerResult<Self> {
        let mut index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if index.insert(node.id.clone(), i).is_some() {
                return Err(PlannerError::DuplicateNode(node.id.clone()));
            }
        }

        let origin_candidates: Vec<usize> = nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.stage == ORIGIN_STAGE)
            .map(|(i, _)| i)
            .collect();

        let first_origin = *origin_candidates.first().ok_or(PlannerError::NoOrigin)?;

        let origin = match origin_hint {
            Some(hint) => match index.get(hint) {
                Some(&i) if nodes[i].stage == ORIGIN_STAGE => i,
                _ => {
                    warn!(
                        "Origin '{}' not found among stage-0 nodes, falling back to '{}'",
                        hint, nodes[first_origin].id
                    );
                    first_origin
                }
            },
            None => first_origin,
        };

        for &i in origin_candidates.iter().filter(|&&i| i != origin) {
            warn!("Ignoring extra stage-0 node '{}'", nodes[i].id);
        }

        let mut stages: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
        stages.insert(ORIGIN_STAGE, vec![origin]);
        for (i, node) in nodes.iter().enumerate() {
            if node.stage != ORIGIN_STAGE {
                stages.entry(node.stage).or_default().push(i);
            }
        }

        let mut previous = ORIGIN_STAGE;
        for &stage in stages.keys().skip(1) {
            if stage > previous + 1 {
                warn!(
                    "Stages {}..={} have no nodes; every route through them is unreachable",
                    previous + 1,
                    stage - 1
                );
            }
            previous = stage;
        }

        Ok(Self {
            nodes,
            index,
            origin,
            stages,
        })
    }

    pub fn origin(&self) -> &Node {
        &self.nodes[self.origin]
    }

    /// Highest stage index (0 when the table only holds the origin)
    pub fn last_stage(&self) -> u32 {
        self.stages.keys().next_back().copied().unwrap_or(ORIGIN_STAGE)
    }

    /// Non-origin stages holding at least one node, ascending
    pub fn populated_stages(&self) -> impl DoubleEndedIterator<Item = u32> + '_ {
        self.stages.keys().copied().filter(|&k| k != ORIGIN_STAGE)
    }

    /// Nodes of a stage in table order; empty for an unknown stage
    pub fn stage_nodes(&self, stage: u32) -> Vec<&Node> {
        self.stages
            .get(&stage)
            .map(|members| members.iter().map(|&i| &self.nodes[i]).collect())
            .unwrap_or_default()
    }

    pub fn get(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    /// Lookup that fails on a missing id
    pub fn node(&self, id: &str) -> PlannerResult<&Node> {
        self.get(id).ok_or_else(|| PlannerError::UnknownNode(id.to_string()))
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Position of a node in the table, used as a matrix index
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }
}
