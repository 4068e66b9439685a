//! DP table: one finished stage table per priority stage

use serde::Serialize;

use crate::services::tour::TourPlan;
use crate::types::Metric;

/// Cost-to-finish of one (stage, node) state
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DpState {
    pub stage: u32,
    pub node: String,
    /// Local tour when this node is the stage's entry
    pub tour: TourPlan,
    /// Minimum value to reach the terminal stage; infinite when unreachable
    pub cost_to_finish: f64,
    /// Entry node chosen in the next stage
    pub next: Option<String>,
    /// Local tour followed by the chosen downstream path
    pub path: Vec<String>,
}

impl DpState {
    pub(crate) fn unreachable(stage: u32, node: &str, tour: TourPlan) -> Self {
        Self {
            stage,
            node: node.to_string(),
            path: tour.sequence.clone(),
            tour,
            cost_to_finish: f64::INFINITY,
            next: None,
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.cost_to_finish.is_finite()
    }
}

/// All states of one stage, in the stage's node order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTable {
    pub stage: u32,
    pub states: Vec<DpState>,
}

impl StageTable {
    pub fn state(&self, node: &str) -> Option<&DpState> {
        self.states.iter().find(|s| s.node == node)
    }

    /// States that can still reach the terminal stage
    pub fn reachable(&self) -> impl Iterator<Item = &DpState> {
        self.states.iter().filter(|s| s.is_reachable())
    }
}

/// Finished recursion for one metric
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DpTable {
    pub metric: Metric,
    /// Tables of the populated stages, in stage order
    pub stages: Vec<StageTable>,
}

impl DpTable {
    pub fn empty(metric: Metric) -> Self {
        Self {
            metric,
            stages: vec![],
        }
    }

    pub fn stage(&self, stage: u32) -> Option<&StageTable> {
        self.stages.iter().find(|t| t.stage == stage)
    }

    pub fn state(&self, stage: u32, node: &str) -> Option<&DpState> {
        self.stage(stage)?.state(node)
    }

    pub fn last_stage(&self) -> Option<u32> {
        self.stages.last().map(|t| t.stage)
    }
}
