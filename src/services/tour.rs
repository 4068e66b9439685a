//! Open-path tour through one stage
//!
//! Starting from a mandated entry node, the planner visits every other node of
//! the stage and reports where the tour ends. The exit node prices the hop
//! into the next stage. No return-to-entry hop is added.

use serde::{Deserialize, Serialize};

use crate::services::cost::CostModel;
use crate::types::{HopCost, HopRecord, Metric, Node};

/// Maximum 2-opt passes over one tour
const MAX_TWO_OPT_PASSES: usize = 100;

/// Improvement below this is treated as floating point noise
const IMPROVEMENT_EPSILON: f64 = 1e-9;

/// How the visiting order is built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TourStrategy {
    /// Greedy nearest neighbor
    #[default]
    NearestNeighbor,
    /// Nearest neighbor followed by 2-opt segment reversals (entry stays first)
    TwoOpt,
}

/// Which nodes of a stage a route has to visit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitPolicy {
    /// Every node of the stage, entry first
    #[default]
    AllStops,
    /// Only the entry node: the classic one-node-per-stage problem
    SingleStop,
}

/// Result of planning one stage from one entry node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TourPlan {
    pub entry: String,
    /// Entry first; every visited node in order
    pub sequence: Vec<String>,
    pub exit: String,
    /// Sum of hop values for the planned metric; infinite when the stage cannot be completed
    pub cost: f64,
    pub hops: Vec<HopRecord>,
}

impl TourPlan {
    fn single(entry: &Node) -> Self {
        Self {
            entry: entry.id.clone(),
            sequence: vec![entry.id.clone()],
            exit: entry.id.clone(),
            cost: 0.0,
            hops: vec![],
        }
    }

    pub fn is_feasible(&self) -> bool {
        self.cost.is_finite()
    }
}

/// Local tour heuristic
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TourPlanner {
    pub strategy: TourStrategy,
    pub policy: VisitPolicy,
}

impl TourPlanner {
    pub fn new(strategy: TourStrategy, policy: VisitPolicy) -> Self {
        Self { strategy, policy }
    }

    /// Plan a tour of `stage_nodes` starting at `entry`.
    ///
    /// Ties go to the first node reaching the minimum in `stage_nodes` order.
    pub fn plan<M: CostModel + ?Sized>(
        &self,
        stage_nodes: &[&Node],
        entry: &Node,
        model: &M,
        metric: Metric,
    ) -> TourPlan {
        let others: Vec<&Node> = stage_nodes
            .iter()
            .copied()
            .filter(|n| n.id != entry.id)
            .collect();

        if self.policy == VisitPolicy::SingleStop || others.is_empty() {
            return TourPlan::single(entry);
        }

        let Some(order) = nearest_neighbor(entry, &others, model, metric) else {
            return TourPlan {
                entry: entry.id.clone(),
                sequence: vec![entry.id.clone()],
                exit: entry.id.clone(),
                cost: f64::INFINITY,
                hops: vec![],
            };
        };

        let order = match self.strategy {
            TourStrategy::NearestNeighbor => order,
            TourStrategy::TwoOpt => two_opt_improvement(order, model, metric),
        };

        // Every order reaching this point is fully priced
        let (cost, prices) = price_path(&order, model, metric).unwrap_or((f64::INFINITY, vec![]));

        let hops = order
            .windows(2)
            .zip(prices)
            .map(|(pair, price)| HopRecord {
                from: pair[0].id.clone(),
                to: pair[1].id.clone(),
                price,
            })
            .collect();

        TourPlan {
            entry: entry.id.clone(),
            sequence: order.iter().map(|n| n.id.clone()).collect(),
            exit: order[order.len() - 1].id.clone(),
            cost,
            hops,
        }
    }
}

/// Greedy order, entry first. `None` when some node cannot be reached from the current position.
fn nearest_neighbor<'a, M: CostModel + ?Sized>(
    entry: &'a Node,
    others: &[&'a Node],
    model: &M,
    metric: Metric,
) -> Option<Vec<&'a Node>> {
    let mut order = Vec::with_capacity(others.len() + 1);
    let mut visited = vec![false; others.len()];
    order.push(entry);
    let mut current = entry;

    for _ in 0..others.len() {
        let mut best_next = None;
        let mut best_value = f64::INFINITY;

        for (i, candidate) in others.iter().enumerate() {
            if visited[i] {
                continue;
            }
            if let Some(hop) = model.hop(current, candidate) {
                let value = hop.value(metric);
                if best_next.is_none() || value < best_value {
                    best_value = value;
                    best_next = Some(i);
                }
            }
        }

        let next = best_next?;
        visited[next] = true;
        order.push(others[next]);
        current = others[next];
    }

    Some(order)
}

/// 2-opt local search over the open path; position 0 (the entry) never moves
fn two_opt_improvement<'a, M: CostModel + ?Sized>(
    mut order: Vec<&'a Node>,
    model: &M,
    metric: Metric,
) -> Vec<&'a Node> {
    let n = order.len();
    if n < 3 {
        return order;
    }

    let Some((mut best_cost, _)) = price_path(&order, model, metric) else {
        return order;
    };

    let mut improved = true;
    let mut passes = 0;

    while improved && passes < MAX_TWO_OPT_PASSES {
        improved = false;
        passes += 1;

        for i in 1..n - 1 {
            for j in i + 1..n {
                order[i..=j].reverse();
                match price_path(&order, model, metric) {
                    Some((cost, _)) if cost < best_cost - IMPROVEMENT_EPSILON => {
                        best_cost = cost;
                        improved = true;
                    }
                    _ => order[i..=j].reverse(),
                }
            }
        }
    }

    order
}

/// Total value and per-hop prices of a path, `None` if any hop has no route
fn price_path<M: CostModel + ?Sized>(
    order: &[&Node],
    model: &M,
    metric: Metric,
) -> Option<(f64, Vec<HopCost>)> {
    let mut total = 0.0;
    let mut prices = Vec::with_capacity(order.len().saturating_sub(1));
    for pair in order.windows(2) {
        let hop = model.hop(pair[0], pair[1])?;
        total += hop.value(metric);
        prices.push(hop);
    }
    Some((total, prices))
}
