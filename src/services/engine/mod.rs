//! Staged dynamic-programming engine
//!
//! Backward recursion over priority stages:
//!
//! ```text
//! f(S, s) = tour(S, s)
//! f(k, s) = min over entries e of stage k+1 [ tour(k, s) + hop(exit(k, s), e) + f(k+1, e) ]
//! ```
//!
//! Each stage table is computed from the finished table of the next stage
//! only, so the recursion never revisits a state. The origin step then
//! prices the hop from the depot to every stage-1 entry and ranks the
//! resulting routes.

mod assemble;
mod audit;
mod table;

pub use audit::{Alternative, AuditEntry, AuditLog, DecisionKind};
pub use table::{DpState, DpTable, StageTable};

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{PlannerError, PlannerResult};
use crate::services::cost::CostModel;
use crate::services::network::Network;
use crate::services::tour::{TourPlan, TourPlanner};
use crate::types::{CandidateSolution, Metric, ORIGIN_STAGE};

use assemble::{assemble, select_top_k, EntryCandidate};

/// Everything one optimization call produces
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Optimization {
    pub metric: Metric,
    /// Ranked ascending by total; empty means no feasible route
    pub candidates: Vec<CandidateSolution>,
    pub table: DpTable,
    pub audit: AuditLog,
}

impl Optimization {
    pub fn best(&self) -> Option<&CandidateSolution> {
        self.candidates.first()
    }

    pub fn is_feasible(&self) -> bool {
        !self.candidates.is_empty()
    }
}

/// Independent cost and time recursions over the same input
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DualOptimization {
    pub cost: Optimization,
    pub time: Optimization,
}

/// A finished stage plus the audit entries produced while solving it
struct StageOutcome {
    table: StageTable,
    audit: Vec<AuditEntry>,
}

/// Stage DP engine over a read-only network.
///
/// Holds no per-run state: every call to [`StageEngine::optimize`] builds and
/// returns its own table and audit log.
pub struct StageEngine<'a, M: CostModel> {
    network: &'a Network,
    model: M,
    planner: TourPlanner,
}

impl<'a, M: CostModel> StageEngine<'a, M> {
    pub fn new(network: &'a Network, model: M) -> Self {
        Self {
            network,
            model,
            planner: TourPlanner::default(),
        }
    }

    pub fn with_planner(mut self, planner: TourPlanner) -> Self {
        self.planner = planner;
        self
    }

    pub fn network(&self) -> &Network {
        self.network
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Run the backward recursion for `metric` and return the `top_k` best
    /// routes, one per distinct stage-1 entry.
    pub fn optimize(&self, metric: Metric, top_k: usize) -> PlannerResult<Optimization> {
        if top_k == 0 {
            return Err(PlannerError::InvalidTopK);
        }

        let started_at = Instant::now();
        let last_stage = self.network.last_stage();

        info!(
            "Optimizing through stage {} by {} with {} ({:?}, {:?})",
            last_stage,
            metric.as_str(),
            self.model.name(),
            self.planner.strategy,
            self.planner.policy,
        );

        let mut audit = AuditLog::default();

        if last_stage == ORIGIN_STAGE {
            warn!("Node table has no priority stages, nothing to route");
            return Ok(Optimization {
                metric,
                candidates: vec![],
                table: DpTable::empty(metric),
                audit,
            });
        }

        let terminal = self.solve_terminal_stage(last_stage, metric)?;
        audit.extend(terminal.audit);

        let populated: Vec<u32> = self.network.populated_stages().collect();
        let mut finished = Vec::with_capacity(populated.len());
        let mut next = terminal.table;
        for &stage in populated.iter().rev().skip(1) {
            // A stage number with no nodes leaves nothing to enter
            let missing = StageTable {
                stage: stage + 1,
                states: vec![],
            };
            let successor = if next.stage == stage + 1 { &next } else { &missing };
            let outcome = self.solve_stage(stage, successor, metric)?;
            audit.extend(outcome.audit);
            finished.push(std::mem::replace(&mut next, outcome.table));
        }
        finished.push(next);
        finished.reverse();

        let table = DpTable {
            metric,
            stages: finished,
        };

        let (entries, origin_entry) = self.solve_origin(&table, metric)?;
        audit.push(origin_entry);

        let selected = select_top_k(entries, top_k);
        let candidates = assemble(self.network, &self.model, metric, selected)?;

        match candidates.first() {
            Some(best) => info!(
                "Optimized by {} in {} ms: {} candidates, best {:.2} via {}",
                metric.as_str(),
                started_at.elapsed().as_millis(),
                candidates.len(),
                best.total,
                best.entry,
            ),
            None => warn!(
                "No feasible route from '{}' by {}",
                self.network.origin().id,
                metric.as_str()
            ),
        }

        Ok(Optimization {
            metric,
            candidates,
            table,
            audit,
        })
    }

    /// Run the recursion once for cost and once for time
    pub fn optimize_both(&self, top_k: usize) -> PlannerResult<DualOptimization> {
        Ok(DualOptimization {
            cost: self.optimize(Metric::Cost, top_k)?,
            time: self.optimize(Metric::Time, top_k)?,
        })
    }

    /// Base case: cost-to-finish is the local tour of the last stage
    fn solve_terminal_stage(&self, stage: u32, metric: Metric) -> PlannerResult<StageOutcome> {
        let nodes = self.network.stage_nodes(stage);
        let mut states = Vec::with_capacity(nodes.len());
        let mut audit = Vec::new();

        for node in &nodes {
            let tour = self.planner.plan(&nodes, node, &self.model, metric);
            audit.push(tour_entry(stage, &tour));

            if !tour.is_feasible() {
                audit.push(AuditEntry::unreachable(
                    stage,
                    &node.id,
                    tour.cost,
                    "stage tour cannot be completed",
                ));
                states.push(DpState::unreachable(stage, &node.id, tour));
                continue;
            }

            debug!("f({}, {}) = {:.2} (terminal)", stage, node.id, tour.cost);
            audit.push(AuditEntry::base_case(stage, &node.id, tour.cost));
            states.push(DpState {
                stage,
                node: node.id.clone(),
                cost_to_finish: tour.cost,
                next: None,
                path: tour.sequence.clone(),
                tour,
            });
        }

        Ok(StageOutcome {
            table: StageTable { stage, states },
            audit,
        })
    }

    /// Backward step: choose the best next-stage entry for every node of `stage`
    fn solve_stage(&self, stage: u32, next: &StageTable, metric: Metric) -> PlannerResult<StageOutcome> {
        let nodes = self.network.stage_nodes(stage);
        let mut states = Vec::with_capacity(nodes.len());
        let mut audit = Vec::new();

        if next.reachable().next().is_none() {
            warn!("Stage {} has no reachable entries; stage {} is unreachable", next.stage, stage);
        }

        for node in &nodes {
            let tour = self.planner.plan(&nodes, node, &self.model, metric);
            audit.push(tour_entry(stage, &tour));

            if !tour.is_feasible() {
                audit.push(AuditEntry::unreachable(
                    stage,
                    &node.id,
                    tour.cost,
                    "stage tour cannot be completed",
                ));
                states.push(DpState::unreachable(stage, &node.id, tour));
                continue;
            }

            let exit = self.network.node(&tour.exit)?;
            let mut alternatives = Vec::new();
            let mut successors = Vec::new();
            for successor in next.reachable() {
                let entry = self.network.node(&successor.node)?;
                let Some(hop) = self.model.hop(exit, entry) else {
                    continue;
                };
                let transition = hop.value(metric);
                alternatives.push(Alternative {
                    next: successor.node.clone(),
                    local: tour.cost,
                    transition,
                    future: successor.cost_to_finish,
                    total: tour.cost + transition + successor.cost_to_finish,
                });
                successors.push(successor);
            }

            let Some(best) = first_minimum(&alternatives) else {
                debug!("f({}, {}) = inf (no successor)", stage, node.id);
                audit.push(AuditEntry::unreachable(
                    stage,
                    &node.id,
                    tour.cost,
                    &format!("no reachable entry in stage {}", next.stage),
                ));
                states.push(DpState::unreachable(stage, &node.id, tour));
                continue;
            };

            let chosen = successors[best];
            let total = alternatives[best].total;
            let mut path = tour.sequence.clone();
            path.extend(chosen.path.iter().cloned());

            debug!("f({}, {}) = {:.2} via {}", stage, node.id, total, chosen.node);
            audit.push(AuditEntry::decision(
                DecisionKind::Recursion,
                stage,
                &node.id,
                alternatives,
                best,
            ));
            states.push(DpState {
                stage,
                node: node.id.clone(),
                tour,
                cost_to_finish: total,
                next: Some(chosen.node.clone()),
                path,
            });
        }

        Ok(StageOutcome {
            table: StageTable { stage, states },
            audit,
        })
    }

    /// Origin step: one candidate per reachable stage-1 entry
    fn solve_origin(&self, table: &DpTable, metric: Metric) -> PlannerResult<(Vec<EntryCandidate>, AuditEntry)> {
        let origin = self.network.origin();
        let mut alternatives = Vec::new();
        let mut entries = Vec::new();

        if let Some(first) = table.stage(1) {
            for successor in first.reachable() {
                let entry = self.network.node(&successor.node)?;
                let Some(hop) = self.model.hop(origin, entry) else {
                    continue;
                };
                let transition = hop.value(metric);
                let total = transition + successor.cost_to_finish;

                let mut path = Vec::with_capacity(successor.path.len() + 1);
                path.push(origin.id.clone());
                path.extend(successor.path.iter().cloned());

                alternatives.push(Alternative {
                    next: successor.node.clone(),
                    local: 0.0,
                    transition,
                    future: successor.cost_to_finish,
                    total,
                });
                entries.push(EntryCandidate {
                    entry: successor.node.clone(),
                    path,
                    total,
                });
            }
        }

        let entry = match first_minimum(&alternatives) {
            Some(best) => AuditEntry::decision(DecisionKind::Origin, ORIGIN_STAGE, &origin.id, alternatives, best),
            None => AuditEntry::unreachable(ORIGIN_STAGE, &origin.id, 0.0, "no stage-1 entry is reachable"),
        };

        Ok((entries, entry))
    }
}

/// Audit entry describing a planned tour
fn tour_entry(stage: u32, tour: &TourPlan) -> AuditEntry {
    let rationale = if tour.is_feasible() {
        format!(
            "tour from {} visits {} nodes and exits at {}, local {:.2}",
            tour.entry,
            tour.sequence.len(),
            tour.exit,
            tour.cost
        )
    } else {
        format!("tour from {} cannot reach every node of stage {}", tour.entry, stage)
    };
    AuditEntry::tour(stage, &tour.entry, tour.cost, rationale)
}

/// Index of the first strictly smallest total
fn first_minimum(alternatives: &[Alternative]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, alternative) in alternatives.iter().enumerate() {
        match best {
            Some(b) if alternatives[b].total <= alternative.total => {}
            _ => best = Some(i),
        }
    }
    best
}
