//! Report envelopes and plain-text rendering for the command line

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::services::engine::{DecisionKind, Optimization};
use crate::services::network::Network;
use crate::types::{CandidateSolution, Metric};

/// Serialized output of one command run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationReport<T> {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    /// Cost strategy that priced the hops
    pub strategy: String,
    pub payload: T,
}

impl<T> OptimizationReport<T> {
    pub fn new(strategy: &str, payload: T) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            strategy: strategy.to_string(),
            payload,
        }
    }
}

fn format_value(metric: Metric, value: f64) -> String {
    if !value.is_finite() {
        return "unreachable".to_string();
    }
    match metric {
        Metric::Cost => format!("{:.0}", value),
        Metric::Time => format!("{:.1} h", value),
    }
}

/// Path using display names where the network knows them
pub fn display_path(candidate: &CandidateSolution, network: &Network) -> String {
    candidate
        .path
        .iter()
        .map(|id| network.get(id).map(|n| n.name.as_str()).unwrap_or(id.as_str()))
        .collect::<Vec<_>>()
        .join(" ➔ ")
}

/// Ranked candidate list, one block per candidate
pub fn render_candidates(optimization: &Optimization, network: &Network) -> String {
    if optimization.candidates.is_empty() {
        return format!("No feasible route by {}.\n", optimization.metric.as_str());
    }

    let mut out = String::new();
    for candidate in &optimization.candidates {
        out.push_str(&format!(
            "Option {}: {} {} (cost {:.0}, time {:.1} h)\n",
            candidate.rank,
            optimization.metric.as_str(),
            format_value(optimization.metric, candidate.total),
            candidate.total_cost,
            candidate.total_duration_hours,
        ));
        out.push_str(&format!("  Path: {}\n", display_path(candidate, network)));
    }
    out
}

/// DP table: one line per (stage, node) state
pub fn render_table(optimization: &Optimization) -> String {
    let mut out = format!("{:<6} {:<24} {:>16} {:<24}\n", "Stage", "State", "f*", "Decision");
    for stage in &optimization.table.stages {
        for state in &stage.states {
            out.push_str(&format!(
                "{:<6} {:<24} {:>16} {:<24}\n",
                state.stage,
                state.node,
                format_value(optimization.metric, state.cost_to_finish),
                state.next.as_deref().unwrap_or("-"),
            ));
        }
    }
    out
}

/// Audit log, skipping tour entries unless `with_tours`
pub fn render_audit(optimization: &Optimization, with_tours: bool) -> String {
    optimization
        .audit
        .entries()
        .iter()
        .filter(|e| with_tours || e.kind != DecisionKind::Tour)
        .map(|e| format!("[stage {}] {}\n", e.stage, e.rationale))
        .collect()
}
