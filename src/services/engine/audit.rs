//! Decision audit trail
//!
//! Append-only record of every tour, recursion step and origin choice made
//! during one optimization call. Rebuilt from scratch on each call.

use serde::{Deserialize, Serialize};

use crate::types::CandidateSolution;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionKind {
    /// Local tour planned from an entry node
    Tour,
    /// Terminal stage: cost-to-finish is the local tour
    BaseCase,
    /// Backward step choosing the next stage's entry
    Recursion,
    /// State marked unreachable
    Unreachable,
    /// Final choice made at the origin
    Origin,
}

/// One next-stage entry weighed by a decision
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Alternative {
    pub next: String,
    pub local: f64,
    pub transition: f64,
    pub future: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub stage: u32,
    pub node: String,
    pub kind: DecisionKind,
    pub rationale: String,
    pub alternatives: Vec<Alternative>,
    pub chosen: Option<String>,
    /// local + transition + future = total for the chosen alternative
    pub local: f64,
    pub transition: f64,
    pub future: f64,
    pub total: f64,
}

impl AuditEntry {
    pub(crate) fn tour(stage: u32, node: &str, local: f64, rationale: String) -> Self {
        Self {
            stage,
            node: node.to_string(),
            kind: DecisionKind::Tour,
            rationale,
            alternatives: vec![],
            chosen: None,
            local,
            transition: 0.0,
            future: 0.0,
            total: local,
        }
    }

    pub(crate) fn base_case(stage: u32, node: &str, local: f64) -> Self {
        Self {
            stage,
            node: node.to_string(),
            kind: DecisionKind::BaseCase,
            rationale: format!("f({}, {}) = local tour {:.2}, terminal stage", stage, node, local),
            alternatives: vec![],
            chosen: None,
            local,
            transition: 0.0,
            future: 0.0,
            total: local,
        }
    }

    /// `local` is the node's own tour value, finite when only the successors are missing
    pub(crate) fn unreachable(stage: u32, node: &str, local: f64, reason: &str) -> Self {
        Self {
            stage,
            node: node.to_string(),
            kind: DecisionKind::Unreachable,
            rationale: format!("f({}, {}) = inf: {}", stage, node, reason),
            alternatives: vec![],
            chosen: None,
            local,
            transition: 0.0,
            future: 0.0,
            total: f64::INFINITY,
        }
    }

    /// Decision picking `alternatives[best]`
    pub(crate) fn decision(
        kind: DecisionKind,
        stage: u32,
        node: &str,
        alternatives: Vec<Alternative>,
        best: usize,
    ) -> Self {
        let chosen = alternatives[best].clone();
        let rationale = format!(
            "f({}, {}) = min over {} entries: local {:.2} + transition {:.2} + future {:.2} = {:.2} via {}",
            stage,
            node,
            alternatives.len(),
            chosen.local,
            chosen.transition,
            chosen.future,
            chosen.total,
            chosen.next
        );
        Self {
            stage,
            node: node.to_string(),
            kind,
            rationale,
            alternatives,
            chosen: Some(chosen.next),
            local: chosen.local,
            transition: chosen.transition,
            future: chosen.future,
            total: chosen.total,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AuditLog {
    entries: Vec<AuditEntry>,
}

impl AuditLog {
    pub(crate) fn push(&mut self, entry: AuditEntry) {
        self.entries.push(entry);
    }

    pub(crate) fn extend(&mut self, entries: Vec<AuditEntry>) {
        self.entries.extend(entries);
    }

    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn for_stage(&self, stage: u32) -> Vec<&AuditEntry> {
        self.entries.iter().filter(|e| e.stage == stage).collect()
    }

    pub fn for_node(&self, node: &str) -> Vec<&AuditEntry> {
        self.entries.iter().filter(|e| e.node == node).collect()
    }

    /// Entries explaining a candidate: the origin choice, then for each stage
    /// the entry node's tour and decision, following the chosen entries.
    pub fn trail(&self, candidate: &CandidateSolution) -> Vec<&AuditEntry> {
        let mut trail: Vec<&AuditEntry> = self
            .entries
            .iter()
            .filter(|e| e.kind == DecisionKind::Origin)
            .collect();

        let mut stage = 1;
        let mut node = Some(candidate.entry.clone());
        while let Some(current) = node.take() {
            let step: Vec<&AuditEntry> = self
                .entries
                .iter()
                .filter(|e| e.stage == stage && e.node == current && e.kind != DecisionKind::Origin)
                .collect();
            if step.is_empty() {
                break;
            }
            node = step.iter().find_map(|e| e.chosen.clone());
            trail.extend(step);
            stage += 1;
        }

        trail
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alt(next: &str, local: f64, transition: f64, future: f64) -> Alternative {
        Alternative {
            next: next.to_string(),
            local,
            transition,
            future,
            total: local + transition + future,
        }
    }

    #[test]
    fn test_decision_carries_breakdown() {
        let entry = AuditEntry::decision(
            DecisionKind::Recursion,
            1,
            "X",
            vec![alt("Z", 1.0, 10.0, 0.0), alt("W", 1.0, 5.0, 2.0)],
            1,
        );

        assert_eq!(entry.chosen.as_deref(), Some("W"));
        assert_eq!(entry.total, 8.0);
        assert_eq!(entry.local + entry.transition + entry.future, entry.total);
        assert!(entry.rationale.contains("via W"));
        assert!(entry.rationale.contains("min over 2 entries"));
    }

    #[test]
    fn test_filters() {
        let mut log = AuditLog::default();
        log.push(AuditEntry::base_case(2, "Z", 0.0));
        log.push(AuditEntry::tour(1, "X", 1.0, "tour".to_string()));
        log.push(AuditEntry::unreachable(1, "Y", 2.0, "no successor"));

        assert_eq!(log.len(), 3);
        assert_eq!(log.for_stage(1).len(), 2);
        assert_eq!(log.for_node("Z").len(), 1);
        assert!(log.for_node("Y")[0].total.is_infinite());
        assert!(!log.is_empty());
    }

    #[test]
    fn test_unreachable_keeps_local_tour_value() {
        let entry = AuditEntry::unreachable(1, "Y", 3.5, "no reachable entry in stage 2");
        assert_eq!(entry.kind, DecisionKind::Unreachable);
        assert_eq!(entry.local, 3.5);
        assert!(entry.total.is_infinite());
        assert!(entry.chosen.is_none());
    }
}
