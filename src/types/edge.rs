//! Explicit adjacency for the fixed-edge cost strategy

use serde::{Deserialize, Serialize};

use crate::defaults;
use super::TransportMode;

/// A modeled hop with per-trip prices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub from: String,
    pub to: String,
    /// Cost of a single trip
    pub unit_cost: f64,
    /// Duration of a single trip
    pub unit_duration_hours: f64,
    pub mode: TransportMode,
    /// Per-trip capacity override; falls back to the mode's configured capacity
    pub capacity: Option<f64>,
    pub description: Option<String>,
}

impl Edge {
    pub fn new(from: &str, to: &str, unit_cost: f64, mode: TransportMode) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            unit_cost,
            unit_duration_hours: defaults::EDGE_DURATION_HOURS,
            mode,
            capacity: None,
            description: None,
        }
    }

    pub fn with_duration(mut self, hours: f64) -> Self {
        self.unit_duration_hours = hours;
        self
    }

    pub fn with_capacity(mut self, capacity: f64) -> Self {
        self.capacity = Some(capacity);
        self
    }
}
