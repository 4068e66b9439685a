//! Capacity-constrained fixed-edge cost strategy

use std::collections::HashMap;

use crate::error::{PlannerError, PlannerResult};
use crate::services::network::Network;
use crate::types::{CostParams, Edge, HopCost, Node};

use super::CostModel;

/// Sequential trips a single vehicle needs to move `cargo_weight`.
///
/// An empty load needs no trips and prices every edge at zero.
pub fn trip_count(cargo_weight: f64, capacity: f64) -> u32 {
    (cargo_weight / capacity).ceil() as u32
}

/// Prices only the hops listed in an explicit edge table
pub struct FixedEdgeModel {
    params: CostParams,
    edges: HashMap<(String, String), Edge>,
}

impl FixedEdgeModel {
    /// Index the edge table. A later edge with the same endpoints replaces an earlier one.
    pub fn new(network: &Network, edges: Vec<Edge>, params: CostParams) -> PlannerResult<Self> {
        params.validate()?;

        let mut indexed = HashMap::with_capacity(edges.len());
        for edge in edges {
            network.node(&edge.from)?;
            network.node(&edge.to)?;

            if let Some(capacity) = edge.capacity {
                if !capacity.is_finite() || capacity <= 0.0 {
                    return Err(PlannerError::InvalidParameter {
                        name: "capacity",
                        reason: format!("edge {} -> {} has capacity {}", edge.from, edge.to, capacity),
                    });
                }
            }
            if edge.unit_cost < 0.0 || edge.unit_duration_hours < 0.0 {
                return Err(PlannerError::InvalidParameter {
                    name: "unit_cost",
                    reason: format!("edge {} -> {} has a negative price", edge.from, edge.to),
                });
            }

            indexed.insert((edge.from.clone(), edge.to.clone()), edge);
        }

        Ok(Self {
            params,
            edges: indexed,
        })
    }

    pub fn params(&self) -> &CostParams {
        &self.params
    }

    pub fn edge(&self, from: &str, to: &str) -> Option<&Edge> {
        self.edges.get(&(from.to_string(), to.to_string()))
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl CostModel for FixedEdgeModel {
    fn hop(&self, from: &Node, to: &Node) -> Option<HopCost> {
        let edge = self.edge(&from.id, &to.id)?;
        let capacity = edge.capacity.unwrap_or_else(|| self.params.capacity(edge.mode));
        let trips = trip_count(self.params.cargo_weight, capacity);

        Some(HopCost {
            cost: edge.unit_cost * trips as f64 * self.params.multiplier(edge.mode),
            duration_hours: edge.unit_duration_hours * trips as f64,
            mode: edge.mode,
            trips,
            distance_km: None,
        })
    }

    fn name(&self) -> &str {
        "FixedEdge"
    }
}
