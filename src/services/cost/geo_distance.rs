//! Geo-distance cost strategy

use std::collections::HashMap;

use crate::error::{PlannerError, PlannerResult};
use crate::services::geo;
use crate::services::network::Network;
use crate::types::{CostParams, HopCost, Node, TransportMode};

use super::CostModel;

/// Stage whose air arrivals pay the landing/charter surcharge
const SURCHARGED_STAGE: u32 = 1;

/// Price a hop of `distance_km` between two nodes.
///
/// Same-stage hops are ground, cross-stage hops are air. An air hop into
/// stage 1 also pays the destination's entry fee, or `air_base_fee` when the
/// node has none.
pub fn price_distance(params: &CostParams, distance_km: f64, from: &Node, to: &Node) -> HopCost {
    let mode = if from.stage == to.stage {
        TransportMode::Ground
    } else {
        TransportMode::Air
    };

    let mut cost = distance_km * params.rate(mode);
    if mode == TransportMode::Air && to.stage == SURCHARGED_STAGE {
        cost += to.entry_fee.unwrap_or(params.air_base_fee);
    }

    HopCost {
        cost,
        duration_hours: distance_km / params.speed_kmh(mode),
        mode,
        trips: 1,
        distance_km: Some(distance_km),
    }
}

/// Haversine-priced hops over a precomputed distance matrix
pub struct GeoCostModel {
    params: CostParams,
    positions: HashMap<String, usize>,
    distances: Vec<Vec<f64>>,
}

impl GeoCostModel {
    pub fn new(network: &Network, params: CostParams) -> PlannerResult<Self> {
        params.validate()?;

        let points = network
            .nodes()
            .iter()
            .map(|n| n.location.ok_or_else(|| PlannerError::MissingLocation(n.id.clone())))
            .collect::<PlannerResult<Vec<_>>>()?;

        let positions = network
            .nodes()
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.clone(), i))
            .collect();

        Ok(Self {
            params,
            positions,
            distances: geo::distance_matrix(&points),
        })
    }

    pub fn params(&self) -> &CostParams {
        &self.params
    }

    pub fn distance_km(&self, from: &str, to: &str) -> Option<f64> {
        let i = *self.positions.get(from)?;
        let j = *self.positions.get(to)?;
        Some(self.distances[i][j])
    }
}

impl CostModel for GeoCostModel {
    fn hop(&self, from: &Node, to: &Node) -> Option<HopCost> {
        let distance = self.distance_km(&from.id, &to.id)?;
        Some(price_distance(&self.params, distance, from, to))
    }

    fn name(&self) -> &str {
        "GeoDistance"
    }
}
