//! Tunable cost parameters

use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::{PlannerError, PlannerResult};
use super::TransportMode;

/// Parameter set shared by both cost strategies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostParams {
    /// Cost per km on the ground (geo strategy)
    pub ground_rate: f64,
    /// Cost per km in the air (geo strategy)
    pub air_rate: f64,
    /// Landing/charter surcharge for air hops into stage 1 when the node has no own fee
    pub air_base_fee: f64,
    pub ground_speed_kmh: f64,
    pub air_speed_kmh: f64,
    /// Total cargo to move, kg
    pub cargo_weight: f64,
    /// Per-trip capacity of an air vehicle, kg
    pub air_capacity: f64,
    /// Per-trip capacity of a ground vehicle, kg
    pub ground_capacity: f64,
    /// Cost scaling for air edges (fixed-edge strategy)
    pub air_multiplier: f64,
    /// Cost scaling for ground edges (fixed-edge strategy)
    pub ground_multiplier: f64,
}

impl Default for CostParams {
    fn default() -> Self {
        Self {
            ground_rate: defaults::GROUND_RATE,
            air_rate: defaults::AIR_RATE,
            air_base_fee: defaults::AIR_BASE_FEE,
            ground_speed_kmh: defaults::GROUND_SPEED_KMH,
            air_speed_kmh: defaults::AIR_SPEED_KMH,
            cargo_weight: defaults::CARGO_WEIGHT_KG,
            air_capacity: defaults::AIR_CAPACITY_KG,
            ground_capacity: defaults::GROUND_CAPACITY_KG,
            air_multiplier: 1.0,
            ground_multiplier: 1.0,
        }
    }
}

impl CostParams {
    pub fn rate(&self, mode: TransportMode) -> f64 {
        match mode {
            TransportMode::Ground => self.ground_rate,
            TransportMode::Air => self.air_rate,
        }
    }

    pub fn speed_kmh(&self, mode: TransportMode) -> f64 {
        match mode {
            TransportMode::Ground => self.ground_speed_kmh,
            TransportMode::Air => self.air_speed_kmh,
        }
    }

    pub fn capacity(&self, mode: TransportMode) -> f64 {
        match mode {
            TransportMode::Ground => self.ground_capacity,
            TransportMode::Air => self.air_capacity,
        }
    }

    pub fn multiplier(&self, mode: TransportMode) -> f64 {
        match mode {
            TransportMode::Ground => self.ground_multiplier,
            TransportMode::Air => self.air_multiplier,
        }
    }

    /// Reject values that would make hop prices negative, infinite or undefined
    pub fn validate(&self) -> PlannerResult<()> {
        let non_negative = [
            ("ground_rate", self.ground_rate),
            ("air_rate", self.air_rate),
            ("air_base_fee", self.air_base_fee),
            ("cargo_weight", self.cargo_weight),
            ("air_multiplier", self.air_multiplier),
            ("ground_multiplier", self.ground_multiplier),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(PlannerError::InvalidParameter {
                    name,
                    reason: format!("must be a finite non-negative number, got {}", value),
                });
            }
        }

        let positive = [
            ("ground_speed_kmh", self.ground_speed_kmh),
            ("air_speed_kmh", self.air_speed_kmh),
            ("air_capacity", self.air_capacity),
            ("ground_capacity", self.ground_capacity),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(PlannerError::InvalidParameter {
                    name,
                    reason: format!("must be a finite positive number, got {}", value),
                });
            }
        }

        Ok(())
    }
}
