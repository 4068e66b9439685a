//! Node types

use serde::{Deserialize, Serialize};

/// Coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Stage index of the origin depot
pub const ORIGIN_STAGE: u32 = 0;

/// A delivery point or the origin depot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    pub name: String,
    /// 0 = origin, 1..S = priority stages (1 is the most urgent)
    pub stage: u32,
    /// Present for geo-priced datasets, absent for fixed-edge datasets
    pub location: Option<Coordinates>,
    /// Landing/charter fee charged when flying into a stage-1 node
    pub entry_fee: Option<f64>,
}

impl Node {
    /// Node located by coordinates
    pub fn located(id: &str, name: &str, stage: u32, lat: f64, lng: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            stage,
            location: Some(Coordinates { lat, lng }),
            entry_fee: None,
        }
    }

    /// Node only reachable through explicit edges
    pub fn unlocated(id: &str, stage: u32) -> Self {
        Self {
            id: id.to_string(),
            name: id.to_string(),
            stage,
            location: None,
            entry_fee: None,
        }
    }

    pub fn with_entry_fee(mut self, fee: f64) -> Self {
        self.entry_fee = Some(fee);
        self
    }

    pub fn is_origin(&self) -> bool {
        self.stage == ORIGIN_STAGE
    }
}
