//! Candidate route types

use serde::{Deserialize, Serialize};

use super::{HopCost, Metric};

/// One priced hop along a candidate route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HopRecord {
    pub from: String,
    pub to: String,
    #[serde(flatten)]
    pub price: HopCost,
}

/// A complete origin-to-terminal route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSolution {
    /// 1-based position in the ranked list
    pub rank: u32,
    pub metric: Metric,
    /// First node visited after leaving the origin
    pub entry: String,
    /// Origin first, then every visited node in order
    pub path: Vec<String>,
    /// Objective value for `metric`
    pub total: f64,
    pub hops: Vec<HopRecord>,
    pub total_cost: f64,
    pub total_duration_hours: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransportMode;

    fn make_candidate() -> CandidateSolution {
        CandidateSolution {
            rank: 1,
            metric: Metric::Cost,
            entry: "A".to_string(),
            path: vec!["Depot".to_string(), "A".to_string(), "B".to_string()],
            total: 30.0,
            hops: vec![HopRecord {
                from: "Depot".to_string(),
                to: "A".to_string(),
                price: HopCost {
                    cost: 30.0,
                    duration_hours: 1.5,
                    mode: TransportMode::Air,
                    trips: 1,
                    distance_km: None,
                },
            }],
            total_cost: 30.0,
            total_duration_hours: 1.5,
        }
    }

    #[test]
    fn test_hop_record_flattens_price() {
        let json = serde_json::to_value(&make_candidate().hops[0]).unwrap();
        assert_eq!(json["from"], "Depot");
        assert_eq!(json["mode"], "air");
        assert_eq!(json["durationHours"], 1.5);
    }
}
