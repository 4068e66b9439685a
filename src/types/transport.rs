//! Transport modes, metrics and priced hops

use serde::{Deserialize, Serialize};

/// How a hop is travelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    Ground,
    Air,
}

impl TransportMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            TransportMode::Ground => "ground",
            TransportMode::Air => "air",
        }
    }

    /// Classify a free-text mode label such as "Truk" or "CargoPlane"
    pub fn from_label(label: &str) -> Self {
        const AIR_MARKERS: &[&str] = &["helikopter", "helicopter", "plane", "pesawat", "udara", "rotor"];

        let lower = label.to_lowercase();
        // "air" alone would also match words like "repair"
        let is_air = AIR_MARKERS.iter().any(|marker| lower.contains(marker))
            || lower.split(|c: char| !c.is_alphanumeric()).any(|word| word == "air");
        if is_air {
            TransportMode::Air
        } else {
            TransportMode::Ground
        }
    }
}

/// Objective the recursion minimizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Cost,
    Time,
}

impl Metric {
    pub const fn as_str(self) -> &'static str {
        match self {
            Metric::Cost => "cost",
            Metric::Time => "time",
        }
    }
}

impl std::str::FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cost" | "biaya" => Ok(Metric::Cost),
            "time" | "waktu" => Ok(Metric::Time),
            other => Err(format!("unknown metric '{}', expected 'cost' or 'time'", other)),
        }
    }
}

/// Price of moving the cargo across one hop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HopCost {
    pub cost: f64,
    pub duration_hours: f64,
    pub mode: TransportMode,
    /// Number of sequential vehicle trips needed for the cargo
    pub trips: u32,
    /// Great-circle distance, when the hop was priced from coordinates
    pub distance_km: Option<f64>,
}

impl HopCost {
    /// Scalar consumed by the recursion for the given metric
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Cost => self.cost,
            Metric::Time => self.duration_hours,
        }
    }
}
