//! Default parameter values

/// Cost per km for trucks
pub const GROUND_RATE: f64 = 5000.0;
/// Cost per km for helicopters
pub const AIR_RATE: f64 = 50000.0;
pub const AIR_BASE_FEE: f64 = 0.0;
pub const GROUND_SPEED_KMH: f64 = 40.0;
pub const AIR_SPEED_KMH: f64 = 180.0;
pub const CARGO_WEIGHT_KG: f64 = 5000.0;
pub const AIR_CAPACITY_KG: f64 = 1000.0;
pub const GROUND_CAPACITY_KG: f64 = 3000.0;
/// Duration assumed for an edge whose data has none
pub const EDGE_DURATION_HOURS: f64 = 1.0;
pub const TOP_K: usize = 3;
