//! Hop pricing strategies
//!
//! Two strategies price a hop between located or adjacency-listed nodes:
//! - [`GeoCostModel`]: great-circle distance × per-mode rate
//! - [`FixedEdgeModel`]: explicit edges with per-trip prices and capacities

mod fixed_edge;
mod geo_distance;

pub use fixed_edge::{trip_count, FixedEdgeModel};
pub use geo_distance::{price_distance, GeoCostModel};

use crate::types::{HopCost, Node};

/// Prices a directed hop between two nodes.
///
/// Implementations are deterministic and side-effect free. `None` means the
/// hop is not modeled ("no route") and must not be replaced by a synthetic cost.
pub trait CostModel {
    fn hop(&self, from: &Node, to: &Node) -> Option<HopCost>;

    /// Strategy name for logging
    fn name(&self) -> &str;
}

impl<M: CostModel + ?Sized> CostModel for &M {
    fn hop(&self, from: &Node, to: &Node) -> Option<HopCost> {
        (**self).hop(from, to)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<M: CostModel + ?Sized> CostModel for Box<M> {
    fn hop(&self, from: &Node, to: &Node) -> Option<HopCost> {
        (**self).hop(from, to)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
