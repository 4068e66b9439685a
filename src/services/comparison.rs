//! Cost-optimal vs. time-optimal route comparison

use serde::{Deserialize, Serialize};

use crate::services::engine::{DualOptimization, Optimization};

/// Trade-off between the cheapest and the fastest route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub identical: bool,
    pub cheapest_path: Vec<String>,
    pub cheapest_cost: f64,
    pub cheapest_duration_hours: f64,
    pub fastest_path: Vec<String>,
    pub fastest_cost: f64,
    pub fastest_duration_hours: f64,
    /// What the fastest route costs on top of the cheapest one
    pub extra_cost: f64,
    /// Hours the fastest route saves over the cheapest one
    pub hours_saved: f64,
    /// Present only when the fastest route both costs more and saves time
    pub cost_per_hour_saved: Option<f64>,
}

impl Recommendation {
    pub fn summary(&self) -> String {
        if self.identical {
            return "The cheapest route is also the fastest; it is the best choice on both objectives.".to_string();
        }
        match self.cost_per_hour_saved {
            Some(rate) => format!(
                "The fastest route saves {:.1} h for an extra {:.0} ({:.0} per hour saved).",
                self.hours_saved, self.extra_cost, rate
            ),
            None => format!(
                "Routes differ: fastest costs {:+.0} and saves {:.1} h compared to the cheapest.",
                self.extra_cost, self.hours_saved
            ),
        }
    }
}

/// Compare the best routes of a cost run and a time run.
///
/// `None` when either run found no feasible route.
pub fn compare(cost: &Optimization, time: &Optimization) -> Option<Recommendation> {
    let cheapest = cost.best()?;
    let fastest = time.best()?;

    let extra_cost = fastest.total_cost - cheapest.total_cost;
    let hours_saved = cheapest.total_duration_hours - fastest.total_duration_hours;
    let identical = cheapest.path == fastest.path;

    let cost_per_hour_saved = (!identical && extra_cost > 0.0 && hours_saved > 0.0)
        .then(|| extra_cost / hours_saved);

    Some(Recommendation {
        identical,
        cheapest_path: cheapest.path.clone(),
        cheapest_cost: cheapest.total_cost,
        cheapest_duration_hours: cheapest.total_duration_hours,
        fastest_path: fastest.path.clone(),
        fastest_cost: fastest.total_cost,
        fastest_duration_hours: fastest.total_duration_hours,
        extra_cost,
        hours_saved,
        cost_per_hour_saved,
    })
}

impl DualOptimization {
    pub fn recommendation(&self) -> Option<Recommendation> {
        compare(&self.cost, &self.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::cost::FixedEdgeModel;
    use crate::services::engine::StageEngine;
    use crate::services::network::Network;
    use crate::services::tour::{TourPlanner, TourStrategy, VisitPolicy};
    use crate::types::{CostParams, Edge, Node, TransportMode};

    fn network() -> Network {
        Network::new(
            vec![
                Node::unlocated("Jakarta_Pool", 0),
                Node::unlocated("Bogor_Posko", 1),
                Node::unlocated("Halim_Heli", 1),
                Node::unlocated("Cianjur", 2),
            ],
            Some("Jakarta_Pool"),
        )
        .unwrap()
    }

    fn solve(edges: Vec<Edge>) -> DualOptimization {
        let network = network();
        let params = CostParams { cargo_weight: 900.0, ..CostParams::default() };
        let model = FixedEdgeModel::new(&network, edges, params).unwrap();
        StageEngine::new(&network, model)
            .with_planner(TourPlanner::new(TourStrategy::NearestNeighbor, VisitPolicy::SingleStop))
            .optimize_both(1)
            .unwrap()
    }

    #[test]
    fn test_trade_off_ratio() {
        let both = solve(vec![
            Edge::new("Jakarta_Pool", "Bogor_Posko", 100.0, TransportMode::Ground).with_duration(3.0),
            Edge::new("Bogor_Posko", "Cianjur", 100.0, TransportMode::Ground).with_duration(3.0),
            Edge::new("Jakarta_Pool", "Halim_Heli", 400.0, TransportMode::Air).with_duration(0.5),
            Edge::new("Halim_Heli", "Cianjur", 400.0, TransportMode::Air).with_duration(0.5),
        ]);

        let rec = both.recommendation().unwrap();

        assert!(!rec.identical);
        assert_eq!(rec.cheapest_cost, 200.0);
        assert_eq!(rec.fastest_duration_hours, 1.0);
        assert_eq!(rec.extra_cost, 600.0);
        assert_eq!(rec.hours_saved, 5.0);
        assert_eq!(rec.cost_per_hour_saved, Some(120.0));
        assert!(rec.summary().contains("120 per hour saved"));
    }

    #[test]
    fn test_identical_routes() {
        let both = solve(vec![
            Edge::new("Jakarta_Pool", "Bogor_Posko", 100.0, TransportMode::Ground).with_duration(1.0),
            Edge::new("Bogor_Posko", "Cianjur", 100.0, TransportMode::Ground).with_duration(1.0),
        ]);

        let rec = both.recommendation().unwrap();

        assert!(rec.identical);
        assert!(rec.cost_per_hour_saved.is_none());
        assert_eq!(rec.extra_cost, 0.0);
        assert!(rec.summary().contains("best choice"));
    }

    #[test]
    fn test_infeasible_has_no_recommendation() {
        let both = solve(vec![Edge::new("Jakarta_Pool", "Bogor_Posko", 1.0, TransportMode::Ground)]);
        assert!(both.recommendation().is_none());
    }
}
