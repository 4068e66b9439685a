//! CLI argument parsing for the relief-router binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use relief_router::config::Config;
use relief_router::services::tour::{TourPlanner, TourStrategy, VisitPolicy};
use relief_router::types::Metric;

#[derive(Parser)]
#[command(name = "relief-router", about = "Staged relief logistics route planner")]
pub struct Cli {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub params: ParamArgs,

    /// Print a JSON report instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Rank the best routes for one objective
    Solve {
        #[arg(long, default_value = "cost")]
        metric: Metric,
    },
    /// Compare the cheapest and the fastest route
    Compare,
    /// Print the DP table and decision audit for one objective
    Table {
        #[arg(long, default_value = "cost")]
        metric: Metric,
        /// Include local tour entries in the audit
        #[arg(long)]
        tours: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// CSV node table with coordinates (geo-distance pricing)
    #[arg(long, conflicts_with = "edges", required_unless_present = "edges")]
    pub nodes: Option<PathBuf>,

    /// JSON dataset with stage lists and explicit edges (fixed-edge pricing)
    #[arg(long)]
    pub edges: Option<PathBuf>,

    /// Canonical origin node id
    #[arg(long)]
    pub origin: Option<String>,

    #[arg(long, value_enum, default_value_t = TourArg::Greedy)]
    pub tour: TourArg,

    #[arg(long, value_enum, default_value_t = VisitArg::All)]
    pub visit: VisitArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TourArg {
    /// Nearest neighbor
    Greedy,
    /// Nearest neighbor improved by 2-opt
    TwoOpt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VisitArg {
    /// Visit every node of every stage
    All,
    /// Visit one node per stage
    Single,
}

impl InputArgs {
    pub fn planner(&self) -> TourPlanner {
        let strategy = match self.tour {
            TourArg::Greedy => TourStrategy::NearestNeighbor,
            TourArg::TwoOpt => TourStrategy::TwoOpt,
        };
        let policy = match self.visit {
            VisitArg::All => VisitPolicy::AllStops,
            VisitArg::Single => VisitPolicy::SingleStop,
        };
        TourPlanner::new(strategy, policy)
    }
}

/// Overrides for environment-provided parameters
#[derive(Args, Debug, Clone, Default)]
pub struct ParamArgs {
    #[arg(long)]
    pub ground_rate: Option<f64>,
    #[arg(long)]
    pub air_rate: Option<f64>,
    #[arg(long)]
    pub air_base_fee: Option<f64>,
    #[arg(long)]
    pub cargo_weight: Option<f64>,
    #[arg(long)]
    pub air_capacity: Option<f64>,
    #[arg(long)]
    pub ground_capacity: Option<f64>,
    #[arg(long)]
    pub air_multiplier: Option<f64>,
    #[arg(long)]
    pub ground_multiplier: Option<f64>,
    #[arg(long)]
    pub top_k: Option<usize>,
}

impl ParamArgs {
    pub fn apply(&self, config: &mut Config) {
        let params = &mut config.params;
        let overrides = [
            (&mut params.ground_rate, self.ground_rate),
            (&mut params.air_rate, self.air_rate),
            (&mut params.air_base_fee, self.air_base_fee),
            (&mut params.cargo_weight, self.cargo_weight),
            (&mut params.air_capacity, self.air_capacity),
            (&mut params.ground_capacity, self.ground_capacity),
            (&mut params.air_multiplier, self.air_multiplier),
            (&mut params.ground_multiplier, self.ground_multiplier),
        ];
        for (target, value) in overrides {
            if let Some(value) = value {
                *target = value;
            }
        }
        if let Some(top_k) = self.top_k {
            config.top_k = top_k;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use relief_router::types::CostParams;

    fn config() -> Config {
        Config {
            params: CostParams::default(),
            top_k: 3,
            origin_id: None,
            logs_dir: PathBuf::from("logs"),
        }
    }

    #[test]
    fn test_cli_solve_parses() {
        let cli = Cli::parse_from(["relief-router", "--nodes", "lokasi.csv", "solve", "--metric", "time"]);
        assert!(matches!(cli.command, Command::Solve { metric: Metric::Time }));
        assert_eq!(cli.input.nodes, Some(PathBuf::from("lokasi.csv")));
        assert_eq!(cli.input.tour, TourArg::Greedy);
    }

    #[test]
    fn test_cli_requires_input() {
        assert!(Cli::try_parse_from(["relief-router", "compare"]).is_err());
    }

    #[test]
    fn test_cli_rejects_both_inputs() {
        let result = Cli::try_parse_from([
            "relief-router", "--nodes", "a.csv", "--edges", "b.json", "compare",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_table_with_planner_options() {
        let cli = Cli::parse_from([
            "relief-router", "--edges", "data.json", "--tour", "two-opt", "--visit", "single",
            "table", "--tours",
        ]);
        assert!(matches!(cli.command, Command::Table { metric: Metric::Cost, tours: true }));
        let planner = cli.input.planner();
        assert_eq!(planner.strategy, TourStrategy::TwoOpt);
        assert_eq!(planner.policy, VisitPolicy::SingleStop);
    }

    #[test]
    fn test_param_overrides() {
        let cli = Cli::parse_from([
            "relief-router", "--nodes", "a.csv", "--cargo-weight", "2500", "--top-k", "1", "solve",
        ]);
        let mut config = config();
        cli.params.apply(&mut config);
        assert_eq!(config.params.cargo_weight, 2500.0);
        assert_eq!(config.params.air_rate, CostParams::default().air_rate);
        assert_eq!(config.top_k, 1);
    }
}
