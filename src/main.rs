//! Relief Router - command line shell around the staged planner
//!
//! Loads a node table or edge dataset, runs the optimizer and prints the
//! ranked routes, the cost/time comparison or the DP table.

mod cli;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use relief_router::config::Config;
use relief_router::services::comparison::Recommendation;
use relief_router::services::cost::{CostModel, FixedEdgeModel, GeoCostModel};
use relief_router::services::network::Network;
use relief_router::services::{dataset, report};
use relief_router::{DualOptimization, StageEngine};

use cli::{Cli, Command};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ComparePayload<'a> {
    optimization: &'a DualOptimization,
    recommendation: Option<Recommendation>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    cli.params.apply(&mut config);

    std::fs::create_dir_all(&config.logs_dir).ok();

    // File appender for persistent logs (daily rotation)
    let file_appender = RollingFileAppender::new(Rotation::DAILY, &config.logs_dir, "relief-router.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    // Logs go to stderr so stdout stays clean for reports
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,relief_router=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    info!("Starting Relief Router...");

    let origin = cli.input.origin.clone().or_else(|| config.origin_id.clone());

    let (network, model): (Network, Box<dyn CostModel>) = match (&cli.input.nodes, &cli.input.edges) {
        (Some(path), _) => {
            let network = Network::new(dataset::load_nodes_csv(path)?, origin.as_deref())?;
            let model: Box<dyn CostModel> = Box::new(GeoCostModel::new(&network, config.params.clone())?);
            (network, model)
        }
        (None, Some(path)) => {
            let data = dataset::load_edge_dataset(path)?;
            let network = Network::new(data.nodes, origin.as_deref())?;
            let model: Box<dyn CostModel> =
                Box::new(FixedEdgeModel::new(&network, data.edges, config.params.clone())?);
            (network, model)
        }
        (None, None) => anyhow::bail!("either --nodes or --edges must be given"),
    };

    let strategy = model.name().to_string();
    let engine = StageEngine::new(&network, model).with_planner(cli.input.planner());

    match cli.command {
        Command::Solve { metric } => {
            let optimization = engine.optimize(metric, config.top_k)?;
            if cli.json {
                print_json(&strategy, &optimization.candidates)?;
            } else {
                print!("{}", report::render_candidates(&optimization, &network));
            }
        }
        Command::Compare => {
            let both = engine.optimize_both(config.top_k)?;
            let recommendation = both.recommendation();
            if cli.json {
                print_json(
                    &strategy,
                    &ComparePayload {
                        optimization: &both,
                        recommendation,
                    },
                )?;
            } else {
                println!("== Cheapest ==");
                print!("{}", report::render_candidates(&both.cost, &network));
                println!("== Fastest ==");
                print!("{}", report::render_candidates(&both.time, &network));
                match recommendation {
                    Some(rec) => println!("\n{}", rec.summary()),
                    None => println!("\nNo feasible route to compare."),
                }
            }
        }
        Command::Table { metric, tours } => {
            let optimization = engine.optimize(metric, config.top_k)?;
            if cli.json {
                print_json(&strategy, &optimization)?;
            } else {
                print!("{}", report::render_table(&optimization));
                println!();
                print!("{}", report::render_audit(&optimization, tours));
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(strategy: &str, payload: T) -> Result<()> {
    let report = report::OptimizationReport::new(strategy, payload);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
