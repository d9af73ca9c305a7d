//! pricing-demo
//!
//! Prices an order snapshot read from JSON and prints the running total after
//! every stage.
//!
//! # Usage
//!
//! ```bash
//! # Default chain: shipping, 8% tax, 10% coupon, rounding to cents
//! cargo run --bin pricing-demo -- demos/order.json
//!
//! # Custom chain
//! cargo run --bin pricing-demo -- demos/order.json --config demos/pipeline.json
//!
//! # Per-stage debug logs
//! RUST_LOG=pricing_pipeline=debug cargo run --bin pricing-demo -- demos/order.json
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pricing_pipeline::order::OrderSnapshot;
use pricing_pipeline::pipeline::PipelineConfig;

#[derive(Parser, Debug)]
#[command(name = "pricing-demo", about = "Price an order through a stage pipeline")]
struct Cli {
    /// Order snapshot JSON file
    order: PathBuf,

    /// Pipeline configuration JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the breakdown as JSON
    #[arg(long)]
    json: bool,
}

fn read_json_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn load_config(path: Option<&Path>) -> Result<PipelineConfig> {
    let Some(path) = path else {
        tracing::info!("no configuration given, using the default pipeline");
        return Ok(PipelineConfig::default());
    };
    let json = read_json_file(path)?;
    PipelineConfig::from_json(&json)
        .with_context(|| format!("invalid pipeline configuration in {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pricing_pipeline=info,pricing_demo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let order_json = read_json_file(&cli.order)?;
    let order = OrderSnapshot::from_json(&order_json)
        .with_context(|| format!("invalid order snapshot in {}", cli.order.display()))?;
    let pipeline = load_config(cli.config.as_deref())?
        .build()
        .context("failed to build the pricing pipeline")?;
    tracing::info!(stages = ?pipeline.stage_names(), items = order.items().len(), "pricing order");

    let breakdown = pipeline
        .calculate_with_breakdown(&order)
        .context("failed to price the order")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
    } else {
        println!("{breakdown}");
    }
    Ok(())
}
