#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Terminal explorer for the redlining map overlays.
//!
//! Runs one overlay query per invocation (`bbox`, `search`, `show`), or,
//! with no subcommand, an interactive session that keeps the bound and
//! search overlays between actions the way the map does.

mod interactive;
mod report;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use redline_map_overlay::{
    OverlayConfig, OverlayError, OverlaySession, SourceKind, build_source,
};
use redline_map_overlay_models::BoundingBox;

#[derive(Parser)]
#[command(name = "redline_map", about = "Redlining map overlay explorer")]
struct Cli {
    /// TOML config file overriding the built-in defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Overlay source to query: "local" or "remote" (overrides the config file)
    #[arg(long, global = true)]
    source: Option<SourceKind>,
    /// Redlining `GeoJSON` dataset (overrides the config file)
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter the map to features inside a bounding box
    Bbox {
        /// Minimum latitude
        #[arg(long, allow_hyphen_values = true)]
        min_lat: String,
        /// Maximum latitude
        #[arg(long, allow_hyphen_values = true)]
        max_lat: String,
        /// Minimum longitude
        #[arg(long, allow_hyphen_values = true)]
        min_lng: String,
        /// Maximum longitude
        #[arg(long, allow_hyphen_values = true)]
        max_lng: String,
    },
    /// Highlight features whose area descriptions contain a keyword
    Search {
        /// Keyword to look for (case-insensitive)
        keyword: String,
    },
    /// Summarize the full dataset
    Show,
}

/// Layers the command-line overrides over the config file, which is itself
/// layered over the embedded defaults.
fn resolve_config(cli: &Cli) -> Result<OverlayConfig, OverlayError> {
    let mut config = match &cli.config {
        Some(path) => OverlayConfig::load(path)?,
        None => OverlayConfig::default(),
    };
    if let Some(source) = cli.source {
        config.source = source;
    }
    if let Some(dataset) = &cli.dataset {
        config.dataset_path = Some(dataset.clone());
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    let config = resolve_config(&cli)?;
    log::debug!("Using config {config:?}");

    let dataset = config.load_dataset()?;
    let source = build_source(&config, dataset.clone());
    let mut session = OverlaySession::new(source, dataset);

    let Some(command) = cli.command else {
        return interactive::run(&mut session).await;
    };

    match command {
        Commands::Bbox {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        } => {
            let bbox = BoundingBox::new(min_lat, max_lat, min_lng, max_lng);
            if session.submit_box(&bbox).await?.is_none() {
                println!("Bounding box is incomplete; nothing to query.");
                return Ok(());
            }
            report::print_overlay("Bound overlay", session.bound_overlay());
        }
        Commands::Search { keyword } => {
            if session.submit_keyword(&keyword).await?.is_none() {
                println!("Keyword is empty; nothing to query.");
                return Ok(());
            }
            report::print_overlay("Search overlay", session.search_overlay());
        }
        Commands::Show => {
            report::print_overlay("Full dataset", session.bound_overlay());
        }
    }

    Ok(())
}
