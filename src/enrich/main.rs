//! Batch settlement enrichment pipeline.
//!
//! Reads input coordinates, resolves the best nearby settlement for each
//! against the Overpass API, and writes the result table.

mod config;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use url::Url;

use alder::boundary::Boundary;
use alder::io::{input, output, DiagnosticSink};
use alder::models::{GeoPoint, Outcome};
use alder::overpass::OverpassClient;
use alder::resolve::{Resolver, RunState};

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "enrich")]
#[command(about = "Resolve the best nearby settlement for a batch of coordinates")]
struct Args {
    /// Run configuration file
    #[arg(short, long, default_value = "enrich.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();
    let config = Config::load_from_file(&args.config)?;

    info!("Alder enrichment run");
    info!("Points: {}", config.input.points.display());

    let endpoint =
        Url::parse(&config.overpass.endpoint).context("Invalid Overpass endpoint URL")?;

    // The boundary fetch is the only fatal failure: without the border
    // polygon no containment filtering is possible.
    let boundary = match &config.resolver.boundary_url {
        Some(raw) => {
            let url = Url::parse(raw).context("Invalid boundary URL")?;
            let http = reqwest::Client::new();
            Some(
                Boundary::fetch(&http, &url)
                    .await
                    .context("Boundary polygon unavailable, aborting run")?,
            )
        }
        None => None,
    };

    let points = input::read_points(&config.input.points)?;
    if points.is_empty() {
        warn!("No input points, nothing to do");
        return Ok(());
    }

    let excluded = match &config.input.exclusions {
        Some(path) => input::read_exclusions(path)?,
        None => Vec::new(),
    };

    let sink = DiagnosticSink::new(config.output.diagnostics_dir.clone())
        .context("Failed to create diagnostics directory")?;

    let client = OverpassClient::new(endpoint);
    let mut resolver = Resolver::new(
        client,
        config.resolver.policy,
        boundary,
        RunState::new(excluded),
    )
    .with_diagnostics(sink);

    let pause = Duration::from_secs_f64(config.overpass.pause_secs);

    let pb = ProgressBar::new(points.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})",
            )?
            .progress_chars("#>-"),
    );

    let mut rows: Vec<(GeoPoint, Outcome)> = Vec::with_capacity(points.len());

    // Strictly sequential: the used-name set must be observed in input
    // order, and the pause keeps the request rate polite.
    for point in points {
        let outcome = resolver.resolve(&point).await;
        if let Err(reason) = &outcome {
            warn!("Point ({}, {}) failed: {}", point.lon, point.lat, reason);
        }
        rows.push((point, outcome));
        pb.inc(1);

        tokio::time::sleep(pause).await;
    }

    pb.finish_with_message("Processing complete");

    output::write_results(&config.output.results, &rows)?;

    let resolved = rows.iter().filter(|(_, outcome)| outcome.is_ok()).count();
    info!(
        "Resolved {} of {} points ({} failed)",
        resolved,
        rows.len(),
        rows.len() - resolved
    );
    info!("Results written to {}", config.output.results.display());

    Ok(())
}
