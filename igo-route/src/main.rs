mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use igo_engine::{Engine, QueryPool, RuntimeConfig, Sources};
use igo_fetch::{HttpRoadGraphSource, HttpTextSource, NominatimGeocoder};
use std::sync::Arc;
use std::time::Instant;

#[tokio::main]
async fn main() -> Result<()> {
    // Lower-level fetch/cache crates log through `log`; the engine and this
    // CLI log through `tracing`. Both write to stderr independently.
    env_logger::init();
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();

    let cli = Cli::parse();

    let mut config = RuntimeConfig::from_env();
    if let Commands::Build { place: Some(place) } = &cli.command {
        config.place = place.clone();
    }

    let sources = Sources {
        road_graph: Arc::new(HttpRoadGraphSource::new(config.road_graph_base_url.clone())),
        highways: Arc::new(HttpTextSource::new()),
        congestion: Arc::new(HttpTextSource::new()),
        geocoder: Arc::new(NominatimGeocoder::new()),
    };

    println!("Building snapshot for '{}'...", config.place);
    let start = Instant::now();
    let workers = config.workers;
    let engine = Arc::new(Engine::new(config, sources).await.context("failed to build the initial snapshot")?);
    println!("Snapshot ready in {:.2}s", start.elapsed().as_secs_f64());

    match cli.command {
        Commands::Build { .. } => {
            println!("nodes: {}", engine.node_count());
            println!("edges: {}", engine.edge_count());
        }
        Commands::Route { from, to } => {
            let Some(src) = engine.resolve_location(&from).await else {
                println!("could not resolve source location: {from}");
                return Ok(());
            };
            let Some(dst) = engine.resolve_location(&to).await else {
                println!("could not resolve destination location: {to}");
                return Ok(());
            };

            // Routed through the query worker pool (spec.md §5's "pool of
            // query handlers") rather than called directly on the main
            // thread, so a single CLI invocation exercises the same path a
            // concurrent front-end would drive through `Engine::shortest_path`.
            let pool = QueryPool::new(Arc::clone(&engine), workers);
            let route_start = Instant::now();
            match pool.submit(src, dst) {
                Some(path) => {
                    println!("\nRoute found in {:.3}s", route_start.elapsed().as_secs_f64());
                    println!("Points: {}", path.len());
                    for location in &path {
                        println!("  {:.6} {:.6}", location.lon, location.lat);
                    }
                }
                None => println!("no route found between {from} and {to}"),
            }
        }
    }

    Ok(())
}
