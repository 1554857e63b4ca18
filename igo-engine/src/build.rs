use crate::config::RuntimeConfig;
use crate::error::{EngineError, Result};
use igo_fetch::parse::{parse_congestion_feed, parse_highway_directory};
use igo_fetch::{retry_forever, CongestionSource, Geocoder, HighwaySource, RoadGraphSource};
use igo_graph::{Cache, CongestionMeasurement, GraphSnapshot, SpatialIndex};
use std::collections::HashMap;
use std::sync::Arc;

/// The three feed fetchers (C1) plus the geocoder (C3), bundled so the
/// engine and the refresh scheduler can share one set of trait objects.
/// Production callers plug in `igo_fetch::Http*`/`NominatimGeocoder`;
/// tests plug in in-memory fixtures.
#[derive(Clone)]
pub struct Sources {
    pub road_graph: Arc<dyn RoadGraphSource>,
    pub highways: Arc<dyn HighwaySource>,
    pub congestion: Arc<dyn CongestionSource>,
    pub geocoder: Arc<dyn Geocoder>,
}

/// Fetches the highway directory and parses it, retrying the whole
/// fetch-then-parse operation on either a network or a parse failure
/// (spec.md §4.1: "Parse errors are fatal for that fetch and cause a
/// retry"). The underlying `HighwaySource` impl already retries network
/// failures on its own; wrapping it here additionally covers the case
/// where the network call succeeds but returns unparseable data.
pub async fn load_highways(sources: &Sources, url: &str) -> HashMap<i64, Vec<(f64, f64)>> {
    retry_forever("highway feed", || async {
        let text = sources.highways.fetch(url).await.map_err(EngineError::Fetch)?;
        parse_highway_directory(&text).map_err(EngineError::from)
    })
    .await
}

/// Same retry-the-whole-operation treatment as [`load_highways`], for the
/// congestion feed.
pub async fn load_congestion(sources: &Sources, url: &str) -> HashMap<i64, CongestionMeasurement> {
    retry_forever("congestion feed", || async {
        let text = sources.congestion.fetch(url).await.map_err(EngineError::Fetch)?;
        parse_congestion_feed(&text).map_err(EngineError::from)
    })
    .await
}

/// Builds the first `GraphSnapshot` (C1 -> C2 cache -> C4 -> C5-C7),
/// consulting the persistent cache before hitting the network for the
/// road graph and the projected highway directory.
pub async fn build_initial(
    config: &RuntimeConfig,
    sources: &Sources,
    cache: &Cache,
) -> Result<(GraphSnapshot, HashMap<i64, CongestionMeasurement>)> {
    let raw_graph = match cache.load_graph() {
        Some(graph) => {
            tracing::info!("road graph loaded from cache ({} nodes)", graph.nodes.len());
            graph
        }
        None => {
            tracing::info!("fetching road graph for '{}'", config.place);
            let graph = sources.road_graph.fetch(&config.place).await.map_err(EngineError::Fetch)?;
            if let Err(e) = cache.save_graph(&graph) {
                tracing::warn!("failed to write road graph cache: {e}");
            }
            graph
        }
    };

    let highways = match cache.load_highways() {
        Some(highways) => {
            tracing::info!("highway projections loaded from cache ({} highways)", highways.len());
            highways
        }
        None => {
            let index = SpatialIndex::build(&raw_graph.nodes);
            let polylines = load_highways(sources, &config.highways_url).await;
            tracing::info!("projecting {} highways onto the graph", polylines.len());
            let projected = igo_congestion::project_highways(&polylines, &index);
            if let Err(e) = cache.save_highways(&projected) {
                tracing::warn!("failed to write highway cache: {e}");
            }
            projected
        }
    };

    let measurements = load_congestion(sources, &config.congestions_url).await;
    tracing::info!("building congestion-aware snapshot from {} measurements", measurements.len());

    let mut snapshot = GraphSnapshot::new(raw_graph.nodes, raw_graph.edges, highways);
    igo_congestion::initial_build(&mut snapshot, &measurements);

    Ok((snapshot, measurements))
}
