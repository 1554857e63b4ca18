use crate::build::{build_initial, Sources};
use crate::config::RuntimeConfig;
use crate::error::Result;
use crate::publisher::SnapshotPublisher;
use crate::scheduler;
use igo_common::Location;
use igo_graph::Cache;
use std::sync::Arc;
use std::thread::JoinHandle;

/// The core API consumed by the (out-of-scope) front-end collaborator,
/// per spec.md §6: resolve free-text input to a location, answer
/// shortest-path queries, and a constructor that blocks until the first
/// snapshot is ready.
///
/// `resolve_location` is `async` here even though spec.md's illustrative
/// signature is not: the geocoder fallback is a real network call, and
/// making this function synchronous would force a blocking HTTP client or
/// a nested `tokio` runtime (the latter panics from inside one, which is
/// exactly the position a `#[tokio::main]` CLI/server binary is in). This
/// is recorded as a deliberate adaptation in `DESIGN.md`.
pub struct Engine {
    publisher: SnapshotPublisher,
    sources: Sources,
    _refresh_thread: JoinHandle<()>,
}

impl Engine {
    /// Builds the first snapshot (C1-C7) and starts the background
    /// refresh scheduler (C8). Blocks the calling async task until the
    /// first snapshot is ready.
    pub async fn new(config: RuntimeConfig, sources: Sources) -> Result<Self> {
        let cache = Cache::new(config.graph_cache_path.clone(), config.highways_cache_path.clone());
        let (snapshot, measurements) = build_initial(&config, &sources, &cache).await?;

        let publisher = SnapshotPublisher::new(snapshot);
        let refresh_thread = scheduler::spawn(config, sources.clone(), publisher.clone(), measurements);

        Ok(Self { publisher, sources, _refresh_thread: refresh_thread })
    }

    /// Geospatial index + geocoder fallback (C3): try `"lon lat"` as two
    /// decimals first, then fall back to the geocoder trait. Either
    /// failure mode resolves to `None`, never an error.
    pub async fn resolve_location(&self, text: &str) -> Option<Location> {
        if let Some(location) = Location::parse_coords(text) {
            return Some(location);
        }
        let (lon, lat) = self.sources.geocoder.geocode(text).await?;
        Some(Location::new(lon, lat))
    }

    /// Router (C9): the least-`itime` path between the nodes nearest to
    /// `src` and `dst`, as a sequence of `(lon, lat)` locations from
    /// `src`-near to `dst`-near inclusive. `None` if either location has
    /// no nearest node (empty graph) or no path exists.
    pub fn shortest_path(&self, src: Location, dst: Location) -> Option<Vec<Location>> {
        let snapshot = self.publisher.current();
        let source = snapshot.nearest_node(src.lon, src.lat)?;
        let target = snapshot.nearest_node(dst.lon, dst.lat)?;

        if source == target {
            let node = &snapshot.nodes[source as usize];
            return Some(vec![Location::new(node.lon, node.lat)]);
        }

        let (path, _total_itime) = snapshot.shortest_by_itime(source, target)?;
        Some(
            path.into_iter()
                .map(|id| {
                    let node = &snapshot.nodes[id as usize];
                    Location::new(node.lon, node.lat)
                })
                .collect(),
        )
    }

    /// The currently published snapshot's node count, exposed for `igo-route build`'s summary output.
    pub fn node_count(&self) -> usize {
        self.publisher.current().nodes.len()
    }

    /// The currently published snapshot's edge count, exposed for `igo-route build`'s summary output.
    pub fn edge_count(&self) -> usize {
        self.publisher.current().edges.len()
    }

    pub fn publisher(&self) -> SnapshotPublisher {
        self.publisher.clone()
    }
}

/// Convenience alias used by callers that want to share one `Engine`
/// across the query worker pool.
pub type SharedEngine = Arc<Engine>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::fixtures::*;
    use std::sync::Arc as StdArc;

    async fn test_engine(highways_csv: &str, congestion_feed: &str) -> (Engine, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let config = RuntimeConfig {
            place: "Test City".to_string(),
            road_graph_base_url: String::new(),
            highways_url: String::new(),
            congestions_url: String::new(),
            graph_cache_path: dir.path().join("graph.bin"),
            highways_cache_path: dir.path().join("highways.bin"),
            refresh_interval: std::time::Duration::from_secs(3600),
            workers: 1,
        };
        let sources = Sources {
            road_graph: StdArc::new(FixedRoadGraph(chain_graph())),
            highways: StdArc::new(FixedText(highways_csv.to_string())),
            congestion: StdArc::new(FixedText(congestion_feed.to_string())),
            geocoder: StdArc::new(NoGeocoder),
        };
        let engine = Engine::new(config, sources).await.unwrap();
        (engine, dir)
    }

    #[tokio::test]
    async fn trivial_route_sums_itime_across_chain() {
        let (engine, _dir) =
            test_engine("id,description,coordinates\n1,\"x\",\"0.0,0.0,1.0,0.0\"\n", "1#1#1#1\n").await;

        let path = engine.shortest_path(Location::new(0.0, 0.0), Location::new(3.0, 0.0)).unwrap();
        assert_eq!(path.len(), 4);
        assert_eq!(path.first(), Some(&Location::new(0.0, 0.0)));
        assert_eq!(path.last(), Some(&Location::new(3.0, 0.0)));
    }

    #[tokio::test]
    async fn same_nearest_node_returns_single_element_path() {
        let (engine, _dir) =
            test_engine("id,description,coordinates\n1,\"x\",\"0.0,0.0,1.0,0.0\"\n", "1#1#1#1\n").await;

        let path = engine.shortest_path(Location::new(0.01, 0.0), Location::new(-0.01, 0.0)).unwrap();
        assert_eq!(path, vec![Location::new(0.0, 0.0)]);
    }

    #[tokio::test]
    async fn blocked_middle_edge_has_no_route() {
        let (engine, _dir) =
            test_engine("id,description,coordinates\n1,\"x\",\"1.0,0.0,2.0,0.0\"\n", "1#1#6#6\n").await;

        assert!(engine.shortest_path(Location::new(0.0, 0.0), Location::new(3.0, 0.0)).is_none());
    }

    #[tokio::test]
    async fn resolve_location_parses_coords_without_geocoder() {
        let (engine, _dir) = test_engine("id,description,coordinates\n1,\"x\",\"0.0,0.0,1.0,0.0\"\n", "").await;
        let loc = engine.resolve_location("2.17 41.38").await.unwrap();
        assert_eq!(loc, Location::new(2.17, 41.38));
    }

    #[tokio::test]
    async fn resolve_location_falls_through_to_geocoder_and_returns_none_on_failure() {
        let (engine, _dir) = test_engine("id,description,coordinates\n1,\"x\",\"0.0,0.0,1.0,0.0\"\n", "").await;
        assert!(engine.resolve_location("Plaça Catalunya").await.is_none());
    }
}
