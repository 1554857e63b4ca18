use crate::model::{HighwaySegment, RawGraph};
use igo_common::{Error, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Persistent cache for the two blobs C2 is responsible for: the
/// deserialized road graph and the projected highway directory (post-C4).
///
/// No versioning is implemented, matching spec.md §4.2: an operator must
/// delete the blob files to force a refresh from the network. Grounded on
/// `graph.rs`'s `RouteGraph::save`/`RouteGraph::load`.
pub struct Cache {
    pub graph_path: std::path::PathBuf,
    pub highways_path: std::path::PathBuf,
}

impl Cache {
    pub fn new(graph_path: impl Into<std::path::PathBuf>, highways_path: impl Into<std::path::PathBuf>) -> Self {
        Self {
            graph_path: graph_path.into(),
            highways_path: highways_path.into(),
        }
    }

    pub fn load_graph(&self) -> Option<RawGraph> {
        match load_blob(&self.graph_path) {
            Ok(graph) => Some(graph),
            Err(e) => {
                log::warn!("graph cache miss at {:?}: {e}", self.graph_path);
                discard_corrupt_blob(&self.graph_path);
                None
            }
        }
    }

    pub fn load_highways(&self) -> Option<Vec<HighwaySegment>> {
        match load_blob(&self.highways_path) {
            Ok(highways) => Some(highways),
            Err(e) => {
                log::warn!("highway cache miss at {:?}: {e}", self.highways_path);
                discard_corrupt_blob(&self.highways_path);
                None
            }
        }
    }

    pub fn save_graph(&self, graph: &RawGraph) -> Result<()> {
        save_blob(&self.graph_path, graph)
    }

    pub fn save_highways(&self, highways: &[HighwaySegment]) -> Result<()> {
        save_blob(&self.highways_path, &highways.to_vec())
    }
}

fn load_blob<T: serde::de::DeserializeOwned>(path: &Path) -> std::result::Result<T, String> {
    let file = File::open(path).map_err(|e| e.to_string())?;
    let reader = BufReader::new(file);
    bincode::deserialize_from(reader).map_err(|e| e.to_string())
}

/// Spec.md §7's "Cache corruption" handling: a blob that exists but fails
/// to deserialize is deleted so the next build falls back to the network
/// rather than repeatedly tripping over the same unreadable file. A
/// missing file (the ordinary cold-start case) is not an error here.
fn discard_corrupt_blob(path: &Path) {
    if path.exists() {
        if let Err(e) = std::fs::remove_file(path) {
            log::warn!("failed to remove corrupt cache blob at {path:?}: {e}");
        }
    }
}

fn save_blob<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).map_err(Error::Io)?;
    let writer = BufWriter::new(file);
    bincode::serialize_into(writer, value).map_err(|e| Error::Cache(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Edge, Node};

    #[test]
    fn round_trips_graph_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::new(dir.path().join("graph.bin"), dir.path().join("highways.bin"));

        assert!(cache.load_graph().is_none());

        let graph = RawGraph {
            nodes: vec![Node { lon: 2.17, lat: 41.38 }, Node { lon: 2.18, lat: 41.39 }],
            edges: vec![Edge::new(0, 1, 120.0, Some(50.0))],
        };
        cache.save_graph(&graph).unwrap();

        let loaded = cache.load_graph().unwrap();
        assert_eq!(loaded.nodes.len(), 2);
        assert_eq!(loaded.edges[0].length_m, 120.0);
    }

    #[test]
    fn corrupt_blob_is_treated_as_a_cache_miss() {
        let dir = tempfile::tempdir().unwrap();
        let graph_path = dir.path().join("graph.bin");
        std::fs::write(&graph_path, b"not a valid bincode blob").unwrap();

        let cache = Cache::new(&graph_path, dir.path().join("highways.bin"));
        assert!(cache.load_graph().is_none());
        assert!(!graph_path.exists(), "corrupt blob should be removed on load failure");
    }
}
