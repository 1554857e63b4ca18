//! Road graph data model, spatial index, and persistent cache.
//!
//! Implements C2 (persistent cache), C3 (geospatial index), and the data
//! model shared by the congestion and engine crates.

pub mod cache;
pub mod model;
pub mod snapshot;
pub mod spatial;

pub use cache::Cache;
pub use model::{dijkstra_path, CongestionMeasurement, Edge, HighwaySegment, Node, NodeId, RawGraph};
pub use snapshot::GraphSnapshot;
pub use spatial::SpatialIndex;
