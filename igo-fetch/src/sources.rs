use async_trait::async_trait;
use igo_common::{Error, Result};
use igo_graph::{Edge, Node, RawGraph};
use serde::Deserialize;

/// Fetches the drivable directed road graph for a place name.
///
/// The exact upstream format is opaque to the core (spec.md §6); production
/// implementations parse whatever the municipal/OSM backend returns into a
/// `RoadGraphPayload` and call [`RawGraph::from_candidate_edges`] to collapse
/// parallel edges.
#[async_trait]
pub trait RoadGraphSource: Send + Sync {
    async fn fetch(&self, place: &str) -> std::result::Result<RawGraph, String>;
}

/// Fetches the highway directory feed's raw CSV text for a URL.
#[async_trait]
pub trait HighwaySource: Send + Sync {
    async fn fetch(&self, url: &str) -> std::result::Result<String, String>;
}

/// Fetches the congestion feed's raw `#`-delimited text for a URL.
#[async_trait]
pub trait CongestionSource: Send + Sync {
    async fn fetch(&self, url: &str) -> std::result::Result<String, String>;
}

/// Resolves free-text place names to coordinates. A failure (network error,
/// no match) is reported as `None`, matching spec.md §4.3's "geocoder
/// failure -> return none."
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, text: &str) -> Option<(f64, f64)>;
}

/// Wire payload for the road graph fetcher: a plain JSON document of nodes
/// and candidate edges. Standing in for "whatever opaque format the
/// upstream road-network source uses" per spec.md §6.
#[derive(Debug, Deserialize)]
pub struct RoadGraphPayload {
    pub nodes: Vec<NodePayload>,
    pub edges: Vec<EdgePayload>,
}

#[derive(Debug, Deserialize)]
pub struct NodePayload {
    pub lon: f64,
    pub lat: f64,
}

#[derive(Debug, Deserialize)]
pub struct EdgePayload {
    pub source: u32,
    pub target: u32,
    pub length_m: f64,
    #[serde(default)]
    pub maxspeed: Option<MaxSpeedPayload>,
}

/// `maxspeed` as it arrives from the source: absent, a single number, or a
/// list of numbers (e.g. one per lane). Normalized here per spec.md §9's
/// "Dynamic maxspeed typing" design note: lists take their arithmetic mean.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MaxSpeedPayload {
    Scalar(f64),
    List(Vec<f64>),
}

impl MaxSpeedPayload {
    pub fn normalize(&self) -> Option<f64> {
        match self {
            MaxSpeedPayload::Scalar(v) => Some(*v),
            MaxSpeedPayload::List(values) if !values.is_empty() => {
                Some(values.iter().sum::<f64>() / values.len() as f64)
            }
            MaxSpeedPayload::List(_) => None,
        }
    }
}

impl RoadGraphPayload {
    pub fn into_raw_graph(self) -> RawGraph {
        let nodes: Vec<Node> = self.nodes.into_iter().map(|n| Node { lon: n.lon, lat: n.lat }).collect();
        let candidates: Vec<Edge> = self
            .edges
            .into_iter()
            .map(|e| Edge::new(e.source, e.target, e.length_m, e.maxspeed.as_ref().and_then(MaxSpeedPayload::normalize)))
            .collect();
        RawGraph::from_candidate_edges(nodes, candidates)
    }
}

/// Parses a `RoadGraphPayload` from JSON text, converting parse failures
/// into the shared `Error::Parse` variant (these are retried by the caller,
/// per spec.md §4.1).
pub fn parse_road_graph(text: &str) -> Result<RawGraph> {
    let payload: RoadGraphPayload = serde_json::from_str(text).map_err(|e| Error::Parse(e.to_string()))?;
    Ok(payload.into_raw_graph())
}
