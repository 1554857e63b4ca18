use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Opaque, dense graph vertex id. Stable for the lifetime of one
/// `GraphSnapshot`, not across rebuilds.
pub type NodeId = u32;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Node {
    pub lon: f64,
    pub lat: f64,
}

/// A directed connection from `source` to `target`.
///
/// Invariants (enforced by the modules that construct/mutate edges, not by
/// the type itself): `length_m > 0`; `congestion` in `0..=6`; `itime ==
/// f64::INFINITY` iff `congestion == 6`; `congestion_info` implies
/// `congestion` in `1..=6`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    pub length_m: f64,
    pub maxspeed_kmh: Option<f64>,
    /// 0 = no data, 1 = very fluid, 6 = blocked/closed.
    pub congestion: u8,
    /// True iff `congestion` came from the measurement feed (directly or via
    /// highway projection), false if imputed or defaulted.
    pub congestion_info: bool,
    /// Expected-travel-time edge weight in seconds (mixed-unit quantity, see
    /// `igo_congestion::cost`). `f64::INFINITY` when the street is blocked.
    pub itime: f64,
}

impl Edge {
    pub fn new(source: NodeId, target: NodeId, length_m: f64, maxspeed_kmh: Option<f64>) -> Self {
        Self {
            source,
            target,
            length_m,
            maxspeed_kmh,
            congestion: 0,
            congestion_info: false,
            itime: f64::INFINITY,
        }
    }
}

/// A named polyline from the municipal feed, projected onto the graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighwaySegment {
    pub way_id: i64,
    pub nodes: Vec<NodeId>,
}

/// `(way_id, date, actual, predicted)` from the congestion feed, retaining
/// only the newest `date` per `way_id` (enforced by the fetcher).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CongestionMeasurement {
    pub way_id: i64,
    pub date: i64,
    pub actual: u8,
    pub predicted: u8,
}

/// The raw directed road graph as fetched from C1, before highway
/// projection or congestion has been applied. Parallel edges between the
/// same ordered pair of nodes have already been collapsed: the
/// shortest-by-length one wins, mirroring `ox.utils_graph.get_digraph`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl RawGraph {
    /// Builds a `RawGraph` from candidate edges that may contain parallel
    /// edges and loops. Loops are kept (the router will simply never pick
    /// them, per spec) but duplicate `(source, target)` pairs are collapsed
    /// to the one with the smallest `length_m`.
    pub fn from_candidate_edges(nodes: Vec<Node>, candidates: Vec<Edge>) -> Self {
        use std::collections::HashMap;

        let mut best: HashMap<(NodeId, NodeId), Edge> = HashMap::new();
        for edge in candidates {
            let key = (edge.source, edge.target);
            match best.get(&key) {
                Some(existing) if existing.length_m <= edge.length_m => {}
                _ => {
                    best.insert(key, edge);
                }
            }
        }
        let edges = best.into_values().collect();
        Self { nodes, edges }
    }
}

#[derive(PartialEq)]
struct MinF64(f64);

impl Eq for MinF64 {}

impl PartialOrd for MinF64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MinF64 {
    fn cmp(&self, other: &Self) -> Ordering {
        // itime/length_m are never NaN in a well-formed snapshot; fall back
        // to Equal rather than panicking if they ever are.
        other.0.partial_cmp(&self.0).unwrap_or(Ordering::Equal)
    }
}

/// Single-source, single-target Dijkstra over a `source -> Vec<edge index>`
/// adjacency, weighted by an arbitrary per-edge function.
///
/// Used both for the congestion mapper's shortest-by-length segment fill
/// (C5/C8) and the router's shortest-by-itime query (C9); see
/// `nbg_ch::query::NbgChQuery::distance` for the `BinaryHeap<Reverse<_>>`
/// idiom this adapts from integer to floating-point weights.
pub fn dijkstra_path<F>(
    n_nodes: usize,
    out_adj: &[Vec<usize>],
    edges: &[Edge],
    source: NodeId,
    target: NodeId,
    weight: F,
) -> Option<(Vec<NodeId>, f64)>
where
    F: Fn(&Edge) -> f64,
{
    let mut dist = vec![f64::INFINITY; n_nodes];
    let mut prev: Vec<Option<usize>> = vec![None; n_nodes];
    let mut heap: BinaryHeap<(MinF64, NodeId)> = BinaryHeap::new();

    dist[source as usize] = 0.0;
    heap.push((MinF64(0.0), source));

    while let Some((MinF64(d), u)) = heap.pop() {
        if u == target {
            break;
        }
        if d > dist[u as usize] {
            continue;
        }
        for &edge_idx in &out_adj[u as usize] {
            let edge = &edges[edge_idx];
            let w = weight(edge);
            if !w.is_finite() {
                continue;
            }
            let nd = d + w;
            let v = edge.target as usize;
            if nd < dist[v] {
                dist[v] = nd;
                prev[v] = Some(edge_idx);
                heap.push((MinF64(nd), edge.target));
            }
        }
    }

    if !dist[target as usize].is_finite() {
        return None;
    }

    let mut path = vec![target];
    let mut cur = target;
    while cur != source {
        let edge_idx = prev[cur as usize]?;
        let edge = &edges[edge_idx];
        cur = edge.source;
        path.push(cur);
    }
    path.reverse();
    Some((path, dist[target as usize]))
}
