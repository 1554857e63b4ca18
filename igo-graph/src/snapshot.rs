use crate::model::{dijkstra_path, Edge, HighwaySegment, Node, NodeId};
use crate::spatial::SpatialIndex;

/// The exclusively-owned, immutable-once-published graph snapshot: the
/// `(nodes, edges, highway_projections)` triple from the data model,
/// plus the derived adjacency and spatial index needed to serve queries.
///
/// A snapshot is built once at startup (C1-C7) and replaced wholesale by
/// the refresh scheduler (C8); it is never mutated in place from a
/// reader's perspective.
#[derive(Clone)]
pub struct GraphSnapshot {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub highways: Vec<HighwaySegment>,
    out_adj: Vec<Vec<usize>>,
    in_adj: Vec<Vec<usize>>,
    spatial_index: SpatialIndex,
}

impl GraphSnapshot {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>, highways: Vec<HighwaySegment>) -> Self {
        let spatial_index = SpatialIndex::build(&nodes);
        let (out_adj, in_adj) = build_adjacency(nodes.len(), &edges);
        Self {
            nodes,
            edges,
            highways,
            out_adj,
            in_adj,
            spatial_index,
        }
    }

    pub fn out_edges(&self, node: NodeId) -> &[usize] {
        &self.out_adj[node as usize]
    }

    pub fn in_edges(&self, node: NodeId) -> &[usize] {
        &self.in_adj[node as usize]
    }

    /// Index of the edge `source -> target`, if one exists. Parallel edges
    /// are already collapsed by [`crate::model::RawGraph::from_candidate_edges`],
    /// so a pair maps to at most one edge within a snapshot.
    pub fn edge_index(&self, source: NodeId, target: NodeId) -> Option<usize> {
        self.out_adj[source as usize]
            .iter()
            .copied()
            .find(|&idx| self.edges[idx].target == target)
    }

    /// Splits the snapshot into a mutable edge slice and the (unaffected)
    /// adjacency lists, for phases that need to read the graph's shape
    /// while rewriting edge attributes (the congestion imputer, C6).
    pub fn edges_mut_with_adjacency(&mut self) -> (&mut [Edge], &[Vec<usize>], &[Vec<usize>]) {
        (&mut self.edges, &self.out_adj, &self.in_adj)
    }

    pub fn nearest_node(&self, lon: f64, lat: f64) -> Option<NodeId> {
        self.spatial_index.nearest_node(lon, lat)
    }

    pub fn nearest_nodes(&self, coords: &[(f64, f64)]) -> Vec<NodeId> {
        self.spatial_index.nearest_nodes(coords)
    }

    /// Shortest path by street `length_m`, used by the congestion mapper
    /// (C5) to fill in the edges between two consecutive projected highway
    /// nodes.
    pub fn shortest_by_length(&self, source: NodeId, target: NodeId) -> Option<(Vec<NodeId>, f64)> {
        dijkstra_path(self.nodes.len(), &self.out_adj, &self.edges, source, target, |e| {
            e.length_m
        })
    }

    /// Shortest path by `itime`, used by the router (C9). Edges with
    /// `itime = +inf` are excluded by `dijkstra_path`'s finite-weight check.
    pub fn shortest_by_itime(&self, source: NodeId, target: NodeId) -> Option<(Vec<NodeId>, f64)> {
        dijkstra_path(self.nodes.len(), &self.out_adj, &self.edges, source, target, |e| {
            e.itime
        })
    }
}

fn build_adjacency(n_nodes: usize, edges: &[Edge]) -> (Vec<Vec<usize>>, Vec<Vec<usize>>) {
    let mut out_adj = vec![Vec::new(); n_nodes];
    let mut in_adj = vec![Vec::new(); n_nodes];
    for (idx, edge) in edges.iter().enumerate() {
        out_adj[edge.source as usize].push(idx);
        in_adj[edge.target as usize].push(idx);
    }
    (out_adj, in_adj)
}
