use crate::model::{Node, NodeId};
use rstar::{primitives::GeomWithData, RTree};

/// Nearest-node lookup from `(lon, lat)` into the graph, backed by an
/// R-tree for O(log n) queries, grounded on `graph.rs`'s
/// `RTree<GeomWithData<[f64; 2], i64>>` spatial index.
///
/// Ties are broken by lower node id: `rstar`'s `bulk_load` sorts nodes by
/// an STR/OMT spatial partition, not insertion order, and its nearest-
/// neighbor search makes no ordering promise among exactly-tied
/// distances, so the tie-break has to be done explicitly here rather than
/// relied on implicitly.
#[derive(Clone)]
pub struct SpatialIndex {
    tree: RTree<GeomWithData<[f64; 2], NodeId>>,
}

impl SpatialIndex {
    pub fn build(nodes: &[Node]) -> Self {
        let points: Vec<_> = nodes
            .iter()
            .enumerate()
            .map(|(id, node)| GeomWithData::new([node.lon, node.lat], id as NodeId))
            .collect();
        Self {
            tree: RTree::bulk_load(points),
        }
    }

    /// Planar Euclidean nearest neighbor in degrees, as specified (the graph
    /// spans a single city, so the projection distortion is negligible).
    /// Ties are broken by lower `NodeId`: walks the distance-ascending
    /// `nearest_neighbor_iter_with_distance_2` order, tracking the lowest id
    /// seen at the minimal squared distance and stopping as soon as a
    /// candidate is strictly farther away.
    pub fn nearest_node(&self, lon: f64, lat: f64) -> Option<NodeId> {
        let mut best: Option<(NodeId, f64)> = None;
        for (point, dist_2) in self.tree.nearest_neighbor_iter_with_distance_2(&[lon, lat]) {
            match best {
                None => best = Some((point.data, dist_2)),
                Some((_, min_dist_2)) if dist_2 > min_dist_2 => break,
                Some((best_id, min_dist_2)) => best = Some((best_id.min(point.data), min_dist_2)),
            }
        }
        best.map(|(id, _)| id)
    }

    /// Batched nearest-node lookup for an ordered polyline, used by the
    /// highway projector (C4).
    pub fn nearest_nodes(&self, coords: &[(f64, f64)]) -> Vec<NodeId> {
        coords
            .iter()
            .filter_map(|&(lon, lat)| self.nearest_node(lon, lat))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_nearest_by_euclidean_distance() {
        let nodes = vec![
            Node { lon: 0.0, lat: 0.0 },
            Node { lon: 1.0, lat: 0.0 },
            Node { lon: 2.0, lat: 0.0 },
        ];
        let index = SpatialIndex::build(&nodes);
        assert_eq!(index.nearest_node(1.1, 0.0), Some(1));
        assert_eq!(index.nearest_node(-5.0, 0.0), Some(0));
    }

    #[test]
    fn ties_break_by_lower_node_id() {
        // Nodes 1 and 2 sit symmetrically around the query point (1.0, 0.0),
        // both at distance 1.0: node 1 (the lower id) must win.
        let nodes = vec![
            Node { lon: 0.0, lat: 0.0 },
            Node { lon: 0.0, lat: 1.0 },
            Node { lon: 2.0, lat: 1.0 },
        ];
        let index = SpatialIndex::build(&nodes);
        assert_eq!(index.nearest_node(1.0, 1.0), Some(1));
    }

    #[test]
    fn projects_polyline_in_order() {
        let nodes = vec![
            Node { lon: 0.0, lat: 0.0 },
            Node { lon: 1.0, lat: 0.0 },
            Node { lon: 2.0, lat: 0.0 },
        ];
        let index = SpatialIndex::build(&nodes);
        let projected = index.nearest_nodes(&[(0.1, 0.0), (2.1, 0.0), (0.9, 0.0)]);
        assert_eq!(projected, vec![0, 2, 1]);
    }
}
