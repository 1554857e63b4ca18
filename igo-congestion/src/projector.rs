use igo_graph::{HighwaySegment, SpatialIndex};
use std::collections::HashMap;

/// Projects each highway polyline onto the road graph by snapping every
/// coordinate to its nearest node, batched per highway.
///
/// Grounded on `igo.py`'s `ox.get_nearest_nodes(graph, coordsX, coordsY)`
/// call inside the highway loop, and `graph.rs`'s R-tree nearest lookup.
pub fn project_highways(highways: &HashMap<i64, Vec<(f64, f64)>>, index: &SpatialIndex) -> Vec<HighwaySegment> {
    let mut segments = Vec::with_capacity(highways.len());
    for (&way_id, coords) in highways {
        let nodes = index.nearest_nodes(coords);
        segments.push(HighwaySegment { way_id, nodes });
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use igo_graph::Node;

    #[test]
    fn projects_polyline_to_nearest_nodes() {
        let nodes = vec![Node { lon: 0.0, lat: 0.0 }, Node { lon: 1.0, lat: 0.0 }, Node { lon: 2.0, lat: 0.0 }];
        let index = SpatialIndex::build(&nodes);
        let mut highways = HashMap::new();
        highways.insert(42, vec![(0.1, 0.0), (1.9, 0.0)]);
        let segments = project_highways(&highways, &index);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].way_id, 42);
        assert_eq!(segments[0].nodes, vec![0, 2]);
    }
}
