use igo_graph::{CongestionMeasurement, Edge, GraphSnapshot};
use std::collections::HashMap;

/// Congestion mapper (C5): for every congestion measurement with `actual
/// > 0`, walks the highway's projected node sequence and marks every edge
/// on the shortest-by-length path between consecutive nodes with that
/// `actual` value.
///
/// Grounded line-for-line on `igo.py::_build_igraph`'s per-segment loop
/// (`nx.shortest_path(..., weight='length')`, `congestionInfo = True`).
/// Missing `way_id`s (present in the highway directory but not the
/// congestion feed, or vice versa) are silently skipped, per spec.md §9.
///
/// Returns the list of `(edge_index, actual)` writes in highway/segment
/// enumeration order; later entries for the same edge index must win when
/// applied, which is exactly what [`write_congestion`] does. Splitting
/// "compute writes" from "apply writes" avoids borrowing `snapshot`
/// mutably while still walking its own adjacency for path lookups.
pub fn plan_congestion_writes(
    snapshot: &GraphSnapshot,
    measurements: &HashMap<i64, CongestionMeasurement>,
) -> Vec<(usize, u8)> {
    let mut writes = Vec::new();
    for highway in &snapshot.highways {
        let Some(measurement) = measurements.get(&highway.way_id) else {
            continue;
        };
        if measurement.actual == 0 {
            continue;
        }
        for pair in highway.nodes.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            let Some((path, _length)) = snapshot.shortest_by_length(from, to) else {
                continue;
            };
            for edge_pair in path.windows(2) {
                if let Some(idx) = snapshot.edge_index(edge_pair[0], edge_pair[1]) {
                    writes.push((idx, measurement.actual));
                }
            }
        }
    }
    writes
}

/// Applies planned congestion writes, setting `congestion_info = true` on
/// every written edge. Edges may be written by multiple overlapping
/// highways; the last writer in `writes`' order wins (spec.md §4.5).
pub fn write_congestion(edges: &mut [Edge], writes: &[(usize, u8)]) {
    for &(idx, actual) in writes {
        edges[idx].congestion = actual;
        edges[idx].congestion_info = true;
    }
}
