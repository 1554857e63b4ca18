use crate::cost::build_costs;
use crate::imputer::impute;
use crate::mapper::{plan_congestion_writes, write_congestion};
use igo_graph::{CongestionMeasurement, GraphSnapshot};
use std::collections::HashMap;

/// Runs C5-C7 over a freshly built snapshot: maps every highway's
/// congestion measurement onto its edges, imputes the rest, and derives
/// `itime`. Used once at startup, against the full measurement set.
pub fn initial_build(snapshot: &mut GraphSnapshot, measurements: &HashMap<i64, CongestionMeasurement>) {
    let writes = plan_congestion_writes(snapshot, measurements);
    write_congestion(&mut snapshot.edges, &writes);
    impute(snapshot);
    build_costs(&mut snapshot.edges);
}

/// Refresh scheduler re-entry point (C8): re-runs C5 only for the
/// highways whose `actual` changed this cycle, resets every imputed
/// (non-measured) edge back to "no data", then re-runs C6 and C7 over
/// the entire graph.
///
/// `changed` must contain only the measurements whose `actual` differs
/// from the previous cycle; passing the full measurement set here would
/// incorrectly treat unchanged highways as needing remapping (it would
/// still be correct, since remapping an unchanged value is a no-op, but
/// it throws away the "did anything change" short-circuit the caller is
/// expected to have already done).
pub fn refresh(snapshot: &mut GraphSnapshot, changed: &HashMap<i64, CongestionMeasurement>) {
    let writes = plan_congestion_writes(snapshot, changed);
    write_congestion(&mut snapshot.edges, &writes);
    reset_imputed_edges(snapshot);
    impute(snapshot);
    build_costs(&mut snapshot.edges);
}

fn reset_imputed_edges(snapshot: &mut GraphSnapshot) {
    for edge in snapshot.edges.iter_mut() {
        if !edge.congestion_info {
            edge.congestion = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use igo_graph::{Edge, HighwaySegment, Node};

    fn chain_snapshot() -> GraphSnapshot {
        let nodes = vec![
            Node { lon: 0.0, lat: 0.0 },
            Node { lon: 1.0, lat: 0.0 },
            Node { lon: 2.0, lat: 0.0 },
            Node { lon: 3.0, lat: 0.0 },
        ];
        let edges = vec![
            Edge::new(0, 1, 100.0, None),
            Edge::new(1, 2, 100.0, None),
            Edge::new(2, 3, 100.0, None),
        ];
        let highways = vec![HighwaySegment { way_id: 1, nodes: vec![0, 1] }];
        GraphSnapshot::new(nodes, edges, highways)
    }

    #[test]
    fn initial_build_gives_every_edge_an_itime() {
        let mut snapshot = chain_snapshot();
        let mut measurements = HashMap::new();
        measurements.insert(1, CongestionMeasurement { way_id: 1, date: 1, actual: 3, predicted: 3 });

        initial_build(&mut snapshot, &measurements);

        assert!(snapshot.edges.iter().all(|e| e.itime > 0.0));
        assert_eq!(snapshot.edges[0].congestion, 3);
        assert!(snapshot.edges[0].congestion_info);
        // Imputed edges carry a finite congestion but are not "measured".
        assert!(!snapshot.edges[1].congestion_info);
    }

    #[test]
    fn refresh_with_no_changes_is_a_pure_recompute() {
        let mut snapshot = chain_snapshot();
        let mut measurements = HashMap::new();
        measurements.insert(1, CongestionMeasurement { way_id: 1, date: 1, actual: 3, predicted: 3 });
        initial_build(&mut snapshot, &measurements);
        let before: Vec<(u8, bool, f64)> =
            snapshot.edges.iter().map(|e| (e.congestion, e.congestion_info, e.itime)).collect();

        refresh(&mut snapshot, &HashMap::new());

        let after: Vec<(u8, bool, f64)> =
            snapshot.edges.iter().map(|e| (e.congestion, e.congestion_info, e.itime)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn refresh_with_change_updates_measured_and_imputed_edges() {
        let mut snapshot = chain_snapshot();
        let mut measurements = HashMap::new();
        measurements.insert(1, CongestionMeasurement { way_id: 1, date: 1, actual: 2, predicted: 2 });
        initial_build(&mut snapshot, &measurements);
        let itime_before = snapshot.edges[2].itime;

        let mut changed = HashMap::new();
        changed.insert(1, CongestionMeasurement { way_id: 1, date: 2, actual: 5, predicted: 5 });
        refresh(&mut snapshot, &changed);

        assert_eq!(snapshot.edges[0].congestion, 5);
        assert!(snapshot.edges[2].itime >= itime_before);
    }
}
