use igo_graph::Edge;

/// Speed assumed when an edge carries no `maxspeed` data (spec.md §4.7).
const DEFAULT_SPEED_KMH: f64 = 30.0;

/// Fixed cost of changing streets — turning, crossing an intersection, or
/// waiting for a light (spec.md §4.7).
const TURN_PENALTY_SECONDS: f64 = 5.0;

/// Congestion level at which a street is blocked/closed.
const BLOCKED_CONGESTION: u8 = 6;

/// Cost builder (C7): derives `itime` from length, speed, and congestion.
///
/// `base_seconds = length_meters / speed_kmh` mixes meters and km/h
/// without unit conversion, producing a quantity in `m*h/km`, not
/// seconds — and the `+5` turn penalty is then added as though it were
/// seconds anyway. This is preserved verbatim per spec.md §9's explicit
/// instruction: the downstream congestion multipliers and the turn
/// penalty constant were tuned against this exact (mixed-unit) quantity,
/// so "fixing" the units here would silently change routing behavior.
/// Grounded line-for-line on `igo.py::_get_igraph`.
pub fn build_costs(edges: &mut [Edge]) {
    for edge in edges.iter_mut() {
        build_itime(edge);
    }
}

fn build_itime(edge: &mut Edge) {
    let speed_kmh = edge.maxspeed_kmh.unwrap_or(DEFAULT_SPEED_KMH);
    let base_seconds = edge.length_m / speed_kmh;

    edge.itime = if edge.congestion == BLOCKED_CONGESTION {
        f64::INFINITY
    } else {
        let multiplier = 1.0 - (edge.congestion as f64 - 1.0) / 6.0;
        base_seconds / multiplier + TURN_PENALTY_SECONDS
    };
}
