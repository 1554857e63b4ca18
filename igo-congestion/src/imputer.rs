use igo_graph::{Edge, GraphSnapshot, NodeId};

/// Number of fixed relaxation rounds (spec.md §4.6: "exactly 6 rounds,
/// fixed, not until convergence").
const ROUNDS: usize = 6;

/// Congestion imputer (C6): propagates congestion from measured edges to
/// unmeasured neighbors via a fixed 6-round neighborhood-average
/// relaxation, then defaults any still-unmeasured edge to `1`.
///
/// Node iteration order is ascending `NodeId` within each round. This
/// resolves spec.md §4.6's "ordering note": the original Python iterates
/// `graph.nodes.items()`, a dict that preserves node insertion order; the
/// deterministic analog chosen here is ascending dense node id (documented
/// in `DESIGN.md`).
///
/// Grounded line-for-line on `igo.py::_build_igraph`'s imputation loop,
/// including the floor-division average and the `max(1, avg - 1)` /
/// `max(1, avg)` asymmetry between incoming and outgoing edges.
pub fn impute(snapshot: &mut GraphSnapshot) {
    let n_nodes = snapshot.nodes.len();
    let (edges, out_adj, in_adj) = snapshot.edges_mut_with_adjacency();
    run_rounds(n_nodes, edges, out_adj, in_adj);
}

fn run_rounds(n_nodes: usize, edges: &mut [Edge], out_adj: &[Vec<usize>], in_adj: &[Vec<usize>]) {
    for _round in 0..ROUNDS {
        for node in 0..n_nodes as NodeId {
            relax_node(node, edges, out_adj, in_adj);
        }
    }
    for edge in edges.iter_mut() {
        if edge.congestion == 0 {
            // Isolated streets with no measured or propagated congestion
            // after 6 rounds are assumed fluid.
            edge.congestion = 1;
        }
    }
}

fn relax_node(node: NodeId, edges: &mut [Edge], out_adj: &[Vec<usize>], in_adj: &[Vec<usize>]) {
    let incident = in_adj[node as usize].iter().chain(out_adj[node as usize].iter());
    let (sum, count) = incident.fold((0u32, 0u32), |(sum, count), &idx| {
        let congestion = edges[idx].congestion;
        if congestion > 0 {
            (sum + congestion as u32, count + 1)
        } else {
            (sum, count)
        }
    });
    if count == 0 {
        return;
    }
    let average = sum / count;

    for &idx in &in_adj[node as usize] {
        if edges[idx].congestion == 0 {
            edges[idx].congestion = average.saturating_sub(1).max(1) as u8;
        }
    }
    for &idx in &out_adj[node as usize] {
        if edges[idx].congestion == 0 {
            edges[idx].congestion = average.max(1) as u8;
        }
    }
}
