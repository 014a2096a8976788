use std::collections::BTreeSet;

use collabgraph_core::AdjacencyView;
use tracing::instrument;

use super::undirected_neighbors;

/// Mean local clustering coefficient over the undirected view.
///
/// For a vertex with `k >= 2` neighbors the local coefficient is the number
/// of neighbor pairs that are themselves connected, over `k(k-1)/2`.
/// Vertices with fewer than two neighbors contribute `0.0` but still count
/// in the denominator, so the mean is always taken over all `n` vertices.
/// An empty graph scores `0.0`.
#[must_use]
#[instrument(skip(view), fields(vertices = view.vertex_count()))]
pub fn average_clustering_coefficient(view: &AdjacencyView) -> f64 {
    average_over(&undirected_neighbors(view))
}

fn average_over(neighbors: &[BTreeSet<usize>]) -> f64 {
    let n = neighbors.len();
    if n == 0 {
        return 0.0;
    }

    let total: f64 = neighbors
        .iter()
        .map(|around| local_coefficient(neighbors, around))
        .sum();
    total / n as f64
}

fn local_coefficient(neighbors: &[BTreeSet<usize>], around: &BTreeSet<usize>) -> f64 {
    let k = around.len();
    if k < 2 {
        return 0.0;
    }

    let members: Vec<usize> = around.iter().copied().collect();
    let mut links = 0usize;
    for (i, &a) in members.iter().enumerate() {
        for &b in &members[i + 1..] {
            if neighbors[a].contains(&b) {
                links += 1;
            }
        }
    }

    let possible = k * (k - 1) / 2;
    links as f64 / possible as f64
}
