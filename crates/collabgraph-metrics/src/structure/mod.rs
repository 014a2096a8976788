//! Whole-graph structure metrics: how dense and how cohesive is the
//! collaboration network, and do busy participants work with each other?
//!
//! Clustering looks at the graph as undirected: two participants are
//! neighbors if an edge exists in either direction. Assortativity keeps the
//! directed degree count, in plus out.

pub mod assortativity;
pub mod clustering;

use std::collections::BTreeSet;

use collabgraph_core::AdjacencyView;
use serde::Serialize;
use tracing::instrument;

pub use assortativity::{Assortativity, assortativity};
pub use clustering::average_clustering_coefficient;

/// Directed simple-graph density: `edges / (n · (n - 1))`, or `0.0` when
/// `n < 2`.
#[must_use]
pub fn density(vertex_count: usize, edge_count: usize) -> f64 {
    if vertex_count <= 1 {
        return 0.0;
    }
    let possible = vertex_count * (vertex_count - 1);
    edge_count as f64 / possible as f64
}

/// Headline structure numbers for one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructureSummary {
    pub vertex_count: usize,
    pub edge_count: usize,
    pub density: f64,
    pub average_clustering: f64,
    pub assortativity: f64,
}

/// Compute density, average clustering, and degree assortativity together.
#[must_use]
#[instrument(skip(view), fields(vertices = view.vertex_count()))]
pub fn structure_summary(view: &AdjacencyView) -> StructureSummary {
    StructureSummary {
        vertex_count: view.vertex_count(),
        edge_count: view.edge_count(),
        density: density(view.vertex_count(), view.edge_count()),
        average_clustering: average_clustering_coefficient(view),
        assortativity: assortativity(view).coefficient,
    }
}

/// Merged in- and out-neighbors of every vertex, self excluded.
pub(crate) fn undirected_neighbors(view: &AdjacencyView) -> Vec<BTreeSet<usize>> {
    let mut neighbors = vec![BTreeSet::new(); view.vertex_count()];
    for (u, v, _) in view.edges() {
        if u != v {
            neighbors[u].insert(v);
            neighbors[v].insert(u);
        }
    }
    neighbors
}
