//! Read-only adjacency snapshot consumed by the analytics engines.
//!
//! An [`AdjacencyView`] is a value copy of a graph's edges taken at one point
//! in time. The engines in `collabgraph-metrics` read only this type, never a
//! [`GraphStore`](crate::GraphStore), so they work the same over either
//! backend and can run concurrently on independent snapshots.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::GraphError;
use crate::store::{GraphStore, ListGraph, check_new_edge};

/// Outgoing and incoming weighted neighbor lists for every vertex.
///
/// Neighbor lists are sorted by ascending neighbor index.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AdjacencyView {
    out_adj: Vec<Vec<(usize, f64)>>,
    in_adj: Vec<Vec<(usize, f64)>>,
    edge_count: usize,
}

impl AdjacencyView {
    /// Snapshot from an outgoing adjacency list (`list[u][v] = weight`),
    /// such as one returned by [`GraphStore::adjacency_list`].
    ///
    /// Every entry is checked like [`GraphStore::add_edge`] would check it.
    ///
    /// # Errors
    ///
    /// The first out-of-range target, self-loop, or non-positive weight.
    pub fn from_adjacency_list(list: &[BTreeMap<usize, f64>]) -> Result<Self, GraphError> {
        for (u, row) in list.iter().enumerate() {
            for (&v, &w) in row {
                check_new_edge(u, v, w, list.len())?;
            }
        }
        Ok(Self::from_checked(list))
    }

    /// Snapshot from a list that already satisfies the graph invariants.
    pub(crate) fn from_checked(list: &[BTreeMap<usize, f64>]) -> Self {
        let n = list.len();
        let mut out_adj = Vec::with_capacity(n);
        let mut in_adj = vec![Vec::new(); n];
        let mut edge_count = 0;

        for (u, row) in list.iter().enumerate() {
            let mut out = Vec::with_capacity(row.len());
            for (&v, &w) in row {
                out.push((v, w));
                // Sources are visited in ascending order, so in-lists stay sorted.
                in_adj[v].push((u, w));
            }
            edge_count += out.len();
            out_adj.push(out);
        }

        Self {
            out_adj,
            in_adj,
            edge_count,
        }
    }

    /// Snapshot of raw `(u, v, weight)` triples on `vertex_count` vertices.
    ///
    /// Triples go through the same validation as [`GraphStore::add_edge`];
    /// a repeated pair keeps the weight of its last occurrence.
    ///
    /// # Errors
    ///
    /// The first validation error encountered.
    pub fn from_edges(vertex_count: usize, edges: &[(usize, usize, f64)]) -> Result<Self, GraphError> {
        Ok(ListGraph::from_edges(vertex_count, edges)?.adjacency_view())
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.out_adj.len()
    }

    /// Number of directed edges.
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Whether the snapshot has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.out_adj.is_empty()
    }

    /// `out_adj[u]`: `(v, weight)` for every edge `u → v`.
    #[must_use]
    pub fn out_adj(&self) -> &[Vec<(usize, f64)>] {
        &self.out_adj
    }

    /// `in_adj[v]`: `(u, weight)` for every edge `u → v`.
    #[must_use]
    pub fn in_adj(&self) -> &[Vec<(usize, f64)>] {
        &self.in_adj
    }

    /// Every edge as `(source, target, weight)`, ordered by source then target.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.out_adj
            .iter()
            .enumerate()
            .flat_map(|(u, row)| row.iter().map(move |&(v, w)| (u, v, w)))
    }

    /// BLAKE3 fingerprint of the vertex count and edge set.
    ///
    /// Two snapshots with the same hash hold the same graph, so results
    /// computed for one can be reused for the other.
    #[must_use]
    pub fn content_hash(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(self.vertex_count() as u64).to_le_bytes());
        for (u, v, w) in self.edges() {
            hasher.update(&(u as u64).to_le_bytes());
            hasher.update(&(v as u64).to_le_bytes());
            hasher.update(&w.to_bits().to_le_bytes());
        }
        format!("blake3:{}", hasher.finalize().to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MatrixGraph;

    #[test]
    fn in_and_out_lists_mirror_each_other() {
        let view = AdjacencyView::from_edges(4, &[(0, 1, 2.0), (1, 2, 3.0), (2, 3, 1.0), (0, 2, 0.5)])
            .expect("build");
        assert_eq!(view.vertex_count(), 4);
        assert_eq!(view.edge_count(), 4);
        assert_eq!(view.out_adj()[0], vec![(1, 2.0), (2, 0.5)]);
        assert_eq!(view.in_adj()[2], vec![(0, 0.5), (1, 3.0)]);
        assert!(view.in_adj()[0].is_empty());
    }

    #[test]
    fn edges_iterate_in_source_then_target_order() {
        let view = AdjacencyView::from_edges(3, &[(2, 0, 1.0), (0, 2, 1.0), (0, 1, 1.0)]).expect("build");
        let edges: Vec<_> = view.edges().map(|(u, v, _)| (u, v)).collect();
        assert_eq!(edges, vec![(0, 1), (0, 2), (2, 0)]);
    }

    #[test]
    fn from_edges_validates() {
        assert!(matches!(
            AdjacencyView::from_edges(2, &[(0, 2, 1.0)]),
            Err(GraphError::VertexOutOfRange { .. })
        ));
        assert!(matches!(
            AdjacencyView::from_edges(2, &[(1, 1, 1.0)]),
            Err(GraphError::SelfLoop { .. })
        ));
        assert!(matches!(
            AdjacencyView::from_edges(2, &[(0, 1, 0.0)]),
            Err(GraphError::InvalidWeight { .. })
        ));
    }

    #[test]
    fn adjacency_list_entries_are_validated() {
        let err = AdjacencyView::from_adjacency_list(&[BTreeMap::from([(5, 1.0)])])
            .expect_err("target out of range");
        assert!(matches!(err, GraphError::VertexOutOfRange { vertex: 5, count: 1 }));

        let err = AdjacencyView::from_adjacency_list(&[BTreeMap::new(), BTreeMap::from([(1, 1.0)])])
            .expect_err("self loop");
        assert!(matches!(err, GraphError::SelfLoop { vertex: 1 }));

        for weight in [0.0, -2.0, f64::NAN] {
            let err = AdjacencyView::from_adjacency_list(&[BTreeMap::from([(1, weight)]), BTreeMap::new()])
                .expect_err("bad weight");
            assert!(matches!(err, GraphError::InvalidWeight { from: 0, to: 1, .. }));
        }
    }

    #[test]
    fn adjacency_list_round_trips_through_store() {
        let g = ListGraph::from_edges(3, &[(0, 2, 1.5), (2, 1, 4.0)]).expect("build");
        let view = AdjacencyView::from_adjacency_list(&g.adjacency_list()).expect("valid list");
        assert_eq!(view, g.adjacency_view());
    }

    #[test]
    fn backends_produce_identical_views() {
        let edges = [(0, 3, 1.0), (3, 0, 2.0), (1, 2, 4.0), (2, 1, 0.25)];
        let list = ListGraph::from_edges(4, &edges).expect("list");
        let matrix = MatrixGraph::from_edges(4, &edges).expect("matrix");
        assert_eq!(list.adjacency_view(), matrix.adjacency_view());
        assert_eq!(
            list.adjacency_view().content_hash(),
            matrix.adjacency_view().content_hash()
        );
    }

    #[test]
    fn content_hash_tracks_weights_and_isolated_vertices() {
        let a = AdjacencyView::from_edges(3, &[(0, 1, 1.0)]).expect("a");
        let b = AdjacencyView::from_edges(3, &[(0, 1, 2.0)]).expect("b");
        let c = AdjacencyView::from_edges(4, &[(0, 1, 1.0)]).expect("c");
        assert!(a.content_hash().starts_with("blake3:"));
        assert_ne!(a.content_hash(), b.content_hash());
        assert_ne!(a.content_hash(), c.content_hash());
        assert_eq!(a.content_hash(), a.clone().content_hash());
    }

    #[test]
    fn empty_view() {
        let view = AdjacencyView::from_edges(0, &[]).expect("empty");
        assert!(view.is_empty());
        assert_eq!(view.edges().count(), 0);
    }
}
