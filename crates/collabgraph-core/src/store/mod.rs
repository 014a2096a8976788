//! Directed, weighted, simple graph storage.
//!
//! # Overview
//!
//! [`GraphStore`] is the capability contract every graph backend satisfies.
//! Two backends implement it:
//!
//! - [`ListGraph`] — per-vertex ordered maps of outgoing and incoming edges.
//!   Queries cost O(log degree); memory is O(V + E).
//! - [`MatrixGraph`] — dense `n × n` weight matrix with `0.0` meaning "no
//!   edge". Edge lookups are O(1), degree and connectivity scans are O(n),
//!   memory is O(V²).
//!
//! For the same sequence of operations both backends answer every query
//! identically, down to the ordering of adjacency snapshots and the bytes of
//! a GEXF export. Callers should depend on the trait, not a concrete type.
//!
//! # Invariants
//!
//! - every stored edge has `0 <= u, v < vertex_count()` and `u != v`;
//! - every stored weight is finite and strictly positive;
//! - `edge_count()` equals the number of stored `(u, v)` entries;
//! - `vertex_count()` never shrinks.
//!
//! # Validation policy
//!
//! Out-of-range vertices, self-loops, non-positive weights and weight lookups
//! on missing edges fail with a [`GraphError`]. Self-loops are rejected with
//! [`GraphError::SelfLoop`] by both backends.

mod list;
mod matrix;

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::GraphError;
use crate::gexf;
use crate::view::AdjacencyView;

pub use list::ListGraph;
pub use matrix::MatrixGraph;

/// Weight given to vertices that exist when a graph is constructed.
pub const INITIAL_VERTEX_WEIGHT: f64 = 1.0;

/// Weight given to vertices appended with [`GraphStore::add_vertex`].
pub const ADDED_VERTEX_WEIGHT: f64 = 0.0;

/// Capability contract shared by the list and matrix backends.
pub trait GraphStore {
    /// Number of vertices.
    fn vertex_count(&self) -> usize;

    /// Number of stored directed edges.
    fn edge_count(&self) -> usize;

    /// Whether the edge `u → v` is stored.
    ///
    /// # Errors
    ///
    /// [`GraphError::VertexOutOfRange`] if either endpoint is invalid.
    fn has_edge(&self, u: usize, v: usize) -> Result<bool, GraphError>;

    /// Weight of the edge `u → v`.
    ///
    /// # Errors
    ///
    /// [`GraphError::EdgeNotFound`] if the edge is absent, or
    /// [`GraphError::VertexOutOfRange`].
    fn edge_weight(&self, u: usize, v: usize) -> Result<f64, GraphError>;

    /// Insert the edge `u → v`, or update its weight if it already exists.
    ///
    /// Returns `true` when a new edge was stored and `false` when only the
    /// weight of an existing edge changed (the edge count is unchanged).
    ///
    /// # Errors
    ///
    /// [`GraphError::SelfLoop`], [`GraphError::InvalidWeight`], or
    /// [`GraphError::VertexOutOfRange`]. On error the graph is unchanged.
    fn add_edge(&mut self, u: usize, v: usize, weight: f64) -> Result<bool, GraphError>;

    /// Delete the edge `u → v`. Returns whether an edge was removed.
    ///
    /// # Errors
    ///
    /// [`GraphError::VertexOutOfRange`].
    fn remove_edge(&mut self, u: usize, v: usize) -> Result<bool, GraphError>;

    /// Number of edges ending at `v`.
    ///
    /// # Errors
    ///
    /// [`GraphError::VertexOutOfRange`].
    fn in_degree(&self, v: usize) -> Result<usize, GraphError>;

    /// Number of edges starting at `v`.
    ///
    /// # Errors
    ///
    /// [`GraphError::VertexOutOfRange`].
    fn out_degree(&self, v: usize) -> Result<usize, GraphError>;

    /// Set the scalar annotation of vertex `v`.
    ///
    /// # Errors
    ///
    /// [`GraphError::VertexOutOfRange`].
    fn set_vertex_weight(&mut self, v: usize, weight: f64) -> Result<(), GraphError>;

    /// Scalar annotation of vertex `v`.
    ///
    /// # Errors
    ///
    /// [`GraphError::VertexOutOfRange`].
    fn vertex_weight(&self, v: usize) -> Result<f64, GraphError>;

    /// Weak connectivity: every vertex is reachable from vertex 0 when edge
    /// direction is ignored. The empty graph is connected.
    fn is_connected(&self) -> bool;

    /// Append a vertex with weight [`ADDED_VERTEX_WEIGHT`] and no edges.
    ///
    /// Returns the new vertex index.
    ///
    /// # Errors
    ///
    /// [`GraphError::CapacityExceeded`] if storage cannot grow; the graph is
    /// left exactly as it was.
    fn add_vertex(&mut self) -> Result<usize, GraphError>;

    /// Owned copy of the outgoing adjacency: `list[u][v] = weight`.
    fn adjacency_list(&self) -> Vec<BTreeMap<usize, f64>>;

    /// Owned copy of the adjacency matrix (`0.0` where no edge exists).
    fn adjacency_matrix(&self) -> Vec<Vec<f64>>;

    /// Create or overwrite the weight of `u → v`.
    ///
    /// # Errors
    ///
    /// Same validation as [`GraphStore::add_edge`].
    fn set_edge_weight(&mut self, u: usize, v: usize, weight: f64) -> Result<(), GraphError> {
        self.add_edge(u, v, weight).map(|_| ())
    }

    /// Whether the graph has `n * (n - 1)` edges (every ordered pair).
    fn is_complete(&self) -> bool {
        let n = self.vertex_count();
        self.edge_count() == n * n.saturating_sub(1)
    }

    /// Whether the graph has no edges.
    fn is_empty_graph(&self) -> bool {
        self.edge_count() == 0
    }

    /// Whether `v` is a successor of `u` (edge `u → v`).
    ///
    /// # Errors
    ///
    /// [`GraphError::VertexOutOfRange`].
    fn is_successor(&self, u: usize, v: usize) -> Result<bool, GraphError> {
        self.has_edge(u, v)
    }

    /// Whether `v` is a predecessor of `u` (edge `v → u`).
    ///
    /// # Errors
    ///
    /// [`GraphError::VertexOutOfRange`].
    fn is_predecessor(&self, u: usize, v: usize) -> Result<bool, GraphError> {
        self.has_edge(v, u)
    }

    /// Whether `u1 → v1` and `u2 → v2` both exist and leave the same vertex
    /// towards different targets.
    ///
    /// # Errors
    ///
    /// [`GraphError::VertexOutOfRange`] for any invalid endpoint.
    fn is_divergent(&self, u1: usize, v1: usize, u2: usize, v2: usize) -> Result<bool, GraphError> {
        let first = self.has_edge(u1, v1)?;
        let second = self.has_edge(u2, v2)?;
        Ok(u1 == u2 && v1 != v2 && first && second)
    }

    /// Whether `u1 → v1` and `u2 → v2` both exist and enter the same vertex
    /// from different sources.
    ///
    /// # Errors
    ///
    /// [`GraphError::VertexOutOfRange`] for any invalid endpoint.
    fn is_convergent(
        &self,
        u1: usize,
        v1: usize,
        u2: usize,
        v2: usize,
    ) -> Result<bool, GraphError> {
        let first = self.has_edge(u1, v1)?;
        let second = self.has_edge(u2, v2)?;
        Ok(v1 == v2 && u1 != u2 && first && second)
    }

    /// Whether `x` is an endpoint of the pair `(u, v)`.
    ///
    /// # Errors
    ///
    /// [`GraphError::VertexOutOfRange`] for any invalid vertex.
    fn is_incident(&self, u: usize, v: usize, x: usize) -> Result<bool, GraphError> {
        let n = self.vertex_count();
        check_vertex(u, n)?;
        check_vertex(v, n)?;
        check_vertex(x, n)?;
        Ok(x == u || x == v)
    }

    /// Read-only snapshot for the analytics engines.
    fn adjacency_view(&self) -> AdjacencyView {
        AdjacencyView::from_checked(&self.adjacency_list())
    }

    /// Write the graph as GEXF 1.2 to `path`.
    ///
    /// # Errors
    ///
    /// [`GraphError::Io`] if the file cannot be created or written.
    fn export_gexf(&self, path: &Path) -> Result<(), GraphError> {
        let n = self.vertex_count();
        let mut weights = Vec::with_capacity(n);
        for v in 0..n {
            weights.push(self.vertex_weight(v)?);
        }
        gexf::write_file(path, &weights, &self.adjacency_list(), None)
    }
}

/// Reject indices outside `[0, count)`.
pub(crate) const fn check_vertex(vertex: usize, count: usize) -> Result<(), GraphError> {
    if vertex < count {
        Ok(())
    } else {
        Err(GraphError::VertexOutOfRange { vertex, count })
    }
}

/// Validation shared by every edge insertion path.
pub(crate) fn check_new_edge(u: usize, v: usize, weight: f64, count: usize) -> Result<(), GraphError> {
    check_vertex(u, count)?;
    check_vertex(v, count)?;
    if u == v {
        return Err(GraphError::SelfLoop { vertex: u });
    }
    if !weight.is_finite() || weight <= 0.0 {
        return Err(GraphError::InvalidWeight {
            from: u,
            to: v,
            weight,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Exercises the contract through `&mut dyn GraphStore` so both backends
    // run the same assertions.
    fn contract(g: &mut dyn GraphStore) {
        assert_eq!(g.vertex_count(), 4);
        assert!(g.is_empty_graph());

        assert!(g.add_edge(0, 1, 2.0).expect("add"));
        assert!(g.add_edge(1, 2, 3.0).expect("add"));
        assert!(g.add_edge(2, 3, 1.0).expect("add"));
        assert_eq!(g.edge_count(), 3);

        // Re-adding updates weight, not count.
        assert!(!g.add_edge(0, 1, 7.5).expect("re-add"));
        assert_eq!(g.edge_count(), 3);
        assert!((g.edge_weight(0, 1).expect("weight") - 7.5).abs() < f64::EPSILON);

        assert!(g.is_successor(0, 1).expect("succ"));
        assert!(g.is_predecessor(1, 0).expect("pred"));
        assert!(!g.is_predecessor(0, 1).expect("pred"));

        g.add_edge(0, 2, 1.0).expect("add");
        assert!(g.is_divergent(0, 1, 0, 2).expect("div"));
        assert!(!g.is_divergent(0, 1, 1, 2).expect("div"));
        assert!(g.is_convergent(0, 2, 1, 2).expect("conv"));
        assert!(!g.is_convergent(0, 1, 0, 2).expect("conv"));
        assert!(g.is_incident(0, 1, 1).expect("inc"));
        assert!(!g.is_incident(0, 1, 3).expect("inc"));

        assert_eq!(g.out_degree(0).expect("deg"), 2);
        assert_eq!(g.in_degree(2).expect("deg"), 2);

        assert!(g.remove_edge(0, 2).expect("remove"));
        assert!(!g.remove_edge(0, 2).expect("remove absent"));
        assert_eq!(g.edge_count(), 3);

        assert!(g.is_connected());
        assert!(!g.is_complete());
    }

    #[test]
    fn list_backend_satisfies_contract() {
        contract(&mut ListGraph::new(4));
    }

    #[test]
    fn matrix_backend_satisfies_contract() {
        contract(&mut MatrixGraph::new(4));
    }

    #[test]
    fn self_loop_rejected_by_both_backends() {
        let mut list = ListGraph::new(2);
        let mut matrix = MatrixGraph::new(2);
        assert!(matches!(
            list.add_edge(1, 1, 1.0),
            Err(GraphError::SelfLoop { vertex: 1 })
        ));
        assert!(matches!(
            matrix.add_edge(1, 1, 1.0),
            Err(GraphError::SelfLoop { vertex: 1 })
        ));
        assert_eq!(list.edge_count(), 0);
        assert_eq!(matrix.edge_count(), 0);
    }

    #[test]
    fn check_new_edge_rejects_bad_weights() {
        for weight in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(
                    check_new_edge(0, 1, weight, 2),
                    Err(GraphError::InvalidWeight { .. })
                ),
                "weight {weight} should be rejected"
            );
        }
        assert!(check_new_edge(0, 1, 0.5, 2).is_ok());
        assert!(matches!(
            check_new_edge(0, 2, 1.0, 2),
            Err(GraphError::VertexOutOfRange { vertex: 2, count: 2 })
        ));
    }

    #[test]
    fn empty_graph_is_connected_and_complete() {
        let g = ListGraph::new(0);
        assert!(g.is_connected());
        assert!(g.is_complete());
        let g = MatrixGraph::new(0);
        assert!(g.is_connected());
        assert!(g.is_complete());
    }
}
