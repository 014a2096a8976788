use std::collections::{BTreeMap, VecDeque};

use super::{ADDED_VERTEX_WEIGHT, GraphStore, INITIAL_VERTEX_WEIGHT, check_new_edge, check_vertex};
use crate::error::GraphError;

/// Sparse backend: one ordered map of outgoing and one of incoming edges per
/// vertex.
///
/// Neighbor maps are keyed by vertex index, so iteration order is ascending
/// and matches the row scan of [`MatrixGraph`](super::MatrixGraph).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListGraph {
    out_edges: Vec<BTreeMap<usize, f64>>,
    in_edges: Vec<BTreeMap<usize, f64>>,
    vertex_weights: Vec<f64>,
    edge_count: usize,
}

impl ListGraph {
    /// Graph with `vertex_count` isolated vertices of weight `1.0`.
    #[must_use]
    pub fn new(vertex_count: usize) -> Self {
        Self {
            out_edges: vec![BTreeMap::new(); vertex_count],
            in_edges: vec![BTreeMap::new(); vertex_count],
            vertex_weights: vec![INITIAL_VERTEX_WEIGHT; vertex_count],
            edge_count: 0,
        }
    }

    /// Build from `(u, v, weight)` triples. Later duplicates overwrite the
    /// weight of earlier ones.
    ///
    /// # Errors
    ///
    /// The first validation error raised by [`GraphStore::add_edge`].
    pub fn from_edges(vertex_count: usize, edges: &[(usize, usize, f64)]) -> Result<Self, GraphError> {
        let mut graph = Self::new(vertex_count);
        for &(u, v, w) in edges {
            graph.add_edge(u, v, w)?;
        }
        Ok(graph)
    }

    /// Outgoing neighbors of `u` with weights, ascending by neighbor.
    ///
    /// # Errors
    ///
    /// [`GraphError::VertexOutOfRange`].
    pub fn successors(&self, u: usize) -> Result<impl Iterator<Item = (usize, f64)> + '_, GraphError> {
        check_vertex(u, self.vertex_count())?;
        Ok(self.out_edges[u].iter().map(|(&v, &w)| (v, w)))
    }

    /// Incoming neighbors of `v` with weights, ascending by neighbor.
    ///
    /// # Errors
    ///
    /// [`GraphError::VertexOutOfRange`].
    pub fn predecessors(&self, v: usize) -> Result<impl Iterator<Item = (usize, f64)> + '_, GraphError> {
        check_vertex(v, self.vertex_count())?;
        Ok(self.in_edges[v].iter().map(|(&u, &w)| (u, w)))
    }

    fn check_pair(&self, u: usize, v: usize) -> Result<(), GraphError> {
        let n = self.vertex_count();
        check_vertex(u, n)?;
        check_vertex(v, n)
    }
}

impl GraphStore for ListGraph {
    fn vertex_count(&self) -> usize {
        self.vertex_weights.len()
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn has_edge(&self, u: usize, v: usize) -> Result<bool, GraphError> {
        self.check_pair(u, v)?;
        Ok(self.out_edges[u].contains_key(&v))
    }

    fn edge_weight(&self, u: usize, v: usize) -> Result<f64, GraphError> {
        self.check_pair(u, v)?;
        self.out_edges[u]
            .get(&v)
            .copied()
            .ok_or(GraphError::EdgeNotFound { from: u, to: v })
    }

    fn add_edge(&mut self, u: usize, v: usize, weight: f64) -> Result<bool, GraphError> {
        check_new_edge(u, v, weight, self.vertex_count())?;
        let is_new = self.out_edges[u].insert(v, weight).is_none();
        self.in_edges[v].insert(u, weight);
        if is_new {
            self.edge_count += 1;
        }
        Ok(is_new)
    }

    fn remove_edge(&mut self, u: usize, v: usize) -> Result<bool, GraphError> {
        self.check_pair(u, v)?;
        if self.out_edges[u].remove(&v).is_none() {
            return Ok(false);
        }
        self.in_edges[v].remove(&u);
        self.edge_count -= 1;
        Ok(true)
    }

    fn in_degree(&self, v: usize) -> Result<usize, GraphError> {
        check_vertex(v, self.vertex_count())?;
        Ok(self.in_edges[v].len())
    }

    fn out_degree(&self, v: usize) -> Result<usize, GraphError> {
        check_vertex(v, self.vertex_count())?;
        Ok(self.out_edges[v].len())
    }

    fn set_vertex_weight(&mut self, v: usize, weight: f64) -> Result<(), GraphError> {
        check_vertex(v, self.vertex_count())?;
        self.vertex_weights[v] = weight;
        Ok(())
    }

    fn vertex_weight(&self, v: usize) -> Result<f64, GraphError> {
        check_vertex(v, self.vertex_count())?;
        Ok(self.vertex_weights[v])
    }

    fn is_connected(&self) -> bool {
        let n = self.vertex_count();
        if n == 0 {
            return true;
        }

        let mut visited = vec![false; n];
        let mut queue = VecDeque::from([0]);
        visited[0] = true;
        let mut reached = 0usize;

        while let Some(u) = queue.pop_front() {
            reached += 1;
            // Follow both directions: weak connectivity.
            for &w in self.out_edges[u].keys().chain(self.in_edges[u].keys()) {
                if !visited[w] {
                    visited[w] = true;
                    queue.push_back(w);
                }
            }
        }

        reached == n
    }

    fn add_vertex(&mut self) -> Result<usize, GraphError> {
        let index = self.vertex_count();
        let overflow = |_| GraphError::CapacityExceeded { count: index };

        // Reserve everything before touching any state.
        self.vertex_weights.try_reserve(1).map_err(overflow)?;
        self.out_edges.try_reserve(1).map_err(overflow)?;
        self.in_edges.try_reserve(1).map_err(overflow)?;

        self.vertex_weights.push(ADDED_VERTEX_WEIGHT);
        self.out_edges.push(BTreeMap::new());
        self.in_edges.push(BTreeMap::new());
        Ok(index)
    }

    fn adjacency_list(&self) -> Vec<BTreeMap<usize, f64>> {
        self.out_edges.clone()
    }

    fn adjacency_matrix(&self) -> Vec<Vec<f64>> {
        let n = self.vertex_count();
        let mut matrix = vec![vec![0.0; n]; n];
        for (u, row) in self.out_edges.iter().enumerate() {
            for (&v, &w) in row {
                matrix[u][v] = w;
            }
        }
        matrix
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
