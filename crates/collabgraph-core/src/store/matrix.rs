use std::collections::{BTreeMap, VecDeque};

use super::{ADDED_VERTEX_WEIGHT, GraphStore, INITIAL_VERTEX_WEIGHT, check_new_edge, check_vertex};
use crate::error::GraphError;

/// Sentinel stored in the matrix where no edge exists.
const NO_EDGE: f64 = 0.0;

/// Dense backend: an `n × n` weight matrix, `0.0` meaning "no edge".
///
/// Valid because stored weights are always strictly positive.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MatrixGraph {
    rows: Vec<Vec<f64>>,
    vertex_weights: Vec<f64>,
    edge_count: usize,
}

impl MatrixGraph {
    /// Graph with `vertex_count` isolated vertices of weight `1.0`.
    #[must_use]
    pub fn new(vertex_count: usize) -> Self {
        Self {
            rows: vec![vec![NO_EDGE; vertex_count]; vertex_count],
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

    fn check_pair(&self, u: usize, v: usize) -> Result<(), GraphError> {
        let n = self.vertex_count();
        check_vertex(u, n)?;
        check_vertex(v, n)
    }

    #[allow(clippy::float_cmp)]
    fn is_edge(&self, u: usize, v: usize) -> bool {
        self.rows[u][v] != NO_EDGE
    }
}

impl GraphStore for MatrixGraph {
    fn vertex_count(&self) -> usize {
        self.vertex_weights.len()
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn has_edge(&self, u: usize, v: usize) -> Result<bool, GraphError> {
        self.check_pair(u, v)?;
        Ok(self.is_edge(u, v))
    }

    fn edge_weight(&self, u: usize, v: usize) -> Result<f64, GraphError> {
        self.check_pair(u, v)?;
        if self.is_edge(u, v) {
            Ok(self.rows[u][v])
        } else {
            Err(GraphError::EdgeNotFound { from: u, to: v })
        }
    }

    fn add_edge(&mut self, u: usize, v: usize, weight: f64) -> Result<bool, GraphError> {
        check_new_edge(u, v, weight, self.vertex_count())?;
        let is_new = !self.is_edge(u, v);
        self.rows[u][v] = weight;
        if is_new {
            self.edge_count += 1;
        }
        Ok(is_new)
    }

    fn remove_edge(&mut self, u: usize, v: usize) -> Result<bool, GraphError> {
        self.check_pair(u, v)?;
        if !self.is_edge(u, v) {
            return Ok(false);
        }
        self.rows[u][v] = NO_EDGE;
        self.edge_count -= 1;
        Ok(true)
    }

    fn in_degree(&self, v: usize) -> Result<usize, GraphError> {
        check_vertex(v, self.vertex_count())?;
        Ok((0..self.vertex_count()).filter(|&u| self.is_edge(u, v)).count())
    }

    fn out_degree(&self, v: usize) -> Result<usize, GraphError> {
        check_vertex(v, self.vertex_count())?;
        Ok((0..self.vertex_count()).filter(|&w| self.is_edge(v, w)).count())
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
            for w in 0..n {
                if !visited[w] && (self.is_edge(u, w) || self.is_edge(w, u)) {
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

        // Reserve the new column in every row, the new row, and the weight
        // slot before mutating, so a failure leaves the matrix square and
        // consistent with `vertex_weights`.
        self.vertex_weights.try_reserve(1).map_err(overflow)?;
        self.rows.try_reserve(1).map_err(overflow)?;
        for row in &mut self.rows {
            row.try_reserve(1).map_err(overflow)?;
        }
        let mut new_row = Vec::new();
        new_row.try_reserve_exact(index + 1).map_err(overflow)?;
        new_row.resize(index + 1, NO_EDGE);

        for row in &mut self.rows {
            row.push(NO_EDGE);
        }
        self.rows.push(new_row);
        self.vertex_weights.push(ADDED_VERTEX_WEIGHT);
        Ok(index)
    }

    fn adjacency_list(&self) -> Vec<BTreeMap<usize, f64>> {
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .filter(|&(_, &w)| w > NO_EDGE)
                    .map(|(v, &w)| (v, w))
                    .collect()
            })
            .collect()
    }

    fn adjacency_matrix(&self) -> Vec<Vec<f64>> {
        self.rows.clone()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
