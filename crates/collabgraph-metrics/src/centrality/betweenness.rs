//! Betweenness centrality via Brandes' algorithm.
//!
//! # Overview
//!
//! Betweenness centrality measures how often a vertex lies on shortest paths
//! between other pairs of vertices. In a collaboration graph, high-betweenness
//! participants are brokers: removing them would lengthen or cut the paths
//! between groups.
//!
//! # Algorithm
//!
//! Brandes (2001):
//!
//! 1. For each source `s`, compute shortest-path counts `σ` and predecessor
//!    lists, by BFS (unweighted) or Dijkstra (weighted).
//! 2. Accumulate dependencies `δ` in reverse discovery order (farthest first).
//! 3. `CB[w] += δ[w]` for every `w ≠ s`.
//!
//! Complexity: O(V·E) unweighted, O(V·E·log V) weighted.
//!
//! # Output
//!
//! Raw, directed, **not** normalized scores. Callers can divide by
//! `(n-1)(n-2)` for a `[0, 1]` scale.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use collabgraph_core::AdjacencyView;
use tracing::instrument;

use crate::scores::Scores;

pub use collabgraph_core::config::DEFAULT_TIE_TOLERANCE;

/// Unweighted betweenness: every edge has length 1.
#[must_use]
#[instrument(skip(view), fields(vertices = view.vertex_count()))]
pub fn betweenness_centrality(view: &AdjacencyView) -> Scores {
    let n = view.vertex_count();
    let mut cb = vec![0.0; n];

    for s in 0..n {
        // Stack: vertices in order of discovery (farthest popped first).
        let mut stack: Vec<usize> = Vec::with_capacity(n);
        let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut sigma = vec![0.0_f64; n];
        let mut dist: Vec<Option<usize>> = vec![None; n];
        sigma[s] = 1.0;
        dist[s] = Some(0);

        let mut queue = VecDeque::from([s]);
        while let Some(v) = queue.pop_front() {
            stack.push(v);
            let Some(dv) = dist[v] else { continue };

            for &(w, _) in &view.out_adj()[v] {
                if dist[w].is_none() {
                    dist[w] = Some(dv + 1);
                    queue.push_back(w);
                }
                if dist[w] == Some(dv + 1) {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
            }
        }

        accumulate(s, &mut stack, &predecessors, &sigma, &mut cb);
    }

    Scores::new(cb)
}

/// Weighted betweenness with edge length `1 / weight`: a heavier tie is a
/// shorter hop. Distances within [`DEFAULT_TIE_TOLERANCE`] count as equal.
#[must_use]
pub fn betweenness_centrality_weighted(view: &AdjacencyView) -> Scores {
    betweenness_centrality_weighted_with_tolerance(view, DEFAULT_TIE_TOLERANCE)
}

/// Weighted betweenness with a caller-supplied tie tolerance.
///
/// Two candidate distances to the same vertex whose difference is at most
/// `tolerance` are treated as the same shortest distance, so both paths
/// contribute to `σ`.
#[must_use]
#[instrument(skip(view), fields(vertices = view.vertex_count()))]
pub fn betweenness_centrality_weighted_with_tolerance(
    view: &AdjacencyView,
    tolerance: f64,
) -> Scores {
    let n = view.vertex_count();
    let mut cb = vec![0.0; n];

    for s in 0..n {
        let mut stack: Vec<usize> = Vec::with_capacity(n);
        let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut sigma = vec![0.0_f64; n];
        let mut dist = vec![f64::INFINITY; n];
        let mut settled = vec![false; n];
        sigma[s] = 1.0;
        dist[s] = 0.0;

        let mut heap = BinaryHeap::from([Frontier {
            dist: 0.0,
            vertex: s,
        }]);

        while let Some(Frontier { vertex: v, .. }) = heap.pop() {
            if settled[v] {
                continue;
            }
            settled[v] = true;
            stack.push(v);

            for &(w, weight) in &view.out_adj()[v] {
                if settled[w] {
                    continue;
                }
                let candidate = dist[v] + 1.0 / weight;
                if candidate < dist[w] - tolerance {
                    dist[w] = candidate;
                    sigma[w] = sigma[v];
                    predecessors[w].clear();
                    predecessors[w].push(v);
                    heap.push(Frontier {
                        dist: candidate,
                        vertex: w,
                    });
                } else if (candidate - dist[w]).abs() <= tolerance {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
            }
        }

        accumulate(s, &mut stack, &predecessors, &sigma, &mut cb);
    }

    Scores::new(cb)
}

/// Reverse pass shared by both variants: pops `stack` farthest-first and
/// adds each vertex's dependency on `s` into `cb`.
fn accumulate(
    s: usize,
    stack: &mut Vec<usize>,
    predecessors: &[Vec<usize>],
    sigma: &[f64],
    cb: &mut [f64],
) {
    let mut delta = vec![0.0_f64; cb.len()];
    while let Some(w) = stack.pop() {
        if sigma[w] > 0.0 {
            for &v in &predecessors[w] {
                delta[v] += (sigma[v] / sigma[w]) * (1.0 + delta[w]);
            }
        }
        if w != s {
            cb[w] += delta[w];
        }
    }
}

/// Min-heap entry for Dijkstra.
#[derive(Debug, Clone, Copy)]
struct Frontier {
    dist: f64,
    vertex: usize,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    // Reversed so `BinaryHeap` pops the smallest distance; lower vertex index
    // first among equal distances keeps runs deterministic.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
