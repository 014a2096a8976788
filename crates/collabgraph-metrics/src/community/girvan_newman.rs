//! Girvan–Newman community detection.
//!
//! # Algorithm
//!
//! The directed graph is first collapsed to a simple undirected graph: one
//! unweighted edge per connected pair, whatever the direction or number of
//! directed edges. Then, up to `max_splits` times:
//!
//! 1. Compute edge betweenness by Brandes-style BFS from every vertex,
//!    crediting each undirected edge `(min, max)` instead of vertices. Every
//!    path is seen from both of its endpoints, so scores are halved.
//! 2. Remove the edge with the strictly highest score. Among equal scores
//!    the edge that first received credit wins, which makes the removal
//!    order a pure function of vertex numbering.
//!
//! Communities are the connected components that remain, singletons
//! included, each sorted ascending and listed by smallest member.
//!
//! Edge betweenness is recomputed from scratch after every removal:
//! O(splits · V · (V + E)).

use std::collections::{HashMap, HashSet, VecDeque};

use collabgraph_core::AdjacencyView;
use collabgraph_core::config::CommunitySettings;
use serde::Serialize;
use tracing::{debug, instrument};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Stopping rules for [`girvan_newman`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GirvanNewmanConfig {
    /// Upper bound on edge removals. Default: 5.
    pub max_splits: usize,
    /// Stop as soon as the graph has at least this many components.
    pub target_communities: Option<usize>,
}

impl Default for GirvanNewmanConfig {
    fn default() -> Self {
        Self {
            max_splits: 5,
            target_communities: None,
        }
    }
}

impl From<&CommunitySettings> for GirvanNewmanConfig {
    fn from(settings: &CommunitySettings) -> Self {
        Self {
            max_splits: settings.max_splits,
            target_communities: settings.target_communities,
        }
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// An undirected edge cut during partitioning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RemovedEdge {
    /// Smaller endpoint.
    pub u: usize,
    /// Larger endpoint.
    pub v: usize,
    /// Edge betweenness at the time of removal.
    pub score: f64,
}

/// Outcome of [`girvan_newman`].
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Partition {
    /// Disjoint vertex sets covering every vertex.
    pub communities: Vec<Vec<usize>>,
    /// Edges cut, in removal order.
    pub removed: Vec<RemovedEdge>,
}

impl Partition {
    /// Number of communities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.communities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.communities.is_empty()
    }

    /// `membership()[v]` is the index of the community holding `v`.
    #[must_use]
    pub fn membership(&self) -> Vec<usize> {
        let n = self.communities.iter().map(Vec::len).sum();
        let mut membership = vec![0; n];
        for (index, community) in self.communities.iter().enumerate() {
            for &v in community {
                if let Some(slot) = membership.get_mut(v) {
                    *slot = index;
                }
            }
        }
        membership
    }
}

// ---------------------------------------------------------------------------
// Girvan–Newman
// ---------------------------------------------------------------------------

/// Partition `view` into communities.
///
/// Each round removes the edge with the highest betweenness, up to
/// `config.max_splits` rounds. Without `target_communities` nothing looks at
/// the components already present, so a graph that is already split keeps
/// losing edges. Set `target_communities` to the current component count, or
/// `max_splits` to zero, to get the existing components back untouched.
#[must_use]
#[instrument(skip(view), fields(vertices = view.vertex_count()))]
pub fn girvan_newman(view: &AdjacencyView, config: &GirvanNewmanConfig) -> Partition {
    let mut adj = undirected_adjacency(view);
    let mut removed = Vec::new();

    for _ in 0..config.max_splits {
        if let Some(target) = config.target_communities
            && connected_components(&adj).len() >= target
        {
            break;
        }

        let scores = edge_betweenness(&adj);
        let Some(((u, v), score)) = strongest_edge(&scores) else {
            break;
        };

        adj[u].retain(|&x| x != v);
        adj[v].retain(|&x| x != u);
        debug!(u, v, score, "removed edge");
        removed.push(RemovedEdge { u, v, score });
    }

    let communities = connected_components(&adj);
    debug!(
        communities = communities.len(),
        removed = removed.len(),
        "partitioned graph"
    );

    Partition {
        communities,
        removed,
    }
}

/// Simple undirected neighbor lists. A pair enters the lists in the order
/// its first directed edge is met scanning sources, then targets, ascending.
fn undirected_adjacency(view: &AdjacencyView) -> Vec<Vec<usize>> {
    let n = view.vertex_count();
    let mut adj = vec![Vec::new(); n];
    let mut seen = HashSet::new();

    for (u, v, _) in view.edges() {
        if seen.insert((u.min(v), u.max(v))) {
            adj[u].push(v);
            adj[v].push(u);
        }
    }
    adj
}

/// Undirected edge betweenness, unhalved, in first-credited order.
fn edge_betweenness(adj: &[Vec<usize>]) -> Vec<((usize, usize), f64)> {
    let n = adj.len();
    let mut scores: Vec<((usize, usize), f64)> = Vec::new();
    let mut slot: HashMap<(usize, usize), usize> = HashMap::new();

    for s in 0..n {
        let mut stack = Vec::with_capacity(n);
        let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut sigma = vec![0.0_f64; n];
        let mut dist: Vec<Option<usize>> = vec![None; n];
        sigma[s] = 1.0;
        dist[s] = Some(0);

        let mut queue = VecDeque::from([s]);
        while let Some(v) = queue.pop_front() {
            stack.push(v);
            let Some(dv) = dist[v] else { continue };
            for &w in &adj[v] {
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

        let mut delta = vec![0.0_f64; n];
        while let Some(w) = stack.pop() {
            if sigma[w] <= 0.0 {
                continue;
            }
            for &v in &predecessors[w] {
                let credit = (sigma[v] / sigma[w]) * (1.0 + delta[w]);
                let key = (v.min(w), v.max(w));
                let index = *slot.entry(key).or_insert_with(|| {
                    scores.push((key, 0.0));
                    scores.len() - 1
                });
                scores[index].1 += credit;
                delta[v] += credit;
            }
        }
    }

    scores
}

/// First edge with the strictly highest halved score.
fn strongest_edge(scores: &[((usize, usize), f64)]) -> Option<((usize, usize), f64)> {
    let mut best: Option<((usize, usize), f64)> = None;
    for &(edge, raw) in scores {
        let score = raw / 2.0;
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((edge, score));
        }
    }
    best
}

/// Connected components by BFS from each unvisited vertex in index order.
fn connected_components(adj: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let n = adj.len();
    let mut visited = vec![false; n];
    let mut components = Vec::new();

    for start in 0..n {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        let mut component = Vec::new();
        let mut queue = VecDeque::from([start]);
        while let Some(u) = queue.pop_front() {
            component.push(u);
            for &v in &adj[u] {
                if !visited[v] {
                    visited[v] = true;
                    queue.push_back(v);
                }
            }
        }
        component.sort_unstable();
        components.push(component);
    }

    components
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
