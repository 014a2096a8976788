//! Weighted PageRank by power iteration.
//!
//! # Algorithm
//!
//! ```text
//! PR'(v) = (1 - d) / N + d · Σ_{u → v} PR(u) · w(u, v) / out_strength(u)
//!                     + d · Σ_{u dangling} PR(u) / N
//! ```
//!
//! where `d` is the damping factor and `out_strength(u)` the sum of `u`'s
//! outgoing weights. A vertex with no outgoing edges ("dangling") spreads
//! its mass uniformly over every vertex, so total mass stays 1.
//!
//! Iteration starts from the uniform distribution and stops once the L1
//! distance between successive vectors drops below `tolerance`, or after
//! `max_iter` rounds.

use collabgraph_core::AdjacencyView;
use collabgraph_core::config::PageRankSettings;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::scores::Scores;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for PageRank computation.
#[derive(Debug, Clone)]
pub struct PageRankConfig {
    /// Damping factor (probability of following a link vs teleporting).
    /// Default: 0.85.
    pub damping: f64,
    /// Convergence threshold: stop when L1 norm of rank delta < tolerance.
    /// Default: 1e-6.
    pub tolerance: f64,
    /// Maximum number of iterations.
    /// Default: 100.
    pub max_iter: usize,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            tolerance: 1e-6,
            max_iter: 100,
        }
    }
}

impl From<&PageRankSettings> for PageRankConfig {
    fn from(settings: &PageRankSettings) -> Self {
        Self {
            damping: settings.damping,
            tolerance: settings.tolerance,
            max_iter: settings.max_iter,
        }
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// Result of a PageRank computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageRankResult {
    /// PageRank score per vertex.
    pub scores: Scores,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Whether the L1 delta dropped below tolerance within `max_iter`.
    pub converged: bool,
}

// ---------------------------------------------------------------------------
// PageRank
// ---------------------------------------------------------------------------

/// Compute weighted PageRank for every vertex of `view`.
#[must_use]
#[instrument(skip(view, config), fields(vertices = view.vertex_count()))]
pub fn pagerank(view: &AdjacencyView, config: &PageRankConfig) -> PageRankResult {
    let n = view.vertex_count();

    if n == 0 {
        return PageRankResult {
            scores: Scores::default(),
            iterations: 0,
            converged: true,
        };
    }

    let n_f64 = n as f64;
    let base = (1.0 - config.damping) / n_f64;
    let out_strength: Vec<f64> = view
        .out_adj()
        .iter()
        .map(|edges| edges.iter().map(|&(_, w)| w).sum())
        .collect();

    let mut ranks = vec![1.0 / n_f64; n];
    let mut new_ranks = vec![0.0_f64; n];
    let mut iterations = 0;
    let mut converged = false;

    for _ in 0..config.max_iter {
        iterations += 1;

        // Dangling mass is spread evenly, so fold it into the base.
        let dangling: f64 = (0..n)
            .filter(|&u| out_strength[u] <= 0.0)
            .map(|u| ranks[u])
            .sum();
        let floor = config.damping.mul_add(dangling / n_f64, base);
        new_ranks.fill(floor);

        for (u, edges) in view.out_adj().iter().enumerate() {
            if out_strength[u] <= 0.0 {
                continue;
            }
            let share = config.damping * ranks[u] / out_strength[u];
            for &(v, w) in edges {
                new_ranks[v] += share * w;
            }
        }

        let delta: f64 = ranks
            .iter()
            .zip(new_ranks.iter())
            .map(|(old, new)| (old - new).abs())
            .sum();

        std::mem::swap(&mut ranks, &mut new_ranks);

        if delta < config.tolerance {
            converged = true;
            break;
        }
    }

    if converged {
        debug!(iterations, "pagerank converged");
    } else {
        warn!(
            iterations,
            tolerance = config.tolerance,
            "pagerank did not converge within max_iter"
        );
    }

    PageRankResult {
        scores: Scores::new(ranks),
        iterations,
        converged,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
