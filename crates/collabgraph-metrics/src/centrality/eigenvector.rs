//! Eigenvector centrality via power iteration.
//!
//! # Overview
//!
//! A participant is important when important participants point at them.
//! The score vector is the dominant eigenvector of the transposed weighted
//! adjacency matrix: incoming edges contribute, outgoing edges do not.
//!
//! # Algorithm
//!
//! 1. Start from the uniform vector `1/n`.
//! 2. `x'[i] = Σ_{j → i} w(j, i) · x[j]`.
//! 3. Normalize `x'` to unit L1 norm.
//! 4. Stop once the L1 distance between `x` and `x'` is below `tolerance`,
//!    or after `max_iter` rounds.
//!
//! On graphs without directed cycles (every path eventually drains into a
//! sink) the iteration loses all mass after finitely many steps. When the
//! norm reaches zero the result is the zero vector with `collapsed` set.

use collabgraph_core::AdjacencyView;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::scores::Scores;

/// Result of eigenvector centrality computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EigenvectorResult {
    /// Score per vertex; sums to 1 unless `collapsed`.
    pub scores: Scores,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Whether the algorithm converged within `max_iter`.
    pub converged: bool,
    /// Whether the vector norm fell to zero; all scores are then `0.0`.
    pub collapsed: bool,
}

/// Compute eigenvector centrality for every vertex of `view`.
#[must_use]
#[instrument(skip(view), fields(vertices = view.vertex_count()))]
pub fn eigenvector_centrality(
    view: &AdjacencyView,
    max_iter: usize,
    tolerance: f64,
) -> EigenvectorResult {
    let n = view.vertex_count();

    if n == 0 {
        return EigenvectorResult {
            scores: Scores::default(),
            iterations: 0,
            converged: true,
            collapsed: false,
        };
    }

    let mut scores = vec![1.0 / n as f64; n];
    let mut next = vec![0.0_f64; n];
    let mut iterations = 0;
    let mut converged = false;
    let mut collapsed = false;

    for _ in 0..max_iter {
        iterations += 1;

        for (i, incoming) in view.in_adj().iter().enumerate() {
            next[i] = incoming.iter().map(|&(j, w)| w * scores[j]).sum();
        }

        let norm: f64 = next.iter().map(|x| x.abs()).sum();
        if norm <= 0.0 {
            collapsed = true;
            break;
        }
        for x in &mut next {
            *x /= norm;
        }

        let diff: f64 = scores
            .iter()
            .zip(next.iter())
            .map(|(a, b)| (a - b).abs())
            .sum();

        std::mem::swap(&mut scores, &mut next);

        if diff < tolerance {
            converged = true;
            break;
        }
    }

    if collapsed {
        debug!(iterations, "eigenvector iteration collapsed to zero");
        scores.fill(0.0);
    } else if converged {
        debug!(iterations, "eigenvector iteration converged");
    } else {
        warn!(
            iterations,
            tolerance, "eigenvector iteration did not converge within max_iter"
        );
    }

    EigenvectorResult {
        scores: Scores::new(scores),
        iterations,
        converged,
        collapsed,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
