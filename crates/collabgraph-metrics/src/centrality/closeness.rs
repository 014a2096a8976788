use std::collections::VecDeque;

use collabgraph_core::AdjacencyView;
use tracing::instrument;

use crate::scores::Scores;

/// Closeness centrality over unweighted, directed BFS distances.
///
/// `score(v) = reachable(v) / Σ dist(v, u)` over every `u` reachable from
/// `v`. A vertex that reaches nothing scores `0.0`. There is no `n - 1`
/// normalization, so a vertex reaching one neighbor at distance 1 scores the
/// same as one reaching ten neighbors at distance 1.
#[must_use]
#[instrument(skip(view), fields(vertices = view.vertex_count()))]
pub fn closeness_centrality(view: &AdjacencyView) -> Scores {
    let n = view.vertex_count();
    let mut scores = Vec::with_capacity(n);
    let mut dist: Vec<Option<usize>> = vec![None; n];
    let mut queue = VecDeque::with_capacity(n);

    for s in 0..n {
        dist.fill(None);
        dist[s] = Some(0);
        queue.clear();
        queue.push_back(s);

        let mut total = 0usize;
        let mut reachable = 0usize;

        while let Some(v) = queue.pop_front() {
            let Some(dv) = dist[v] else { continue };
            for &(w, _) in &view.out_adj()[v] {
                if dist[w].is_none() {
                    dist[w] = Some(dv + 1);
                    total += dv + 1;
                    reachable += 1;
                    queue.push_back(w);
                }
            }
        }

        scores.push(if total > 0 {
            reachable as f64 / total as f64
        } else {
            0.0
        });
    }

    Scores::new(scores)
}
