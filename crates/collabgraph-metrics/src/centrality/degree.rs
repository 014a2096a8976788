use collabgraph_core::AdjacencyView;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::scores::Scores;

/// Which incident edges count towards a vertex's degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegreeMode {
    /// Outgoing edges only.
    Out,
    /// Incoming edges only.
    In,
    /// Outgoing plus incoming.
    #[default]
    Total,
}

impl DegreeMode {
    const fn counts_out(self) -> bool {
        matches!(self, Self::Out | Self::Total)
    }

    const fn counts_in(self) -> bool {
        matches!(self, Self::In | Self::Total)
    }
}

/// Degree centrality: per-vertex sum of incident edge weights, or the edge
/// count when `weighted` is false. Not normalized.
#[must_use]
#[instrument(skip(view))]
pub fn degree_centrality(view: &AdjacencyView, weighted: bool, mode: DegreeMode) -> Scores {
    let measure = |edges: &[(usize, f64)]| -> f64 {
        if weighted {
            edges.iter().map(|&(_, w)| w).sum()
        } else {
            edges.len() as f64
        }
    };

    let scores = (0..view.vertex_count())
        .map(|v| {
            let mut degree = 0.0;
            if mode.counts_out() {
                degree += measure(&view.out_adj()[v]);
            }
            if mode.counts_in() {
                degree += measure(&view.in_adj()[v]);
            }
            degree
        })
        .collect();

    Scores::new(scores)
}
