//! Aggregation of typed collaboration events into weighted edges.
//!
//! The ingestion layer reports who interacted with whom and how: a comment on
//! someone's issue or PR, a review, a merge, closing someone else's issue.
//! Each kind contributes a fixed additive weight to the directed edge from
//! the acting participant to the owner of the artifact, so a pair that both
//! reviews and comments ends up with the sum of both weights.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::GraphError;
use crate::store::{GraphStore, ListGraph};

/// Kind of collaboration event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    /// Comment on an issue or pull request opened by someone else.
    Comment,
    /// Comment on an issue opened by someone else.
    IssueCommented,
    /// Review or approval of someone else's pull request.
    Review,
    /// Review of a pull request that was merged.
    Merge,
    /// Closing an issue opened by someone else.
    IssueClosed,
}

impl InteractionKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Comment,
        Self::IssueCommented,
        Self::Review,
        Self::Merge,
        Self::IssueClosed,
    ];

    /// Stable lowercase name, matching the serde representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Comment => "comment",
            Self::IssueCommented => "issue_commented",
            Self::Review => "review",
            Self::Merge => "merge",
            Self::IssueClosed => "issue_closed",
        }
    }
}

/// Additive edge weight contributed by each [`InteractionKind`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionWeights {
    pub comment: f64,
    pub issue_commented: f64,
    pub review: f64,
    pub merge: f64,
    pub issue_closed: f64,
}

impl Default for InteractionWeights {
    fn default() -> Self {
        Self {
            comment: 2.0,
            issue_commented: 3.0,
            review: 4.0,
            merge: 5.0,
            issue_closed: 1.0,
        }
    }
}

impl InteractionWeights {
    /// Weight for one kind.
    #[must_use]
    pub const fn weight(&self, kind: InteractionKind) -> f64 {
        match kind {
            InteractionKind::Comment => self.comment,
            InteractionKind::IssueCommented => self.issue_commented,
            InteractionKind::Review => self.review,
            InteractionKind::Merge => self.merge,
            InteractionKind::IssueClosed => self.issue_closed,
        }
    }
}

/// One directed collaboration event between two participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    /// Acting participant.
    pub source: usize,
    /// Owner of the issue or pull request acted upon.
    pub target: usize,
    pub kind: InteractionKind,
}

/// Sum the weights of every enabled interaction into a [`ListGraph`].
///
/// Interactions of a participant with their own artifact are skipped; they
/// never form an edge.
///
/// # Errors
///
/// [`GraphError::VertexOutOfRange`] for an unknown participant index, or
/// [`GraphError::InvalidWeight`] if an enabled kind is configured with a
/// non-positive weight.
#[instrument(skip(interactions, weights, enabled), fields(interactions = interactions.len()))]
pub fn aggregate_interactions(
    vertex_count: usize,
    interactions: &[Interaction],
    weights: &InteractionWeights,
    enabled: &[InteractionKind],
) -> Result<ListGraph, GraphError> {
    let mut graph = ListGraph::new(vertex_count);
    let mut skipped_self = 0usize;

    for interaction in interactions {
        let Interaction {
            source,
            target,
            kind,
        } = *interaction;

        if !enabled.contains(&kind) {
            continue;
        }
        if source == target {
            // Still reject indices that do not exist.
            graph.vertex_weight(source)?;
            skipped_self += 1;
            continue;
        }

        let added = weights.weight(kind);
        let total = if graph.has_edge(source, target)? {
            graph.edge_weight(source, target)? + added
        } else {
            added
        };
        graph.set_edge_weight(source, target, total)?;
    }

    debug!(
        edges = graph.edge_count(),
        skipped_self, "aggregated interactions"
    );
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(source: usize, target: usize, kind: InteractionKind) -> Interaction {
        Interaction {
            source,
            target,
            kind,
        }
    }

    #[test]
    fn weights_add_up_per_pair() {
        let interactions = [
            event(0, 1, InteractionKind::Comment),
            event(0, 1, InteractionKind::Review),
            event(0, 1, InteractionKind::Comment),
            event(1, 0, InteractionKind::Merge),
        ];
        let g = aggregate_interactions(
            2,
            &interactions,
            &InteractionWeights::default(),
            &InteractionKind::ALL,
        )
        .expect("aggregate");

        assert_eq!(g.edge_count(), 2);
        assert!((g.edge_weight(0, 1).expect("w") - 8.0).abs() < f64::EPSILON);
        assert!((g.edge_weight(1, 0).expect("w") - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn disabled_kinds_are_ignored() {
        let interactions = [
            event(0, 1, InteractionKind::Comment),
            event(1, 2, InteractionKind::IssueClosed),
        ];
        let g = aggregate_interactions(
            3,
            &interactions,
            &InteractionWeights::default(),
            &[InteractionKind::IssueClosed],
        )
        .expect("aggregate");

        assert!(!g.has_edge(0, 1).expect("has"));
        assert!((g.edge_weight(1, 2).expect("w") - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn self_interactions_are_skipped() {
        let interactions = [event(1, 1, InteractionKind::Comment)];
        let g = aggregate_interactions(
            2,
            &interactions,
            &InteractionWeights::default(),
            &InteractionKind::ALL,
        )
        .expect("aggregate");
        assert!(g.is_empty_graph());
    }

    #[test]
    fn unknown_participant_is_an_error() {
        let interactions = [event(0, 7, InteractionKind::Review)];
        let err = aggregate_interactions(
            2,
            &interactions,
            &InteractionWeights::default(),
            &InteractionKind::ALL,
        )
        .expect_err("out of range");
        assert!(matches!(err, GraphError::VertexOutOfRange { vertex: 7, .. }));

        let interactions = [event(5, 5, InteractionKind::Review)];
        assert!(
            aggregate_interactions(
                2,
                &interactions,
                &InteractionWeights::default(),
                &InteractionKind::ALL,
            )
            .is_err()
        );
    }

    #[test]
    fn non_positive_configured_weight_is_rejected() {
        let weights = InteractionWeights {
            review: 0.0,
            ..InteractionWeights::default()
        };
        let interactions = [event(0, 1, InteractionKind::Review)];
        let err = aggregate_interactions(2, &interactions, &weights, &InteractionKind::ALL)
            .expect_err("zero weight");
        assert!(matches!(err, GraphError::InvalidWeight { .. }));
    }

    #[test]
    fn kind_names_match_serde() {
        for kind in InteractionKind::ALL {
            assert_eq!(toml_name(kind), kind.as_str());
        }
    }

    fn toml_name(kind: InteractionKind) -> String {
        #[derive(Serialize)]
        struct Wrap {
            kind: InteractionKind,
        }
        let rendered = toml::to_string(&Wrap { kind }).expect("serialize");
        rendered
            .trim()
            .trim_start_matches("kind = ")
            .trim_matches('"')
            .to_string()
    }
}
