use collabgraph_core::AdjacencyView;
use serde::Serialize;
use tracing::instrument;

/// A directed edge whose endpoints sit in different communities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BridgingTie {
    pub source: usize,
    pub target: usize,
    pub weight: f64,
}

/// Every edge of `view` that crosses between two of `communities`, with its
/// original direction and weight, ordered by source then target.
///
/// Vertices that belong to no community (or are not in `view`) are ignored,
/// as are edges touching them. If a vertex is listed in several communities
/// the last listing wins.
#[must_use]
#[instrument(skip(view, communities), fields(communities = communities.len()))]
pub fn find_bridging_ties(view: &AdjacencyView, communities: &[Vec<usize>]) -> Vec<BridgingTie> {
    let mut membership: Vec<Option<usize>> = vec![None; view.vertex_count()];
    for (index, community) in communities.iter().enumerate() {
        for &v in community {
            if let Some(slot) = membership.get_mut(v) {
                *slot = Some(index);
            }
        }
    }

    view.edges()
        .filter_map(|(source, target, weight)| {
            let from = membership[source]?;
            let to = membership[target]?;
            (from != to).then_some(BridgingTie {
                source,
                target,
                weight,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crossing_edges_keep_direction_and_weight() {
        let view = AdjacencyView::from_edges(
            4,
            &[(0, 1, 1.0), (1, 2, 2.5), (3, 0, 4.0), (2, 3, 1.0)],
        )
        .expect("valid");
        let ties = find_bridging_ties(&view, &[vec![0, 1], vec![2, 3]]);
        assert_eq!(
            ties,
            vec![
                BridgingTie {
                    source: 1,
                    target: 2,
                    weight: 2.5
                },
                BridgingTie {
                    source: 3,
                    target: 0,
                    weight: 4.0
                },
            ]
        );
    }

    #[test]
    fn unassigned_vertices_are_skipped() {
        let view = AdjacencyView::from_edges(3, &[(0, 2, 1.0), (2, 1, 1.0), (0, 1, 1.0)]).expect("valid");
        let ties = find_bridging_ties(&view, &[vec![0], vec![1]]);
        assert_eq!(ties.len(), 1);
        assert_eq!((ties[0].source, ties[0].target), (0, 1));
    }

    #[test]
    fn no_communities_no_ties() {
        let view = AdjacencyView::from_edges(2, &[(0, 1, 1.0)]).expect("valid");
        assert!(find_bridging_ties(&view, &[]).is_empty());
        assert!(find_bridging_ties(&view, &[vec![0, 1]]).is_empty());
    }
}
