//! Invariant checks over random graphs.
//!
//! `proptest` drives small arbitrary graphs; seeded `StdRng` graphs give
//! larger, reproducible regression inputs.

use collabgraph_core::{AdjacencyView, GraphStore, ListGraph};
use collabgraph_metrics::centrality::{
    DegreeMode, PageRankConfig, betweenness_centrality, betweenness_centrality_weighted,
    closeness_centrality, degree_centrality, eigenvector_centrality, pagerank,
};
use collabgraph_metrics::community::{GirvanNewmanConfig, find_bridging_ties, girvan_newman};
use collabgraph_metrics::structure::{assortativity, average_clustering_coefficient};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

fn arb_view() -> impl Strategy<Value = AdjacencyView> {
    (1usize..9).prop_flat_map(|n| {
        prop::collection::vec((0..n, 0..n, 0.25f64..8.0), 0..(n * 3)).prop_map(move |triples| {
            let mut graph = ListGraph::new(n);
            for (u, v, w) in triples {
                if u != v {
                    graph.add_edge(u, v, w).expect("valid edge");
                }
            }
            graph.adjacency_view()
        })
    })
}

fn seeded_view(seed: u64, n: usize, edge_probability: f64) -> AdjacencyView {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = ListGraph::new(n);
    for u in 0..n {
        for v in 0..n {
            if u != v && rng.gen_bool(edge_probability) {
                graph
                    .add_edge(u, v, rng.gen_range(0.5..4.0))
                    .expect("valid edge");
            }
        }
    }
    graph.adjacency_view()
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn every_engine_scores_every_vertex(view in arb_view()) {
        let n = view.vertex_count();
        prop_assert_eq!(degree_centrality(&view, true, DegreeMode::Total).len(), n);
        prop_assert_eq!(betweenness_centrality(&view).len(), n);
        prop_assert_eq!(betweenness_centrality_weighted(&view).len(), n);
        prop_assert_eq!(closeness_centrality(&view).len(), n);
        prop_assert_eq!(pagerank(&view, &PageRankConfig::default()).scores.len(), n);
        prop_assert_eq!(eigenvector_centrality(&view, 100, 1e-6).scores.len(), n);
    }

    #[test]
    fn bridging_ties_never_stay_inside_a_community(view in arb_view(), splits in 0usize..6) {
        let partition = girvan_newman(&view, &GirvanNewmanConfig {
            max_splits: splits,
            target_communities: None,
        });

        let mut covered: Vec<usize> = partition.communities.iter().flatten().copied().collect();
        covered.sort_unstable();
        prop_assert_eq!(covered, (0..view.vertex_count()).collect::<Vec<_>>());

        let membership = partition.membership();
        for tie in find_bridging_ties(&view, &partition.communities) {
            prop_assert_ne!(membership[tie.source], membership[tie.target]);
        }
    }

    #[test]
    fn pagerank_is_a_probability_distribution(view in arb_view()) {
        let result = pagerank(&view, &PageRankConfig::default());
        for (_, score) in result.scores.iter() {
            prop_assert!(score >= 0.0);
        }
        prop_assert!((result.scores.total() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn eigenvector_is_l1_normalized_unless_collapsed(view in arb_view()) {
        let result = eigenvector_centrality(&view, 100, 1e-6);
        if result.collapsed {
            prop_assert!(result.scores.iter().all(|(_, s)| s == 0.0));
        } else {
            prop_assert!((result.scores.total() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn bounded_scalar_metrics(view in arb_view()) {
        let clustering = average_clustering_coefficient(&view);
        prop_assert!((0.0..=1.0).contains(&clustering));
        let r = assortativity(&view).coefficient;
        prop_assert!((-1.0 - 1e-9..=1.0 + 1e-9).contains(&r));
        for (_, score) in betweenness_centrality(&view).iter() {
            prop_assert!(score >= 0.0);
        }
    }
}

// ---------------------------------------------------------------------------
// Seeded regressions
// ---------------------------------------------------------------------------

#[test]
fn pagerank_ranking_is_stable_across_runs() {
    for seed in 0..20 {
        let view = seeded_view(seed, 30, 0.1);
        let first = pagerank(&view, &PageRankConfig::default());
        let second = pagerank(&view, &PageRankConfig::default());
        assert_eq!(first.scores.ranked(), second.scores.ranked(), "seed {seed}");
    }
}

#[test]
fn unit_weights_make_weighted_betweenness_match_bfs() {
    for seed in 0..10 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut graph = ListGraph::new(25);
        for u in 0..25 {
            for v in 0..25 {
                if u != v && rng.gen_bool(0.12) {
                    graph.add_edge(u, v, 1.0).expect("valid edge");
                }
            }
        }
        let view = graph.adjacency_view();
        let plain = betweenness_centrality(&view);
        let weighted = betweenness_centrality_weighted(&view);
        for v in 0..25 {
            assert!(
                (plain[v] - weighted[v]).abs() < 1e-9,
                "seed {seed}, vertex {v}: {} vs {}",
                plain[v],
                weighted[v]
            );
        }
    }
}

#[test]
fn girvan_newman_is_deterministic() {
    for seed in 0..10 {
        let view = seeded_view(seed, 20, 0.15);
        let config = GirvanNewmanConfig::default();
        assert_eq!(girvan_newman(&view, &config), girvan_newman(&view, &config), "seed {seed}");
    }
}
