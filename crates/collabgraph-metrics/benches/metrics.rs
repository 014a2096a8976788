use collabgraph_core::{AdjacencyView, GraphStore, ListGraph};
use collabgraph_metrics::centrality::{
    PageRankConfig, betweenness_centrality, betweenness_centrality_weighted,
    eigenvector_centrality, pagerank,
};
use collabgraph_metrics::community::{GirvanNewmanConfig, girvan_newman};
use collabgraph_metrics::structure::structure_summary;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Graph sizes as `(name, vertices, average out-degree)`.
const TIERS: [(&str, usize, usize); 3] = [("small", 50, 4), ("medium", 200, 6), ("large", 600, 8)];

fn random_view(vertices: usize, out_degree: usize, seed: u64) -> AdjacencyView {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = ListGraph::new(vertices);
    for u in 0..vertices {
        for _ in 0..out_degree {
            let v = rng.gen_range(0..vertices);
            if v != u {
                let weight = f64::from(rng.gen_range(1_u8..=5));
                let _ = graph.add_edge(u, v, weight);
            }
        }
    }
    graph.adjacency_view()
}

fn bench_centrality(c: &mut Criterion) {
    let mut group = c.benchmark_group("centrality");

    for (name, vertices, out_degree) in TIERS {
        let view = random_view(vertices, out_degree, 0xC0_11AB + vertices as u64);
        group.throughput(Throughput::Elements(view.edge_count() as u64));

        group.bench_with_input(BenchmarkId::new("betweenness", name), &view, |b, view| {
            b.iter(|| black_box(betweenness_centrality(view)));
        });
        group.bench_with_input(
            BenchmarkId::new("betweenness_weighted", name),
            &view,
            |b, view| b.iter(|| black_box(betweenness_centrality_weighted(view))),
        );
        group.bench_with_input(BenchmarkId::new("pagerank", name), &view, |b, view| {
            b.iter(|| black_box(pagerank(view, &PageRankConfig::default())));
        });
        group.bench_with_input(BenchmarkId::new("eigenvector", name), &view, |b, view| {
            b.iter(|| black_box(eigenvector_centrality(view, 100, 1e-6)));
        });
    }

    group.finish();
}

fn bench_community_and_structure(c: &mut Criterion) {
    let mut group = c.benchmark_group("community");
    group.sample_size(10);

    // Girvan–Newman is O(splits · V · E); the large tier is left out.
    for (name, vertices, out_degree) in &TIERS[..2] {
        let view = random_view(*vertices, *out_degree, 0x6E_0001 + *vertices as u64);

        group.bench_with_input(BenchmarkId::new("girvan_newman", name), &view, |b, view| {
            b.iter(|| black_box(girvan_newman(view, &GirvanNewmanConfig::default())));
        });
        group.bench_with_input(BenchmarkId::new("structure", name), &view, |b, view| {
            b.iter(|| black_box(structure_summary(view)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_centrality, bench_community_and_structure);
criterion_main!(benches);
