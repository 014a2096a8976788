use collabgraph_core::AdjacencyView;
use serde::Serialize;
use tracing::instrument;

/// Degree assortativity and the samples it was computed from.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Assortativity {
    /// Pearson correlation in `[-1, 1]`; `0.0` when undefined.
    pub coefficient: f64,
    /// `(degree(u), degree(v))` for every directed edge `u → v`, in edge
    /// order. Useful for scatter plots.
    pub samples: Vec<(usize, usize)>,
}

/// Pearson correlation between the degrees at either end of every edge.
///
/// Degree here is in-degree plus out-degree, so a reciprocal pair adds two
/// to each endpoint. Positive values mean well-connected
/// participants work with each other; negative values mean hubs work with
/// newcomers. Returns `0.0` when there are no edges or either degree
/// sequence has zero variance.
#[must_use]
#[instrument(skip(view), fields(edges = view.edge_count()))]
pub fn assortativity(view: &AdjacencyView) -> Assortativity {
    let degrees: Vec<usize> = view
        .out_adj()
        .iter()
        .zip(view.in_adj())
        .map(|(out, inc)| out.len() + inc.len())
        .collect();

    let samples: Vec<(usize, usize)> = view
        .edges()
        .map(|(u, v, _)| (degrees[u], degrees[v]))
        .collect();

    if samples.is_empty() {
        return Assortativity::default();
    }

    let count = samples.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_x2, mut sum_y2) = (0.0, 0.0, 0.0, 0.0, 0.0);
    for &(x, y) in &samples {
        let (x, y) = (x as f64, y as f64);
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
        sum_y2 += y * y;
    }

    let numerator = count.mul_add(sum_xy, -(sum_x * sum_y));
    let variance_x = count.mul_add(sum_x2, -(sum_x * sum_x));
    let variance_y = count.mul_add(sum_y2, -(sum_y * sum_y));
    let denominator = (variance_x * variance_y).sqrt();

    let coefficient = if denominator > 0.0 && denominator.is_finite() {
        numerator / denominator
    } else {
        0.0
    };

    Assortativity {
        coefficient,
        samples,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(n: usize, edges: &[(usize, usize, f64)]) -> AdjacencyView {
        AdjacencyView::from_edges(n, edges).expect("valid edges")
    }

    #[test]
    fn no_edges_is_zero() {
        let result = assortativity(&view(3, &[]));
        assert!(result.coefficient.abs() < f64::EPSILON);
        assert!(result.samples.is_empty());
    }

    #[test]
    fn regular_graph_has_zero_variance() {
        let g = view(3, &[(0, 1, 1.0), (1, 2, 1.0), (2, 0, 1.0)]);
        let result = assortativity(&g);
        assert!(result.coefficient.abs() < f64::EPSILON);
        assert_eq!(result.samples, vec![(2, 2), (2, 2), (2, 2)]);
    }

    #[test]
    fn bidirectional_star_is_disassortative() {
        let mut edges = Vec::new();
        for leaf in 1..4 {
            edges.push((0, leaf, 1.0));
            edges.push((leaf, 0, 1.0));
        }
        let result = assortativity(&view(4, &edges));
        assert!((result.coefficient + 1.0).abs() < 1e-12);
        assert_eq!(result.samples.len(), 6);
        assert_eq!(result.samples[0], (6, 2));
    }

    #[test]
    fn reciprocal_edges_count_in_both_directions() {
        let g = view(2, &[(0, 1, 1.0), (1, 0, 1.0)]);
        assert_eq!(assortativity(&g).samples, vec![(2, 2), (2, 2)]);
    }

    #[test]
    fn mixed_reciprocal_and_one_way_edges() {
        // Degrees (in + out): 0 -> 2, 1 -> 3, 2 -> 1.
        let g = view(3, &[(0, 1, 1.0), (1, 0, 1.0), (1, 2, 1.0)]);
        let result = assortativity(&g);
        assert_eq!(result.samples, vec![(2, 3), (3, 2), (3, 1)]);
        assert!((result.coefficient + 0.75_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn hubs_linked_to_hubs_are_assortative() {
        // Two dense clusters of different sizes, edges only within clusters:
        // high-degree vertices pair with high-degree vertices.
        let mut edges = Vec::new();
        for u in 0..4 {
            for v in 0..4 {
                if u != v {
                    edges.push((u, v, 1.0));
                }
            }
        }
        edges.push((4, 5, 1.0));
        let result = assortativity(&view(6, &edges));
        assert!((result.coefficient - 1.0).abs() < 1e-12);
    }
}
