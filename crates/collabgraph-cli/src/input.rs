//! JSON graph descriptions.
//!
//! ```json
//! {
//!   "participants": ["alice", "bob", "carol"],
//!   "edges": [{"source": 0, "target": 1, "weight": 2.0}],
//!   "interactions": [{"source": "bob", "target": "carol", "kind": "review"}]
//! }
//! ```
//!
//! Interactions are aggregated first using the configured kind weights;
//! explicit edges are applied afterwards and overwrite any aggregated weight
//! on the same pair.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use collabgraph_core::config::AnalysisConfig;
use collabgraph_core::{
    GraphStore, Interaction, InteractionKind, ListGraph, MatrixGraph, aggregate_interactions,
};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphInput {
    pub participants: Vec<String>,
    #[serde(default)]
    pub edges: Vec<EdgeInput>,
    #[serde(default)]
    pub interactions: Vec<InteractionInput>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EdgeInput {
    pub source: usize,
    pub target: usize,
    pub weight: f64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InteractionInput {
    pub source: String,
    pub target: String,
    pub kind: InteractionKind,
}

/// Storage backend selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Backend {
    /// Ordered adjacency maps.
    #[default]
    List,
    /// Dense weight matrix.
    Matrix,
}

/// A parsed, validated graph plus participant names.
#[derive(Debug)]
pub struct LoadedGraph {
    pub names: Vec<String>,
    pub graph: ListGraph,
}

impl LoadedGraph {
    /// Copy the graph into the requested backend.
    ///
    /// # Errors
    ///
    /// Only if the stored graph violates an invariant, which would be a bug.
    pub fn to_backend(&self, backend: Backend) -> Result<Box<dyn GraphStore>> {
        match backend {
            Backend::List => Ok(Box::new(self.graph.clone())),
            Backend::Matrix => {
                let edges: Vec<_> = self.graph.adjacency_view().edges().collect();
                let mut matrix = MatrixGraph::from_edges(self.graph.vertex_count(), &edges)
                    .context("Failed to build matrix backend")?;
                for v in 0..self.graph.vertex_count() {
                    matrix.set_vertex_weight(v, self.graph.vertex_weight(v)?)?;
                }
                Ok(Box::new(matrix))
            }
        }
    }

    /// Display name for `vertex`, falling back to its index.
    pub fn name(&self, vertex: usize) -> String {
        self.names
            .get(vertex)
            .cloned()
            .unwrap_or_else(|| vertex.to_string())
    }
}

/// Read and build the graph described by the JSON file at `path`.
///
/// # Errors
///
/// Unreadable file, malformed JSON, duplicate or unknown participants, or an
/// edge rejected by graph validation.
pub fn load_graph(path: &Path, config: &AnalysisConfig) -> Result<LoadedGraph> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let input: GraphInput = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    build_graph(input, config).with_context(|| format!("Invalid graph in {}", path.display()))
}

/// Build a graph from an already-parsed description.
///
/// # Errors
///
/// See [`load_graph`].
pub fn build_graph(input: GraphInput, config: &AnalysisConfig) -> Result<LoadedGraph> {
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(input.participants.len());
    for (i, name) in input.participants.iter().enumerate() {
        if index.insert(name.as_str(), i).is_some() {
            bail!("duplicate participant {name:?}");
        }
    }

    let resolve = |name: &str| -> Result<usize> {
        index
            .get(name)
            .copied()
            .with_context(|| format!("unknown participant {name:?}"))
    };

    let mut interactions = Vec::with_capacity(input.interactions.len());
    for event in &input.interactions {
        interactions.push(Interaction {
            source: resolve(&event.source)?,
            target: resolve(&event.target)?,
            kind: event.kind,
        });
    }

    let mut graph = aggregate_interactions(
        input.participants.len(),
        &interactions,
        &config.interactions.weights,
        &config.interactions.enabled,
    )?;

    for edge in &input.edges {
        graph
            .set_edge_weight(edge.source, edge.target, edge.weight)
            .with_context(|| format!("edge {} -> {}", edge.source, edge.target))?;
    }

    debug!(
        participants = input.participants.len(),
        edges = graph.edge_count(),
        "loaded graph"
    );

    Ok(LoadedGraph {
        names: input.participants,
        graph,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use collabgraph_core::GraphError;

    fn parse(json: &str) -> GraphInput {
        serde_json::from_str(json).expect("valid json")
    }

    #[test]
    fn interactions_then_edges() {
        let input = parse(
            r#"{
                "participants": ["alice", "bob", "carol"],
                "edges": [{"source": 0, "target": 1, "weight": 7.0}],
                "interactions": [
                    {"source": "alice", "target": "bob", "kind": "review"},
                    {"source": "bob", "target": "carol", "kind": "comment"},
                    {"source": "bob", "target": "carol", "kind": "merge"}
                ]
            }"#,
        );
        let loaded = build_graph(input, &AnalysisConfig::default()).expect("build");
        assert_eq!(loaded.graph.edge_count(), 2);
        assert!((loaded.graph.edge_weight(0, 1).expect("w") - 7.0).abs() < f64::EPSILON);
        assert!((loaded.graph.edge_weight(1, 2).expect("w") - 7.0).abs() < f64::EPSILON);
        assert_eq!(loaded.name(2), "carol");
        assert_eq!(loaded.name(9), "9");
    }

    #[test]
    fn unknown_participant_is_reported() {
        let input = parse(
            r#"{"participants": ["a"], "interactions": [{"source": "a", "target": "zed", "kind": "review"}]}"#,
        );
        let err = build_graph(input, &AnalysisConfig::default()).expect_err("unknown");
        assert!(err.to_string().contains("zed"), "{err}");
    }

    #[test]
    fn duplicate_participant_is_rejected() {
        let input = parse(r#"{"participants": ["a", "a"]}"#);
        assert!(build_graph(input, &AnalysisConfig::default()).is_err());
    }

    #[test]
    fn invalid_edge_keeps_graph_error() {
        let input = parse(
            r#"{"participants": ["a", "b"], "edges": [{"source": 1, "target": 1, "weight": 1.0}]}"#,
        );
        let err = build_graph(input, &AnalysisConfig::default()).expect_err("self loop");
        let graph_err = err
            .chain()
            .find_map(|cause| cause.downcast_ref::<GraphError>())
            .expect("graph error in chain");
        assert_eq!(graph_err.code(), "E1002");
    }

    #[test]
    fn backends_hold_the_same_edges() {
        let input = parse(
            r#"{"participants": ["a", "b", "c"], "edges": [
                {"source": 0, "target": 1, "weight": 1.5},
                {"source": 2, "target": 0, "weight": 3.0}
            ]}"#,
        );
        let loaded = build_graph(input, &AnalysisConfig::default()).expect("build");
        let list = loaded.to_backend(Backend::List).expect("list");
        let matrix = loaded.to_backend(Backend::Matrix).expect("matrix");
        assert_eq!(list.adjacency_list(), matrix.adjacency_list());
        assert_eq!(matrix.vertex_count(), 3);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = serde_json::from_str::<GraphInput>(r#"{"participants": [], "nodes": []}"#);
        assert!(err.is_err());
    }
}
