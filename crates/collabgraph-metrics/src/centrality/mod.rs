//! Vertex centrality metrics.
//!
//! # Overview
//!
//! Each metric answers a different question about a participant:
//!
//! - **Degree** (`degree`): how much direct activity touches them?
//! - **Betweenness** (`betweenness`): how often do they sit on shortest
//!   paths between others, i.e. act as brokers?
//! - **Closeness** (`closeness`): how few hops separate them from everyone
//!   they can reach?
//! - **PageRank** (`pagerank`): how much attention flows to them through
//!   weighted links, with random jumps?
//! - **Eigenvector** (`eigenvector`): are they linked to by other important
//!   participants?
//!
//! # Usage
//!
//! All metrics take an [`AdjacencyView`](collabgraph_core::AdjacencyView) and
//! return one score per vertex. An empty view yields empty scores.
//!
//! ```rust
//! use collabgraph_core::{GraphStore, ListGraph};
//! use collabgraph_metrics::centrality::{
//!     DegreeMode, PageRankConfig, betweenness_centrality, degree_centrality, pagerank,
//! };
//!
//! let g = ListGraph::from_edges(3, &[(0, 1, 2.0), (1, 2, 1.0)]).expect("valid edges");
//! let view = g.adjacency_view();
//!
//! let degree = degree_centrality(&view, true, DegreeMode::Total);
//! assert!((degree[1] - 3.0).abs() < 1e-12);
//!
//! let bc = betweenness_centrality(&view);
//! assert!((bc[1] - 1.0).abs() < 1e-12);
//!
//! let pr = pagerank(&view, &PageRankConfig::default());
//! assert_eq!(pr.scores.len(), 3);
//! ```

pub mod betweenness;
pub mod closeness;
pub mod degree;
pub mod eigenvector;
pub mod pagerank;

pub use betweenness::{
    DEFAULT_TIE_TOLERANCE, betweenness_centrality, betweenness_centrality_weighted,
    betweenness_centrality_weighted_with_tolerance,
};
pub use closeness::closeness_centrality;
pub use degree::{DegreeMode, degree_centrality};
pub use eigenvector::{EigenvectorResult, eigenvector_centrality};
pub use pagerank::{PageRankConfig, PageRankResult, pagerank};
