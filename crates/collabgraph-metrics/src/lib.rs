#![forbid(unsafe_code)]
//! collabgraph-metrics library.
//!
//! Analytics engines over an [`AdjacencyView`](collabgraph_core::AdjacencyView)
//! snapshot. Nothing in this crate touches a live graph or performs I/O; every
//! function is a bounded, synchronous computation over an immutable view.
//!
//! - [`centrality`]: degree, betweenness (unweighted and weighted), closeness,
//!   PageRank, eigenvector.
//! - [`community`]: Girvan–Newman partitioning and bridging ties.
//! - [`structure`]: density, clustering coefficient, degree assortativity.
//!
//! # Conventions
//!
//! - **Errors**: degenerate inputs (empty graph, dangling vertices,
//!   disconnected components) are not errors; every engine returns a
//!   well-defined result covering all vertices, or an empty one.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod centrality;
pub mod community;
pub mod scores;
pub mod structure;

pub use scores::Scores;
