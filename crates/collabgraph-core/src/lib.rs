#![forbid(unsafe_code)]
//! collabgraph-core library.
//!
//! Owns the collaboration graph itself: the [`GraphStore`] capability trait
//! with its two backends ([`ListGraph`], [`MatrixGraph`]), the read-only
//! [`AdjacencyView`] snapshot consumed by the analytics engines, GEXF export,
//! interaction-kind aggregation, and the analysis configuration file.
//!
//! # Conventions
//!
//! - **Errors**: graph operations return [`GraphError`]; configuration loading
//!   uses `anyhow::Result`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod gexf;
pub mod interaction;
pub mod store;
pub mod view;

pub use config::{AnalysisConfig, load_config};
pub use error::{ErrorKind, GraphError};
pub use interaction::{Interaction, InteractionKind, InteractionWeights, aggregate_interactions};
pub use store::{GraphStore, ListGraph, MatrixGraph};
pub use view::AdjacencyView;
