//! `cgraph export` — write the graph as GEXF.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use collabgraph_core::{AnalysisConfig, gexf};
use serde::Serialize;
use tracing::info;

use crate::input::{Backend, load_graph};
use crate::output::{OutputMode, pretty_kv, render_mode};

/// Arguments for `cgraph export`.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Graph description (JSON).
    pub graph: PathBuf,

    /// Destination `.gexf` file; replaced if it exists.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Storage backend the export is taken from.
    #[arg(long, value_enum, default_value = "list")]
    pub backend: Backend,
}

#[derive(Debug, Serialize)]
pub struct ExportReport {
    pub path: String,
    pub vertices: usize,
    pub edges: usize,
}

/// Execute `cgraph export`.
pub fn run_export(
    args: &ExportArgs,
    output: OutputMode,
    config: &AnalysisConfig,
) -> anyhow::Result<()> {
    let loaded = load_graph(&args.graph, config)?;
    let store = loaded.to_backend(args.backend)?;

    let vertex_weights = (0..store.vertex_count())
        .map(|v| store.vertex_weight(v))
        .collect::<Result<Vec<_>, _>>()?;
    gexf::write_file(
        &args.output,
        &vertex_weights,
        &store.adjacency_list(),
        Some(loaded.names.as_slice()),
    )
    .with_context(|| format!("Failed to export {}", args.output.display()))?;

    info!(path = %args.output.display(), backend = ?args.backend, "exported graph");

    let report = ExportReport {
        path: args.output.display().to_string(),
        vertices: store.vertex_count(),
        edges: store.edge_count(),
    };
    render_mode(
        output,
        &report,
        |r, w| writeln!(w, "{}\t{}\t{}", r.path, r.vertices, r.edges),
        |r, w| {
            pretty_kv(w, "exported", &r.path)?;
            pretty_kv(w, "vertices", r.vertices.to_string())?;
            pretty_kv(w, "edges", r.edges.to_string())
        },
    )
}
