//! `cgraph summary` — counts, predicates, and headline metrics.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use collabgraph_core::{AnalysisConfig, GraphStore};
use collabgraph_metrics::structure::structure_summary;
use serde::Serialize;

use crate::input::load_graph;
use crate::output::{OutputMode, fmt_score, pretty_kv, pretty_section, render_mode};

/// Arguments for `cgraph summary`.
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Graph description (JSON).
    pub graph: PathBuf,
}

/// Report payload for `cgraph summary`.
#[derive(Debug, Serialize)]
pub struct GraphSummary {
    pub vertices: usize,
    pub edges: usize,
    pub connected: bool,
    pub complete: bool,
    pub empty: bool,
    pub density: f64,
    pub average_clustering: f64,
    pub assortativity: f64,
    pub content_hash: String,
}

/// Execute `cgraph summary`.
pub fn run_summary(
    args: &SummaryArgs,
    output: OutputMode,
    config: &AnalysisConfig,
) -> anyhow::Result<()> {
    let loaded = load_graph(&args.graph, config)?;
    let graph = &loaded.graph;
    let view = graph.adjacency_view();
    let structure = structure_summary(&view);

    let payload = GraphSummary {
        vertices: graph.vertex_count(),
        edges: graph.edge_count(),
        connected: graph.is_connected(),
        complete: graph.is_complete(),
        empty: graph.is_empty_graph(),
        density: structure.density,
        average_clustering: structure.average_clustering,
        assortativity: structure.assortativity,
        content_hash: view.content_hash(),
    };

    render_mode(output, &payload, render_summary_text, render_summary_pretty)
}

fn render_summary_text(summary: &GraphSummary, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "vertices\t{}", summary.vertices)?;
    writeln!(w, "edges\t{}", summary.edges)?;
    writeln!(w, "connected\t{}", summary.connected)?;
    writeln!(w, "complete\t{}", summary.complete)?;
    writeln!(w, "empty\t{}", summary.empty)?;
    writeln!(w, "density\t{}", fmt_score(summary.density))?;
    writeln!(w, "clustering\t{}", fmt_score(summary.average_clustering))?;
    writeln!(w, "assortativity\t{}", fmt_score(summary.assortativity))?;
    writeln!(w, "hash\t{}", summary.content_hash)
}

fn render_summary_pretty(summary: &GraphSummary, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Graph")?;
    pretty_kv(w, "vertices", summary.vertices.to_string())?;
    pretty_kv(w, "edges", summary.edges.to_string())?;
    pretty_kv(w, "connected", yes_no(summary.connected))?;
    pretty_kv(w, "complete", yes_no(summary.complete))?;
    pretty_kv(w, "empty", yes_no(summary.empty))?;
    writeln!(w)?;
    pretty_section(w, "Structure")?;
    pretty_kv(w, "density", fmt_score(summary.density))?;
    pretty_kv(w, "clustering", fmt_score(summary.average_clustering))?;
    pretty_kv(w, "assortativity", fmt_score(summary.assortativity))?;
    pretty_kv(w, "hash", &summary.content_hash)
}

const fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
