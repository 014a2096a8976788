//! `cgraph structure` — density, clustering, and degree assortativity.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use collabgraph_core::{AnalysisConfig, GraphStore};
use collabgraph_metrics::structure::{assortativity, average_clustering_coefficient, density};
use serde::Serialize;

use crate::input::load_graph;
use crate::output::{OutputMode, fmt_score, pretty_kv, pretty_section, render_mode};

/// Arguments for `cgraph structure`.
#[derive(Args, Debug)]
pub struct StructureArgs {
    /// Graph description (JSON).
    pub graph: PathBuf,

    /// Include the `(degree, degree)` pairs behind the assortativity value.
    #[arg(long)]
    pub samples: bool,
}

/// Report payload for `cgraph structure`.
#[derive(Debug, Serialize)]
pub struct StructureReport {
    pub density: f64,
    pub average_clustering: f64,
    pub assortativity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub samples: Option<Vec<(usize, usize)>>,
}

/// Execute `cgraph structure`.
pub fn run_structure(
    args: &StructureArgs,
    output: OutputMode,
    config: &AnalysisConfig,
) -> anyhow::Result<()> {
    let loaded = load_graph(&args.graph, config)?;
    let view = loaded.graph.adjacency_view();
    let assort = assortativity(&view);

    let report = StructureReport {
        density: density(view.vertex_count(), view.edge_count()),
        average_clustering: average_clustering_coefficient(&view),
        assortativity: assort.coefficient,
        samples: args.samples.then_some(assort.samples),
    };

    render_mode(output, &report, render_text, render_pretty)
}

fn render_text(report: &StructureReport, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "density\t{}", fmt_score(report.density))?;
    writeln!(w, "clustering\t{}", fmt_score(report.average_clustering))?;
    writeln!(w, "assortativity\t{}", fmt_score(report.assortativity))?;
    for (a, b) in report.samples.iter().flatten() {
        writeln!(w, "sample\t{a}\t{b}")?;
    }
    Ok(())
}

fn render_pretty(report: &StructureReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Structure")?;
    pretty_kv(w, "density", fmt_score(report.density))?;
    pretty_kv(w, "clustering", fmt_score(report.average_clustering))?;
    pretty_kv(w, "assortativity", fmt_score(report.assortativity))?;
    if let Some(samples) = &report.samples {
        pretty_kv(w, "samples", samples.len().to_string())?;
        for (a, b) in samples {
            writeln!(w, "  ({a}, {b})")?;
        }
    }
    Ok(())
}
