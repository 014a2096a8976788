//! `cgraph communities` — Girvan–Newman partition plus the ties between
//! the resulting communities.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use collabgraph_core::{AnalysisConfig, GraphStore};
use collabgraph_metrics::community::{GirvanNewmanConfig, find_bridging_ties, girvan_newman};
use serde::Serialize;

use crate::input::{LoadedGraph, load_graph};
use crate::output::{OutputMode, fmt_score, pretty_kv, pretty_section, render_mode};

/// Arguments for `cgraph communities`.
#[derive(Args, Debug)]
pub struct CommunitiesArgs {
    /// Graph description (JSON).
    pub graph: PathBuf,

    /// Maximum number of edge removals (overrides `[community] max_splits`).
    #[arg(long)]
    pub max_splits: Option<usize>,

    /// Stop once this many communities exist (overrides
    /// `[community] target_communities`).
    #[arg(long)]
    pub target: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct Community {
    pub index: usize,
    pub vertices: Vec<usize>,
    pub members: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CutEdge {
    pub u: String,
    pub v: String,
    pub score: f64,
}

#[derive(Debug, Serialize)]
pub struct Tie {
    pub source: String,
    pub target: String,
    pub weight: f64,
}

/// Report payload for `cgraph communities`.
#[derive(Debug, Serialize)]
pub struct CommunityReport {
    pub communities: Vec<Community>,
    pub removed: Vec<CutEdge>,
    pub bridging_ties: Vec<Tie>,
}

/// Execute `cgraph communities`.
pub fn run_communities(
    args: &CommunitiesArgs,
    output: OutputMode,
    config: &AnalysisConfig,
) -> anyhow::Result<()> {
    let loaded = load_graph(&args.graph, config)?;

    let mut gn_config = GirvanNewmanConfig::from(&config.community);
    if let Some(max_splits) = args.max_splits {
        gn_config.max_splits = max_splits;
    }
    if args.target.is_some() {
        gn_config.target_communities = args.target;
    }

    let report = compute(&loaded, &gn_config);
    render_mode(output, &report, render_text, render_pretty)
}

fn compute(loaded: &LoadedGraph, gn_config: &GirvanNewmanConfig) -> CommunityReport {
    let view = loaded.graph.adjacency_view();
    let partition = girvan_newman(&view, gn_config);
    let ties = find_bridging_ties(&view, &partition.communities);

    let communities = partition
        .communities
        .iter()
        .enumerate()
        .map(|(index, vertices)| Community {
            index,
            vertices: vertices.clone(),
            members: vertices.iter().map(|&v| loaded.name(v)).collect(),
        })
        .collect();

    let removed = partition
        .removed
        .iter()
        .map(|edge| CutEdge {
            u: loaded.name(edge.u),
            v: loaded.name(edge.v),
            score: edge.score,
        })
        .collect();

    let bridging_ties = ties
        .iter()
        .map(|tie| Tie {
            source: loaded.name(tie.source),
            target: loaded.name(tie.target),
            weight: tie.weight,
        })
        .collect();

    CommunityReport {
        communities,
        removed,
        bridging_ties,
    }
}

fn render_text(report: &CommunityReport, w: &mut dyn Write) -> std::io::Result<()> {
    for community in &report.communities {
        writeln!(w, "community\t{}\t{}", community.index, community.members.join(","))?;
    }
    for edge in &report.removed {
        writeln!(w, "removed\t{}\t{}\t{}", edge.u, edge.v, fmt_score(edge.score))?;
    }
    for tie in &report.bridging_ties {
        writeln!(w, "tie\t{}\t{}\t{}", tie.source, tie.target, fmt_score(tie.weight))?;
    }
    Ok(())
}

fn render_pretty(report: &CommunityReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Communities")?;
    for community in &report.communities {
        pretty_kv(
            w,
            &format!("#{}", community.index),
            community.members.join(", "),
        )?;
    }

    writeln!(w)?;
    pretty_section(w, "Removed edges")?;
    if report.removed.is_empty() {
        writeln!(w, "(none)")?;
    }
    for edge in &report.removed {
        writeln!(w, "{} -- {}  score {}", edge.u, edge.v, fmt_score(edge.score))?;
    }

    writeln!(w)?;
    pretty_section(w, "Bridging ties")?;
    if report.bridging_ties.is_empty() {
        writeln!(w, "(none)")?;
    }
    for tie in &report.bridging_ties {
        writeln!(
            w,
            "{} -> {}  weight {}",
            tie.source,
            tie.target,
            fmt_score(tie.weight)
        )?;
    }
    Ok(())
}
