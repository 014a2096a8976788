//! `cgraph centrality` — rank participants by one centrality measure.

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use collabgraph_core::{AnalysisConfig, GraphStore};
use collabgraph_metrics::Scores;
use collabgraph_metrics::centrality::{
    DegreeMode, PageRankConfig, betweenness_centrality,
    betweenness_centrality_weighted_with_tolerance, closeness_centrality, degree_centrality,
    eigenvector_centrality, pagerank,
};
use serde::Serialize;

use crate::input::{LoadedGraph, load_graph};
use crate::output::{OutputMode, fmt_score, pretty_kv, pretty_rule, pretty_section, render_mode};

/// Centrality measure selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Metric {
    Degree,
    Betweenness,
    WeightedBetweenness,
    Closeness,
    Pagerank,
    Eigenvector,
}

impl Metric {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Degree => "degree",
            Self::Betweenness => "betweenness",
            Self::WeightedBetweenness => "weighted-betweenness",
            Self::Closeness => "closeness",
            Self::Pagerank => "pagerank",
            Self::Eigenvector => "eigenvector",
        }
    }
}

/// Edge direction counted by degree centrality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DegreeArg {
    Out,
    In,
    #[default]
    Total,
}

impl From<DegreeArg> for DegreeMode {
    fn from(arg: DegreeArg) -> Self {
        match arg {
            DegreeArg::Out => Self::Out,
            DegreeArg::In => Self::In,
            DegreeArg::Total => Self::Total,
        }
    }
}

/// Arguments for `cgraph centrality`.
#[derive(Args, Debug)]
pub struct CentralityArgs {
    /// Graph description (JSON).
    pub graph: PathBuf,

    /// Centrality measure to compute.
    #[arg(short, long, value_enum, default_value = "degree")]
    pub metric: Metric,

    /// Show only the N highest-ranked participants.
    #[arg(short, long)]
    pub top: Option<usize>,

    /// Edge direction for degree centrality.
    #[arg(long, value_enum, default_value = "total")]
    pub mode: DegreeArg,

    /// Count edges instead of summing weights (degree only).
    #[arg(long)]
    pub unweighted: bool,
}

/// One row of a centrality ranking.
#[derive(Debug, Serialize)]
pub struct RankedVertex {
    pub rank: usize,
    pub vertex: usize,
    pub name: String,
    pub score: f64,
}

/// Report payload for `cgraph centrality`.
#[derive(Debug, Serialize)]
pub struct CentralityReport {
    pub metric: &'static str,
    pub vertices: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iterations: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub converged: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
    pub ranking: Vec<RankedVertex>,
}

/// Execute `cgraph centrality`.
pub fn run_centrality(
    args: &CentralityArgs,
    output: OutputMode,
    config: &AnalysisConfig,
) -> anyhow::Result<()> {
    let loaded = load_graph(&args.graph, config)?;
    let report = compute(&loaded, args, config);
    render_mode(output, &report, render_text, render_pretty)
}

fn compute(loaded: &LoadedGraph, args: &CentralityArgs, config: &AnalysisConfig) -> CentralityReport {
    let view = loaded.graph.adjacency_view();
    let mut iterations = None;
    let mut converged = None;
    let mut collapsed = None;

    let scores: Scores = match args.metric {
        Metric::Degree => degree_centrality(&view, !args.unweighted, args.mode.into()),
        Metric::Betweenness => betweenness_centrality(&view),
        Metric::WeightedBetweenness => betweenness_centrality_weighted_with_tolerance(
            &view,
            config.betweenness.tie_tolerance,
        ),
        Metric::Closeness => closeness_centrality(&view),
        Metric::Pagerank => {
            let result = pagerank(&view, &PageRankConfig::from(&config.pagerank));
            iterations = Some(result.iterations);
            converged = Some(result.converged);
            result.scores
        }
        Metric::Eigenvector => {
            let result = eigenvector_centrality(
                &view,
                config.eigenvector.max_iter,
                config.eigenvector.tolerance,
            );
            iterations = Some(result.iterations);
            converged = Some(result.converged);
            collapsed = Some(result.collapsed);
            result.scores
        }
    };

    let ranked = match args.top {
        Some(k) => scores.top(k),
        None => scores.ranked(),
    };
    let ranking = ranked
        .into_iter()
        .enumerate()
        .map(|(i, (vertex, score))| RankedVertex {
            rank: i + 1,
            vertex,
            name: loaded.name(vertex),
            score,
        })
        .collect();

    CentralityReport {
        metric: args.metric.as_str(),
        vertices: loaded.graph.vertex_count(),
        iterations,
        converged,
        collapsed,
        ranking,
    }
}

fn render_text(report: &CentralityReport, w: &mut dyn Write) -> std::io::Result<()> {
    for row in &report.ranking {
        writeln!(w, "{}\t{}\t{}", row.rank, row.name, fmt_score(row.score))?;
    }
    Ok(())
}

fn render_pretty(report: &CentralityReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("Centrality: {}", report.metric))?;
    pretty_kv(w, "vertices", report.vertices.to_string())?;
    if let Some(iterations) = report.iterations {
        pretty_kv(w, "iterations", iterations.to_string())?;
    }
    if let Some(converged) = report.converged {
        pretty_kv(w, "converged", converged.to_string())?;
    }
    if report.collapsed == Some(true) {
        pretty_kv(w, "collapsed", "true (all scores zero)")?;
    }
    writeln!(w)?;
    writeln!(w, "{:>4}  {:<32} {:>12}", "RANK", "PARTICIPANT", "SCORE")?;
    pretty_rule(w)?;
    for row in &report.ranking {
        writeln!(
            w,
            "{:>4}  {:<32} {:>12}",
            row.rank,
            row.name,
            fmt_score(row.score)
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use collabgraph_core::ListGraph;

    fn review_chain() -> LoadedGraph {
        LoadedGraph {
            names: ["ana", "ben", "cy", "dee"].map(String::from).to_vec(),
            graph: ListGraph::from_edges(4, &[(0, 1, 2.0), (1, 2, 3.0), (2, 3, 1.0)])
                .expect("build"),
        }
    }

    fn args(metric: Metric) -> CentralityArgs {
        CentralityArgs {
            graph: PathBuf::from("unused.json"),
            metric,
            top: None,
            mode: DegreeArg::Total,
            unweighted: false,
        }
    }

    #[test]
    fn weighted_total_degree_ranks_middle_vertices_first() {
        let report = compute(&review_chain(), &args(Metric::Degree), &AnalysisConfig::default());
        assert_eq!(report.metric, "degree");
        assert_eq!(report.ranking[0].name, "ben");
        assert!((report.ranking[0].score - 5.0).abs() < 1e-12);
        assert_eq!(report.ranking[1].name, "cy");
        assert!(report.iterations.is_none());
    }

    #[test]
    fn top_truncates_ranking() {
        let mut a = args(Metric::Betweenness);
        a.top = Some(2);
        let report = compute(&review_chain(), &a, &AnalysisConfig::default());
        assert_eq!(report.ranking.len(), 2);
        assert_eq!(report.ranking[0].rank, 1);
        assert_eq!(report.ranking[1].rank, 2);
    }

    #[test]
    fn pagerank_reports_iterations() {
        let report = compute(&review_chain(), &args(Metric::Pagerank), &AnalysisConfig::default());
        assert!(report.iterations.is_some());
        assert_eq!(report.converged, Some(true));
        assert!(report.collapsed.is_none());
        let total: f64 = report.ranking.iter().map(|r| r.score).sum();
        assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn eigenvector_on_acyclic_chain_collapses() {
        let report = compute(&review_chain(), &args(Metric::Eigenvector), &AnalysisConfig::default());
        assert_eq!(report.collapsed, Some(true));
        assert!(report.ranking.iter().all(|r| r.score.abs() < f64::EPSILON));
    }

    #[test]
    fn unweighted_in_degree() {
        let mut a = args(Metric::Degree);
        a.unweighted = true;
        a.mode = DegreeArg::In;
        let report = compute(&review_chain(), &a, &AnalysisConfig::default());
        // ana has no incoming edge and sorts last.
        assert_eq!(report.ranking[3].name, "ana");
        assert!((report.ranking[0].score - 1.0).abs() < f64::EPSILON);
    }
}
