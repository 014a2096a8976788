#![forbid(unsafe_code)]

mod cmd;
mod input;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use std::env;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "cgraph: collaboration-graph analytics",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format: pretty, text, or json.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Analysis configuration file (default: ./collabgraph.toml when present).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        resolve_output_mode(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Analysis",
        about = "Summarize a graph",
        long_about = "Print vertex and edge counts, connectivity, density, clustering, and assortativity.",
        after_help = "EXAMPLES:\n    # Overview of a collaboration graph\n    cgraph summary team.json\n\n    # Emit machine-readable output\n    cgraph summary team.json --json"
    )]
    Summary(cmd::summary::SummaryArgs),

    #[command(
        next_help_heading = "Analysis",
        about = "Rank participants by centrality",
        long_about = "Compute one centrality measure for every participant and print them ranked, highest first.",
        after_help = "EXAMPLES:\n    # Weighted total degree (default)\n    cgraph centrality team.json\n\n    # Ten most influential participants by PageRank\n    cgraph centrality team.json --metric pagerank --top 10\n\n    # Unweighted in-degree\n    cgraph centrality team.json --mode in --unweighted"
    )]
    Centrality(cmd::centrality::CentralityArgs),

    #[command(
        next_help_heading = "Analysis",
        about = "Detect communities",
        long_about = "Partition the graph with Girvan-Newman and list the ties that bridge communities.",
        after_help = "EXAMPLES:\n    # Split until two communities exist\n    cgraph communities team.json --target 2\n\n    # At most three edge removals\n    cgraph communities team.json --max-splits 3 --json"
    )]
    Communities(cmd::communities::CommunitiesArgs),

    #[command(
        next_help_heading = "Analysis",
        about = "Structural metrics",
        long_about = "Compute density, average clustering coefficient, and degree assortativity.",
        after_help = "EXAMPLES:\n    # Scalar metrics\n    cgraph structure team.json\n\n    # Include assortativity sample pairs\n    cgraph structure team.json --samples --json"
    )]
    Structure(cmd::structure::StructureArgs),

    #[command(
        next_help_heading = "Output",
        about = "Export to GEXF",
        long_about = "Write the graph as GEXF 1.2 for Gephi and other visualization tools.",
        after_help = "EXAMPLES:\n    # Export for Gephi\n    cgraph export team.json --output team.gexf\n\n    # Export through the dense matrix backend\n    cgraph export team.json -o team.gexf --backend matrix"
    )]
    Export(cmd::export::ExportArgs),

    #[command(
        next_help_heading = "Output",
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n    # Bash\n    cgraph completions bash > ~/.local/share/bash-completion/completions/cgraph"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("CGRAPH_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "collabgraph_core=debug,collabgraph_metrics=debug,cgraph=debug,info"
        } else {
            "warn"
        })
    });

    let format = env::var("CGRAPH_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries command output; logs always go to stderr.
    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn run(cli: Cli, output: OutputMode) -> anyhow::Result<()> {
    let working_dir = env::current_dir()?;
    let config = collabgraph_core::load_config(cli.config.as_deref(), &working_dir)?;
    debug!(?config, "loaded configuration");

    match cli.command {
        Commands::Summary(ref args) => cmd::summary::run_summary(args, output, &config),
        Commands::Centrality(ref args) => cmd::centrality::run_centrality(args, output, &config),
        Commands::Communities(ref args) => {
            cmd::communities::run_communities(args, output, &config)
        }
        Commands::Structure(ref args) => cmd::structure::run_structure(args, output, &config),
        Commands::Export(ref args) => cmd::export::run_export(args, output, &config),
        Commands::Completions(ref args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = cli.output_mode();
    if let Err(err) = run(cli, output) {
        if render_error(output, &CliError::from(&err)).is_err() {
            eprintln!("error: {err:#}");
        }
        std::process::exit(1);
    }
}
