//! One module per `cgraph` subcommand.

pub mod centrality;
pub mod communities;
pub mod completions;
pub mod export;
pub mod structure;
pub mod summary;
