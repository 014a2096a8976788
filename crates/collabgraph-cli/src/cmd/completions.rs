//! `cgraph completions`: shell completion scripts built from the clap
//! command tree, so new subcommands and flags show up without extra work.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use clap_complete::{Shell, generate};

/// Binary name the scripts complete for.
const BIN_NAME: &str = "cgraph";

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to emit a completion script for (bash, zsh, fish, elvish, powershell).
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Print the `shell` script for `command` on stdout.
///
/// # Errors
///
/// Flushing stdout fails.
pub fn run_completions(shell: Shell, command: &mut clap::Command) -> Result<()> {
    let mut out = std::io::stdout().lock();
    write_completions(shell, command, &mut out);
    out.flush()?;
    Ok(())
}

fn write_completions(shell: Shell, command: &mut clap::Command, out: &mut dyn Write) {
    generate(shell, command, BIN_NAME, out);
}
