//! Command-line interface for ranking DevLink feed snapshots offline.
//!
//! Arguments are layered with `ortho_config`: CLI flags override
//! `DEVLINK_*` environment variables, which override configuration files.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod explain;
mod fs;
mod input;
mod rank;

pub use error::CliError;

use explain::{ExplainArgs, run_explain};
use rank::{RankArgs, run_rank};

pub(crate) const ARG_SNAPSHOTS: &str = "snapshots";
pub(crate) const ARG_WEIGHTS: &str = "weights";
pub(crate) const ARG_NOW: &str = "now";
pub(crate) const ARG_LIMIT: &str = "limit";
pub(crate) const ARG_POST_ID: &str = "post-id";
pub(crate) const ENV_RANK_SNAPSHOTS: &str = "DEVLINK_CMDS_RANK_SNAPSHOTS";
pub(crate) const ENV_EXPLAIN_SNAPSHOTS: &str = "DEVLINK_CMDS_EXPLAIN_SNAPSHOTS";
pub(crate) const ENV_EXPLAIN_POST_ID: &str = "DEVLINK_CMDS_EXPLAIN_POST_ID";

/// Run the `devlink` CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments, inputs, or ranking fail.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Rank(args) => run_rank(args),
        Command::Explain(args) => run_explain(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "devlink",
    about = "Rank and explain DevLink feed snapshots",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank a batch of snapshots and print the result as JSON.
    Rank(RankArgs),
    /// Print the step-by-step score of one post.
    Explain(ExplainArgs),
}

#[cfg(test)]
mod tests;
