//! `explain` command: print the arithmetic behind one post's score.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use devlink_core::PostId;
use devlink_ranker::{ExplanationStep, explain};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::input::{BatchInputs, resolve_now};
use crate::rank::rank_snapshots;
use crate::{
    ARG_NOW, ARG_POST_ID, ARG_SNAPSHOTS, ARG_WEIGHTS, CliError, ENV_EXPLAIN_POST_ID,
    ENV_EXPLAIN_SNAPSHOTS,
};

/// CLI arguments for the `explain` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank a JSON array of post snapshots and print every \
                 arithmetic step behind one post's final score, from the \
                 weighted interactions to the score floor.",
    about = "Explain the score of one post"
)]
#[ortho_config(prefix = "DEVLINK")]
pub(crate) struct ExplainArgs {
    /// Path to a JSON array of post snapshots.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) snapshots: Option<Utf8PathBuf>,
    /// ID of the post to explain.
    #[arg(long = ARG_POST_ID, value_name = "id")]
    #[serde(default)]
    pub(crate) post_id: Option<String>,
    /// Path to a JSON weights document; omitted fields keep their defaults.
    #[arg(long = ARG_WEIGHTS, value_name = "path")]
    #[serde(default)]
    pub(crate) weights: Option<Utf8PathBuf>,
    /// Evaluation instant as RFC 3339; defaults to the current time.
    #[arg(long = ARG_NOW, value_name = "timestamp")]
    #[serde(default)]
    pub(crate) now: Option<String>,
}

impl ExplainArgs {
    pub(crate) fn into_config(self) -> Result<ExplainConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ExplainConfig::try_from(merged)
    }
}

/// Resolved `explain` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ExplainConfig {
    /// Snapshot, weights, and clock inputs.
    pub(crate) inputs: BatchInputs,
    /// Post to explain.
    pub(crate) post_id: PostId,
}

impl TryFrom<ExplainArgs> for ExplainConfig {
    type Error = CliError;

    fn try_from(args: ExplainArgs) -> Result<Self, Self::Error> {
        let snapshots = args.snapshots.ok_or(CliError::MissingArgument {
            field: ARG_SNAPSHOTS,
            env: ENV_EXPLAIN_SNAPSHOTS,
        })?;
        let post_id = args.post_id.ok_or(CliError::MissingArgument {
            field: ARG_POST_ID,
            env: ENV_EXPLAIN_POST_ID,
        })?;
        Ok(Self {
            inputs: BatchInputs {
                snapshots,
                weights: args.weights,
                now: resolve_now(args.now)?,
            },
            post_id: PostId::new(post_id),
        })
    }
}

pub(crate) fn run_explain(args: ExplainArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_explain_with(args, &mut stdout)
}

pub(crate) fn run_explain_with(args: ExplainArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let steps = explain_post(&config)?;
    write_steps(writer, &config.post_id, &steps)
}

/// Rank the whole batch so duplicate detection sees every post, then
/// explain the requested one.
fn explain_post(config: &ExplainConfig) -> Result<Vec<ExplanationStep>, CliError> {
    config.inputs.validate_sources()?;
    let ranking = config.inputs.load_config()?;
    let snapshots = config.inputs.load_snapshots()?;
    let result = rank_snapshots(snapshots, ranking, &config.inputs)?;
    let breakdown = result
        .breakdown(&config.post_id)
        .ok_or_else(|| CliError::UnknownPostId {
            id: config.post_id.to_string(),
        })?;
    Ok(explain(breakdown, ranking.weights()))
}

fn write_steps(
    writer: &mut dyn Write,
    post_id: &PostId,
    steps: &[ExplanationStep],
) -> Result<(), CliError> {
    writeln!(writer, "post {post_id}").map_err(CliError::WriteOutput)?;
    for step in steps {
        writeln!(writer, "  {step}").map_err(CliError::WriteOutput)?;
    }
    Ok(())
}
