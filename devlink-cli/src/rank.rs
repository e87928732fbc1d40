//! `rank` command: order a snapshot batch and print the result as JSON.

use std::io::Write;
use std::time::Instant;

use camino::Utf8PathBuf;
use clap::Parser;
use devlink_core::{FeedRanker, PostSnapshot, RankingConfig, RankingResult};
use devlink_ranker::{WeightedRanker, prepare_batch};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::input::{BatchInputs, resolve_now};
use crate::{ARG_LIMIT, ARG_NOW, ARG_SNAPSHOTS, ARG_WEIGHTS, CliError, ENV_RANK_SNAPSHOTS};

/// CLI arguments for the `rank` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank a JSON array of post snapshots and print the ordered \
                 post IDs with a score breakdown for every post. Weights \
                 default to the production values unless a weights file is \
                 given.",
    about = "Rank a batch of post snapshots"
)]
#[ortho_config(prefix = "DEVLINK")]
pub(crate) struct RankArgs {
    /// Path to a JSON array of post snapshots.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) snapshots: Option<Utf8PathBuf>,
    /// Path to a JSON weights document; omitted fields keep their defaults.
    #[arg(long = ARG_WEIGHTS, value_name = "path")]
    #[serde(default)]
    pub(crate) weights: Option<Utf8PathBuf>,
    /// Evaluation instant as RFC 3339; defaults to the current time.
    #[arg(long = ARG_NOW, value_name = "timestamp")]
    #[serde(default)]
    pub(crate) now: Option<String>,
    /// Keep only the first `n` ranked posts.
    #[arg(long = ARG_LIMIT, value_name = "n")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

impl RankArgs {
    pub(crate) fn into_config(self) -> Result<RankConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RankConfig::try_from(merged)
    }
}

/// Resolved `rank` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RankConfig {
    /// Snapshot, weights, and clock inputs.
    pub(crate) inputs: BatchInputs,
    /// Page size.
    pub(crate) limit: Option<usize>,
}

impl TryFrom<RankArgs> for RankConfig {
    type Error = CliError;

    fn try_from(args: RankArgs) -> Result<Self, Self::Error> {
        let snapshots = args.snapshots.ok_or(CliError::MissingArgument {
            field: ARG_SNAPSHOTS,
            env: ENV_RANK_SNAPSHOTS,
        })?;
        Ok(Self {
            inputs: BatchInputs {
                snapshots,
                weights: args.weights,
                now: resolve_now(args.now)?,
            },
            limit: args.limit,
        })
    }
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_rank_with(args, &mut stdout)
}

pub(crate) fn run_rank_with(args: RankArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.inputs.validate_sources()?;
    let ranking = config.inputs.load_config()?;
    let snapshots = config.inputs.load_snapshots()?;
    let mut result = rank_snapshots(snapshots, ranking, &config.inputs)?;
    if let Some(limit) = config.limit {
        result = result.truncated(limit);
    }
    write_ranking_result(writer, &result)
}

/// Prepare and rank a snapshot batch, logging its size and duration.
pub(crate) fn rank_snapshots(
    snapshots: Vec<PostSnapshot>,
    config: RankingConfig,
    inputs: &BatchInputs,
) -> Result<RankingResult, CliError> {
    let started = Instant::now();
    let posts = prepare_batch(snapshots);
    let result = WeightedRanker::new(config).rank(&posts, inputs.now)?;
    log::info!(
        "ranked {} posts from {} in {:?}",
        posts.len(),
        inputs.snapshots,
        started.elapsed()
    );
    Ok(result)
}

fn write_ranking_result(writer: &mut dyn Write, result: &RankingResult) -> Result<(), CliError> {
    let payload =
        serde_json::to_string_pretty(result).map_err(CliError::SerialiseRankingResult)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RankConfig, CliError> {
    let merged = RankArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RankConfig::try_from(merged)
}
