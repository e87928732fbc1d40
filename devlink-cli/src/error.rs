//! Error types emitted by the `devlink` CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use devlink_core::{ConfigurationError, RankError};
use thiserror::Error;

/// Errors emitted by the `devlink` CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Argument name.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Argument name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Argument name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Argument name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Opening an input file failed.
    #[error("failed to open {field} at {path:?}: {source}")]
    OpenInput {
        /// Argument name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// An input file did not contain the expected JSON document.
    #[error("failed to parse {field} JSON at {path:?}: {source}")]
    ParseInput {
        /// Argument name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Decoder failure.
        #[source]
        source: serde_json::Error,
    },
    /// The weights file decoded but holds out-of-range values.
    #[error("weights in {path:?} are invalid: {source}")]
    InvalidWeights {
        /// Weights file.
        path: Utf8PathBuf,
        /// Failed range check.
        #[source]
        source: ConfigurationError,
    },
    /// The `--now` value is not an RFC 3339 timestamp.
    #[error("--now value {value:?} is not an RFC 3339 timestamp: {source}")]
    InvalidNow {
        /// Rejected value.
        value: String,
        /// Parser failure.
        #[source]
        source: chrono::ParseError,
    },
    /// The ranker rejected the batch.
    #[error("ranking failed: {0}")]
    Rank(#[from] RankError),
    /// The requested post is not part of the snapshot batch.
    #[error("post {id:?} is not in the snapshot batch")]
    UnknownPostId {
        /// Requested post ID.
        id: String,
    },
    /// Serialising the ranking result failed.
    #[error("failed to serialise ranking result: {0}")]
    SerialiseRankingResult(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
