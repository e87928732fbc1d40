//! Loading snapshot batches, weights, and the evaluation instant.

use std::io::BufReader;

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use devlink_core::{PostSnapshot, RankingConfig, RankingWeights};
use serde::de::DeserializeOwned;

use crate::fs::{file_is_file, open_utf8_file};
use crate::{ARG_NOW, ARG_SNAPSHOTS, ARG_WEIGHTS, CliError};

/// Inputs shared by every ranking subcommand.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BatchInputs {
    /// JSON array of post snapshots.
    pub(crate) snapshots: Utf8PathBuf,
    /// Optional JSON weights document.
    pub(crate) weights: Option<Utf8PathBuf>,
    /// Evaluation instant.
    pub(crate) now: DateTime<Utc>,
}

impl BatchInputs {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.snapshots, ARG_SNAPSHOTS)?;
        if let Some(weights) = &self.weights {
            require_existing(weights, ARG_WEIGHTS)?;
        }
        Ok(())
    }

    pub(crate) fn load_snapshots(&self) -> Result<Vec<PostSnapshot>, CliError> {
        load_json(&self.snapshots, ARG_SNAPSHOTS)
    }

    pub(crate) fn load_config(&self) -> Result<RankingConfig, CliError> {
        self.weights
            .as_deref()
            .map_or_else(|| Ok(RankingConfig::default()), load_weights)
    }
}

/// Parse `--now`, defaulting to the current wall-clock time.
pub(crate) fn resolve_now(value: Option<String>) -> Result<DateTime<Utc>, CliError> {
    let Some(raw) = value else {
        return Ok(Utc::now());
    };
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|source| {
            log::debug!("rejecting --{ARG_NOW} value {raw:?}");
            CliError::InvalidNow { value: raw, source }
        })
}

/// Load and validate a weights document.
pub(crate) fn load_weights(path: &Utf8Path) -> Result<RankingConfig, CliError> {
    let weights: RankingWeights = load_json(path, ARG_WEIGHTS)?;
    weights
        .validate()
        .map_err(|source| CliError::InvalidWeights {
            path: path.to_path_buf(),
            source,
        })
}

fn load_json<T: DeserializeOwned>(path: &Utf8Path, field: &'static str) -> Result<T, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenInput {
        field,
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::ParseInput {
        field,
        path: path.to_path_buf(),
        source,
    })
}

fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}
