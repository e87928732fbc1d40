//! Tunable ranking weights and their load-time validation.
//!
//! [`RankingWeights`] mirrors the JSON configuration document and accepts
//! partial overrides: any field left out falls back to the production
//! default. Scoring code never sees raw weights; it receives a
//! [`RankingConfig`], which can only be built from weights that passed
//! [`RankingWeights::validate`]. Range checks therefore run once per load
//! rather than once per post.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Per-interaction multipliers for the engagement score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngagementWeights {
    /// Multiplier per like.
    pub like: f64,
    /// Multiplier per reply.
    pub reply: f64,
    /// Multiplier per repost.
    pub repost: f64,
    /// Multiplier per save.
    pub save: f64,
}

impl Default for EngagementWeights {
    fn default() -> Self {
        Self {
            like: 1.0,
            reply: 3.0,
            repost: 2.0,
            save: 2.0,
        }
    }
}

/// Two-phase half-life decay parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimeDecayWeights {
    /// Hours during which a post keeps its full freshness.
    pub freshness_peak_hours: f64,
    /// Half-life applied right after the peak window.
    pub fresh_half_life_hours: f64,
    /// Slower half-life applied once the transition has passed.
    pub evergreen_half_life_hours: f64,
    /// Hours after the peak at which the evergreen half-life takes over.
    pub transition_hours: f64,
    /// Lower bound of the multiplier, in `0.0..=1.0`.
    pub minimum_multiplier: f64,
}

impl Default for TimeDecayWeights {
    fn default() -> Self {
        Self {
            freshness_peak_hours: 6.0,
            fresh_half_life_hours: 24.0,
            evergreen_half_life_hours: 48.0,
            transition_hours: 24.0,
            minimum_multiplier: 0.2,
        }
    }
}

/// Discovery boost parameters for under-exposed creators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewDeveloperWeights {
    /// Accounts with fewer followers than this receive a follower component.
    pub follower_threshold: u64,
    /// Accounts younger than this many days receive an age component.
    pub account_age_days_threshold: u64,
    /// Upper bound of the combined boost.
    pub max_boost: f64,
}

impl Default for NewDeveloperWeights {
    fn default() -> Self {
        Self {
            follower_threshold: 300,
            account_age_days_threshold: 45,
            max_boost: 25.0,
        }
    }
}

/// Quality penalty parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpamPenaltyWeights {
    /// Duplicate scores at or below this value are ignored.
    pub duplicate_threshold: f64,
    /// Penalty for an exact duplicate; scaled by the duplicate score.
    pub duplicate_content_penalty: f64,
    /// Engagement-to-reach ratio under which a post counts as filler.
    pub low_engagement_ratio_threshold: f64,
    /// Flat penalty applied to filler posts.
    pub low_engagement_penalty: f64,
    /// Reach below which the low-engagement signal stays silent.
    pub minimum_reach: u64,
    /// Upper bound of the summed penalty.
    pub max_penalty: f64,
}

impl Default for SpamPenaltyWeights {
    fn default() -> Self {
        Self {
            duplicate_threshold: 0.2,
            duplicate_content_penalty: 10.0,
            low_engagement_ratio_threshold: 0.005,
            low_engagement_penalty: 5.0,
            minimum_reach: 10,
            max_penalty: 20.0,
        }
    }
}

/// Complete weight configuration for one ranking deployment.
///
/// # Examples
/// ```
/// use devlink_core::RankingWeights;
///
/// # fn main() -> Result<(), devlink_core::ConfigurationError> {
/// let weights: RankingWeights =
///     serde_json::from_str(r#"{ "engagement": { "like": 10 } }"#).expect("valid json");
/// assert_eq!(weights.engagement.like, 10.0);
/// assert_eq!(weights.engagement.reply, 3.0);
/// let config = weights.validate()?;
/// assert_eq!(config.weights().new_developer.max_boost, 25.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RankingWeights {
    /// Per-interaction multipliers.
    pub engagement: EngagementWeights,
    /// Multiplier applied to `unique_engagers / max(follower_count, 1)`.
    pub engagement_ratio: f64,
    /// Freshness decay.
    pub time_decay: TimeDecayWeights,
    /// Discovery boost.
    pub new_developer: NewDeveloperWeights,
    /// Quality penalty.
    pub spam_penalty: SpamPenaltyWeights,
    /// Minimum final score.
    pub base_score_floor: f64,
    /// Informational share of engagement, in percent.
    pub engagement_weight: f64,
    /// Informational share of freshness, in percent.
    pub freshness_weight: f64,
    /// Informational share of discovery, in percent.
    pub discovery_weight: f64,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            engagement: EngagementWeights::default(),
            engagement_ratio: 5.0,
            time_decay: TimeDecayWeights::default(),
            new_developer: NewDeveloperWeights::default(),
            spam_penalty: SpamPenaltyWeights::default(),
            base_score_floor: 0.0,
            engagement_weight: 50.0,
            freshness_weight: 30.0,
            discovery_weight: 20.0,
        }
    }
}

/// Errors raised when a weight configuration is out of range.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// A weight was NaN or infinite.
    #[error("{field} must be finite")]
    NonFinite {
        /// Dotted field path.
        field: &'static str,
    },
    /// A weight was below zero.
    #[error("{field} must be non-negative, got {value}")]
    Negative {
        /// Dotted field path.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// A half-life was zero, which would make decay undefined.
    #[error("{field} must be greater than zero, got {value}")]
    NonPositiveHalfLife {
        /// Dotted field path.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// A value constrained to the unit interval fell outside it.
    #[error("{field} must be between 0.0 and 1.0, got {value}")]
    OutsideUnitInterval {
        /// Dotted field path.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },
}

impl RankingWeights {
    /// Check every range constraint and freeze the weights.
    ///
    /// # Errors
    /// Returns [`ConfigurationError`] naming the first offending field.
    pub fn validate(self) -> Result<RankingConfig, ConfigurationError> {
        for (field, value) in self.numeric_fields() {
            if !value.is_finite() {
                return Err(ConfigurationError::NonFinite { field });
            }
            if value < 0.0 {
                return Err(ConfigurationError::Negative { field, value });
            }
        }
        let decay = &self.time_decay;
        for (field, value) in [
            ("timeDecay.freshHalfLifeHours", decay.fresh_half_life_hours),
            (
                "timeDecay.evergreenHalfLifeHours",
                decay.evergreen_half_life_hours,
            ),
        ] {
            if value <= 0.0 {
                return Err(ConfigurationError::NonPositiveHalfLife { field, value });
            }
        }
        for (field, value) in [
            ("timeDecay.minimumMultiplier", decay.minimum_multiplier),
            (
                "spamPenalty.duplicateThreshold",
                self.spam_penalty.duplicate_threshold,
            ),
        ] {
            if value > 1.0 {
                return Err(ConfigurationError::OutsideUnitInterval { field, value });
            }
        }
        Ok(RankingConfig { weights: self })
    }

    fn numeric_fields(&self) -> [(&'static str, f64); 20] {
        let decay = &self.time_decay;
        let spam = &self.spam_penalty;
        [
            ("engagement.like", self.engagement.like),
            ("engagement.reply", self.engagement.reply),
            ("engagement.repost", self.engagement.repost),
            ("engagement.save", self.engagement.save),
            ("engagementRatio", self.engagement_ratio),
            ("timeDecay.freshnessPeakHours", decay.freshness_peak_hours),
            ("timeDecay.freshHalfLifeHours", decay.fresh_half_life_hours),
            (
                "timeDecay.evergreenHalfLifeHours",
                decay.evergreen_half_life_hours,
            ),
            ("timeDecay.transitionHours", decay.transition_hours),
            ("timeDecay.minimumMultiplier", decay.minimum_multiplier),
            ("newDeveloper.maxBoost", self.new_developer.max_boost),
            ("spamPenalty.duplicateThreshold", spam.duplicate_threshold),
            (
                "spamPenalty.duplicateContentPenalty",
                spam.duplicate_content_penalty,
            ),
            (
                "spamPenalty.lowEngagementRatioThreshold",
                spam.low_engagement_ratio_threshold,
            ),
            ("spamPenalty.lowEngagementPenalty", spam.low_engagement_penalty),
            ("spamPenalty.maxPenalty", spam.max_penalty),
            ("baseScoreFloor", self.base_score_floor),
            ("engagementWeight", self.engagement_weight),
            ("freshnessWeight", self.freshness_weight),
            ("discoveryWeight", self.discovery_weight),
        ]
    }
}

/// Validated, immutable weights shared read-only across ranking calls.
///
/// Deserialising a `RankingConfig` runs the same validation as
/// [`RankingWeights::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RankingWeights", into = "RankingWeights")]
pub struct RankingConfig {
    weights: RankingWeights,
}

impl RankingConfig {
    /// Borrow the validated weights.
    #[must_use]
    pub const fn weights(&self) -> &RankingWeights {
        &self.weights
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            weights: RankingWeights::default(),
        }
    }
}

impl TryFrom<RankingWeights> for RankingConfig {
    type Error = ConfigurationError;

    fn try_from(weights: RankingWeights) -> Result<Self, Self::Error> {
        weights.validate()
    }
}

impl From<RankingConfig> for RankingWeights {
    fn from(config: RankingConfig) -> Self {
        config.weights
    }
}
