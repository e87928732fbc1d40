//! Ranking output: ordered IDs plus the per-post score breakdown.
//!
//! Breakdowns are flat, serialisable records built from the values each
//! scoring step actually used, so the analytics surface can replay every
//! arithmetic step without recomputing anything.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::PostId;

/// Display metrics copied or derived from the snapshot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownMetrics {
    /// Author follower count.
    pub follower_count: u64,
    /// `unique_engagers / max(follower_count, 1)`.
    pub engagement_to_follower_ratio: f64,
    /// Age of the post in fractional hours, never negative.
    pub post_age_hours: f64,
    /// Sum of likes, replies, reposts and saves.
    pub total_engagement: u64,
    /// Impressions, when known.
    pub view_count: Option<u64>,
    /// Author account age in days.
    pub account_age_days: u64,
    /// Audience used by the low-engagement check: views when non-zero,
    /// otherwise followers.
    pub reach: u64,
    /// `total_engagement / reach`, or `0.0` without any reach.
    pub engagement_to_reach_ratio: f64,
    /// Clamped duplicate score used by the penalty model.
    pub duplicate_content_score: f64,
    /// Whether the low-engagement signal fired.
    pub low_engagement_flag: bool,
}

/// One `count x weight = contribution` line of the engagement score.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionContribution {
    /// Raw interaction count.
    pub count: u64,
    /// Configured multiplier.
    pub weight: f64,
    /// `count * weight`.
    pub contribution: f64,
}

/// Per-interaction contributions to the base engagement score.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementContributions {
    /// Likes line.
    pub likes: InteractionContribution,
    /// Replies line.
    pub replies: InteractionContribution,
    /// Reposts line.
    pub reposts: InteractionContribution,
    /// Saves line.
    pub saves: InteractionContribution,
}

/// Which regime of the decay curve produced the multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DecayPhase {
    /// Inside the freshness peak window; no decay.
    #[default]
    Peak,
    /// Decaying with the fresh half-life.
    Fresh,
    /// Decaying with the evergreen half-life.
    Evergreen,
    /// Held at the minimum multiplier.
    Floor,
}

/// Moderation annotations attached to a breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationNote {
    /// Duplicate score crossed the penalty threshold.
    DuplicateMedium,
    /// Duplicate score above `0.6`.
    DuplicateHigh,
    /// Engagement is negligible relative to reach.
    LowEngagement,
}

impl ModerationNote {
    /// Stable machine-readable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DuplicateMedium => "duplicate_medium",
            Self::DuplicateHigh => "duplicate_high",
            Self::LowEngagement => "low_engagement",
        }
    }
}

/// Raw intermediates retained for the step-by-step explanation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationDetails {
    /// Weighted engagement sum before decay.
    pub raw_engagement: f64,
    /// Per-interaction lines making up `raw_engagement`.
    pub contributions: EngagementContributions,
    /// Age of the post in fractional hours.
    pub post_age_hours: f64,
    /// Multiplier produced by the decay model.
    pub freshness_multiplier: f64,
    /// Regime of the decay curve.
    pub decay_phase: DecayPhase,
    /// Follower share of the discovery boost in `0.0..=1.0`.
    pub follower_component: f64,
    /// Account-age share of the discovery boost in `0.0..=1.0`.
    pub age_component: f64,
    /// Whether either discovery threshold applied.
    pub is_new_developer: bool,
    /// Clamped duplicate score.
    pub duplicate_score: f64,
    /// Duplicate signal after its individual cap.
    pub duplicate_penalty: f64,
    /// Low-engagement signal after its individual cap.
    pub low_engagement_penalty: f64,
    /// Score before the floor was applied.
    pub pre_floor_score: f64,
}

/// Every intermediate and final value computed for one post.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingBreakdown {
    /// Display metrics.
    pub metrics: BreakdownMetrics,
    /// Weighted interaction sum.
    pub base_engagement_score: f64,
    /// Engagement ratio times its weight.
    pub engagement_ratio_score: f64,
    /// Freshness multiplier in `minimum_multiplier..=1.0`.
    pub time_decay_multiplier: f64,
    /// `(base + ratio) * multiplier`.
    pub decayed_core_score: f64,
    /// Discovery bonus in `0.0..=max_boost`.
    pub new_developer_boost: f64,
    /// Quality penalty in `0.0..=max_penalty`.
    pub spam_penalty: f64,
    /// Multiplier scaled to `0.0..=100.0`.
    pub freshness_score: f64,
    /// Alias of `spam_penalty` for display.
    pub penalties: f64,
    /// Sort key, never below the configured floor.
    pub final_score: f64,
    /// Raw intermediates.
    pub calculation: CalculationDetails,
    /// Moderation annotations in a fixed order.
    pub moderation_notes: Vec<ModerationNote>,
}

/// Output of one ranking call.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingResult {
    /// Post IDs, best first.
    pub ordered_post_ids: Vec<PostId>,
    /// Breakdown per post.
    pub breakdown_by_id: BTreeMap<PostId, RankingBreakdown>,
}

impl RankingResult {
    /// Keep only the first `limit` posts, dropping their breakdowns too.
    ///
    /// # Examples
    /// ```
    /// use devlink_core::{PostId, RankingBreakdown, RankingResult};
    ///
    /// let mut result = RankingResult::default();
    /// for id in ["a", "b", "c"] {
    ///     result.ordered_post_ids.push(PostId::from(id));
    ///     result.breakdown_by_id.insert(PostId::from(id), RankingBreakdown::default());
    /// }
    /// let page = result.truncated(2);
    /// assert_eq!(page.ordered_post_ids.len(), 2);
    /// assert!(!page.breakdown_by_id.contains_key(&PostId::from("c")));
    /// ```
    #[must_use]
    pub fn truncated(mut self, limit: usize) -> Self {
        self.ordered_post_ids.truncate(limit);
        let kept = &self.ordered_post_ids;
        self.breakdown_by_id.retain(|id, _| kept.contains(id));
        self
    }

    /// Breakdown for a post, if it was ranked.
    #[must_use]
    pub fn breakdown(&self, id: &PostId) -> Option<&RankingBreakdown> {
        self.breakdown_by_id.get(id)
    }
}
