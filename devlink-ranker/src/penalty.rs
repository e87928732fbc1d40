//! Quality penalty for duplicate and filler content.

use devlink_core::{ModerationNote, RankablePost, SpamPenaltyWeights};

use crate::count_as_f64;

/// Duplicate scores above this are annotated as high-similarity.
const HIGH_DUPLICATE_SCORE: f64 = 0.6;

/// Result of the penalty model for one post.
#[derive(Debug, Clone, PartialEq)]
pub struct SpamPenalty {
    /// Duplicate score after clamping into `0.0..=1.0`.
    pub duplicate_score: f64,
    /// Duplicate signal after its individual cap.
    pub duplicate: f64,
    /// Low-engagement signal after its individual cap.
    pub low_engagement: f64,
    /// Views when non-zero, otherwise followers.
    pub reach: u64,
    /// `total_engagement / reach`, or `0.0` without reach.
    pub engagement_to_reach_ratio: f64,
    /// Whether the low-engagement signal fired.
    pub low_engagement_flag: bool,
    /// Summed penalty in `0.0..=max_penalty`.
    pub total: f64,
    /// Annotations explaining which signals fired.
    pub notes: Vec<ModerationNote>,
}

/// Compute the quality penalty for `post`.
///
/// # Examples
/// ```
/// use devlink_core::SpamPenaltyWeights;
/// use devlink_core::test_support::PostBuilder;
/// use devlink_ranker::spam_penalty;
///
/// let weights = SpamPenaltyWeights::default();
/// let clean = PostBuilder::new("a").engagement(40, 5, 2, 1).build();
/// assert_eq!(spam_penalty(&clean, &weights).total, 0.0);
///
/// let copy = PostBuilder::new("b").engagement(40, 5, 2, 1).duplicate_score(1.0).build();
/// assert_eq!(spam_penalty(&copy, &weights).total, 10.0);
/// ```
#[must_use]
#[expect(clippy::float_arithmetic, reason = "signals are summed before capping")]
pub fn spam_penalty(post: &RankablePost, weights: &SpamPenaltyWeights) -> SpamPenalty {
    let duplicate_score = sanitise_unit(post.duplicate_score);
    let duplicate = duplicate_signal(duplicate_score, weights);

    let total_engagement = post.engagement.total();
    let reach = post.reach();
    let engagement_to_reach_ratio = if reach == 0 {
        0.0
    } else {
        count_as_f64(total_engagement) / count_as_f64(reach)
    };
    let low_engagement_flag = reach > 0
        && reach >= weights.minimum_reach
        && engagement_to_reach_ratio < weights.low_engagement_ratio_threshold;
    let low_engagement = if low_engagement_flag {
        weights.low_engagement_penalty.min(weights.max_penalty)
    } else {
        0.0
    };

    let mut notes = Vec::new();
    if duplicate > 0.0 {
        notes.push(if duplicate_score > HIGH_DUPLICATE_SCORE {
            ModerationNote::DuplicateHigh
        } else {
            ModerationNote::DuplicateMedium
        });
    }
    if low_engagement_flag {
        notes.push(ModerationNote::LowEngagement);
    }

    SpamPenalty {
        duplicate_score,
        duplicate,
        low_engagement,
        reach,
        engagement_to_reach_ratio,
        low_engagement_flag,
        total: (duplicate + low_engagement).min(weights.max_penalty),
        notes,
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "duplicate penalty scales with similarity"
)]
fn duplicate_signal(score: f64, weights: &SpamPenaltyWeights) -> f64 {
    if score <= 0.0 || score <= weights.duplicate_threshold {
        return 0.0;
    }
    (score * weights.duplicate_content_penalty)
        .min(weights.duplicate_content_penalty)
        .min(weights.max_penalty)
}

fn sanitise_unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
