//! Combine the four scoring models into one breakdown per post.

use chrono::{DateTime, Utc};
use devlink_core::{
    BreakdownMetrics, CalculationDetails, RankablePost, RankingBreakdown, RankingConfig,
};

use crate::{discovery_boost, score_engagement, spam_penalty, time_decay};

/// Score one post and record every intermediate value.
///
/// The final score is
/// `max((base + ratio) * decay + boost - penalty, base_score_floor)`.
///
/// # Examples
/// ```
/// use devlink_core::RankingConfig;
/// use devlink_core::test_support::{PostBuilder, reference_now};
/// use devlink_ranker::score_post;
///
/// let post = PostBuilder::new("p")
///     .engagement(10, 2, 1, 0)
///     .unique_engagers(12)
///     .author(5_000, 900)
///     .build();
/// let breakdown = score_post(&post, &RankingConfig::default(), reference_now());
/// assert_eq!(breakdown.base_engagement_score, 18.0);
/// assert!(breakdown.final_score >= 0.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "final score combines the model outputs"
)]
pub fn score_post(
    post: &RankablePost,
    config: &RankingConfig,
    now: DateTime<Utc>,
) -> RankingBreakdown {
    let weights = config.weights();
    let engagement = score_engagement(post, weights);
    let decay = time_decay(post.created_at, now, &weights.time_decay);
    let discovery = discovery_boost(&post.author, &weights.new_developer);
    let penalty = spam_penalty(post, &weights.spam_penalty);

    let decayed_core_score = (engagement.base + engagement.ratio_score) * decay.multiplier;
    let pre_floor_score = decayed_core_score + discovery.boost - penalty.total;
    // Adding zero folds a negative-zero result into positive zero.
    let final_score = pre_floor_score.max(weights.base_score_floor) + 0.0;

    log::trace!(
        "post {} scored {final_score:.4} (core {decayed_core_score:.4}, boost {:.4}, penalty {:.4})",
        post.id,
        discovery.boost,
        penalty.total,
    );

    RankingBreakdown {
        metrics: BreakdownMetrics {
            follower_count: post.author.follower_count,
            engagement_to_follower_ratio: engagement.ratio,
            post_age_hours: decay.post_age_hours,
            total_engagement: post.engagement.total(),
            view_count: post.view_count,
            account_age_days: post.author.account_age_days,
            reach: penalty.reach,
            engagement_to_reach_ratio: penalty.engagement_to_reach_ratio,
            duplicate_content_score: penalty.duplicate_score,
            low_engagement_flag: penalty.low_engagement_flag,
        },
        base_engagement_score: engagement.base,
        engagement_ratio_score: engagement.ratio_score,
        time_decay_multiplier: decay.multiplier,
        decayed_core_score,
        new_developer_boost: discovery.boost,
        spam_penalty: penalty.total,
        freshness_score: decay.freshness_score,
        penalties: penalty.total,
        final_score,
        calculation: CalculationDetails {
            raw_engagement: engagement.base,
            contributions: engagement.contributions,
            post_age_hours: decay.post_age_hours,
            freshness_multiplier: decay.multiplier,
            decay_phase: decay.phase,
            follower_component: discovery.follower_component,
            age_component: discovery.age_component,
            is_new_developer: discovery.is_new_developer,
            duplicate_score: penalty.duplicate_score,
            duplicate_penalty: penalty.duplicate,
            low_engagement_penalty: penalty.low_engagement,
            pre_floor_score,
        },
        moderation_notes: penalty.notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devlink_core::test_support::{PostBuilder, reference_now};
    use devlink_core::{DecayPhase, ModerationNote, RankingWeights};
    use rstest::{fixture, rstest};

    #[fixture]
    fn config() -> RankingConfig {
        RankingConfig::default()
    }

    #[rstest]
    #[expect(
        clippy::float_arithmetic,
        reason = "tests compare floating point values"
    )]
    fn established_fresh_post_scores_core_only(config: RankingConfig) {
        let post = PostBuilder::new("p")
            .aged_hours(2)
            .engagement(20, 4, 2, 1)
            .unique_engagers(25)
            .author(1_000, 800)
            .build();

        let breakdown = score_post(&post, &config, reference_now());

        // 20 + 12 + 4 + 2 weighted interactions, 25 / 1000 * 5 ratio.
        assert_eq!(breakdown.base_engagement_score, 38.0);
        assert!((breakdown.engagement_ratio_score - 0.125).abs() < 1e-12);
        assert_eq!(breakdown.time_decay_multiplier, 1.0);
        assert_eq!(breakdown.new_developer_boost, 0.0);
        assert_eq!(breakdown.spam_penalty, 0.0);
        assert!((breakdown.final_score - 38.125).abs() < 1e-12);
        assert_eq!(breakdown.calculation.decay_phase, DecayPhase::Peak);
        assert_eq!(breakdown.metrics.total_engagement, 27);
        assert!(breakdown.moderation_notes.is_empty());
    }

    #[rstest]
    #[expect(
        clippy::float_arithmetic,
        reason = "tests compare floating point values"
    )]
    fn worked_example_core_score() {
        let mut weights = RankingWeights::default();
        weights.engagement.save = 1.0;
        let config = weights.validate().expect("valid weights");
        let post = PostBuilder::new("p")
            .aged_hours(2)
            .engagement(10, 2, 1, 0)
            .unique_engagers(12)
            .author(100, 400)
            .build();

        let breakdown = score_post(&post, &config, reference_now());

        assert_eq!(breakdown.base_engagement_score, 18.0);
        assert!((breakdown.engagement_ratio_score - 0.6).abs() < 1e-9);
        assert_eq!(breakdown.time_decay_multiplier, 1.0);
        assert!((breakdown.decayed_core_score - 18.6).abs() < 1e-9);
    }

    #[rstest]
    fn penalised_post_is_held_at_floor(config: RankingConfig) {
        let post = PostBuilder::new("p")
            .aged_hours(200)
            .author(5_000, 900)
            .duplicate_score(1.0)
            .build();

        let breakdown = score_post(&post, &config, reference_now());

        assert!(breakdown.calculation.pre_floor_score < 0.0);
        assert_eq!(breakdown.final_score, 0.0);
        assert!(breakdown.final_score.is_sign_positive());
        assert_eq!(
            breakdown.moderation_notes,
            vec![ModerationNote::DuplicateHigh, ModerationNote::LowEngagement]
        );
    }

    #[rstest]
    fn custom_floor_is_respected() {
        let config = RankingWeights {
            base_score_floor: 3.5,
            ..RankingWeights::default()
        }
        .validate()
        .expect("valid weights");
        let post = PostBuilder::new("p").author(5_000, 900).build();

        let breakdown = score_post(&post, &config, reference_now());

        assert_eq!(breakdown.final_score, 3.5);
    }

    #[rstest]
    fn newcomer_boost_is_added(config: RankingConfig) {
        let post = PostBuilder::new("p")
            .engagement(1, 0, 0, 0)
            .unique_engagers(1)
            .author(0, 0)
            .build();

        let breakdown = score_post(&post, &config, reference_now());

        assert_eq!(breakdown.new_developer_boost, 25.0);
        assert!(breakdown.calculation.is_new_developer);
        assert!(breakdown.final_score > 25.0);
    }

    #[rstest]
    fn penalties_alias_spam_penalty(config: RankingConfig) {
        let post = PostBuilder::new("p")
            .engagement(3, 0, 0, 0)
            .duplicate_score(0.5)
            .build();

        let breakdown = score_post(&post, &config, reference_now());

        assert_eq!(breakdown.penalties, breakdown.spam_penalty);
        assert_eq!(breakdown.calculation.duplicate_penalty, 5.0);
    }
}
