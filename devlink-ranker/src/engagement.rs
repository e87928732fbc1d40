//! Weighted engagement and engagement-to-follower ratio.

use devlink_core::{
    EngagementContributions, EngagementCounts, InteractionContribution, RankablePost,
    RankingWeights,
};

use crate::count_as_f64;

/// Result of the engagement scorer for one post.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngagementScore {
    /// Sum of the four weighted interaction counts.
    pub base: f64,
    /// `ratio * engagement_ratio` weight.
    pub ratio_score: f64,
    /// `unique_engagers / max(follower_count, 1)`.
    pub ratio: f64,
    /// Per-interaction lines making up `base`.
    pub contributions: EngagementContributions,
}

/// Score the engagement of `post`.
///
/// A zero-follower account divides by one, so its ratio equals its unique
/// engager count.
///
/// # Examples
/// ```
/// use devlink_core::RankingWeights;
/// use devlink_core::test_support::PostBuilder;
/// use devlink_ranker::score_engagement;
///
/// let post = PostBuilder::new("p")
///     .engagement(10, 2, 1, 0)
///     .unique_engagers(12)
///     .author(100, 10)
///     .build();
/// let score = score_engagement(&post, &RankingWeights::default());
/// assert_eq!(score.base, 10.0 + 6.0 + 2.0);
/// assert_eq!(score.ratio, 0.12);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "engagement scoring multiplies the ratio by its weight"
)]
pub fn score_engagement(post: &RankablePost, weights: &RankingWeights) -> EngagementScore {
    let contributions = weigh_interactions(&post.engagement, weights);
    let base = contributions.likes.contribution
        + contributions.replies.contribution
        + contributions.reposts.contribution
        + contributions.saves.contribution;
    let ratio = engagement_to_follower_ratio(post.unique_engagers, post.author.follower_count);
    EngagementScore {
        base,
        ratio_score: ratio * weights.engagement_ratio,
        ratio,
        contributions,
    }
}

fn weigh_interactions(
    counts: &EngagementCounts,
    weights: &RankingWeights,
) -> EngagementContributions {
    let w = &weights.engagement;
    EngagementContributions {
        likes: contribution(counts.likes, w.like),
        replies: contribution(counts.replies, w.reply),
        reposts: contribution(counts.reposts, w.repost),
        saves: contribution(counts.saves, w.save),
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "each interaction line is count times weight"
)]
fn contribution(count: u64, weight: f64) -> InteractionContribution {
    InteractionContribution {
        count,
        weight,
        contribution: count_as_f64(count) * weight,
    }
}

#[expect(clippy::float_arithmetic, reason = "ratio of two counts")]
fn engagement_to_follower_ratio(unique_engagers: u64, follower_count: u64) -> f64 {
    count_as_f64(unique_engagers) / count_as_f64(follower_count.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use devlink_core::test_support::PostBuilder;
    use devlink_core::EngagementWeights;
    use rstest::{fixture, rstest};

    #[fixture]
    fn weights() -> RankingWeights {
        RankingWeights {
            engagement: EngagementWeights {
                like: 1.0,
                reply: 3.0,
                repost: 2.0,
                save: 1.0,
            },
            ..RankingWeights::default()
        }
    }

    #[rstest]
    #[expect(
        clippy::float_arithmetic,
        reason = "tests compare floating point values"
    )]
    fn worked_example_matches(weights: RankingWeights) {
        let post = PostBuilder::new("p")
            .engagement(10, 2, 1, 0)
            .unique_engagers(12)
            .author(100, 400)
            .build();

        let score = score_engagement(&post, &weights);

        assert_eq!(score.base, 18.0);
        assert!((score.ratio_score - 0.6).abs() < 1e-9);
        assert_eq!(score.contributions.replies.contribution, 6.0);
        assert_eq!(score.contributions.saves.count, 0);
    }

    #[rstest]
    fn zero_followers_fall_back_to_unique_engagers(weights: RankingWeights) {
        let post = PostBuilder::new("p")
            .engagement(5, 5, 0, 0)
            .unique_engagers(10)
            .author(0, 1)
            .build();

        let score = score_engagement(&post, &weights);

        assert_eq!(score.ratio, 10.0);
        assert_eq!(score.ratio_score, 50.0);
    }

    #[rstest]
    #[case(1, 0, 0, 0)]
    #[case(0, 1, 0, 0)]
    #[case(0, 0, 1, 0)]
    #[case(0, 0, 0, 1)]
    fn extra_interaction_never_lowers_base(
        weights: RankingWeights,
        #[case] likes: u64,
        #[case] replies: u64,
        #[case] reposts: u64,
        #[case] saves: u64,
    ) {
        let before = PostBuilder::new("p").engagement(3, 3, 3, 3).build();
        let after = PostBuilder::new("p")
            .engagement(3 + likes, 3 + replies, 3 + reposts, 3 + saves)
            .build();

        assert!(
            score_engagement(&after, &weights).base >= score_engagement(&before, &weights).base
        );
    }
}
