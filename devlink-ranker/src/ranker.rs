//! Batch ranking with deterministic tie-breaking.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use chrono::{DateTime, Utc};
use devlink_core::{
    FeedRanker, PostId, RankError, RankablePost, RankingBreakdown, RankingConfig, RankingResult,
};

use crate::score_post;

/// [`FeedRanker`] that scores posts with a fixed weight configuration.
///
/// # Examples
/// ```
/// use devlink_core::FeedRanker;
/// use devlink_core::test_support::{PostBuilder, reference_now};
/// use devlink_ranker::WeightedRanker;
///
/// let ranker = WeightedRanker::default();
/// let posts = vec![
///     PostBuilder::new("quiet").engagement(2, 0, 0, 0).build(),
///     PostBuilder::new("lively").engagement(40, 8, 3, 2).build(),
/// ];
/// let result = ranker.rank(&posts, reference_now()).expect("ranking succeeds");
/// assert_eq!(result.ordered_post_ids[0].as_str(), "lively");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeightedRanker {
    config: RankingConfig,
}

impl WeightedRanker {
    /// Construct a ranker from validated weights.
    #[must_use]
    pub const fn new(config: RankingConfig) -> Self {
        Self { config }
    }

    /// Weights this ranker applies.
    #[must_use]
    pub const fn config(&self) -> &RankingConfig {
        &self.config
    }
}

impl FeedRanker for WeightedRanker {
    fn rank(
        &self,
        posts: &[RankablePost],
        now: DateTime<Utc>,
    ) -> Result<RankingResult, RankError> {
        rank_posts(posts, &self.config, now)
    }
}

/// Score every post and order them best first.
///
/// Equal final scores are ordered by newer `created_at` first, then by
/// ascending post ID, so the output never depends on input order.
///
/// # Errors
/// Returns [`RankError::DuplicatePostId`] when two posts share an ID.
pub fn rank_posts(
    posts: &[RankablePost],
    config: &RankingConfig,
    now: DateTime<Utc>,
) -> Result<RankingResult, RankError> {
    let mut breakdown_by_id: BTreeMap<PostId, RankingBreakdown> = BTreeMap::new();
    let mut order: Vec<(&RankablePost, f64)> = Vec::with_capacity(posts.len());

    for post in posts {
        match breakdown_by_id.entry(post.id.clone()) {
            Entry::Occupied(_) => return Err(RankError::DuplicatePostId(post.id.clone())),
            Entry::Vacant(slot) => {
                let breakdown = score_post(post, config, now);
                order.push((post, breakdown.final_score));
                slot.insert(breakdown);
            }
        }
    }

    order.sort_by(|(left, left_score), (right, right_score)| {
        compare_ranked(left, *left_score, right, *right_score)
    });
    let ordered_post_ids: Vec<PostId> = order
        .into_iter()
        .map(|(post, _)| post.id.clone())
        .collect();

    log::trace!("ranked {} posts", ordered_post_ids.len());
    Ok(RankingResult {
        ordered_post_ids,
        breakdown_by_id,
    })
}

fn compare_ranked(
    left: &RankablePost,
    left_score: f64,
    right: &RankablePost,
    right_score: f64,
) -> Ordering {
    right_score
        .total_cmp(&left_score)
        .then_with(|| right.created_at.cmp(&left.created_at))
        .then_with(|| left.id.cmp(&right.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use devlink_core::test_support::{PostBuilder, reference_now};
    use rstest::{fixture, rstest};

    #[fixture]
    fn ranker() -> WeightedRanker {
        WeightedRanker::default()
    }

    fn ids(result: &RankingResult) -> Vec<&str> {
        result.ordered_post_ids.iter().map(PostId::as_str).collect()
    }

    #[rstest]
    fn empty_batch_yields_empty_result(ranker: WeightedRanker) {
        let result = ranker.rank(&[], reference_now()).expect("empty batch");
        assert!(result.ordered_post_ids.is_empty());
        assert!(result.breakdown_by_id.is_empty());
    }

    #[rstest]
    fn every_post_gets_a_breakdown(ranker: WeightedRanker) {
        let posts = vec![
            PostBuilder::new("a").engagement(5, 1, 0, 0).build(),
            PostBuilder::new("b").engagement(9, 0, 2, 0).build(),
            PostBuilder::new("c").engagement(1, 0, 0, 4).build(),
        ];
        let result = ranker.rank(&posts, reference_now()).expect("ranking");
        assert_eq!(result.ordered_post_ids.len(), 3);
        for post in &posts {
            assert!(result.breakdown(&post.id).is_some());
        }
    }

    #[rstest]
    fn higher_final_score_ranks_first(ranker: WeightedRanker) {
        let posts = vec![
            PostBuilder::new("low").engagement(10, 0, 0, 0).build(),
            PostBuilder::new("high").engagement(10, 10, 0, 0).build(),
        ];
        let result = ranker.rank(&posts, reference_now()).expect("ranking");
        assert_eq!(ids(&result), vec!["high", "low"]);
    }

    #[rstest]
    fn ties_prefer_newer_posts(ranker: WeightedRanker) {
        // Both sit at the zero floor after the low-engagement penalty.
        let posts = vec![
            PostBuilder::new("older").aged_hours(3).build(),
            PostBuilder::new("newer").aged_minutes(10).build(),
        ];
        let result = ranker.rank(&posts, reference_now()).expect("ranking");
        assert_eq!(ids(&result), vec!["newer", "older"]);
    }

    #[rstest]
    fn full_ties_fall_back_to_id(ranker: WeightedRanker) {
        let posts = vec![
            PostBuilder::new("b").build(),
            PostBuilder::new("c").build(),
            PostBuilder::new("a").build(),
        ];
        let result = ranker.rank(&posts, reference_now()).expect("ranking");
        assert_eq!(ids(&result), vec!["a", "b", "c"]);
    }

    #[rstest]
    fn duplicate_ids_are_rejected(ranker: WeightedRanker) {
        let posts = vec![
            PostBuilder::new("same").build(),
            PostBuilder::new("other").build(),
            PostBuilder::new("same").engagement(3, 0, 0, 0).build(),
        ];
        let err = ranker
            .rank(&posts, reference_now())
            .expect_err("duplicate id");
        assert_eq!(err, RankError::DuplicatePostId(PostId::from("same")));
    }

    #[rstest]
    fn ranking_is_repeatable(ranker: WeightedRanker) {
        let posts = vec![
            PostBuilder::new("x").engagement(4, 1, 1, 0).author(120, 10).build(),
            PostBuilder::new("y").engagement(30, 2, 0, 1).aged_hours(40).build(),
            PostBuilder::new("z").engagement(0, 0, 0, 0).duplicate_score(0.9).build(),
        ];
        let first = ranker.rank(&posts, reference_now()).expect("ranking");
        let second = ranker.rank(&posts, reference_now()).expect("ranking");
        assert_eq!(first, second);
    }
}
