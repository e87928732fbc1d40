//! Rank a batch of candidate posts.
//!
//! The [`FeedRanker`] trait is the seam between the feed-serving host and a
//! scoring implementation. Implementations are pure: the evaluation instant
//! is passed in, and nothing is retained between calls.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::{PostId, RankablePost, RankingResult};

/// Errors returned by [`FeedRanker::rank`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankError {
    /// The batch contained the same post twice.
    #[error("post {0} appears more than once in the batch")]
    DuplicatePostId(PostId),
}

/// Order a batch of posts and explain every score.
///
/// Implementations must be `Send + Sync` so one ranker can serve concurrent
/// feed requests. Single malformed posts never fail the batch; only
/// batch-level problems such as repeated IDs are reported.
///
/// # Examples
///
/// ```rust
/// use chrono::{DateTime, Utc};
/// use devlink_core::{FeedRanker, RankError, RankablePost, RankingResult};
///
/// struct InputOrder;
///
/// impl FeedRanker for InputOrder {
///     fn rank(
///         &self,
///         posts: &[RankablePost],
///         _now: DateTime<Utc>,
///     ) -> Result<RankingResult, RankError> {
///         Ok(RankingResult {
///             ordered_post_ids: posts.iter().map(|post| post.id.clone()).collect(),
///             ..RankingResult::default()
///         })
///     }
/// }
///
/// let result = InputOrder.rank(&[], Utc::now()).expect("empty batch ranks");
/// assert!(result.ordered_post_ids.is_empty());
/// ```
pub trait FeedRanker: Send + Sync {
    /// Rank `posts` as of `now`.
    ///
    /// # Errors
    /// Returns [`RankError`] when the batch itself is invalid.
    fn rank(&self, posts: &[RankablePost], now: DateTime<Utc>)
    -> Result<RankingResult, RankError>;
}
