//! Scoring models and the batch ranker for the DevLink feed.
//!
//! Each post is scored by four independent models, combined by
//! [`score_post`], and ordered by [`rank_posts`]:
//!
//! - [`score_engagement`]: weighted interactions plus the unique-engager
//!   ratio.
//! - [`time_decay`]: two-phase half-life freshness multiplier.
//! - [`discovery_boost`]: bonus for new and low-follower creators.
//! - [`spam_penalty`]: duplicate and filler-content penalty.
//!
//! Everything here is pure. The caller supplies `now`, and nothing reads the
//! clock, the filesystem, or the environment. [`prepare_batch`] turns raw
//! [`devlink_core::PostSnapshot`] records into rankable posts, and
//! [`explain`] renders a breakdown as arithmetic steps.
//!
//! # Examples
//! ```
//! use devlink_core::{FeedRanker, RankingConfig};
//! use devlink_core::test_support::{PostBuilder, reference_now};
//! use devlink_ranker::WeightedRanker;
//!
//! let ranker = WeightedRanker::new(RankingConfig::default());
//! let posts = vec![
//!     PostBuilder::new("veteran").engagement(12, 1, 0, 0).author(4_000, 900).build(),
//!     PostBuilder::new("newcomer").engagement(3, 1, 0, 0).unique_engagers(4).author(20, 5).build(),
//! ];
//! let result = ranker.rank(&posts, reference_now()).expect("ranking succeeds");
//! assert_eq!(result.ordered_post_ids.first().map(|id| id.as_str()), Some("newcomer"));
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod assemble;
mod decay;
mod discovery;
mod duplicates;
mod engagement;
mod explain;
mod penalty;
mod ranker;

pub use assemble::score_post;
pub use decay::{TimeDecay, decay_multiplier, post_age_hours, time_decay};
pub use discovery::{DiscoveryBoost, discovery_boost};
pub use duplicates::{batch_duplicate_scores, content_key, prepare_batch};
pub use engagement::{EngagementScore, score_engagement};
pub use explain::{ExplanationStep, explain};
pub use penalty::{SpamPenalty, spam_penalty};
pub use ranker::{WeightedRanker, rank_posts};

/// Widen a count for floating-point scoring.
///
/// Counts above 2^53 lose precision, far beyond any realistic engagement.
#[expect(
    clippy::cast_precision_loss,
    reason = "engagement counts stay well below 2^53"
)]
pub(crate) const fn count_as_f64(count: u64) -> f64 {
    count as f64
}
