//! Core domain types for the DevLink feed ranking engine.
//!
//! The crate defines the immutable post snapshots the engine consumes, the
//! validated weight configuration it is tuned with, and the itemised
//! breakdown it produces. Scoring itself lives in `devlink-ranker`; this
//! crate only fixes the vocabulary and the [`FeedRanker`] seam.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod breakdown;
mod post;
mod ranker;
mod snapshot;
mod weights;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use breakdown::{
    BreakdownMetrics, CalculationDetails, DecayPhase, EngagementContributions,
    InteractionContribution, ModerationNote, RankingBreakdown, RankingResult,
};
pub use post::{AuthorSnapshot, EngagementCounts, PostId, RankablePost};
pub use ranker::{FeedRanker, RankError};
pub use snapshot::{AuthorWireSnapshot, EngagementSnapshot, PostSnapshot};
pub use weights::{
    ConfigurationError, EngagementWeights, NewDeveloperWeights, RankingConfig, RankingWeights,
    SpamPenaltyWeights, TimeDecayWeights,
};
