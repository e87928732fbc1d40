//! Facade crate for the DevLink feed ranking engine.
//!
//! This crate re-exports the domain types and, behind the default `ranker`
//! feature, the scoring models and the weighted ranker.

#![forbid(unsafe_code)]

pub use devlink_core::{
    AuthorSnapshot, BreakdownMetrics, CalculationDetails, ConfigurationError, DecayPhase,
    EngagementCounts, EngagementWeights, FeedRanker, ModerationNote, NewDeveloperWeights,
    PostId, PostSnapshot, RankError, RankablePost, RankingBreakdown, RankingConfig,
    RankingResult, RankingWeights, SpamPenaltyWeights, TimeDecayWeights,
};

#[cfg(feature = "test-support")]
pub use devlink_core::test_support;

#[cfg(feature = "ranker")]
pub use devlink_ranker::{
    ExplanationStep, WeightedRanker, explain, prepare_batch, rank_posts, score_post,
};
