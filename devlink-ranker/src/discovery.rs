//! Discovery boost for new and low-follower creators.

use devlink_core::{AuthorSnapshot, NewDeveloperWeights};

use crate::count_as_f64;

/// Result of the discovery model for one author.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscoveryBoost {
    /// Runway below the follower threshold, in `0.0..=1.0`.
    pub follower_component: f64,
    /// Runway below the account-age threshold, in `0.0..=1.0`.
    pub age_component: f64,
    /// Whether either threshold applies.
    pub is_new_developer: bool,
    /// Combined boost in `0.0..=max_boost`.
    pub boost: f64,
}

/// Compute the discovery boost for `author`.
///
/// Each component is the fraction of the threshold the author has yet to
/// reach. Either component alone can earn the full boost; their sum is
/// capped at `max_boost`.
///
/// # Examples
/// ```
/// use devlink_core::{AuthorSnapshot, NewDeveloperWeights};
/// use devlink_ranker::discovery_boost;
///
/// let weights = NewDeveloperWeights::default();
/// let veteran = AuthorSnapshot { follower_count: 5_000, account_age_days: 900 };
/// assert_eq!(discovery_boost(&veteran, &weights).boost, 0.0);
///
/// let newcomer = AuthorSnapshot { follower_count: 150, account_age_days: 400 };
/// assert_eq!(discovery_boost(&newcomer, &weights).boost, 12.5);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "boost scales the summed components by the configured maximum"
)]
pub fn discovery_boost(author: &AuthorSnapshot, weights: &NewDeveloperWeights) -> DiscoveryBoost {
    let follower_component = runway(author.follower_count, weights.follower_threshold);
    let age_component = runway(author.account_age_days, weights.account_age_days_threshold);
    let is_new_developer = author.follower_count < weights.follower_threshold
        || author.account_age_days < weights.account_age_days_threshold;
    let boost = ((follower_component + age_component) * weights.max_boost).min(weights.max_boost);
    DiscoveryBoost {
        follower_component,
        age_component,
        is_new_developer,
        boost,
    }
}

/// `1 - value / threshold` below the threshold, zero at or above it.
#[expect(clippy::float_arithmetic, reason = "fractional distance to threshold")]
fn runway(value: u64, threshold: u64) -> f64 {
    if value >= threshold {
        return 0.0;
    }
    1.0 - count_as_f64(value) / count_as_f64(threshold)
}
