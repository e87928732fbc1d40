//! Post snapshots consumed by the ranking engine.
//!
//! A [`RankablePost`] is assembled once per ranking call by the snapshot
//! provider and discarded afterwards. All counts are unsigned; lenient wire
//! payloads are clamped on the way in by [`crate::PostSnapshot`].

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque post identifier, unique within a ranking batch.
///
/// # Examples
/// ```
/// use devlink_core::PostId;
///
/// let id = PostId::from("post-1");
/// assert_eq!(id.as_str(), "post-1");
/// assert_eq!(id.to_string(), "post-1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    /// Wrap an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PostId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PostId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Aggregated interaction counts for a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementCounts {
    /// Number of likes.
    pub likes: u64,
    /// Number of replies.
    pub replies: u64,
    /// Number of reposts.
    pub reposts: u64,
    /// Number of saves.
    pub saves: u64,
}

impl EngagementCounts {
    /// Sum of every interaction, saturating on overflow.
    ///
    /// # Examples
    /// ```
    /// use devlink_core::EngagementCounts;
    ///
    /// let counts = EngagementCounts { likes: 10, replies: 2, reposts: 1, saves: 0 };
    /// assert_eq!(counts.total(), 13);
    /// ```
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.likes
            .saturating_add(self.replies)
            .saturating_add(self.reposts)
            .saturating_add(self.saves)
    }
}

/// Account metadata for the post's author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorSnapshot {
    /// Followers at snapshot time.
    pub follower_count: u64,
    /// Whole days since the account was created.
    pub account_age_days: u64,
}

/// Immutable per-post input to the ranking engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankablePost {
    /// Identifier, unique within the batch.
    pub id: PostId,
    /// Publication instant.
    pub created_at: DateTime<Utc>,
    /// Interaction counts.
    pub engagement: EngagementCounts,
    /// Distinct accounts that engaged with the post.
    pub unique_engagers: u64,
    /// Author metadata.
    pub author: AuthorSnapshot,
    /// Similarity to recent content in `0.0..=1.0`; `0.0` is unique.
    pub duplicate_score: f64,
    /// Impressions, when the provider tracks them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_count: Option<u64>,
}

impl RankablePost {
    /// Audience the post was exposed to.
    ///
    /// Uses the view count when it is present and non-zero, otherwise the
    /// author's follower count.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use devlink_core::{AuthorSnapshot, EngagementCounts, PostId, RankablePost};
    ///
    /// let mut post = RankablePost {
    ///     id: PostId::from("a"),
    ///     created_at: Utc::now(),
    ///     engagement: EngagementCounts::default(),
    ///     unique_engagers: 0,
    ///     author: AuthorSnapshot { follower_count: 40, account_age_days: 10 },
    ///     duplicate_score: 0.0,
    ///     view_count: None,
    /// };
    /// assert_eq!(post.reach(), 40);
    /// post.view_count = Some(900);
    /// assert_eq!(post.reach(), 900);
    /// ```
    #[must_use]
    pub fn reach(&self) -> u64 {
        match self.view_count {
            Some(views) if views > 0 => views,
            _ => self.author.follower_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn total_saturates_instead_of_overflowing() {
        let counts = EngagementCounts {
            likes: u64::MAX,
            replies: 1,
            reposts: 0,
            saves: 0,
        };
        assert_eq!(counts.total(), u64::MAX);
    }

    #[rstest]
    #[case(None, 25)]
    #[case(Some(0), 25)]
    #[case(Some(400), 400)]
    fn reach_prefers_non_zero_views(#[case] views: Option<u64>, #[case] expected: u64) {
        let post = RankablePost {
            id: PostId::from("p"),
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            engagement: EngagementCounts::default(),
            unique_engagers: 0,
            author: AuthorSnapshot {
                follower_count: 25,
                account_age_days: 3,
            },
            duplicate_score: 0.0,
            view_count: views,
        };
        assert_eq!(post.reach(), expected);
    }

    #[rstest]
    fn post_id_orders_lexically() {
        assert!(PostId::from("a") < PostId::from("b"));
    }
}
