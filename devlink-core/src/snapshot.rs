//! Lenient wire format for post snapshots.
//!
//! Upstream providers occasionally send missing or negative counts. The
//! engine favours robustness over rejecting a whole batch, so
//! [`PostSnapshot`] accepts signed optional values and clamps them into a
//! [`RankablePost`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AuthorSnapshot, EngagementCounts, PostId, RankablePost};

/// Interaction counts as received from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngagementSnapshot {
    /// Likes, possibly missing or negative.
    pub likes: Option<i64>,
    /// Replies, possibly missing or negative.
    pub replies: Option<i64>,
    /// Reposts, possibly missing or negative.
    pub reposts: Option<i64>,
    /// Saves, possibly missing or negative.
    pub saves: Option<i64>,
}

/// Author metadata as received from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthorWireSnapshot {
    /// Followers, possibly missing or negative.
    pub follower_count: Option<i64>,
    /// Account age in days, possibly missing or negative.
    pub account_age_days: Option<i64>,
}

/// One candidate post in the JSON snapshot document.
///
/// # Examples
/// ```
/// use devlink_core::PostSnapshot;
///
/// let json = r#"{
///     "id": "p1",
///     "createdAt": "2024-05-01T10:00:00Z",
///     "engagement": { "likes": -3, "replies": 2 },
///     "author": { "followerCount": 12 },
///     "duplicateScore": 1.7
/// }"#;
/// let snapshot: PostSnapshot = serde_json::from_str(json).expect("valid snapshot");
/// let post = snapshot.into_rankable();
/// assert_eq!(post.engagement.likes, 0);
/// assert_eq!(post.engagement.replies, 2);
/// assert_eq!(post.author.account_age_days, 0);
/// assert_eq!(post.duplicate_score, 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSnapshot {
    /// Post identifier.
    pub id: PostId,
    /// Publication instant.
    pub created_at: DateTime<Utc>,
    /// Interaction counts.
    #[serde(default)]
    pub engagement: EngagementSnapshot,
    /// Distinct engagers.
    #[serde(default)]
    pub unique_engagers: Option<i64>,
    /// Author metadata.
    #[serde(default)]
    pub author: AuthorWireSnapshot,
    /// Provider-computed duplicate score.
    #[serde(default)]
    pub duplicate_score: Option<f64>,
    /// Impressions, when tracked.
    #[serde(default)]
    pub view_count: Option<i64>,
    /// Post body, used for batch duplicate detection.
    #[serde(default)]
    pub content: Option<String>,
}

impl PostSnapshot {
    /// Clamp every field into a [`RankablePost`].
    ///
    /// A missing duplicate score becomes `0.0`; callers that detect
    /// duplicates within the batch should use
    /// [`PostSnapshot::into_rankable_with_duplicate`].
    #[must_use]
    pub fn into_rankable(self) -> RankablePost {
        self.into_rankable_with_duplicate(None)
    }

    /// Clamp every field, using `fallback_duplicate` when the snapshot
    /// carries no duplicate score of its own.
    #[must_use]
    pub fn into_rankable_with_duplicate(self, fallback_duplicate: Option<f64>) -> RankablePost {
        let id = self.id;
        let engagement = EngagementCounts {
            likes: clamp_count(&id, "likes", self.engagement.likes),
            replies: clamp_count(&id, "replies", self.engagement.replies),
            reposts: clamp_count(&id, "reposts", self.engagement.reposts),
            saves: clamp_count(&id, "saves", self.engagement.saves),
        };
        let author = AuthorSnapshot {
            follower_count: clamp_count(&id, "followerCount", self.author.follower_count),
            account_age_days: clamp_count(&id, "accountAgeDays", self.author.account_age_days),
        };
        let unique_engagers = clamp_count(&id, "uniqueEngagers", self.unique_engagers);
        let view_count = self
            .view_count
            .map(|views| clamp_count(&id, "viewCount", Some(views)));
        let duplicate_score =
            clamp_unit(&id, self.duplicate_score.or(fallback_duplicate).unwrap_or(0.0));
        RankablePost {
            id,
            created_at: self.created_at,
            engagement,
            unique_engagers,
            author,
            duplicate_score,
            view_count,
        }
    }
}

fn clamp_count(id: &PostId, field: &str, value: Option<i64>) -> u64 {
    let raw = value.unwrap_or(0);
    u64::try_from(raw).unwrap_or_else(|_| {
        log::debug!("post {id}: clamping negative {field} ({raw}) to 0");
        0
    })
}

fn clamp_unit(id: &PostId, value: f64) -> f64 {
    if !value.is_finite() {
        log::debug!("post {id}: non-finite duplicate score treated as 0");
        return 0.0;
    }
    if !(0.0..=1.0).contains(&value) {
        log::debug!("post {id}: clamping duplicate score {value} into 0..=1");
    }
    value.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn snapshot() -> PostSnapshot {
        PostSnapshot {
            id: PostId::from("p"),
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            engagement: EngagementSnapshot::default(),
            unique_engagers: None,
            author: AuthorWireSnapshot::default(),
            duplicate_score: None,
            view_count: None,
            content: None,
        }
    }

    #[rstest]
    fn missing_counts_become_zero() {
        let post = snapshot().into_rankable();
        assert_eq!(post.engagement, EngagementCounts::default());
        assert_eq!(post.unique_engagers, 0);
        assert_eq!(post.author, AuthorSnapshot::default());
        assert_eq!(post.view_count, None);
    }

    #[rstest]
    fn negative_counts_clamp_to_zero() {
        let mut raw = snapshot();
        raw.engagement.saves = Some(-4);
        raw.author.follower_count = Some(-1);
        raw.view_count = Some(-9);
        let post = raw.into_rankable();
        assert_eq!(post.engagement.saves, 0);
        assert_eq!(post.author.follower_count, 0);
        assert_eq!(post.view_count, Some(0));
    }

    #[rstest]
    #[case(Some(f64::NAN), None, 0.0)]
    #[case(Some(-0.5), None, 0.0)]
    #[case(Some(0.4), Some(0.9), 0.4)]
    #[case(None, Some(0.66), 0.66)]
    #[case(None, None, 0.0)]
    fn duplicate_score_prefers_provider_value(
        #[case] provided: Option<f64>,
        #[case] fallback: Option<f64>,
        #[case] expected: f64,
    ) {
        let mut raw = snapshot();
        raw.duplicate_score = provided;
        let post = raw.into_rankable_with_duplicate(fallback);
        assert_eq!(post.duplicate_score, expected);
    }
}
