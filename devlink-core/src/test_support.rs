//! Builders for post snapshots used by unit, behaviour, and property tests.

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::{AuthorSnapshot, EngagementCounts, PostId, RankablePost};

/// Fixed evaluation instant so tests never depend on the wall clock.
#[must_use]
pub fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Fluent builder for [`RankablePost`] snapshots relative to a fixed `now`.
///
/// Defaults describe an established author (1000 followers, one year old)
/// with a unique one-hour-old post and no engagement.
#[derive(Debug, Clone)]
pub struct PostBuilder {
    post: RankablePost,
    now: DateTime<Utc>,
}

impl PostBuilder {
    /// Start a post with the given ID, aged relative to [`reference_now`].
    pub fn new(id: impl Into<String>) -> Self {
        let now = reference_now();
        Self {
            post: RankablePost {
                id: PostId::new(id),
                created_at: now - Duration::hours(1),
                engagement: EngagementCounts::default(),
                unique_engagers: 0,
                author: AuthorSnapshot {
                    follower_count: 1_000,
                    account_age_days: 365,
                },
                duplicate_score: 0.0,
                view_count: None,
            },
            now,
        }
    }

    /// Set the post age in whole minutes before `now`.
    #[must_use]
    pub fn aged_minutes(mut self, minutes: i64) -> Self {
        self.post.created_at = self.now - Duration::minutes(minutes);
        self
    }

    /// Set the post age in hours before `now`.
    #[must_use]
    pub fn aged_hours(self, hours: i64) -> Self {
        self.aged_minutes(hours.saturating_mul(60))
    }

    /// Set all four interaction counts.
    #[must_use]
    pub fn engagement(mut self, likes: u64, replies: u64, reposts: u64, saves: u64) -> Self {
        self.post.engagement = EngagementCounts {
            likes,
            replies,
            reposts,
            saves,
        };
        self
    }

    /// Set the distinct engager count.
    #[must_use]
    pub fn unique_engagers(mut self, count: u64) -> Self {
        self.post.unique_engagers = count;
        self
    }

    /// Set the author's follower count and account age.
    #[must_use]
    pub fn author(mut self, follower_count: u64, account_age_days: u64) -> Self {
        self.post.author = AuthorSnapshot {
            follower_count,
            account_age_days,
        };
        self
    }

    /// Set the duplicate score.
    #[must_use]
    pub fn duplicate_score(mut self, score: f64) -> Self {
        self.post.duplicate_score = score;
        self
    }

    /// Set the view count.
    #[must_use]
    pub fn views(mut self, views: u64) -> Self {
        self.post.view_count = Some(views);
        self
    }

    /// Finish the snapshot.
    #[must_use]
    pub fn build(self) -> RankablePost {
        self.post
    }
}
