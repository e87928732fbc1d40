//! Batch-local duplicate detection for snapshots without a provider score.
//!
//! Posts are grouped by a normalised content key. Every post in a group of
//! `n` counts as a copy, and those without a provider score receive
//! `min(1, (n - 1) / 3)`, so a pair already crosses the default penalty
//! threshold and four copies reach the maximum.

use std::collections::BTreeMap;

use devlink_core::{PostId, PostSnapshot, RankablePost};

use crate::count_as_f64;

/// Characters of normalised content that form the grouping key.
const KEY_LENGTH: usize = 200;
/// Keys this short are too generic to count as copies.
const MIN_KEY_LENGTH: usize = 10;
/// Copies beyond the first needed to reach a score of one.
const SATURATING_COPIES: f64 = 3.0;

/// Normalised grouping key for `content`, or `None` when it is too short.
///
/// # Examples
/// ```
/// use devlink_ranker::content_key;
///
/// assert_eq!(
///     content_key("  Check out my NEW crate!  "),
///     Some("check out my new crate!".to_owned())
/// );
/// assert_eq!(content_key("gm"), None);
/// ```
#[must_use]
pub fn content_key(content: &str) -> Option<String> {
    let key: String = content
        .trim()
        .to_lowercase()
        .chars()
        .take(KEY_LENGTH)
        .collect();
    (key.chars().count() > MIN_KEY_LENGTH).then_some(key)
}

/// Duplicate scores for snapshots whose content repeats within the batch.
///
/// Every snapshot with usable content counts towards its group. Snapshots
/// that already carry a `duplicate_score` keep it and are left out of the
/// returned map.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "score grows linearly with the number of copies"
)]
pub fn batch_duplicate_scores(snapshots: &[PostSnapshot]) -> BTreeMap<PostId, f64> {
    let mut groups: BTreeMap<String, Vec<&PostSnapshot>> = BTreeMap::new();
    for snapshot in snapshots {
        if let Some(key) = snapshot.content.as_deref().and_then(content_key) {
            groups.entry(key).or_default().push(snapshot);
        }
    }

    let mut scores = BTreeMap::new();
    for group in groups.into_values() {
        let copies = u64::try_from(group.len()).unwrap_or(u64::MAX);
        if copies < 2 {
            continue;
        }
        let score = (count_as_f64(copies.saturating_sub(1)) / SATURATING_COPIES).min(1.0);
        log::debug!("{copies} posts share content; duplicate score {score:.3}");
        for snapshot in group {
            if snapshot.duplicate_score.is_none() {
                scores.insert(snapshot.id.clone(), score);
            }
        }
    }
    scores
}

/// Clamp a batch of snapshots into rankable posts, filling in batch-local
/// duplicate scores where the provider supplied none.
///
/// # Examples
/// ```
/// use devlink_core::PostSnapshot;
/// use devlink_ranker::prepare_batch;
///
/// let json = r#"[
///     { "id": "a", "createdAt": "2024-05-01T10:00:00Z", "content": "Same announcement text" },
///     { "id": "b", "createdAt": "2024-05-01T11:00:00Z", "content": "same announcement text " }
/// ]"#;
/// let snapshots: Vec<PostSnapshot> = serde_json::from_str(json).expect("valid batch");
/// let posts = prepare_batch(snapshots);
/// assert!(posts.iter().all(|post| post.duplicate_score > 0.3));
/// ```
#[must_use]
pub fn prepare_batch(snapshots: Vec<PostSnapshot>) -> Vec<RankablePost> {
    let scores = batch_duplicate_scores(&snapshots);
    snapshots
        .into_iter()
        .map(|snapshot| {
            let fallback = scores.get(&snapshot.id).copied();
            snapshot.into_rankable_with_duplicate(fallback)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use devlink_core::{AuthorWireSnapshot, EngagementSnapshot};
    use rstest::rstest;

    fn snapshot(id: &str, content: Option<&str>) -> PostSnapshot {
        PostSnapshot {
            id: PostId::from(id),
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            engagement: EngagementSnapshot::default(),
            unique_engagers: None,
            author: AuthorWireSnapshot::default(),
            duplicate_score: None,
            view_count: None,
            content: content.map(str::to_owned),
        }
    }

    #[rstest]
    #[case("exactly10!", None)]
    #[case("   exactly10!   ", None)]
    #[case("eleven char", Some("eleven char"))]
    fn short_keys_are_ignored(#[case] content: &str, #[case] expected: Option<&str>) {
        assert_eq!(content_key(content).as_deref(), expected);
    }

    #[rstest]
    fn keys_are_truncated() {
        let long = "x".repeat(500);
        let key = content_key(&long).expect("long content has a key");
        assert_eq!(key.chars().count(), KEY_LENGTH);
    }

    #[rstest]
    #[case(1, None)]
    #[case(2, Some(1.0 / 3.0))]
    #[case(4, Some(1.0))]
    #[case(7, Some(1.0))]
    fn score_scales_with_copies(#[case] copies: usize, #[case] expected: Option<f64>) {
        let batch: Vec<PostSnapshot> = (0..copies)
            .map(|index| snapshot(&format!("p{index}"), Some("Hiring Rust engineers, DM me")))
            .collect();
        let scores = batch_duplicate_scores(&batch);
        assert_eq!(scores.get(&PostId::from("p0")).copied(), expected);
    }

    #[rstest]
    #[expect(
        clippy::float_arithmetic,
        reason = "tests compare floating point values"
    )]
    fn provider_scored_posts_still_count_as_copies() {
        let mut scored = snapshot("a", Some("Repeated conference recap"));
        scored.duplicate_score = Some(0.05);
        let batch = vec![scored, snapshot("b", Some("Repeated conference recap"))];

        let scores = batch_duplicate_scores(&batch);
        assert_eq!(scores.get(&PostId::from("a")), None);
        let copy = scores.get(&PostId::from("b")).copied().expect("copy is scored");
        assert!((copy - 1.0 / 3.0).abs() < 1e-12);

        let posts = prepare_batch(batch);
        let score_of = |id: &str| {
            posts
                .iter()
                .find(|post| post.id.as_str() == id)
                .map(|post| post.duplicate_score)
        };
        assert_eq!(score_of("a"), Some(0.05));
        assert!(score_of("b").is_some_and(|score| (score - 1.0 / 3.0).abs() < 1e-12));
    }

    #[rstest]
    fn provider_zero_score_is_kept_while_its_copy_is_penalised() {
        let mut scored = snapshot("a", Some("Weekly release notes for the crate"));
        scored.duplicate_score = Some(0.0);
        let batch = vec![
            scored,
            snapshot("b", Some("weekly release notes for the crate")),
        ];

        let posts = prepare_batch(batch);
        assert!(
            posts
                .iter()
                .any(|post| post.id.as_str() == "a" && post.duplicate_score == 0.0)
        );
        assert!(
            posts
                .iter()
                .any(|post| post.id.as_str() == "b" && post.duplicate_score > 0.3)
        );
    }

    #[rstest]
    fn distinct_content_scores_zero() {
        let batch = vec![
            snapshot("a", Some("Shipping a new parser today")),
            snapshot("b", Some("Notes from the async working group")),
            snapshot("c", None),
        ];
        let posts = prepare_batch(batch);
        assert!(posts.iter().all(|post| post.duplicate_score == 0.0));
    }
}
