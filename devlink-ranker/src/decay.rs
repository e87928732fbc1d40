//! Two-phase half-life freshness decay.
//!
//! Posts keep full freshness through the peak window. After it, the fresh
//! half-life applies for `transition_hours`; from there the curve continues
//! from the value it reached with the slower evergreen half-life, so older
//! posts that still attract engagement fade gently instead of collapsing to
//! the floor. The multiplier is continuous and non-increasing in age.

use chrono::{DateTime, Utc};
use devlink_core::{DecayPhase, TimeDecayWeights};

use crate::count_as_f64;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Result of the decay model for one post.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeDecay {
    /// Post age in fractional hours.
    pub post_age_hours: f64,
    /// Multiplier in `minimum_multiplier..=1.0`.
    pub multiplier: f64,
    /// Regime that produced the multiplier.
    pub phase: DecayPhase,
    /// Multiplier scaled to `0.0..=100.0`.
    pub freshness_score: f64,
}

/// Hours between `created_at` and `now`; future timestamps clamp to zero.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "converts elapsed milliseconds to fractional hours"
)]
pub fn post_age_hours(created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let elapsed = now.signed_duration_since(created_at).num_milliseconds();
    u64::try_from(elapsed).map_or(0.0, |millis| count_as_f64(millis) / MILLIS_PER_HOUR)
}

/// Evaluate the decay curve for a post created at `created_at`.
///
/// # Examples
/// ```
/// use chrono::{Duration, Utc};
/// use devlink_core::{DecayPhase, TimeDecayWeights};
/// use devlink_ranker::time_decay;
///
/// let now = Utc::now();
/// let weights = TimeDecayWeights::default();
/// let fresh = time_decay(now - Duration::hours(2), now, &weights);
/// assert_eq!(fresh.multiplier, 1.0);
/// assert_eq!(fresh.phase, DecayPhase::Peak);
///
/// // One fresh half-life past the six-hour peak.
/// let older = time_decay(now - Duration::hours(30), now, &weights);
/// assert!((older.multiplier - 0.5).abs() < 1e-9);
/// ```
#[must_use]
#[expect(clippy::float_arithmetic, reason = "freshness score is a percentage")]
pub fn time_decay(
    created_at: DateTime<Utc>,
    now: DateTime<Utc>,
    weights: &TimeDecayWeights,
) -> TimeDecay {
    let post_age_hours = post_age_hours(created_at, now);
    let (multiplier, phase) = decay_multiplier(post_age_hours, weights);
    TimeDecay {
        post_age_hours,
        multiplier,
        phase,
        freshness_score: multiplier * 100.0,
    }
}

/// Multiplier for a post aged `age_hours`, with the phase that produced it.
///
/// Negative or NaN ages are treated as zero.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "half-life decay composes exponential factors"
)]
pub fn decay_multiplier(age_hours: f64, weights: &TimeDecayWeights) -> (f64, DecayPhase) {
    let age = if age_hours.is_nan() {
        0.0
    } else {
        age_hours.max(0.0)
    };
    if age <= weights.freshness_peak_hours {
        return (1.0, DecayPhase::Peak);
    }

    let after_peak = age - weights.freshness_peak_hours;
    let (raw, phase) = if after_peak <= weights.transition_hours {
        (
            half_life_factor(after_peak, weights.fresh_half_life_hours),
            DecayPhase::Fresh,
        )
    } else {
        let at_transition =
            half_life_factor(weights.transition_hours, weights.fresh_half_life_hours);
        let evergreen = half_life_factor(
            after_peak - weights.transition_hours,
            weights.evergreen_half_life_hours,
        );
        (at_transition * evergreen, DecayPhase::Evergreen)
    };

    if raw <= weights.minimum_multiplier {
        (weights.minimum_multiplier, DecayPhase::Floor)
    } else {
        (raw.min(1.0), phase)
    }
}

#[expect(clippy::float_arithmetic, reason = "exponent is hours over half-life")]
fn half_life_factor(hours: f64, half_life: f64) -> f64 {
    0.5_f64.powf(hours / half_life)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use devlink_core::test_support::reference_now;
    use rstest::{fixture, rstest};

    #[fixture]
    fn weights() -> TimeDecayWeights {
        TimeDecayWeights::default()
    }

    #[rstest]
    #[expect(
        clippy::float_arithmetic,
        reason = "tests compare floating point values"
    )]
    fn age_is_fractional_hours() {
        let now = reference_now();
        let age = post_age_hours(now - Duration::minutes(90), now);
        assert!((age - 1.5).abs() < 1e-12);
    }

    #[rstest]
    fn future_posts_have_zero_age(weights: TimeDecayWeights) {
        let now = reference_now();
        let decay = time_decay(now + Duration::hours(3), now, &weights);
        assert_eq!(decay.post_age_hours, 0.0);
        assert_eq!(decay.multiplier, 1.0);
        assert_eq!(decay.freshness_score, 100.0);
    }

    #[rstest]
    #[case(0.0)]
    #[case(6.0)]
    fn peak_window_keeps_full_freshness(weights: TimeDecayWeights, #[case] age: f64) {
        assert_eq!(decay_multiplier(age, &weights), (1.0, DecayPhase::Peak));
    }

    #[rstest]
    #[expect(
        clippy::float_arithmetic,
        reason = "tests compare floating point values"
    )]
    fn evergreen_phase_continues_from_transition(weights: TimeDecayWeights) {
        // Peak 6h, transition after 24h of fresh decay (one half-life).
        let (at_transition, phase) = decay_multiplier(30.0, &weights);
        assert_eq!(phase, DecayPhase::Fresh);
        assert!((at_transition - 0.5).abs() < 1e-12);

        // 24 more hours at the 48h evergreen half-life.
        let (later, later_phase) = decay_multiplier(54.0, &weights);
        assert_eq!(later_phase, DecayPhase::Evergreen);
        let expected = 0.5 * 0.5_f64.powf(0.5);
        assert!((later - expected).abs() < 1e-12);
    }

    #[rstest]
    fn evergreen_decays_slower_than_fresh_would(weights: TimeDecayWeights) {
        let (evergreen, _) = decay_multiplier(54.0, &weights);
        let fresh_only = half_life_factor(48.0, weights.fresh_half_life_hours);
        assert!(evergreen > fresh_only);
    }

    #[rstest]
    fn old_posts_hold_at_minimum(weights: TimeDecayWeights) {
        let (multiplier, phase) = decay_multiplier(24.0 * 30.0, &weights);
        assert_eq!(multiplier, weights.minimum_multiplier);
        assert_eq!(phase, DecayPhase::Floor);
    }

    #[rstest]
    fn multiplier_is_non_increasing(weights: TimeDecayWeights) {
        let mut previous = 1.0;
        for step in 0..2_000_u32 {
            let age = f64::from(step) * 0.25;
            let (multiplier, _) = decay_multiplier(age, &weights);
            assert!(multiplier <= previous, "increase at {age}h");
            assert!(multiplier >= weights.minimum_multiplier);
            previous = multiplier;
        }
    }
}
