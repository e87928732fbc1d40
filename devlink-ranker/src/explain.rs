//! Render a breakdown as ordered, human-readable arithmetic steps.

use std::fmt;

use devlink_core::{
    BreakdownMetrics, InteractionContribution, RankingBreakdown, RankingWeights,
    SpamPenaltyWeights,
};

/// One line of an explanation: `label: expression = value`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplanationStep {
    /// Name of the quantity being computed.
    pub label: &'static str,
    /// Arithmetic that produced it, with the actual operands.
    pub expression: String,
    /// Result of the expression.
    pub value: f64,
}

impl fmt::Display for ExplanationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} = {}",
            self.label,
            self.expression,
            format_number(self.value)
        )
    }
}

/// Replay the arithmetic recorded in `breakdown`, from interaction lines to
/// the floor.
///
/// `weights` must be the weights that produced the breakdown; they supply
/// the constants the breakdown does not store.
///
/// # Examples
/// ```
/// use devlink_core::RankingConfig;
/// use devlink_core::test_support::{PostBuilder, reference_now};
/// use devlink_ranker::{explain, score_post};
///
/// let config = RankingConfig::default();
/// let post = PostBuilder::new("p").engagement(10, 2, 1, 0).build();
/// let breakdown = score_post(&post, &config, reference_now());
/// let steps = explain(&breakdown, config.weights());
///
/// assert_eq!(steps.first().map(ToString::to_string).as_deref(), Some("likes: 10 x 1 = 10"));
/// assert_eq!(steps.last().map(|step| step.label), Some("final score"));
/// ```
#[must_use]
pub fn explain(breakdown: &RankingBreakdown, weights: &RankingWeights) -> Vec<ExplanationStep> {
    let calc = &breakdown.calculation;
    let lines = &calc.contributions;
    let spam = &weights.spam_penalty;
    let developer = &weights.new_developer;

    let mut steps = vec![
        interaction("likes", lines.likes),
        interaction("replies", lines.replies),
        interaction("reposts", lines.reposts),
        interaction("saves", lines.saves),
        step(
            "base engagement",
            format!(
                "{} + {} + {} + {}",
                format_number(lines.likes.contribution),
                format_number(lines.replies.contribution),
                format_number(lines.reposts.contribution),
                format_number(lines.saves.contribution),
            ),
            breakdown.base_engagement_score,
        ),
        step(
            "engagement ratio",
            format!(
                "{} x {}",
                format_number(breakdown.metrics.engagement_to_follower_ratio),
                format_number(weights.engagement_ratio),
            ),
            breakdown.engagement_ratio_score,
        ),
        step(
            "time decay",
            format!(
                "{}h old, {:?} phase",
                format_number(calc.post_age_hours),
                calc.decay_phase,
            )
            .to_lowercase(),
            breakdown.time_decay_multiplier,
        ),
        step(
            "decayed core",
            format!(
                "({} + {}) x {}",
                format_number(breakdown.base_engagement_score),
                format_number(breakdown.engagement_ratio_score),
                format_number(breakdown.time_decay_multiplier),
            ),
            breakdown.decayed_core_score,
        ),
        step(
            "new developer boost",
            format!(
                "min({max}, ({} + {}) x {max})",
                format_number(calc.follower_component),
                format_number(calc.age_component),
                max = format_number(developer.max_boost),
            ),
            breakdown.new_developer_boost,
        ),
    ];

    steps.push(step(
        "duplicate penalty",
        duplicate_expression(calc.duplicate_score, spam),
        calc.duplicate_penalty,
    ));
    steps.push(step(
        "low engagement penalty",
        low_engagement_expression(&breakdown.metrics, spam),
        calc.low_engagement_penalty,
    ));
    steps.push(step(
        "spam penalty",
        format!(
            "min({}, {} + {})",
            format_number(spam.max_penalty),
            format_number(calc.duplicate_penalty),
            format_number(calc.low_engagement_penalty),
        ),
        breakdown.spam_penalty,
    ));
    steps.push(step(
        "pre-floor score",
        format!(
            "{} + {} - {}",
            format_number(breakdown.decayed_core_score),
            format_number(breakdown.new_developer_boost),
            format_number(breakdown.spam_penalty),
        ),
        calc.pre_floor_score,
    ));
    steps.push(step(
        "final score",
        format!(
            "max({}, {})",
            format_number(calc.pre_floor_score),
            format_number(weights.base_score_floor),
        ),
        breakdown.final_score,
    ));
    steps
}

fn duplicate_expression(score: f64, spam: &SpamPenaltyWeights) -> String {
    if score <= 0.0 || score <= spam.duplicate_threshold {
        return format!(
            "{} <= threshold {}",
            format_number(score),
            format_number(spam.duplicate_threshold),
        );
    }
    format!(
        "min({}, {} x {})",
        format_number(spam.duplicate_content_penalty.min(spam.max_penalty)),
        format_number(score),
        format_number(spam.duplicate_content_penalty),
    )
}

fn low_engagement_expression(metrics: &BreakdownMetrics, spam: &SpamPenaltyWeights) -> String {
    if metrics.reach == 0 {
        return "no reach".to_owned();
    }
    if metrics.reach < spam.minimum_reach {
        return format!("reach {} < minimum {}", metrics.reach, spam.minimum_reach);
    }
    let comparison = if metrics.low_engagement_flag {
        "<"
    } else {
        ">="
    };
    format!(
        "ratio {} {comparison} {}",
        format_number(metrics.engagement_to_reach_ratio),
        format_number(spam.low_engagement_ratio_threshold),
    )
}

fn interaction(label: &'static str, line: InteractionContribution) -> ExplanationStep {
    step(
        label,
        format!("{} x {}", line.count, format_number(line.weight)),
        line.contribution,
    )
}

const fn step(label: &'static str, expression: String, value: f64) -> ExplanationStep {
    ExplanationStep {
        label,
        expression,
        value,
    }
}

/// Up to four decimals with trailing zeros removed.
#[expect(clippy::float_arithmetic, reason = "folds negative zero into zero")]
fn format_number(value: f64) -> String {
    let fixed = format!("{:.4}", value + 0.0);
    if fixed.contains('.') {
        let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
        if trimmed == "-0" {
            "0".to_owned()
        } else {
            trimmed.to_owned()
        }
    } else {
        fixed
    }
}
