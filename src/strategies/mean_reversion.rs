//! Mean-reversion branch, used in ranging and volatile regimes.
//! Oversold readings count as buy evidence, overbought as sell evidence.

use super::Rule;
use crate::models::{EmissionThresholds, Evidence, EvidenceTally, IndicatorSnapshot, RuleResult};

pub const THRESHOLDS: EmissionThresholds = EmissionThresholds {
    signal: 3,
    strong: 4,
};

const COMPOSITE_THRESHOLD: f64 = 40.0;

pub static RULES: &[Rule] = &[
    Rule {
        id: "rsi_extreme",
        check: rsi_extreme,
    },
    Rule {
        id: "bollinger_extreme",
        check: bollinger_extreme,
    },
    Rule {
        id: "stochastic_extreme",
        check: stochastic_extreme,
    },
    Rule {
        id: "williams_extreme",
        check: williams_extreme,
    },
    Rule {
        id: "composite_score",
        check: composite_score,
    },
    Rule {
        id: "volume_surge",
        check: volume_surge,
    },
];

/// Shared shape of the band checks: below `low` is oversold, above `high`
/// is overbought.
fn band(
    id: &'static str,
    value: Option<f64>,
    low: f64,
    high: f64,
    oversold: &str,
    overbought: &str,
) -> RuleResult {
    match value {
        Some(v) if v < low => RuleResult::new(id, Evidence::Bullish, 1, oversold),
        Some(v) if v > high => RuleResult::new(id, Evidence::Bearish, 1, overbought),
        _ => RuleResult::neutral(id),
    }
}

fn rsi_extreme(s: &IndicatorSnapshot, _: &EvidenceTally) -> RuleResult {
    band("rsi_extreme", s.rsi, 30.0, 70.0, "RSI oversold", "RSI overbought")
}

fn bollinger_extreme(s: &IndicatorSnapshot, _: &EvidenceTally) -> RuleResult {
    band(
        "bollinger_extreme",
        Some(s.bb_position),
        0.1,
        0.9,
        "Price near Bollinger Band lower band",
        "Price near Bollinger Band upper band",
    )
}

fn stochastic_extreme(s: &IndicatorSnapshot, _: &EvidenceTally) -> RuleResult {
    band(
        "stochastic_extreme",
        s.stoch_k,
        20.0,
        80.0,
        "Stochastic oversold",
        "Stochastic overbought",
    )
}

fn williams_extreme(s: &IndicatorSnapshot, _: &EvidenceTally) -> RuleResult {
    band(
        "williams_extreme",
        s.williams_r,
        -80.0,
        -20.0,
        "Williams %R oversold",
        "Williams %R overbought",
    )
}

fn composite_score(s: &IndicatorSnapshot, _: &EvidenceTally) -> RuleResult {
    if s.mean_reversion_score > COMPOSITE_THRESHOLD {
        RuleResult::new(
            "composite_score",
            Evidence::Bullish,
            1,
            "Mean reversion score indicates oversold",
        )
    } else if s.mean_reversion_score < -COMPOSITE_THRESHOLD {
        RuleResult::new(
            "composite_score",
            Evidence::Bearish,
            1,
            "Mean reversion score indicates overbought",
        )
    } else {
        RuleResult::neutral("composite_score")
    }
}

/// Only a strictly leading side is confirmed.
fn volume_surge(s: &IndicatorSnapshot, tally: &EvidenceTally) -> RuleResult {
    if !s.volume_surge() {
        return RuleResult::neutral("volume_surge");
    }
    match tally.leader() {
        Evidence::Bullish => RuleResult::new(
            "volume_surge",
            Evidence::Bullish,
            1,
            "Volume surge confirms oversold reversal",
        ),
        Evidence::Bearish => RuleResult::new(
            "volume_surge",
            Evidence::Bearish,
            1,
            "Volume surge confirms overbought reversal",
        ),
        Evidence::Neutral => RuleResult::neutral("volume_surge"),
    }
}
