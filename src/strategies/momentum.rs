//! Momentum branch, used in trending regimes.

use super::Rule;
use crate::models::{EmissionThresholds, Evidence, EvidenceTally, IndicatorSnapshot, RuleResult};

pub const THRESHOLDS: EmissionThresholds = EmissionThresholds {
    signal: 4,
    strong: 5,
};

const COMPOSITE_THRESHOLD: f64 = 30.0;

pub static RULES: &[Rule] = &[
    Rule {
        id: "macd_cross",
        check: macd_cross,
    },
    Rule {
        id: "rsi_band",
        check: rsi_band,
    },
    Rule {
        id: "ma_alignment",
        check: ma_alignment,
    },
    Rule {
        id: "adx_direction",
        check: adx_direction,
    },
    Rule {
        id: "volume_surge",
        check: volume_surge,
    },
    Rule {
        id: "composite_score",
        check: composite_score,
    },
];

fn macd_cross(s: &IndicatorSnapshot, _: &EvidenceTally) -> RuleResult {
    if s.macd_bullish() {
        RuleResult::new("macd_cross", Evidence::Bullish, 1, "MACD bullish crossover")
    } else {
        RuleResult::new("macd_cross", Evidence::Bearish, 1, "MACD bearish crossover")
    }
}

fn rsi_band(s: &IndicatorSnapshot, _: &EvidenceTally) -> RuleResult {
    match s.rsi {
        Some(rsi) if rsi > 45.0 && rsi < 75.0 => RuleResult::new(
            "rsi_band",
            Evidence::Bullish,
            1,
            "RSI in bullish momentum range",
        ),
        Some(rsi) if rsi < 45.0 => RuleResult::new(
            "rsi_band",
            Evidence::Bearish,
            1,
            "RSI showing bearish momentum",
        ),
        _ => RuleResult::neutral("rsi_band"),
    }
}

fn ma_alignment(s: &IndicatorSnapshot, _: &EvidenceTally) -> RuleResult {
    let (Some(sma_20), Some(sma_50)) = (s.sma_20, s.sma_50) else {
        return RuleResult::neutral("ma_alignment");
    };
    let above_sma_20 = s.price > sma_20;
    let ma_bullish = sma_20 > sma_50;

    if above_sma_20 && ma_bullish {
        RuleResult::new(
            "ma_alignment",
            Evidence::Bullish,
            1,
            "Price above MA20 and MA bullish",
        )
    } else if !above_sma_20 && !ma_bullish {
        RuleResult::new(
            "ma_alignment",
            Evidence::Bearish,
            1,
            "Price below MA20 and MA bearish",
        )
    } else {
        RuleResult::neutral("ma_alignment")
    }
}

fn adx_direction(s: &IndicatorSnapshot, _: &EvidenceTally) -> RuleResult {
    if !s.strong_trend() {
        return RuleResult::neutral("adx_direction");
    }
    if s.plus_di.unwrap_or(0.0) > s.minus_di.unwrap_or(0.0) {
        RuleResult::new(
            "adx_direction",
            Evidence::Bullish,
            1,
            "Strong uptrend confirmed by ADX",
        )
    } else {
        RuleResult::new(
            "adx_direction",
            Evidence::Bearish,
            1,
            "Strong downtrend confirmed by ADX",
        )
    }
}

/// Confirms whichever side leads so far; a tie goes to the bearish side.
fn volume_surge(s: &IndicatorSnapshot, tally: &EvidenceTally) -> RuleResult {
    if !s.volume_surge() {
        return RuleResult::neutral("volume_surge");
    }
    if tally.leader() == Evidence::Bullish {
        RuleResult::new(
            "volume_surge",
            Evidence::Bullish,
            1,
            "Volume surge confirms bullish momentum",
        )
    } else {
        RuleResult::new(
            "volume_surge",
            Evidence::Bearish,
            1,
            "Volume surge confirms bearish momentum",
        )
    }
}

fn composite_score(s: &IndicatorSnapshot, _: &EvidenceTally) -> RuleResult {
    if s.momentum_score > COMPOSITE_THRESHOLD {
        RuleResult::new(
            "composite_score",
            Evidence::Bullish,
            1,
            "Composite momentum score bullish",
        )
    } else if s.momentum_score < -COMPOSITE_THRESHOLD {
        RuleResult::new(
            "composite_score",
            Evidence::Bearish,
            1,
            "Composite momentum score bearish",
        )
    } else {
        RuleResult::neutral("composite_score")
    }
}
