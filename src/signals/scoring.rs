//! Confidence calculation

use crate::models::{IndicatorSnapshot, Regime, SignalType};

const BASE_CONFIDENCE: f64 = 0.5;
const REGIME_ALIGNED_BONUS: f64 = 0.2;
const RANGING_BONUS: f64 = 0.1;
const CONFIRMATION_BONUS: f64 = 0.1;
const COMPOSITE_AGREEMENT: f64 = 50.0;

/// Confidence in [0, 1] for a signal of `signal_type` emitted in `regime`.
///
/// Starts at 0.5. A trending regime adds 0.2 only when the signal points the
/// same way as the trend; any other regime adds 0.1. Each confirmation
/// (strong ADX trend, volume surge, a composite beyond ±50, price at a
/// Bollinger extreme, RSI beyond 25/75, a STRONG_* type) adds 0.1.
pub fn calculate_confidence(
    snapshot: &IndicatorSnapshot,
    regime: Regime,
    signal_type: SignalType,
) -> f64 {
    let mut confidence = BASE_CONFIDENCE;

    match regime {
        Regime::TrendingUp if signal_type.is_buy() => confidence += REGIME_ALIGNED_BONUS,
        Regime::TrendingDown if signal_type.is_sell() => confidence += REGIME_ALIGNED_BONUS,
        Regime::TrendingUp | Regime::TrendingDown => {}
        Regime::MeanReverting | Regime::Sideways | Regime::HighVolatility => {
            confidence += RANGING_BONUS
        }
    }

    let confirmations = [
        snapshot.strong_trend(),
        snapshot.volume_surge(),
        snapshot.momentum_score.abs() > COMPOSITE_AGREEMENT
            || snapshot.mean_reversion_score.abs() > COMPOSITE_AGREEMENT,
        snapshot.bb_position < 0.1 || snapshot.bb_position > 0.9,
        snapshot.rsi.is_some_and(|rsi| rsi < 25.0 || rsi > 75.0),
        signal_type.is_strong(),
    ];
    for confirmed in confirmations {
        if confirmed {
            confidence += CONFIRMATION_BONUS;
        }
    }

    confidence.min(1.0)
}
