//! Batch summary of generated signals.

use crate::models::{SignalSummary, TopPick, TradingSignal};

const TOP_PICKS: usize = 3;

/// Count buys and sells, average the confidence and keep the three most
/// confident signals as top picks. Input order decides ties.
pub fn summarize(signals: &[TradingSignal]) -> SignalSummary {
    let total_signals = signals.len();
    let buy_signals = signals.iter().filter(|s| s.signal_type.is_buy()).count();
    let sell_signals = signals.iter().filter(|s| s.signal_type.is_sell()).count();
    let average_confidence = if signals.is_empty() {
        0.0
    } else {
        signals.iter().map(|s| s.confidence).sum::<f64>() / total_signals as f64
    };

    let mut ranked: Vec<&TradingSignal> = signals.iter().collect();
    ranked.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    let top_picks = ranked
        .into_iter()
        .take(TOP_PICKS)
        .map(|s| TopPick {
            instrument_id: s.instrument_id.clone(),
            signal_type: s.signal_type,
            confidence: s.confidence,
            regime: s.regime,
            reasons: s.reasons.clone(),
        })
        .collect();

    SignalSummary {
        total_signals,
        buy_signals,
        sell_signals,
        average_confidence,
        top_picks,
    }
}
