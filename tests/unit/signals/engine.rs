//! Unit tests for the signal generator's outcomes

use chrono::{Duration, TimeZone, Utc};
use quantlens::config::SignalConfig;
use quantlens::error::EngineError;
use quantlens::models::PriceBar;
use quantlens::signals::{SignalGenerator, SignalOutcome, MIN_BARS};
use std::collections::BTreeMap;

fn create_bars(closes: &[f64]) -> Vec<PriceBar> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            PriceBar::new(c, c * 1.005, c * 0.995, c, 1_000_000.0, start + Duration::days(i as i64))
        })
        .collect()
}

fn uptrend(count: usize) -> Vec<PriceBar> {
    let closes: Vec<f64> = (0..count).map(|i| 100.0 * 1.01_f64.powi(i as i32)).collect();
    create_bars(&closes)
}

#[test]
fn test_insufficient_history() {
    let generator = SignalGenerator::default();
    let outcome = generator.evaluate("AAPL", &uptrend(MIN_BARS - 1)).unwrap();
    assert_eq!(
        outcome,
        SignalOutcome::InsufficientData {
            bars: MIN_BARS - 1,
            required: MIN_BARS
        }
    );
    assert!(generator.generate_signal("AAPL", &[]).is_none());
}

#[test]
fn test_broken_bar_is_rejected() {
    let mut bars = uptrend(60);
    bars[10].high = bars[10].low - 1.0;

    let generator = SignalGenerator::default();
    let err = generator.evaluate("AAPL", &bars).unwrap_err();
    assert!(matches!(err, EngineError::MalformedInput { ref instrument, .. } if instrument == "AAPL"));
    assert!(generator.generate_signal("AAPL", &bars).is_none());
}

#[test]
fn test_unordered_timestamps_are_rejected() {
    let mut bars = uptrend(60);
    bars.swap(20, 21);
    let result = SignalGenerator::default().evaluate("AAPL", &bars);
    assert!(matches!(result, Err(EngineError::MalformedInput { .. })));
}

#[test]
fn test_non_finite_values_are_rejected() {
    let mut bars = uptrend(60);
    bars[5].volume = f64::NAN;
    assert!(SignalGenerator::default().evaluate("AAPL", &bars).is_err());
}

#[test]
fn test_confidence_floor() {
    let generator = SignalGenerator::new(SignalConfig {
        min_confidence: 1.01,
        ..SignalConfig::default()
    });
    let outcome = generator.evaluate("AAPL", &uptrend(120)).unwrap();
    assert!(matches!(outcome, SignalOutcome::BelowConfidence { .. }));
    assert!(!outcome.is_emitted());
}

#[test]
fn test_emitted_signal_respects_floor() {
    let generator = SignalGenerator::default();
    let signal = generator.generate_signal("AAPL", &uptrend(120)).unwrap();
    assert!(signal.confidence >= generator.config().min_confidence);
    assert!(signal.confidence <= 1.0);
}

#[test]
fn test_snapshot_carried_on_signal() {
    let signal = SignalGenerator::default()
        .generate_signal("AAPL", &uptrend(120))
        .unwrap();
    for key in ["rsi", "macd", "atr", "adx", "sma_50", "hurst", "squeeze_on", "cci"] {
        assert!(signal.indicator_snapshot.contains_key(key), "missing {}", key);
    }
    assert_eq!(signal.indicator_snapshot["price"], signal.entry_price);
}

#[test]
fn test_generation_is_idempotent() {
    let generator = SignalGenerator::default();
    let bars = uptrend(120);
    let first = generator.generate_signal("AAPL", &bars).unwrap();
    let second = generator.generate_signal("AAPL", &bars).unwrap();

    assert_eq!(first.signal_type, second.signal_type);
    assert_eq!(first.regime, second.regime);
    assert_eq!(first.confidence, second.confidence);
    assert_eq!(first.indicator_snapshot, second.indicator_snapshot);
}

#[test]
fn test_portfolio_signals_skip_failures() {
    let mut portfolio = BTreeMap::new();
    portfolio.insert("UP".to_string(), uptrend(120));
    portfolio.insert("SHORT".to_string(), uptrend(10));
    portfolio.insert("EMPTY".to_string(), Vec::new());

    let signals = SignalGenerator::default().generate_portfolio_signals(&portfolio);
    assert_eq!(signals.len(), 1);
    assert_eq!(signals[0].instrument_id, "UP");
}
