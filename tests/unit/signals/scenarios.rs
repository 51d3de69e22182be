//! Market scenarios run through the full signal pipeline

use chrono::{Duration, TimeZone, Utc};
use quantlens::models::{PriceBar, Regime, SignalType};
use quantlens::signals::SignalGenerator;
use std::collections::BTreeMap;

fn create_trend_bars(count: usize, growth: f64) -> Vec<PriceBar> {
    let start = Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let close = 100.0 * growth.powi(i as i32);
            PriceBar::new(
                close,
                close * 1.005,
                close * 0.995,
                close,
                500_000.0,
                start + Duration::days(i as i64),
            )
        })
        .collect()
}

/// Triple the volume of the final bar.
fn with_volume_spike(mut bars: Vec<PriceBar>) -> Vec<PriceBar> {
    if let Some(last) = bars.last_mut() {
        last.volume *= 3.0;
    }
    bars
}

#[test]
fn test_steady_uptrend_buys() {
    let bars = create_trend_bars(120, 1.01);
    let signal = SignalGenerator::default()
        .generate_signal("UPTREND", &bars)
        .expect("uptrend should produce a signal");

    assert_eq!(signal.regime, Regime::TrendingUp);
    assert!(matches!(signal.signal_type, SignalType::Buy | SignalType::StrongBuy));
    assert!(signal.stop_loss < signal.entry_price);
    assert!(signal.entry_price < signal.target_price);
    assert!(signal.reasons.iter().any(|r| r == "MACD bullish crossover"));
}

#[test]
fn test_steady_downtrend_sells() {
    // A decaying MACD still sits above its signal line; the volume surge
    // sides with the bearish majority.
    let bars = with_volume_spike(create_trend_bars(120, 0.99));
    let signal = SignalGenerator::default()
        .generate_signal("DOWNTREND", &bars)
        .expect("downtrend should produce a signal");

    assert_eq!(signal.regime, Regime::TrendingDown);
    assert!(signal.signal_type.is_sell());
    assert!(signal.target_price < signal.entry_price);
    assert!(signal.entry_price < signal.stop_loss);
    assert!(signal
        .reasons
        .iter()
        .any(|r| r == "Volume surge confirms bearish momentum"));
}

#[test]
fn test_minimum_history_is_enough() {
    let bars = create_trend_bars(50, 1.01);
    let outcome = SignalGenerator::default().evaluate("UPTREND", &bars).unwrap();
    assert!(!matches!(
        outcome,
        quantlens::signals::SignalOutcome::InsufficientData { .. }
    ));
}

#[test]
fn test_empty_portfolio_has_no_signals() {
    let signals = SignalGenerator::default().generate_portfolio_signals(&BTreeMap::new());
    assert!(signals.is_empty());
}

#[test]
fn test_portfolio_signals_sorted_by_confidence() {
    let mut portfolio = BTreeMap::new();
    portfolio.insert("UP".to_string(), create_trend_bars(120, 1.01));
    portfolio.insert(
        "DOWN".to_string(),
        with_volume_spike(create_trend_bars(120, 0.99)),
    );

    let signals = SignalGenerator::default().generate_portfolio_signals(&portfolio);
    assert_eq!(signals.len(), 2);
    assert!(signals[0].confidence >= signals[1].confidence);
}
