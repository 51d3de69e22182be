//! Unit tests for the in-memory service implementations

use chrono::{Duration, TimeZone, Utc};
use quantlens::models::{PortfolioMetrics, PriceBar, Regime, SignalType, TradingSignal};
use quantlens::services::{
    InMemoryMarketDataProvider, InMemorySignalStore, MarketDataProvider, SignalStore,
};
use std::collections::BTreeMap;
use tokio_test::{assert_err, assert_ok};

fn daily_bars(count: usize) -> Vec<PriceBar> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let close = 100.0 + i as f64;
            PriceBar::new(close, close + 1.0, close - 1.0, close, 1_000.0, start + Duration::days(i as i64))
        })
        .collect()
}

#[tokio::test]
async fn test_history_respects_lookback() {
    let provider = InMemoryMarketDataProvider::from_histories([("ABC".to_string(), daily_bars(10))]);

    let bars = assert_ok!(provider.get_history("ABC", 3).await);
    assert_eq!(bars.len(), 3);
    assert_eq!(bars[0].close, 107.0);
    assert_eq!(bars[2].close, 109.0);

    let all = provider.get_history("ABC", 365).await.unwrap();
    assert_eq!(all.len(), 10);
}

#[tokio::test]
async fn test_unknown_instrument_errors() {
    let provider = InMemoryMarketDataProvider::new();
    let err = assert_err!(provider.get_history("NOPE", 30).await);
    assert!(err.to_string().contains("NOPE"));
    assert_err!(provider.get_latest_price("NOPE").await);
}

#[tokio::test]
async fn test_empty_history_is_not_an_error() {
    let provider = InMemoryMarketDataProvider::new();
    provider.insert("EMPTY", Vec::new()).await;
    assert!(provider.get_history("EMPTY", 30).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_latest_price() {
    let provider = InMemoryMarketDataProvider::new();
    provider.insert("ABC", daily_bars(5)).await;
    assert_eq!(provider.get_latest_price("ABC").await.unwrap(), 104.0);

    provider.insert("ABC", daily_bars(2)).await;
    assert_eq!(provider.get_latest_price("ABC").await.unwrap(), 101.0);
}

#[tokio::test]
async fn test_signal_store_keeps_records() {
    let store = InMemorySignalStore::new();
    let signal = TradingSignal {
        instrument_id: "ABC".to_string(),
        signal_type: SignalType::Buy,
        confidence: 0.8,
        entry_price: 100.0,
        stop_loss: 95.0,
        target_price: 110.0,
        regime: Regime::TrendingUp,
        indicator_snapshot: BTreeMap::from([("rsi".to_string(), 58.0)]),
        generated_at: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
        reasons: vec!["MACD bullish crossover".to_string()],
    };
    let metrics = PortfolioMetrics {
        total_value: 1_000.0,
        daily_return: 0.001,
        annualized_volatility: 0.2,
        sharpe_ratio: 1.0,
        max_drawdown: -0.1,
        beta: 1.0,
        alpha: 0.0,
        value_at_risk: -0.02,
        expected_shortfall: -0.03,
        correlation_risk: 0.5,
    };

    assert_ok!(store.store_signal(&signal).await);
    assert_ok!(store.store_metrics(&metrics).await);

    assert_eq!(store.signals().await, vec![signal]);
    assert_eq!(store.metrics().await, vec![metrics]);
}
