//! One evaluation cycle end-to-end: fetch, evaluate, store, summarize

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use quantlens::config::SignalConfig;
use quantlens::jobs::{EvaluationCycle, JobContext};
use quantlens::models::{PriceBar, SignalType};
use quantlens::portfolio::PortfolioAnalyzer;
use quantlens::services::{
    InMemoryMarketDataProvider, InMemorySignalStore, MarketDataProvider, ServiceResult,
};
use quantlens::signals::SignalGenerator;
use std::collections::BTreeMap;
use std::sync::Arc;

fn trend_bars(count: usize, growth: f64) -> Vec<PriceBar> {
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

fn watchlist(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_cycle_generates_and_stores_signals() {
    let provider = InMemoryMarketDataProvider::from_histories([
        ("UP".to_string(), trend_bars(120, 1.01)),
        ("SHORT".to_string(), trend_bars(10, 1.01)),
    ]);
    let store = Arc::new(InMemorySignalStore::new());
    let ctx = JobContext::new(Arc::new(provider), Some(store.clone()));
    let cycle = EvaluationCycle::new(ctx, SignalGenerator::default());

    let report = cycle.run(&watchlist(&["UP", "SHORT", "MISSING"])).await;

    assert_eq!(report.signals.len(), 1);
    assert_eq!(report.signals[0].instrument_id, "UP");
    assert_eq!(report.signals[0].signal_type, SignalType::Buy);

    assert_eq!(report.summary.total_signals, 1);
    assert_eq!(report.summary.buy_signals, 1);
    assert_eq!(report.summary.sell_signals, 0);

    let missing = report
        .skipped
        .iter()
        .find(|s| s.instrument_id == "MISSING")
        .expect("missing instrument is skipped");
    assert!(missing.reason.starts_with("fetch failed"));
    let short = report
        .skipped
        .iter()
        .find(|s| s.instrument_id == "SHORT")
        .expect("short history is skipped");
    assert_eq!(short.reason, "no signal");

    let stored = store.signals().await;
    assert_eq!(stored, report.signals);

    let data = BTreeMap::from([("UP".to_string(), trend_bars(120, 1.01))]);
    let weights = BTreeMap::from([("UP".to_string(), 1.0)]);
    let metrics = PortfolioAnalyzer::default()
        .analyze_portfolio(&data, &weights, None)
        .unwrap();
    cycle.store_metrics(&metrics).await;
    assert_eq!(store.metrics().await, vec![metrics]);
}

#[tokio::test]
async fn test_cycle_without_store() {
    let provider = InMemoryMarketDataProvider::from_histories([(
        "UP".to_string(),
        trend_bars(120, 1.01),
    )]);
    let ctx = JobContext::new(Arc::new(provider), None);
    let cycle = EvaluationCycle::new(ctx, SignalGenerator::default());
    let report = cycle.run(&watchlist(&["UP"])).await;

    assert_eq!(report.signals.len(), 1);
    assert!(report.skipped.is_empty());
    assert_eq!(report.summary.top_picks.len(), 1);

    // Nothing to write to; must not panic.
    let data = BTreeMap::from([("UP".to_string(), trend_bars(120, 1.01))]);
    let weights = BTreeMap::from([("UP".to_string(), 1.0)]);
    let metrics = PortfolioAnalyzer::default()
        .analyze_portfolio(&data, &weights, None)
        .unwrap();
    cycle.store_metrics(&metrics).await;
}

/// Never answers.
struct StalledProvider;

#[async_trait]
impl MarketDataProvider for StalledProvider {
    async fn get_history(&self, _instrument_id: &str, _lookback_days: u32) -> ServiceResult<Vec<PriceBar>> {
        std::future::pending().await
    }

    async fn get_latest_price(&self, _instrument_id: &str) -> ServiceResult<f64> {
        std::future::pending().await
    }
}

#[tokio::test]
async fn test_slow_provider_times_out() {
    let config = SignalConfig {
        fetch_timeout_secs: 1,
        ..SignalConfig::default()
    };
    let ctx = JobContext::new(Arc::new(StalledProvider), None);
    let report = EvaluationCycle::new(ctx, SignalGenerator::new(config))
        .run(&watchlist(&["A", "B"]))
        .await;

    assert!(report.signals.is_empty());
    assert_eq!(report.summary.total_signals, 0);
    assert_eq!(report.skipped.len(), 2);
    assert!(report.skipped.iter().all(|s| s.reason == "fetch timed out"));
}
