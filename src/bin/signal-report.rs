//! Quantlens signal report
//!
//! Reads `{instrument: [bars...]}` from a JSON file, runs one evaluation
//! cycle and prints the signals, their summary, the portfolio risk report
//! and optimized weights as JSON on stdout.

use dotenvy::dotenv;
use quantlens::config::EngineConfig;
use quantlens::jobs::{EvaluationCycle, JobContext};
use quantlens::logging;
use quantlens::models::{PriceBar, Weights};
use quantlens::portfolio::PortfolioAnalyzer;
use quantlens::services::{InMemoryMarketDataProvider, InMemorySignalStore};
use quantlens::signals::SignalGenerator;
use serde_json::json;
use std::collections::BTreeMap;
use std::env;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let path = env::args()
        .nth(1)
        .ok_or("usage: signal-report <bars.json>")?;

    let config = EngineConfig::load()?;
    for issue in config.validate() {
        warn!(issue = %issue, "Configuration issue");
    }
    info!(environment = %quantlens::config::get_environment(), "Starting signal report");

    let content = std::fs::read_to_string(&path)?;
    let data: BTreeMap<String, Vec<PriceBar>> = serde_json::from_str(&content)?;
    info!(instruments = data.len(), path = %path, "Loaded histories");

    let instruments: Vec<String> = data.keys().cloned().collect();
    let provider = Arc::new(InMemoryMarketDataProvider::from_histories(data.clone()));
    let store = Arc::new(InMemorySignalStore::new());
    let cycle = EvaluationCycle::new(
        JobContext::new(provider, Some(store.clone())),
        SignalGenerator::new(config.signals.clone()),
    );
    let cycle_report = cycle.run(&instruments).await;

    let weights = portfolio_weights(&config, &data);
    let mut analyzer = PortfolioAnalyzer::from_config(&config.risk);
    if let Some(benchmark) = &config.portfolio.benchmark {
        analyzer = analyzer.with_benchmark(benchmark.clone());
    }
    let risk_report = match analyzer.generate_risk_report(&data, &weights, config.portfolio.total_value)
    {
        Ok(report) => {
            cycle.store_metrics(&report.portfolio_metrics).await;
            Some(report)
        }
        Err(e) => {
            warn!(error = %e, "Risk report unavailable");
            None
        }
    };
    let optimized_weights =
        analyzer.optimize_portfolio(&data, &weights, None, analyzer.risk_tolerance());
    info!(
        signals = store.signals().await.len(),
        metrics = store.metrics().await.len(),
        "Stored cycle results"
    );

    let output = json!({
        "signals": cycle_report.signals,
        "summary": cycle_report.summary,
        "skipped": cycle_report.skipped,
        "risk_report": risk_report,
        "optimized_weights": optimized_weights,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Configured weights, or equal weights over the loaded instruments.
fn portfolio_weights(config: &EngineConfig, data: &BTreeMap<String, Vec<PriceBar>>) -> Weights {
    if !config.portfolio.weights.is_empty() {
        return config.portfolio.weights.clone();
    }
    let n = data.len().max(1) as f64;
    data.keys().map(|id| (id.clone(), 1.0 / n)).collect()
}
