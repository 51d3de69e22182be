use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use crate::jobs::context::JobContext;
use crate::models::{PortfolioMetrics, PriceBar, SignalSummary, TradingSignal};
use crate::signals::{summarize, SignalGenerator};

/// An instrument left out of a cycle and the reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedInstrument {
    pub instrument_id: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleReport {
    pub signals: Vec<TradingSignal>,
    pub summary: SignalSummary,
    pub skipped: Vec<SkippedInstrument>,
}

/// One pass over a watchlist.
///
/// Histories are fetched concurrently, each under its own timeout. The
/// engine then runs once on the frozen dataset.
pub struct EvaluationCycle {
    ctx: JobContext,
    generator: SignalGenerator,
}

impl EvaluationCycle {
    pub fn new(ctx: JobContext, generator: SignalGenerator) -> Self {
        Self { ctx, generator }
    }

    fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.generator.config().fetch_timeout_secs)
    }

    pub async fn run(&self, instruments: &[String]) -> CycleReport {
        let start = Instant::now();
        let (data, mut skipped) = self.fetch_all(instruments).await;

        let signals = self.generator.generate_portfolio_signals(&data);
        for instrument_id in data.keys() {
            if !signals.iter().any(|s| &s.instrument_id == instrument_id) {
                skipped.push(SkippedInstrument {
                    instrument_id: instrument_id.clone(),
                    reason: "no signal".to_string(),
                });
            }
        }

        if let Some(store) = &self.ctx.store {
            for signal in &signals {
                if let Err(e) = store.store_signal(signal).await {
                    error!(
                        symbol = %signal.instrument_id,
                        error = %e,
                        "Failed to store signal"
                    );
                }
            }
        }

        let summary = summarize(&signals);
        info!(
            instruments = instruments.len(),
            signals = signals.len(),
            skipped = skipped.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Evaluation cycle complete"
        );

        CycleReport {
            signals,
            summary,
            skipped,
        }
    }

    /// Persist portfolio metrics computed from this cycle's data. A no-op
    /// without a store; store failures are logged.
    pub async fn store_metrics(&self, metrics: &PortfolioMetrics) {
        let Some(store) = &self.ctx.store else {
            return;
        };
        if let Err(e) = store.store_metrics(metrics).await {
            error!(error = %e, "Failed to store portfolio metrics");
        }
    }

    async fn fetch_all(
        &self,
        instruments: &[String],
    ) -> (BTreeMap<String, Vec<PriceBar>>, Vec<SkippedInstrument>) {
        let lookback = self.generator.config().lookback_days;
        let limit = self.fetch_timeout();

        let fetches = instruments.iter().map(|id| async move {
            let result = timeout(limit, self.ctx.data_provider.get_history(id, lookback)).await;
            (id, result)
        });

        let mut data = BTreeMap::new();
        let mut skipped = Vec::new();
        for (id, result) in join_all(fetches).await {
            let reason = match result {
                Ok(Ok(bars)) => {
                    debug!(symbol = %id, count = bars.len(), "Fetched history");
                    data.insert(id.clone(), bars);
                    continue;
                }
                Ok(Err(e)) => {
                    warn!(symbol = %id, error = %e, "Market data error");
                    format!("fetch failed: {}", e)
                }
                Err(_) => {
                    warn!(symbol = %id, timeout_secs = limit.as_secs(), "Market data fetch timed out");
                    "fetch timed out".to_string()
                }
            };
            skipped.push(SkippedInstrument {
                instrument_id: id.clone(),
                reason,
            });
        }
        (data, skipped)
    }
}
