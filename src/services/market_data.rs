//! Market data provider interface and an in-memory implementation.

use async_trait::async_trait;
use chrono::Duration;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::ServiceResult;
use crate::models::PriceBar;

#[async_trait]
pub trait MarketDataProvider {
    /// Daily bars covering the last `lookback_days` calendar days, oldest
    /// first. Unknown instruments yield an error.
    async fn get_history(
        &self,
        instrument_id: &str,
        lookback_days: u32,
    ) -> ServiceResult<Vec<PriceBar>>;

    /// Close of the most recent bar.
    async fn get_latest_price(&self, instrument_id: &str) -> ServiceResult<f64>;
}

/// Serves histories loaded up front. Used by the report binary and tests.
#[derive(Clone, Default)]
pub struct InMemoryMarketDataProvider {
    bars: Arc<RwLock<HashMap<String, Vec<PriceBar>>>>,
}

impl InMemoryMarketDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_histories(histories: impl IntoIterator<Item = (String, Vec<PriceBar>)>) -> Self {
        Self {
            bars: Arc::new(RwLock::new(histories.into_iter().collect())),
        }
    }

    /// Replace the history of one instrument.
    pub async fn insert(&self, instrument_id: impl Into<String>, bars: Vec<PriceBar>) {
        self.bars.write().await.insert(instrument_id.into(), bars);
    }
}

#[async_trait]
impl MarketDataProvider for InMemoryMarketDataProvider {
    async fn get_history(
        &self,
        instrument_id: &str,
        lookback_days: u32,
    ) -> ServiceResult<Vec<PriceBar>> {
        let bars = self.bars.read().await;
        let history = bars
            .get(instrument_id)
            .ok_or_else(|| format!("No market data for {}", instrument_id))?;

        let Some(last) = history.last() else {
            return Ok(Vec::new());
        };
        let cutoff = last.timestamp - Duration::days(i64::from(lookback_days));
        Ok(history
            .iter()
            .filter(|bar| bar.timestamp > cutoff)
            .copied()
            .collect())
    }

    async fn get_latest_price(&self, instrument_id: &str) -> ServiceResult<f64> {
        let bars = self.bars.read().await;
        bars.get(instrument_id)
            .and_then(|history| history.last())
            .map(|bar| bar.close)
            .ok_or_else(|| format!("No market data for {}", instrument_id).into())
    }
}
