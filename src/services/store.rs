//! Sink for generated signals and portfolio metrics.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::ServiceResult;
use crate::models::{PortfolioMetrics, TradingSignal};

#[async_trait]
pub trait SignalStore {
    async fn store_signal(&self, signal: &TradingSignal) -> ServiceResult<()>;

    async fn store_metrics(&self, metrics: &PortfolioMetrics) -> ServiceResult<()>;
}

#[derive(Clone, Default)]
pub struct InMemorySignalStore {
    signals: Arc<RwLock<Vec<TradingSignal>>>,
    metrics: Arc<RwLock<Vec<PortfolioMetrics>>>,
}

impl InMemorySignalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn signals(&self) -> Vec<TradingSignal> {
        self.signals.read().await.clone()
    }

    pub async fn metrics(&self) -> Vec<PortfolioMetrics> {
        self.metrics.read().await.clone()
    }
}

#[async_trait]
impl SignalStore for InMemorySignalStore {
    async fn store_signal(&self, signal: &TradingSignal) -> ServiceResult<()> {
        self.signals.write().await.push(signal.clone());
        Ok(())
    }

    async fn store_metrics(&self, metrics: &PortfolioMetrics) -> ServiceResult<()> {
        self.metrics.write().await.push(metrics.clone());
        Ok(())
    }
}
