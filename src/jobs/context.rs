//! Job context for dependency injection

use crate::services::{MarketDataProvider, SignalStore};
use std::sync::Arc;

/// Collaborators shared by every evaluation cycle.
///
/// The store is optional; without one, signals are only returned.
#[derive(Clone)]
pub struct JobContext {
    pub data_provider: Arc<dyn MarketDataProvider + Send + Sync>,
    pub store: Option<Arc<dyn SignalStore + Send + Sync>>,
}

impl JobContext {
    pub fn new(
        data_provider: Arc<dyn MarketDataProvider + Send + Sync>,
        store: Option<Arc<dyn SignalStore + Send + Sync>>,
    ) -> Self {
        Self {
            data_provider,
            store,
        }
    }
}
