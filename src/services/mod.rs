//! Collaborators around the engine: where histories come from and where
//! signals go.

pub mod market_data;
pub mod store;

pub use market_data::{InMemoryMarketDataProvider, MarketDataProvider};
pub use store::{InMemorySignalStore, SignalStore};

/// Boxed error returned by collaborator implementations.
pub type ServiceError = Box<dyn std::error::Error + Send + Sync>;
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
