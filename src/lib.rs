//! Quantitative signal and risk engine.
//!
//! Turns daily OHLCV histories into regime-aware trading signals and
//! evaluates weighted baskets of instruments for risk.

pub mod common;
pub mod config;
pub mod error;
pub mod indicators;
pub mod jobs;
pub mod logging;
pub mod models;
pub mod portfolio;
pub mod regime;
pub mod services;
pub mod signals;
pub mod strategies;

pub use error::{EngineError, Result};
pub use models::{PriceBar, Regime, SignalType, TradingSignal};
pub use portfolio::PortfolioAnalyzer;
pub use signals::{SignalGenerator, SignalOutcome};
