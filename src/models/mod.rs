//! Shared data models spanning the engine layers.

pub mod indicators;
pub mod market;
pub mod portfolio;
pub mod regime;
pub mod signal;
pub mod strategy;

pub use indicators::{
    AdxSeries, BollingerSeries, FibonacciLevels, IchimokuCloud, IndicatorSnapshot, MacdSeries,
    PivotPoints, Series, SqueezeSeries, StochasticSeries,
};
pub use market::{validate_bars, OhlcvColumns, PriceBar};
pub use portfolio::{
    ConcentrationLevel, CorrelatedPair, CorrelationMatrix, CorrelationSummary, PortfolioMetrics,
    PositionRisk, RiskReport, SectorConcentration, StressScenarios, Weights,
};
pub use regime::{Regime, VolatilityRegime};
pub use signal::{SignalSummary, SignalType, TopPick, TradingSignal};
pub use strategy::{
    EmissionThresholds, Evidence, EvidenceTally, RuleResult, StrategyDecision,
};
