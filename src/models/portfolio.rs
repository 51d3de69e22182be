use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Instrument id -> weight.
pub type Weights = BTreeMap<String, f64>;

/// Portfolio-level risk and performance snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioMetrics {
    /// Supplied by the caller; the analyzer leaves it at 0.
    pub total_value: f64,
    pub daily_return: f64,
    pub annualized_volatility: f64,
    pub sharpe_ratio: f64,
    pub max_drawdown: f64,
    pub beta: f64,
    pub alpha: f64,
    pub value_at_risk: f64,
    pub expected_shortfall: f64,
    pub correlation_risk: f64,
}

impl PortfolioMetrics {
    pub fn with_total_value(mut self, total_value: f64) -> Self {
        self.total_value = total_value;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionRisk {
    pub instrument_id: String,
    pub position_value: f64,
    pub weight: f64,
    pub value_at_risk: f64,
    pub risk_contribution: f64,
    pub liquidity_score: f64,
    pub concentration_score: f64,
}

/// Pairwise return correlations, indexed in `instruments` order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub instruments: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.instruments.iter().position(|id| id == a)?;
        let j = self.instruments.iter().position(|id| id == b)?;
        Some(self.values[i][j])
    }

    /// Strict upper-triangle entries as `(row, col, value)`.
    pub fn upper_triangle(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let n = self.instruments.len();
        (0..n).flat_map(move |i| ((i + 1)..n).map(move |j| (i, j, self.values[i][j])))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelatedPair {
    pub first: String,
    pub second: String,
    pub correlation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationSummary {
    pub average_correlation: f64,
    pub max_correlation: f64,
    pub highly_correlated_pairs: Vec<CorrelatedPair>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConcentrationLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorConcentration {
    pub sector_weights: BTreeMap<String, f64>,
    pub max_sector_weight: f64,
    pub concentration_risk: ConcentrationLevel,
}

/// Single-day portfolio shocks, expressed as returns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StressScenarios {
    pub market_crash_10: f64,
    pub market_crash_20: f64,
    pub high_volatility: f64,
    pub correlation_breakdown: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    pub generated_at: DateTime<Utc>,
    pub portfolio_metrics: PortfolioMetrics,
    pub position_risks: Vec<PositionRisk>,
    pub correlation_summary: CorrelationSummary,
    pub sector_concentration: SectorConcentration,
    pub stress_scenarios: StressScenarios,
    pub recommendations: Vec<String>,
}
