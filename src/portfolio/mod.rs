//! Portfolio analyzer: aligned returns, risk metrics, position risks,
//! correlation, stress scenarios, optimization and the risk report.

pub mod alignment;
pub mod correlation;
pub mod metrics;
pub mod optimizer;
pub mod positions;
pub mod report;
pub mod sectors;
pub mod stress;
pub mod weights;

use chrono::Utc;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use crate::config::RiskConfig;
use crate::error::Result;
use crate::models::{
    CorrelationMatrix, PortfolioMetrics, PositionRisk, PriceBar, RiskReport, StressScenarios,
    Weights,
};

pub use alignment::{align, portfolio_returns, AlignedPrices, AlignedReturns};
pub use optimizer::{Objective, OptimizationProblem};
pub use weights::{total_value, weights_from_positions};

pub const DEFAULT_BENCHMARK: &str = "SPY";

/// Per-instrument OHLCV histories keyed by instrument id.
pub type PortfolioData = BTreeMap<String, Vec<PriceBar>>;

#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioAnalyzer {
    risk: RiskConfig,
    benchmark: String,
}

impl Default for PortfolioAnalyzer {
    fn default() -> Self {
        Self::from_config(&RiskConfig::default())
    }
}

impl PortfolioAnalyzer {
    /// Default limits with the given annual risk-free rate.
    pub fn new(risk_free_rate: f64) -> Self {
        Self::from_config(&RiskConfig {
            risk_free_rate,
            ..RiskConfig::default()
        })
    }

    /// Risk-free rate, report thresholds and optimizer volatility ceiling
    /// all come from `risk`.
    pub fn from_config(risk: &RiskConfig) -> Self {
        Self {
            risk: risk.clone(),
            benchmark: DEFAULT_BENCHMARK.to_string(),
        }
    }

    /// Benchmark used by [`generate_risk_report`](Self::generate_risk_report).
    pub fn with_benchmark(mut self, benchmark: impl Into<String>) -> Self {
        self.benchmark = benchmark.into();
        self
    }

    pub fn risk_free_rate(&self) -> f64 {
        self.risk.risk_free_rate
    }

    pub fn risk_tolerance(&self) -> f64 {
        self.risk.risk_tolerance
    }

    /// Portfolio-level metrics. `total_value` is left at 0 for the caller.
    ///
    /// Beta and alpha are estimated only when `benchmark_id` is among the
    /// aligned instruments and at least 30 paired returns exist.
    pub fn analyze_portfolio(
        &self,
        data: &PortfolioData,
        weights: &Weights,
        benchmark_id: Option<&str>,
    ) -> Result<PortfolioMetrics> {
        let returns = align(data)?.returns();
        let combined = portfolio_returns(&returns, weights)?;
        let benchmark = benchmark_id.and_then(|id| returns.column(id));

        let matrix = correlation::correlation_matrix(&returns);
        let correlation_risk = correlation::average_correlation(&matrix)
            .unwrap_or(correlation::DEFAULT_CORRELATION_RISK);

        let metrics = metrics::calculate_metrics(
            &combined,
            benchmark,
            self.risk.risk_free_rate,
            correlation_risk,
        );
        debug!(
            instruments = returns.instruments.len(),
            observations = combined.len(),
            volatility = metrics.annualized_volatility,
            sharpe = metrics.sharpe_ratio,
            "Portfolio analyzed"
        );
        Ok(metrics)
    }

    /// Risk of every weighted instrument present in the aligned data, most
    /// risk-contributing first. Weights are used as given.
    pub fn calculate_position_risks(
        &self,
        data: &PortfolioData,
        weights: &Weights,
        total_value: f64,
    ) -> Result<Vec<PositionRisk>> {
        let returns = align(data)?.returns();
        let combined = portfolio_returns(&returns, weights)?;

        let mut risks: Vec<PositionRisk> = weights
            .iter()
            .filter_map(|(id, &weight)| {
                let asset = returns.column(id)?;
                let position_value = total_value * weight;
                let value_at_risk = metrics::value_at_risk(asset).unwrap_or(0.0) * position_value;
                let liquidity_score = data
                    .get(id)
                    .map_or(0.5, |bars| positions::liquidity_score(bars));

                Some(PositionRisk {
                    instrument_id: id.clone(),
                    position_value,
                    weight,
                    value_at_risk,
                    risk_contribution: positions::risk_contribution(asset, &combined, weight),
                    liquidity_score,
                    concentration_score: positions::concentration_score(weight),
                })
            })
            .collect();

        risks.sort_by(|a, b| b.risk_contribution.total_cmp(&a.risk_contribution));
        Ok(risks)
    }

    pub fn correlation_matrix(&self, data: &PortfolioData) -> Result<CorrelationMatrix> {
        Ok(correlation::correlation_matrix(&align(data)?.returns()))
    }

    /// Re-weight the aligned instruments. Maximizes Sharpe without a
    /// `target_return`, otherwise minimizes variance at that annual return;
    /// volatility never exceeds `risk_tolerance`.
    ///
    /// Never fails: misaligned data, short histories, infeasible bounds and
    /// non-convergence all return `current` unchanged.
    pub fn optimize_portfolio(
        &self,
        data: &PortfolioData,
        current: &Weights,
        target_return: Option<f64>,
        risk_tolerance: f64,
    ) -> Weights {
        let returns = match align(data) {
            Ok(aligned) => aligned.returns(),
            Err(e) => {
                warn!(error = %e, "Portfolio optimization skipped");
                return current.clone();
            }
        };

        let objective = match target_return {
            Some(target_return) => Objective::MinVariance { target_return },
            None => Objective::MaxSharpe {
                risk_free_rate: self.risk.risk_free_rate,
            },
        };
        let Some(problem) = OptimizationProblem::from_returns(&returns, objective, risk_tolerance)
        else {
            warn!(
                observations = returns.len(),
                "Insufficient data for optimization"
            );
            return current.clone();
        };

        match problem.solve() {
            Some(solution) => {
                info!(instruments = solution.len(), "Portfolio optimization successful");
                finalize_weights(&returns.instruments, &solution)
            }
            None => {
                warn!("Portfolio optimization failed, returning current weights");
                current.clone()
            }
        }
    }

    /// Stress scenarios on the normalised portfolio return series.
    pub fn run_stress_tests(
        &self,
        data: &PortfolioData,
        weights: &Weights,
    ) -> Result<StressScenarios> {
        let returns = align(data)?.returns();
        Ok(stress::run_stress_tests(&portfolio_returns(&returns, weights)?))
    }

    /// Everything above in one structure, plus sector concentration and
    /// recommendations.
    pub fn generate_risk_report(
        &self,
        data: &PortfolioData,
        weights: &Weights,
        total_value: f64,
    ) -> Result<RiskReport> {
        let portfolio_metrics = self
            .analyze_portfolio(data, weights, Some(&self.benchmark))?
            .with_total_value(total_value);
        let position_risks = self.calculate_position_risks(data, weights, total_value)?;
        let matrix = self.correlation_matrix(data)?;
        let average_correlation = correlation::average_correlation(&matrix);

        let recommendations = report::generate_recommendations(
            &portfolio_metrics,
            &position_risks,
            average_correlation,
            &self.risk,
        );

        Ok(RiskReport {
            generated_at: Utc::now(),
            portfolio_metrics,
            position_risks,
            correlation_summary: correlation::summarize(&matrix, self.risk.max_correlation),
            sector_concentration: sectors::sector_concentration(
                weights,
                self.risk.max_sector_concentration,
            ),
            stress_scenarios: self.run_stress_tests(data, weights)?,
            recommendations,
        })
    }
}

/// Drop negligible weights and put the rest back on the capped simplex.
/// When too few positions survive to respect the cap, the solution is kept
/// whole.
fn finalize_weights(instruments: &[String], solution: &[f64]) -> Weights {
    let kept: Vec<(&String, f64)> = instruments
        .iter()
        .zip(solution)
        .filter(|(_, w)| **w > optimizer::NEGLIGIBLE_WEIGHT)
        .map(|(id, w)| (id, *w))
        .collect();

    let values: Vec<f64> = kept.iter().map(|(_, w)| *w).collect();
    match optimizer::project_capped_simplex(&values, optimizer::MAX_WEIGHT) {
        Some(projected) => kept
            .iter()
            .zip(projected)
            .map(|((id, _), w)| ((*id).clone(), w))
            .collect(),
        None => instruments.iter().cloned().zip(solution.iter().copied()).collect(),
    }
}
