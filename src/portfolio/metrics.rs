//! Portfolio-level risk and performance statistics.

use crate::common::math;
use crate::models::PortfolioMetrics;

pub const TRADING_DAYS: f64 = 252.0;
/// Paired observations needed before beta/alpha are estimated.
pub const MIN_BENCHMARK_OBSERVATIONS: usize = 30;
const VAR_PERCENTILE: f64 = 5.0;

/// Worst peak-to-trough decline of the compounded return path; 0 or less.
pub fn max_drawdown(returns: &[f64]) -> f64 {
    let mut wealth = 1.0;
    let mut peak = f64::MIN;
    let mut worst = 0.0_f64;
    for r in returns {
        wealth *= 1.0 + r;
        peak = peak.max(wealth);
        worst = worst.min(wealth / peak - 1.0);
    }
    worst
}

/// Historical 95% value at risk: the 5th percentile daily return.
pub fn value_at_risk(returns: &[f64]) -> Option<f64> {
    math::percentile(returns, VAR_PERCENTILE)
}

/// Mean of the returns at or below the value at risk.
pub fn expected_shortfall(returns: &[f64], var: f64) -> Option<f64> {
    let tail: Vec<f64> = returns.iter().copied().filter(|r| *r <= var).collect();
    math::mean(&tail)
}

/// `(beta, annualised alpha)` from regressing portfolio returns on the
/// benchmark's. Needs at least [`MIN_BENCHMARK_OBSERVATIONS`] pairs.
pub fn beta_alpha(portfolio: &[f64], benchmark: &[f64]) -> (f64, f64) {
    if portfolio.len() != benchmark.len() || benchmark.len() < MIN_BENCHMARK_OBSERVATIONS {
        return (0.0, 0.0);
    }
    match math::linear_regression(benchmark, portfolio) {
        Some((slope, intercept)) => (slope, intercept * TRADING_DAYS),
        None => (0.0, 0.0),
    }
}

/// Metrics over a daily portfolio return series. Statistics the series is
/// too short to support are reported as 0.
pub fn calculate_metrics(
    returns: &[f64],
    benchmark: Option<&[f64]>,
    risk_free_rate: f64,
    correlation_risk: f64,
) -> PortfolioMetrics {
    let daily_return = math::mean(returns).unwrap_or(0.0);
    let annualized_volatility = math::sample_std(returns)
        .map(|s| s * TRADING_DAYS.sqrt())
        .unwrap_or(0.0);
    let sharpe_ratio = if annualized_volatility > 0.0 {
        (daily_return * TRADING_DAYS - risk_free_rate) / annualized_volatility
    } else {
        0.0
    };

    let var = value_at_risk(returns).unwrap_or(0.0);
    let shortfall = expected_shortfall(returns, var).unwrap_or(var);
    let (beta, alpha) = benchmark
        .map(|b| beta_alpha(returns, b))
        .unwrap_or((0.0, 0.0));

    PortfolioMetrics {
        total_value: 0.0,
        daily_return,
        annualized_volatility,
        sharpe_ratio,
        max_drawdown: max_drawdown(returns),
        beta,
        alpha,
        value_at_risk: var,
        expected_shortfall: shortfall,
        correlation_risk,
    }
}
