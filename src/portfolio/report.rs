//! Rule-based risk recommendations.

use crate::config::RiskConfig;
use crate::models::{PortfolioMetrics, PositionRisk};

const MIN_SHARPE: f64 = 0.5;
const MAX_DRAWDOWN: f64 = -0.20;
const CONCENTRATION_LIMIT: f64 = 0.6;
const MIN_LIQUIDITY: f64 = 0.3;
const CORRELATION_LIMIT: f64 = 0.6;

pub const BALANCED: &str = "Portfolio risk profile appears balanced. Continue monitoring.";

/// Volatility is judged against `limits.volatility_limit`; the other
/// thresholds are fixed.
pub fn generate_recommendations(
    metrics: &PortfolioMetrics,
    positions: &[PositionRisk],
    average_correlation: Option<f64>,
    limits: &RiskConfig,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if metrics.annualized_volatility > limits.volatility_limit {
        recommendations.push(
            "Portfolio volatility is high. Consider reducing position sizes or adding defensive assets."
                .to_string(),
        );
    }
    if metrics.sharpe_ratio < MIN_SHARPE {
        recommendations
            .push("Sharpe ratio is low. Review asset selection and consider rebalancing.".to_string());
    }
    if metrics.max_drawdown < MAX_DRAWDOWN {
        recommendations
            .push("Maximum drawdown exceeds 20%. Implement stronger risk controls.".to_string());
    }

    let concentrated = tickers_where(positions, |p| p.concentration_score > CONCENTRATION_LIMIT);
    if !concentrated.is_empty() {
        recommendations.push(format!(
            "High concentration risk in: {}. Consider reducing position sizes.",
            concentrated
        ));
    }

    let illiquid = tickers_where(positions, |p| p.liquidity_score < MIN_LIQUIDITY);
    if !illiquid.is_empty() {
        recommendations.push(format!(
            "Low liquidity in: {}. Monitor for exit opportunities.",
            illiquid
        ));
    }

    if average_correlation.is_some_and(|avg| avg > CORRELATION_LIMIT) {
        recommendations.push(
            "High average correlation detected. Increase diversification across uncorrelated assets."
                .to_string(),
        );
    }

    if recommendations.is_empty() {
        recommendations.push(BALANCED.to_string());
    }
    recommendations
}

fn tickers_where(positions: &[PositionRisk], pred: impl Fn(&PositionRisk) -> bool) -> String {
    positions
        .iter()
        .filter(|p| pred(p))
        .map(|p| p.instrument_id.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
