//! Unit tests for portfolio statistics

use quantlens::portfolio::metrics::{
    beta_alpha, calculate_metrics, expected_shortfall, max_drawdown, value_at_risk,
    TRADING_DAYS,
};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_max_drawdown() {
    assert!(approx(max_drawdown(&[0.1, -0.5, 0.2]), -0.5));
    assert_eq!(max_drawdown(&[0.01, 0.02]), 0.0);
    assert_eq!(max_drawdown(&[]), 0.0);
}

#[test]
fn test_value_at_risk_and_shortfall() {
    let returns = [-0.05, -0.01, 0.0, 0.02, 0.03];
    let var = value_at_risk(&returns).unwrap();
    assert!(approx(var, -0.042));
    assert!(approx(expected_shortfall(&returns, -0.01).unwrap(), -0.03));
    assert_eq!(expected_shortfall(&returns, -0.5), None);
}

#[test]
fn test_beta_alpha_needs_history() {
    let benchmark: Vec<f64> = (0..30).map(|i| 0.01 * ((i % 5) as f64 - 2.0)).collect();
    let portfolio: Vec<f64> = benchmark.iter().map(|r| 2.0 * r + 0.001).collect();

    let (beta, alpha) = beta_alpha(&portfolio, &benchmark);
    assert!(approx(beta, 2.0));
    assert!(approx(alpha, 0.001 * TRADING_DAYS));

    assert_eq!(beta_alpha(&portfolio[..29], &benchmark[..29]), (0.0, 0.0));
}

#[test]
fn test_metrics_on_short_series() {
    let metrics = calculate_metrics(&[0.01], None, 0.02, 0.5);
    assert_eq!(metrics.total_value, 0.0);
    assert_eq!(metrics.annualized_volatility, 0.0);
    assert_eq!(metrics.sharpe_ratio, 0.0);
    assert_eq!(metrics.correlation_risk, 0.5);

    let empty = calculate_metrics(&[], None, 0.02, 0.5);
    assert_eq!(empty.daily_return, 0.0);
    assert_eq!(empty.value_at_risk, 0.0);
}

#[test]
fn test_sharpe_uses_annualised_excess_return() {
    let returns = [0.01, -0.005, 0.02, 0.0, -0.01, 0.015];
    let metrics = calculate_metrics(&returns, None, 0.02, 0.0);

    let mean = returns.iter().sum::<f64>() / returns.len() as f64;
    let var = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / 5.0;
    let vol = var.sqrt() * TRADING_DAYS.sqrt();
    assert!(approx(metrics.annualized_volatility, vol));
    assert!(approx(metrics.sharpe_ratio, (mean * TRADING_DAYS - 0.02) / vol));
    assert_eq!((metrics.beta, metrics.alpha), (0.0, 0.0));
}
