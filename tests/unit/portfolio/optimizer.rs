//! Unit tests for portfolio optimization

use chrono::{Duration, TimeZone, Utc};
use quantlens::models::PriceBar;
use quantlens::portfolio::optimizer::MAX_WEIGHT;
use quantlens::portfolio::{align, Objective, OptimizationProblem, PortfolioAnalyzer, PortfolioData};
use std::collections::BTreeMap;

fn price_bars(count: usize, frequency: f64, drift: f64) -> Vec<PriceBar> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut price = 50.0;
    (0..count)
        .map(|i| {
            let t = i as f64;
            price *= 1.0 + drift + 0.012 * (t * frequency).sin() + 0.005 * (t * frequency * 1.7).cos();
            PriceBar::new(price, price * 1.01, price * 0.99, price, 1_000_000.0, start + Duration::days(i as i64))
        })
        .collect()
}

fn universe(count: usize, bars: usize) -> PortfolioData {
    (0..count)
        .map(|k| {
            let id = format!("ASSET{k}");
            (id, price_bars(bars, 0.3 + 0.4 * k as f64, 0.0004 * k as f64))
        })
        .collect()
}

fn equal_weights(data: &PortfolioData) -> BTreeMap<String, f64> {
    let w = 1.0 / data.len() as f64;
    data.keys().map(|id| (id.clone(), w)).collect()
}

#[test]
fn test_short_history_keeps_current_weights() {
    let data = universe(5, 20);
    let current = equal_weights(&data);
    let result = PortfolioAnalyzer::default().optimize_portfolio(&data, &current, None, 0.15);
    assert_eq!(result, current);
}

#[test]
fn test_too_few_instruments_for_cap() {
    let data = universe(3, 120);
    let current = equal_weights(&data);
    let result = PortfolioAnalyzer::default().optimize_portfolio(&data, &current, None, 1.0);
    assert_eq!(result, current);
}

#[test]
fn test_unreachable_target_keeps_current_weights() {
    let data = universe(5, 120);
    let current = equal_weights(&data);
    let result = PortfolioAnalyzer::default().optimize_portfolio(&data, &current, Some(10.0), 1.0);
    assert_eq!(result, current);
}

#[test]
fn test_misaligned_data_keeps_current_weights() {
    let mut data = universe(4, 60);
    let late: Vec<PriceBar> = price_bars(60, 0.5, 0.0)
        .into_iter()
        .map(|mut b| {
            b.timestamp = b.timestamp + Duration::days(1_000);
            b
        })
        .collect();
    data.insert("LATE".to_string(), late);
    let current = equal_weights(&data);
    let result = PortfolioAnalyzer::default().optimize_portfolio(&data, &current, None, 1.0);
    assert_eq!(result, current);
}

#[test]
fn test_optimized_weights_respect_bounds() {
    let data = universe(5, 120);
    let current = equal_weights(&data);
    let result = PortfolioAnalyzer::default().optimize_portfolio(&data, &current, None, 1.0);

    if result != current {
        let total: f64 = result.values().sum();
        assert!((total - 1.0).abs() < 1e-6);
        assert!(result.values().all(|w| (0.0..=MAX_WEIGHT + 1e-9).contains(w)));
        assert!(result.keys().all(|id| data.contains_key(id)));
    }
}

#[test]
fn test_problem_needs_thirty_observations() {
    let data = universe(5, 30);
    let returns = align(&data).unwrap().returns();
    assert_eq!(returns.len(), 29);
    assert!(OptimizationProblem::from_returns(
        &returns,
        Objective::MaxSharpe { risk_free_rate: 0.02 },
        0.15
    )
    .is_none());
}

fn diagonal_problem(variances: &[f64], target_return: f64) -> OptimizationProblem {
    let n = variances.len();
    let mut covariance = vec![vec![0.0; n]; n];
    for (i, v) in variances.iter().enumerate() {
        covariance[i][i] = *v;
    }
    OptimizationProblem {
        expected_returns: vec![0.1; n],
        covariance,
        objective: Objective::MinVariance { target_return },
        risk_tolerance: 1.0,
    }
}

#[test]
fn test_equal_risk_assets_stay_equal() {
    let solution = diagonal_problem(&[0.04; 4], 0.1).solve().unwrap();
    for w in solution {
        assert!((w - 0.25).abs() < 1e-6);
    }
}

#[test]
fn test_min_variance_caps_low_risk_assets() {
    let solution = diagonal_problem(&[0.01, 0.02, 0.04, 0.08, 0.16], 0.1)
        .solve()
        .unwrap();

    // The two safest assets hit the cap; the rest split 0.4 by inverse variance.
    let expected = [0.3, 0.3, 0.4 * 4.0 / 7.0, 0.4 * 2.0 / 7.0, 0.4 / 7.0];
    for (w, e) in solution.iter().zip(expected) {
        assert!((w - e).abs() < 1e-4, "got {w}, expected {e}");
    }
}

#[test]
fn test_solve_rejects_infeasible_cap() {
    assert!(diagonal_problem(&[0.04; 3], 0.1).solve().is_none());
}
