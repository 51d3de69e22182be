//! Unit tests for position scores, weights, sectors, stress and recommendations

use chrono::{Duration, TimeZone, Utc};
use quantlens::config::RiskConfig;
use quantlens::models::{ConcentrationLevel, PortfolioMetrics, PositionRisk, PriceBar};
use quantlens::portfolio::positions::{concentration_score, liquidity_score, risk_contribution};
use quantlens::portfolio::report::{generate_recommendations, BALANCED};
use quantlens::portfolio::sectors::{sector_concentration, sector_for};
use quantlens::portfolio::stress::run_stress_tests;
use quantlens::portfolio::{total_value, weights_from_positions};
use std::collections::BTreeMap;

fn bars(closes: &[f64], volume: f64) -> Vec<PriceBar> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| PriceBar::new(c, c, c, c, volume, start + Duration::days(i as i64)))
        .collect()
}

fn calm_metrics() -> PortfolioMetrics {
    PortfolioMetrics {
        total_value: 0.0,
        daily_return: 0.001,
        annualized_volatility: 0.12,
        sharpe_ratio: 1.1,
        max_drawdown: -0.08,
        beta: 0.9,
        alpha: 0.01,
        value_at_risk: -0.015,
        expected_shortfall: -0.02,
        correlation_risk: 0.3,
    }
}

fn position(id: &str, concentration: f64, liquidity: f64) -> PositionRisk {
    PositionRisk {
        instrument_id: id.to_string(),
        position_value: 1_000.0,
        weight: 0.1,
        value_at_risk: -10.0,
        risk_contribution: 0.1,
        liquidity_score: liquidity,
        concentration_score: concentration,
    }
}

#[test]
fn test_liquidity_score() {
    assert_eq!(liquidity_score(&bars(&[100.0], 5_000_000.0)), 0.5);
    assert_eq!(liquidity_score(&bars(&[100.0; 10], 2_000_000.0)), 1.0);

    let choppy: Vec<f64> = (0..20).map(|i| if i % 2 == 0 { 100.0 } else { 105.0 }).collect();
    let score = liquidity_score(&bars(&choppy, 1_000.0));
    assert!(score < 0.3);
    assert!(score >= 0.0);
}

#[test]
fn test_concentration_steps() {
    assert_eq!(concentration_score(0.04), 0.1);
    assert_eq!(concentration_score(0.05), 0.3);
    assert_eq!(concentration_score(0.15), 0.6);
    assert_eq!(concentration_score(0.20), 1.0);
}

#[test]
fn test_risk_contribution() {
    let returns = [0.01, -0.02, 0.015, 0.0, -0.005];
    assert!((risk_contribution(&returns, &returns, 0.5) - 0.5).abs() < 1e-9);
    assert_eq!(risk_contribution(&returns, &[0.0; 5], 0.5), 0.0);
}

#[test]
fn test_weights_from_positions() {
    let shares = BTreeMap::from([
        ("A".to_string(), 10.0),
        ("B".to_string(), 30.0),
        ("C".to_string(), 5.0),
    ]);
    let prices = BTreeMap::from([("A".to_string(), 10.0), ("B".to_string(), 10.0)]);

    assert_eq!(total_value(&shares, &prices), 400.0);
    let weights = weights_from_positions(&shares, &prices);
    assert_eq!(weights.len(), 2);
    assert_eq!(weights["A"], 0.25);
    assert_eq!(weights["B"], 0.75);

    let none_held = BTreeMap::from([("A".to_string(), 0.0)]);
    assert_eq!(weights_from_positions(&none_held, &prices)["A"], 0.0);
}

#[test]
fn test_sector_concentration() {
    assert_eq!(sector_for("AAPL"), "Technology");
    assert_eq!(sector_for("UNKNOWN"), "Other");

    let weights = BTreeMap::from([
        ("AAPL".to_string(), 0.3),
        ("MSFT".to_string(), 0.2),
        ("JPM".to_string(), 0.5),
    ]);
    let sectors = sector_concentration(&weights, 0.4);
    assert!((sectors.sector_weights["Technology"] - 0.5).abs() < 1e-12);
    assert_eq!(sectors.concentration_risk, ConcentrationLevel::High);

    let spread = BTreeMap::from([
        ("AAPL".to_string(), 0.3),
        ("JPM".to_string(), 0.3),
        ("KO".to_string(), 0.2),
        ("JNJ".to_string(), 0.2),
    ]);
    assert_eq!(sector_concentration(&spread, 0.4).concentration_risk, ConcentrationLevel::Medium);
    assert_eq!(sector_concentration(&spread, 0.29).concentration_risk, ConcentrationLevel::High);
}

#[test]
fn test_stress_scenarios() {
    let returns = [-0.02, 0.01, 0.0, 0.01];
    let stress = run_stress_tests(&returns);
    assert!((stress.market_crash_10 - (-0.194)).abs() < 1e-9);
    assert!((stress.market_crash_20 - 2.0 * stress.market_crash_10).abs() < 1e-12);
    assert!((stress.high_volatility / stress.correlation_breakdown - 1.5).abs() < 1e-12);
}

#[test]
fn test_balanced_recommendation() {
    let positions = vec![position("A", 0.3, 0.8)];
    assert_eq!(
        generate_recommendations(&calm_metrics(), &positions, Some(0.2), &RiskConfig::default()),
        vec![BALANCED.to_string()]
    );
}

#[test]
fn test_recommendations_fire_in_order() {
    let metrics = PortfolioMetrics {
        annualized_volatility: 0.3,
        sharpe_ratio: 0.2,
        max_drawdown: -0.25,
        ..calm_metrics()
    };
    let positions = vec![position("A", 1.0, 0.8), position("B", 0.6, 0.1)];
    let recs = generate_recommendations(&metrics, &positions, Some(0.65), &RiskConfig::default());

    assert_eq!(recs.len(), 6);
    assert!(recs[0].starts_with("Portfolio volatility is high"));
    assert!(recs[1].starts_with("Sharpe ratio is low"));
    assert!(recs[2].starts_with("Maximum drawdown exceeds 20%"));
    assert_eq!(
        recs[3],
        "High concentration risk in: A. Consider reducing position sizes."
    );
    assert_eq!(recs[4], "Low liquidity in: B. Monitor for exit opportunities.");
    assert!(recs[5].starts_with("High average correlation detected"));
}

#[test]
fn test_volatility_limit_follows_config() {
    let positions = vec![position("A", 0.3, 0.8)];
    let strict = RiskConfig {
        volatility_limit: 0.10,
        ..RiskConfig::default()
    };
    let recs = generate_recommendations(&calm_metrics(), &positions, Some(0.2), &strict);
    assert_eq!(recs.len(), 1);
    assert!(recs[0].starts_with("Portfolio volatility is high"));
}
