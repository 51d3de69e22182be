//! Fixed single-day stress scenarios.

use crate::common::math;
use crate::models::StressScenarios;

/// Scale the 1st-percentile day by 10 and 20, and the daily standard
/// deviation by 3 and 2.
pub fn run_stress_tests(returns: &[f64]) -> StressScenarios {
    let worst_day = math::percentile(returns, 1.0).unwrap_or(0.0);
    let sigma = math::sample_std(returns).unwrap_or(0.0);

    StressScenarios {
        market_crash_10: worst_day * 10.0,
        market_crash_20: worst_day * 20.0,
        high_volatility: sigma * 3.0,
        correlation_breakdown: sigma * 2.0,
    }
}
