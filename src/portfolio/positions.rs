//! Per-position risk scores.

use crate::common::math;
use crate::models::PriceBar;

const LIQUID_VOLUME: f64 = 1_000_000.0;
const STABILITY_SCALE: f64 = 50.0;
const NEUTRAL_LIQUIDITY: f64 = 0.5;

/// Liquidity in [0, 1] from the instrument's own history:
/// `0.6 · min(1, avg volume / 1M) + 0.4 · max(0, 1 − 50 · stdev(returns))`.
/// Histories too short to measure score a neutral 0.5.
pub fn liquidity_score(bars: &[PriceBar]) -> f64 {
    let volumes: Vec<f64> = bars.iter().map(|b| b.volume).collect();
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

    let (Some(avg_volume), Some(volatility)) = (
        math::mean(&volumes),
        math::sample_std(&math::pct_change(&closes)),
    ) else {
        return NEUTRAL_LIQUIDITY;
    };

    let volume_score = (avg_volume / LIQUID_VOLUME).min(1.0);
    let stability_score = (1.0 - volatility * STABILITY_SCALE).max(0.0);
    (volume_score * 0.6 + stability_score * 0.4).clamp(0.0, 1.0)
}

/// Step function of position weight.
pub fn concentration_score(weight: f64) -> f64 {
    if weight < 0.05 {
        0.1
    } else if weight < 0.10 {
        0.3
    } else if weight < 0.20 {
        0.6
    } else {
        1.0
    }
}

/// `weight · corr(asset, portfolio) · σ_asset / σ_portfolio`; 0 when any
/// term is undefined.
pub fn risk_contribution(asset: &[f64], portfolio: &[f64], weight: f64) -> f64 {
    let (Some(rho), Some(asset_vol), Some(portfolio_vol)) = (
        math::correlation(asset, portfolio),
        math::sample_std(asset),
        math::sample_std(portfolio),
    ) else {
        return 0.0;
    };
    if portfolio_vol == 0.0 {
        return 0.0;
    }
    weight * rho * asset_vol / portfolio_vol
}
