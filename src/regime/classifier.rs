//! Market regime classification from a closing-price history.

use crate::common::math;
use crate::models::{Regime, VolatilityRegime};

/// Hurst lags are `MIN_LAG..MAX_LAG` (upper bound exclusive).
const MIN_LAG: usize = 2;
const MAX_LAG: usize = 20;
const TREND_WINDOW: usize = 20;
const SHORT_VOL_WINDOW: usize = 10;
const LONG_VOL_WINDOW: usize = 30;
const TRADING_DAYS: f64 = 252.0;

pub const TRENDING_HURST: f64 = 0.55;
pub const MEAN_REVERTING_HURST: f64 = 0.45;
pub const TRENDING_R_SQUARED: f64 = 0.7;

/// Random-walk Hurst value returned whenever the estimate is unavailable.
pub const RANDOM_WALK_HURST: f64 = 0.5;

/// Inputs and result of one classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegimeAssessment {
    pub regime: Regime,
    pub hurst: f64,
    pub trend_strength: f64,
    pub volatility: VolatilityRegime,
}

/// Hurst exponent from the slope of `log(stdev(p[t+k] - p[t]))` against
/// `log(k)`.
///
/// Needs at least `2 * MAX_LAG` observations. Lags whose deviation is not
/// positive and finite are skipped; fewer than two usable lags fall back to
/// [`RANDOM_WALK_HURST`].
pub fn hurst_exponent(closes: &[f64]) -> f64 {
    if closes.len() < MAX_LAG * 2 {
        return RANDOM_WALK_HURST;
    }

    let mut log_lags = Vec::with_capacity(MAX_LAG - MIN_LAG);
    let mut log_devs = Vec::with_capacity(MAX_LAG - MIN_LAG);
    for lag in MIN_LAG..MAX_LAG {
        let diffs: Vec<f64> = closes[lag..]
            .iter()
            .zip(closes)
            .map(|(later, earlier)| later - earlier)
            .collect();
        match math::population_std(&diffs) {
            Some(dev) if dev.is_finite() && dev > 0.0 => {
                log_lags.push((lag as f64).ln());
                log_devs.push(dev.ln());
            }
            _ => continue,
        }
    }

    match math::linear_regression(&log_lags, &log_devs) {
        Some((slope, _)) if slope.is_finite() => slope,
        _ => RANDOM_WALK_HURST,
    }
}

/// R² of a least-squares line through the trailing 20 closes, in [0, 1].
/// Short or flat histories have no trend and return 0.
pub fn trend_strength(closes: &[f64]) -> f64 {
    if closes.len() < TREND_WINDOW {
        return 0.0;
    }
    let recent = &closes[closes.len() - TREND_WINDOW..];
    let x: Vec<f64> = (0..recent.len()).map(|i| i as f64).collect();

    let Some(avg) = math::mean(recent) else {
        return 0.0;
    };
    let ss_tot: f64 = recent.iter().map(|y| (y - avg).powi(2)).sum();
    if ss_tot == 0.0 {
        return 0.0;
    }
    let Some((slope, intercept)) = math::linear_regression(&x, recent) else {
        return 0.0;
    };
    let ss_res: f64 = x
        .iter()
        .zip(recent)
        .map(|(xi, yi)| (yi - (slope * xi + intercept)).powi(2))
        .sum();

    (1.0 - ss_res / ss_tot).clamp(0.0, 1.0)
}

/// Compare the annualised volatility of the last 10 returns against the
/// last 30.
///
/// Fewer than 30 returns, or a long-window volatility too small to compare
/// against, read as [`VolatilityRegime::Normal`].
pub fn volatility_regime(closes: &[f64]) -> VolatilityRegime {
    let returns = math::pct_change(closes);
    if returns.len() < LONG_VOL_WINDOW {
        return VolatilityRegime::Normal;
    }

    let annualise = TRADING_DAYS.sqrt();
    let short = math::standard_deviation(&returns, SHORT_VOL_WINDOW).map(|s| s * annualise);
    let long = math::standard_deviation(&returns, LONG_VOL_WINDOW).map(|s| s * annualise);
    let (Some(short), Some(long)) = (short, long) else {
        return VolatilityRegime::Normal;
    };
    if !short.is_finite() || !long.is_finite() || long < 1e-12 {
        return VolatilityRegime::Normal;
    }

    if short < long * 0.8 {
        VolatilityRegime::Low
    } else if short > long * 1.2 {
        VolatilityRegime::High
    } else {
        VolatilityRegime::Normal
    }
}

/// Classify a closing-price history. First match wins: high volatility,
/// then a persistent strong trend (direction from SMA20 vs SMA50), then
/// anti-persistence, otherwise sideways.
pub fn assess(closes: &[f64]) -> RegimeAssessment {
    let hurst = hurst_exponent(closes);
    let trend_strength = trend_strength(closes);
    let volatility = volatility_regime(closes);

    let regime = if volatility == VolatilityRegime::High {
        Regime::HighVolatility
    } else if hurst > TRENDING_HURST && trend_strength > TRENDING_R_SQUARED {
        let trend_up = match (math::sma(closes, 20), math::sma(closes, 50)) {
            (Some(short), Some(long)) => short > long,
            _ => false,
        };
        if trend_up {
            Regime::TrendingUp
        } else {
            Regime::TrendingDown
        }
    } else if hurst < MEAN_REVERTING_HURST {
        Regime::MeanReverting
    } else {
        Regime::Sideways
    };

    RegimeAssessment {
        regime,
        hurst,
        trend_strength,
        volatility,
    }
}

/// Regime label only.
pub fn classify(closes: &[f64]) -> Regime {
    assess(closes).regime
}
