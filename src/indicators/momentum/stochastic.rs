//! Range oscillators: stochastic %K/%D and Williams %R

use crate::indicators::window;
use crate::models::indicators::{Series, StochasticSeries};

pub const STOCH_NEUTRAL: f64 = 50.0;
pub const WILLIAMS_NEUTRAL: f64 = -50.0;

/// Stochastic oscillator.
///
/// %K = 100 * (close - lowest low) / (highest high - lowest low) over
/// `k_period`; a zero range gives the neutral 50. %D is the `d_period` SMA
/// of %K.
pub fn calculate_stochastic(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    k_period: usize,
    d_period: usize,
) -> StochasticSeries {
    let highest = window::rolling_max(high, k_period);
    let lowest = window::rolling_min(low, k_period);

    let k: Series = close
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let (hh, ll) = (highest.get(i).copied().flatten()?, lowest.get(i).copied().flatten()?);
            let range = hh - ll;
            if range > 0.0 {
                Some((100.0 * (c - ll) / range).clamp(0.0, 100.0))
            } else {
                Some(STOCH_NEUTRAL)
            }
        })
        .collect();

    let d = window::rolling_mean_defined(&k, d_period);
    StochasticSeries { k, d }
}

/// Stochastic with default parameters (14, 3)
pub fn calculate_stochastic_default(high: &[f64], low: &[f64], close: &[f64]) -> StochasticSeries {
    calculate_stochastic(high, low, close, 14, 3)
}

/// Williams %R = -100 * (highest high - close) / (highest high - lowest low).
/// A zero range gives the neutral -50.
pub fn calculate_williams_r(high: &[f64], low: &[f64], close: &[f64], period: usize) -> Series {
    let highest = window::rolling_max(high, period);
    let lowest = window::rolling_min(low, period);

    close
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let (hh, ll) = (highest.get(i).copied().flatten()?, lowest.get(i).copied().flatten()?);
            let range = hh - ll;
            if range > 0.0 {
                Some((-100.0 * (hh - c) / range).clamp(-100.0, 0.0))
            } else {
                Some(WILLIAMS_NEUTRAL)
            }
        })
        .collect()
}

/// Williams %R with default period (14)
pub fn calculate_williams_r_default(high: &[f64], low: &[f64], close: &[f64]) -> Series {
    calculate_williams_r(high, low, close, 14)
}
