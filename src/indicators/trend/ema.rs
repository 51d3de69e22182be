//! Moving averages: SMA and EMA

use crate::indicators::window;
use crate::models::indicators::Series;

/// Simple moving average. Undefined until `period` values are available.
pub fn sma(values: &[f64], period: usize) -> Series {
    window::rolling_mean(values, period)
}

/// Exponential moving average with the conventional `alpha = 2 / (period + 1)`.
///
/// The recursion is seeded with the first observation, so every element is
/// defined.
pub fn ema(values: &[f64], period: usize) -> Series {
    let alpha = 2.0 / (period as f64 + 1.0);
    window::smooth(values, alpha).into_iter().map(Some).collect()
}
