//! MACD (Moving Average Convergence Divergence) indicator

use crate::indicators::trend::ema;
use crate::indicators::window;
use crate::models::indicators::{MacdSeries, Series};

/// Calculate MACD indicator
///
/// MACD = EMA(fast) - EMA(slow)
/// Signal = EMA(signal) of MACD
/// Histogram = MACD - Signal
pub fn calculate_macd(
    closes: &[f64],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> MacdSeries {
    let fast = ema(closes, fast_period);
    let slow = ema(closes, slow_period);
    let macd = window::zip_with(&fast, &slow, |f, s| f - s);

    let signal: Series =
        window::smooth_defined(&macd, 2.0 / (signal_period as f64 + 1.0));
    let histogram = window::zip_with(&macd, &signal, |m, s| m - s);

    MacdSeries {
        macd,
        signal,
        histogram,
    }
}

/// Calculate MACD with default periods (12, 26, 9)
pub fn calculate_macd_default(closes: &[f64]) -> MacdSeries {
    calculate_macd(closes, 12, 26, 9)
}
