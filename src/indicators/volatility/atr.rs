//! ATR (Average True Range) indicator

use crate::common::math;
use crate::indicators::window;
use crate::models::indicators::Series;

/// True range per bar. The first bar has no previous close and uses
/// `high - low`.
pub fn true_range_series(high: &[f64], low: &[f64], close: &[f64]) -> Vec<f64> {
    (0..high.len().min(low.len()).min(close.len()))
        .map(|i| {
            if i == 0 {
                high[0] - low[0]
            } else {
                math::true_range(high[i], low[i], close[i - 1])
            }
        })
        .collect()
}

/// Calculate ATR (Average True Range)
///
/// ATR measures market volatility as the simple rolling average of the true
/// range over `period` bars.
pub fn calculate_atr(high: &[f64], low: &[f64], close: &[f64], period: usize) -> Series {
    window::rolling_mean(&true_range_series(high, low, close), period)
}

/// Calculate ATR with default period (14)
pub fn calculate_atr_default(high: &[f64], low: &[f64], close: &[f64]) -> Series {
    calculate_atr(high, low, close, 14)
}
