//! CCI (Commodity Channel Index)

use crate::indicators::window;
use crate::models::indicators::Series;

const LAMBERT_CONSTANT: f64 = 0.015;

/// CCI = (typical price - SMA(typical)) / (0.015 * mean absolute deviation).
/// A window with no deviation yields 0.
pub fn calculate_cci(high: &[f64], low: &[f64], close: &[f64], period: usize) -> Series {
    let typical: Vec<f64> = high
        .iter()
        .zip(low)
        .zip(close)
        .map(|((h, l), c)| (h + l + c) / 3.0)
        .collect();

    window::rolling(&typical, period, |w| {
        let avg = w.iter().sum::<f64>() / w.len() as f64;
        let mean_deviation = w.iter().map(|v| (v - avg).abs()).sum::<f64>() / w.len() as f64;
        let last = *w.last()?;
        if mean_deviation > 0.0 {
            Some((last - avg) / (LAMBERT_CONSTANT * mean_deviation))
        } else {
            Some(0.0)
        }
    })
}
