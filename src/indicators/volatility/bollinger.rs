//! Bollinger Bands indicator

use crate::indicators::window;
use crate::models::indicators::BollingerSeries;

/// Band width at or below which the position inside the band is undefined.
pub const MIN_BAND_WIDTH: f64 = 1e-10;

/// Calculate Bollinger Bands
///
/// Middle Band = SMA(period)
/// Upper Band = Middle + (std_dev * sample standard deviation)
/// Lower Band = Middle - (std_dev * sample standard deviation)
pub fn calculate_bollinger_bands(closes: &[f64], period: usize, std_dev: f64) -> BollingerSeries {
    let middle = window::rolling_mean(closes, period);
    let std = window::rolling_std(closes, period);

    let upper = window::zip_with(&middle, &std, |m, s| m + std_dev * s);
    let lower = window::zip_with(&middle, &std, |m, s| m - std_dev * s);

    BollingerSeries {
        upper,
        middle,
        lower,
    }
}

/// Calculate Bollinger Bands with default parameters (20 SMA, 2σ)
pub fn calculate_bollinger_bands_default(closes: &[f64]) -> BollingerSeries {
    calculate_bollinger_bands(closes, 20, 2.0)
}

/// Where `price` sits inside the band: 0 at the lower edge, 1 at the upper.
/// Missing or collapsed bands give the midpoint 0.5.
pub fn band_position(price: f64, upper: Option<f64>, lower: Option<f64>) -> f64 {
    match (upper, lower) {
        (Some(upper), Some(lower)) if upper - lower > MIN_BAND_WIDTH => {
            (price - lower) / (upper - lower)
        }
        _ => 0.5,
    }
}
