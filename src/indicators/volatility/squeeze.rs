//! Volatility squeeze: Bollinger Bands inside a Keltner channel

use crate::indicators::trend::sma;
use crate::indicators::volatility::{calculate_bollinger_bands, true_range_series};
use crate::indicators::window;
use crate::models::indicators::SqueezeSeries;

const KELTNER_MULTIPLIER: f64 = 1.5;

/// Compare Bollinger(`period`, `std_dev`) against a Keltner channel built
/// from the Bollinger middle band ± 1.5 × SMA(`period`) of true range.
///
/// `squeeze_on` is set when both Bollinger edges lie strictly inside the
/// channel, `squeeze_off` when either edge lies outside it. The momentum
/// value is the close minus the average of the range midpoint and the SMA.
pub fn calculate_squeeze(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    period: usize,
    std_dev: f64,
) -> SqueezeSeries {
    let bands = calculate_bollinger_bands(close, period, std_dev);
    let range = window::rolling_mean(&true_range_series(high, low, close), period);

    let kc_upper = window::zip_with(&bands.middle, &range, |m, r| m + KELTNER_MULTIPLIER * r);
    let kc_lower = window::zip_with(&bands.middle, &range, |m, r| m - KELTNER_MULTIPLIER * r);

    let n = close.len();
    let mut squeeze_on = vec![None; n];
    let mut squeeze_off = vec![None; n];
    for i in 0..n {
        if let (Some(bu), Some(bl), Some(ku), Some(kl)) =
            (bands.upper[i], bands.lower[i], kc_upper[i], kc_lower[i])
        {
            squeeze_on[i] = Some(bl > kl && bu < ku);
            squeeze_off[i] = Some(bl < kl || bu > ku);
        }
    }

    let highest = window::rolling_max(high, period);
    let lowest = window::rolling_min(low, period);
    let midpoint = window::zip_with(&highest, &lowest, |h, l| (h + l) / 2.0);
    let baseline = window::zip_with(&midpoint, &sma(close, period), |m, s| (m + s) / 2.0);
    let momentum = close
        .iter()
        .zip(&baseline)
        .map(|(c, b)| b.map(|b| c - b))
        .collect();

    SqueezeSeries {
        squeeze_on,
        squeeze_off,
        momentum,
    }
}

/// Squeeze with default parameters (20, 2.0)
pub fn calculate_squeeze_default(high: &[f64], low: &[f64], close: &[f64]) -> SqueezeSeries {
    calculate_squeeze(high, low, close, 20, 2.0)
}
