//! RSI (Relative Strength Index) indicator

use crate::indicators::window;
use crate::models::indicators::Series;

pub const OVERSOLD: f64 = 30.0;
pub const OVERBOUGHT: f64 = 70.0;

/// Calculate RSI with Wilder's smoothing (`alpha = 1 / period`).
///
/// RSI = 100 - (100 / (1 + RS)), RS = average gain / average loss.
///
/// With no average loss the value is 100, unless there is no average gain
/// either (flat prices), in which case it is the neutral 50. The first bar
/// has no change and is undefined.
pub fn calculate_rsi(closes: &[f64], period: usize) -> Series {
    let n = closes.len();
    if n == 0 || period == 0 {
        return vec![None; n];
    }

    let mut gains = Vec::with_capacity(n);
    let mut losses = Vec::with_capacity(n);
    gains.push(0.0);
    losses.push(0.0);
    for i in 1..n {
        let change = closes[i] - closes[i - 1];
        gains.push(change.max(0.0));
        losses.push((-change).max(0.0));
    }

    let alpha = 1.0 / period as f64;
    let avg_gain = window::smooth(&gains, alpha);
    let avg_loss = window::smooth(&losses, alpha);

    let mut out = vec![None; n];
    for i in 1..n {
        out[i] = Some(rsi_from_averages(avg_gain[i], avg_loss[i]));
    }
    out
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss <= 0.0 {
        return if avg_gain > 0.0 { 100.0 } else { 50.0 };
    }
    let rs = avg_gain / avg_loss;
    (100.0 - (100.0 / (1.0 + rs))).clamp(0.0, 100.0)
}

/// Calculate RSI with default period (14)
pub fn calculate_rsi_default(closes: &[f64]) -> Series {
    calculate_rsi(closes, 14)
}
