//! Composite scores blending several oscillators into one number.
//!
//! Both scores are zero on any bar where one of their inputs is undefined.

use crate::indicators::volatility::MIN_BAND_WIDTH;
use crate::indicators::window;

const MACD_VOTE: f64 = 25.0;
const SCORE_CLIP: f64 = 50.0;
const MEAN_REVERSION_PERIOD: usize = 20;
const BAND_WIDTH_STD: f64 = 2.0;

/// Momentum composite on one bar, roughly in [-50, 50]:
/// `0.3·(RSI−50) + 0.3·(±25 on MACD vs signal) + 0.2·(%K−50) + 0.2·(%R+50)`.
///
/// An undefined MACD line or signal counts as the bearish vote.
pub fn momentum_score(
    rsi: Option<f64>,
    macd: Option<f64>,
    macd_signal: Option<f64>,
    stoch_k: Option<f64>,
    williams_r: Option<f64>,
) -> f64 {
    let (Some(rsi), Some(k), Some(wr)) = (rsi, stoch_k, williams_r) else {
        return 0.0;
    };
    let macd_vote = match (macd, macd_signal) {
        (Some(m), Some(s)) if m > s => MACD_VOTE,
        _ => -MACD_VOTE,
    };
    0.3 * (rsi - 50.0) + 0.3 * macd_vote + 0.2 * (k - 50.0) + 0.2 * (wr + 50.0)
}

/// Momentum composite for every bar of already computed indicator series.
pub fn momentum_composite(
    rsi: &[Option<f64>],
    macd: &[Option<f64>],
    macd_signal: &[Option<f64>],
    stoch_k: &[Option<f64>],
    williams_r: &[Option<f64>],
) -> Vec<f64> {
    (0..rsi.len())
        .map(|i| {
            momentum_score(
                rsi[i],
                macd.get(i).copied().flatten(),
                macd_signal.get(i).copied().flatten(),
                stoch_k.get(i).copied().flatten(),
                williams_r.get(i).copied().flatten(),
            )
        })
        .collect()
}

/// How far RSI sits beyond its extreme bands: `RSI−70` above 70, `30−RSI`
/// below 30, else 0. Both extremes read positive.
pub fn rsi_extremity(rsi: f64) -> f64 {
    if rsi > 70.0 {
        rsi - 70.0
    } else if rsi < 30.0 {
        30.0 - rsi
    } else {
        0.0
    }
}

/// Mean-reversion composite on one bar from the 20-bar mean and sample
/// standard deviation of closes:
/// `0.4·(50 − 100·bb_position) + 0.4·clip(−25·z) + 0.2·clip(2.5·rsi_extremity)`.
///
/// A flat window has no band and scores 0.
pub fn mean_reversion_score(price: f64, mean: Option<f64>, std: Option<f64>, rsi: Option<f64>) -> f64 {
    let (Some(mean), Some(std), Some(rsi)) = (mean, std, rsi) else {
        return 0.0;
    };
    let width = 2.0 * BAND_WIDTH_STD * std;
    if width <= MIN_BAND_WIDTH {
        return 0.0;
    }

    let lower = mean - BAND_WIDTH_STD * std;
    let bb_score = 50.0 - 100.0 * (price - lower) / width;
    let z_score = (-(price - mean) / std * 25.0).clamp(-SCORE_CLIP, SCORE_CLIP);
    let rsi_score = (rsi_extremity(rsi) * 2.5).clamp(-SCORE_CLIP, SCORE_CLIP);

    0.4 * bb_score + 0.4 * z_score + 0.2 * rsi_score
}

/// Mean-reversion composite for every bar.
pub fn mean_reversion_composite(closes: &[f64], rsi: &[Option<f64>]) -> Vec<f64> {
    let mean = window::rolling_mean(closes, MEAN_REVERSION_PERIOD);
    let std = window::rolling_std(closes, MEAN_REVERSION_PERIOD);
    closes
        .iter()
        .enumerate()
        .map(|(i, &price)| {
            mean_reversion_score(price, mean[i], std[i], rsi.get(i).copied().flatten())
        })
        .collect()
}
