//! ADX (Average Directional Index) indicator

use crate::common::math;
use crate::indicators::window;
use crate::models::indicators::AdxSeries;

/// Calculate ADX together with the +DI / -DI lines.
///
/// Directional movement counts only when it exceeds the opposite move and is
/// positive. True range, +DM and -DM are smoothed with Wilder's factor
/// (`1 / period`), and the DX line is smoothed the same way into ADX.
/// A zero directional sum yields DX = 0. The first bar has no previous bar
/// and is left undefined.
pub fn calculate_adx(high: &[f64], low: &[f64], close: &[f64], period: usize) -> AdxSeries {
    let n = close.len().min(high.len()).min(low.len());
    if n == 0 || period == 0 {
        return AdxSeries {
            adx: vec![None; n],
            plus_di: vec![None; n],
            minus_di: vec![None; n],
        };
    }

    let mut tr_values = Vec::with_capacity(n);
    let mut plus_dm_values = Vec::with_capacity(n);
    let mut minus_dm_values = Vec::with_capacity(n);

    tr_values.push(high[0] - low[0]);
    plus_dm_values.push(0.0);
    minus_dm_values.push(0.0);

    for i in 1..n {
        tr_values.push(math::true_range(high[i], low[i], close[i - 1]));

        let up_move = high[i] - high[i - 1];
        let down_move = low[i - 1] - low[i];
        plus_dm_values.push(if up_move > down_move && up_move > 0.0 {
            up_move
        } else {
            0.0
        });
        minus_dm_values.push(if down_move > up_move && down_move > 0.0 {
            down_move
        } else {
            0.0
        });
    }

    let alpha = 1.0 / period as f64;
    let atr = window::smooth(&tr_values, alpha);
    let plus_dm_avg = window::smooth(&plus_dm_values, alpha);
    let minus_dm_avg = window::smooth(&minus_dm_values, alpha);

    let mut plus_di = Vec::with_capacity(n);
    let mut minus_di = Vec::with_capacity(n);
    let mut dx = Vec::with_capacity(n);
    for i in 0..n {
        let (p, m) = if atr[i] > 0.0 {
            (100.0 * plus_dm_avg[i] / atr[i], 100.0 * minus_dm_avg[i] / atr[i])
        } else {
            (0.0, 0.0)
        };
        let di_sum = p + m;
        dx.push(if di_sum > 0.0 {
            100.0 * (p - m).abs() / di_sum
        } else {
            0.0
        });
        plus_di.push(p);
        minus_di.push(m);
    }

    let adx = window::smooth(&dx, alpha);

    let mask = |values: Vec<f64>| -> Vec<Option<f64>> {
        values
            .into_iter()
            .enumerate()
            .map(|(i, v)| if i == 0 { None } else { Some(v) })
            .collect()
    };

    AdxSeries {
        adx: mask(adx),
        plus_di: mask(plus_di),
        minus_di: mask(minus_di),
    }
}

/// Calculate ADX with default period (14)
pub fn calculate_adx_default(high: &[f64], low: &[f64], close: &[f64]) -> AdxSeries {
    calculate_adx(high, low, close, 14)
}
