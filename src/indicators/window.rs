//! Rolling-window and recursive smoothing primitives shared by indicators.

use crate::common::math;
use crate::models::indicators::Series;

/// Apply `f` to every full window of `period` values; earlier slots are `None`.
pub fn rolling<F>(values: &[f64], period: usize, f: F) -> Series
where
    F: Fn(&[f64]) -> Option<f64>,
{
    let mut out = vec![None; values.len()];
    if period == 0 {
        return out;
    }
    for end in period..=values.len() {
        out[end - 1] = f(&values[end - period..end]);
    }
    out
}

pub fn rolling_mean(values: &[f64], period: usize) -> Series {
    rolling(values, period, math::mean)
}

pub fn rolling_std(values: &[f64], period: usize) -> Series {
    rolling(values, period, math::sample_std)
}

pub fn rolling_max(values: &[f64], period: usize) -> Series {
    rolling(values, period, |w| w.iter().copied().reduce(f64::max))
}

pub fn rolling_min(values: &[f64], period: usize) -> Series {
    rolling(values, period, |w| w.iter().copied().reduce(f64::min))
}

/// Rolling mean over a partially defined series. A window containing any
/// `None` yields `None`.
pub fn rolling_mean_defined(values: &[Option<f64>], period: usize) -> Series {
    let mut out = vec![None; values.len()];
    if period == 0 {
        return out;
    }
    for end in period..=values.len() {
        let window: Option<Vec<f64>> = values[end - period..end].iter().copied().collect();
        out[end - 1] = window.and_then(|w| math::mean(&w));
    }
    out
}

/// Recursive exponential smoothing seeded with the first value:
/// `y[0] = x[0]`, `y[t] = alpha * x[t] + (1 - alpha) * y[t - 1]`.
pub fn smooth(values: &[f64], alpha: f64) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    let mut prev: Option<f64> = None;
    for &value in values {
        let next = match prev {
            Some(p) => alpha * value + (1.0 - alpha) * p,
            None => value,
        };
        out.push(next);
        prev = Some(next);
    }
    out
}

/// Same as [`smooth`] over a series with undefined leading values; the
/// recursion starts at the first defined element and undefined elements
/// after it carry the previous smoothed value forward.
pub fn smooth_defined(values: &[Option<f64>], alpha: f64) -> Series {
    let mut out = Vec::with_capacity(values.len());
    let mut prev: Option<f64> = None;
    for value in values {
        let next = match (value, prev) {
            (Some(v), Some(p)) => Some(alpha * v + (1.0 - alpha) * p),
            (Some(v), None) => Some(*v),
            (None, p) => p,
        };
        out.push(next);
        prev = next;
    }
    out
}

/// Shift a series by `offset` positions. Positive offsets move values
/// forward in time (`out[i] = s[i - offset]`), negative offsets backward.
pub fn shift(series: &[Option<f64>], offset: isize) -> Series {
    let n = series.len() as isize;
    (0..n)
        .map(|i| {
            let src = i - offset;
            if (0..n).contains(&src) {
                series[src as usize]
            } else {
                None
            }
        })
        .collect()
}

/// Combine two series element-wise; `None` on either side propagates.
pub fn zip_with<F>(a: &[Option<f64>], b: &[Option<f64>], f: F) -> Series
where
    F: Fn(f64, f64) -> f64,
{
    a.iter()
        .zip(b)
        .map(|(x, y)| match (x, y) {
            (Some(x), Some(y)) => Some(f(*x, *y)),
            _ => None,
        })
        .collect()
}
