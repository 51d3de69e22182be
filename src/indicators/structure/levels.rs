//! Price structure levels: Fibonacci retracements and classic pivot points

use crate::models::indicators::{FibonacciLevels, PivotPoints};

/// Fibonacci retracement levels measured down from `high` towards `low`.
pub fn fibonacci_levels(high: f64, low: f64) -> FibonacciLevels {
    let diff = high - low;
    FibonacciLevels {
        level_0: high,
        level_236: high - 0.236 * diff,
        level_382: high - 0.382 * diff,
        level_500: high - 0.5 * diff,
        level_618: high - 0.618 * diff,
        level_786: high - 0.786 * diff,
        level_100: low,
    }
}

/// Floor-trader pivot points from one period's high, low and close.
pub fn pivot_points(high: f64, low: f64, close: f64) -> PivotPoints {
    let pivot = (high + low + close) / 3.0;
    let range = high - low;
    PivotPoints {
        pivot,
        r1: 2.0 * pivot - low,
        r2: pivot + range,
        r3: high + 2.0 * (pivot - low),
        s1: 2.0 * pivot - high,
        s2: pivot - range,
        s3: low - 2.0 * (high - pivot),
    }
}
