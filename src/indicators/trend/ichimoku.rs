//! Ichimoku cloud

use crate::indicators::window;
use crate::models::indicators::{IchimokuCloud, Series};

pub const CONVERSION_PERIOD: usize = 9;
pub const BASE_PERIOD: usize = 26;
pub const SPAN_B_PERIOD: usize = 52;
pub const DISPLACEMENT: isize = 26;

fn midpoint(high: &[f64], low: &[f64], period: usize) -> Series {
    window::zip_with(
        &window::rolling_max(high, period),
        &window::rolling_min(low, period),
        |hh, ll| (hh + ll) / 2.0,
    )
}

/// Conversion and base lines are rolling high/low midpoints over 9 and 26
/// bars. Both leading spans are projected 26 bars forward; the lagging span
/// is the close shifted 26 bars back.
pub fn calculate_ichimoku(high: &[f64], low: &[f64], close: &[f64]) -> IchimokuCloud {
    let conversion_line = midpoint(high, low, CONVERSION_PERIOD);
    let base_line = midpoint(high, low, BASE_PERIOD);

    let span_a = window::zip_with(&conversion_line, &base_line, |c, b| (c + b) / 2.0);
    let span_b = midpoint(high, low, SPAN_B_PERIOD);

    let closes: Series = close.iter().copied().map(Some).collect();

    IchimokuCloud {
        leading_span_a: window::shift(&span_a, DISPLACEMENT),
        leading_span_b: window::shift(&span_b, DISPLACEMENT),
        lagging_span: window::shift(&closes, -DISPLACEMENT),
        conversion_line,
        base_line,
    }
}
