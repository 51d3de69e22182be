//! Unit tests for the Ichimoku cloud

use quantlens::indicators::{calculate_ichimoku, DISPLACEMENT};

#[test]
fn test_ichimoku_warmup_and_displacement() {
    let close: Vec<f64> = (0..100).map(|i| 100.0 + i as f64).collect();
    let high: Vec<f64> = close.iter().map(|c| c + 1.0).collect();
    let low: Vec<f64> = close.iter().map(|c| c - 1.0).collect();
    let cloud = calculate_ichimoku(&high, &low, &close);
    let shift = DISPLACEMENT as usize;

    assert!(cloud.conversion_line[7].is_none());
    assert_eq!(cloud.conversion_line[8], Some((109.0 + 99.0) / 2.0));
    assert!(cloud.base_line[24].is_none());
    assert!(cloud.base_line[25].is_some());

    assert!(cloud.leading_span_a[25 + shift - 1].is_none());
    assert!(cloud.leading_span_a[25 + shift].is_some());
    assert!(cloud.leading_span_b[51 + shift - 1].is_none());
    assert!(cloud.leading_span_b[51 + shift].is_some());

    assert_eq!(cloud.lagging_span[0], Some(close[shift]));
    assert!(cloud.lagging_span[100 - shift..].iter().all(Option::is_none));
}
