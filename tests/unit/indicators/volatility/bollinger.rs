//! Unit tests for Bollinger Bands

use quantlens::indicators::{band_position, calculate_bollinger_bands, calculate_bollinger_bands_default};

#[test]
fn test_bands_ordered_wherever_defined() {
    let closes: Vec<f64> = (0..120)
        .map(|i| 100.0 + 5.0 * (i as f64 * 0.4).sin() + (i % 3) as f64)
        .collect();
    let bands = calculate_bollinger_bands_default(&closes);

    assert!(bands.middle[18].is_none());
    for i in 19..closes.len() {
        let (u, m, l) = (
            bands.upper[i].unwrap(),
            bands.middle[i].unwrap(),
            bands.lower[i].unwrap(),
        );
        assert!(u >= m && m >= l);
    }
}

#[test]
fn test_bands_collapse_on_flat_prices() {
    let bands = calculate_bollinger_bands(&[20.0; 25], 20, 2.0);
    let last = |s: &[Option<f64>]| s.last().copied().flatten().unwrap();
    assert_eq!(last(&bands.upper), last(&bands.lower));
    assert_eq!(last(&bands.middle), 20.0);
}

#[test]
fn test_band_position() {
    assert!((band_position(105.0, Some(110.0), Some(100.0)) - 0.5).abs() < 1e-12);
    assert!((band_position(100.0, Some(110.0), Some(100.0))).abs() < 1e-12);
    assert_eq!(band_position(100.0, Some(100.0), Some(100.0)), 0.5);
    assert_eq!(band_position(100.0, None, Some(90.0)), 0.5);
}
