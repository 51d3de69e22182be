//! Unit tests for Fibonacci and pivot levels

use quantlens::indicators::{fibonacci_levels, pivot_points};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_fibonacci_levels() {
    let fib = fibonacci_levels(200.0, 100.0);
    assert_eq!(fib.level_0, 200.0);
    assert_eq!(fib.level_100, 100.0);
    assert!(approx(fib.level_500, 150.0));
    assert!(approx(fib.level_618, 138.2));
    assert!(fib.level_236 > fib.level_382 && fib.level_618 > fib.level_786);
}

#[test]
fn test_pivot_points() {
    let p = pivot_points(110.0, 90.0, 100.0);
    assert!(approx(p.pivot, 100.0));
    assert!(approx(p.r1, 110.0));
    assert!(approx(p.s1, 90.0));
    assert!(approx(p.r2, 120.0));
    assert!(approx(p.s2, 80.0));
    assert!(approx(p.r3, 130.0));
    assert!(approx(p.s3, 70.0));
}
