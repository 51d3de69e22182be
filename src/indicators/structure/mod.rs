//! Structure indicators: Fibonacci retracements, pivot points

pub mod levels;

pub use levels::*;
