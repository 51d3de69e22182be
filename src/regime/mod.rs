//! Regime classifier: Hurst exponent, trend strength and volatility regime.

pub mod classifier;

pub use classifier::{
    assess, classify, hurst_exponent, trend_strength, volatility_regime, RegimeAssessment,
    RANDOM_WALK_HURST,
};
