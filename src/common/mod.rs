//! Shared numeric helpers used across indicators, regime detection and risk.

pub mod math;
