//! Momentum indicators: RSI, MACD, stochastic, Williams %R, CCI

pub mod cci;
pub mod macd;
pub mod rsi;
pub mod stochastic;

pub use cci::*;
pub use macd::*;
pub use rsi::*;
pub use stochastic::*;
