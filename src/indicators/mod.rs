//! Technical indicator library.
//!
//! Series indicators take plain `f64` slices and return a same-length
//! [`Series`](crate::models::indicators::Series); slots before the lookback
//! is filled are `None`.

pub mod composite;
pub mod momentum;
pub mod structure;
pub mod trend;
pub mod volatility;
pub mod window;

pub use composite::*;
pub use momentum::*;
pub use structure::*;
pub use trend::*;
pub use volatility::*;
