//! Hard failures surfaced to callers.
//!
//! Benign edge cases (short history, flat prices, optimizer non-convergence)
//! never reach this type; they resolve to "no signal" outcomes or documented
//! fallback values instead.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    /// No date is shared by every instrument in the portfolio.
    #[error("Insufficient aligned data: no common dates across {instruments} instruments")]
    MisalignedInput { instruments: usize },

    #[error("Portfolio is empty")]
    EmptyPortfolio,

    #[error("Malformed input for {instrument}: {reason}")]
    MalformedInput { instrument: String, reason: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
