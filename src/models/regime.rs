use serde::{Deserialize, Serialize};
use std::fmt;

/// Market regime. Exactly one holds for any closing-price history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Regime {
    TrendingUp,
    TrendingDown,
    MeanReverting,
    Sideways,
    HighVolatility,
}

impl Regime {
    pub fn is_trending(self) -> bool {
        matches!(self, Regime::TrendingUp | Regime::TrendingDown)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Regime::TrendingUp => "TRENDING_UP",
            Regime::TrendingDown => "TRENDING_DOWN",
            Regime::MeanReverting => "MEAN_REVERTING",
            Regime::Sideways => "SIDEWAYS",
            Regime::HighVolatility => "HIGH_VOLATILITY",
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Short-vs-long realised volatility classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolatilityRegime {
    Low,
    Normal,
    High,
}
