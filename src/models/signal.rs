use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::regime::Regime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalType {
    StrongSell,
    Sell,
    Hold,
    Buy,
    StrongBuy,
}

impl SignalType {
    pub fn is_buy(self) -> bool {
        matches!(self, SignalType::Buy | SignalType::StrongBuy)
    }

    pub fn is_sell(self) -> bool {
        matches!(self, SignalType::Sell | SignalType::StrongSell)
    }

    pub fn is_strong(self) -> bool {
        matches!(self, SignalType::StrongBuy | SignalType::StrongSell)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SignalType::StrongSell => "STRONG_SELL",
            SignalType::Sell => "SELL",
            SignalType::Hold => "HOLD",
            SignalType::Buy => "BUY",
            SignalType::StrongBuy => "STRONG_BUY",
        }
    }
}

impl fmt::Display for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directional call for one instrument.
///
/// `stop_loss` sits strictly on the loss side of `entry_price` and
/// `target_price` strictly on the profit side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingSignal {
    pub instrument_id: String,
    pub signal_type: SignalType,
    pub confidence: f64,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub target_price: f64,
    pub regime: Regime,
    pub indicator_snapshot: BTreeMap<String, f64>,
    pub generated_at: DateTime<Utc>,
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopPick {
    pub instrument_id: String,
    pub signal_type: SignalType,
    pub confidence: f64,
    pub regime: Regime,
    pub reasons: Vec<String>,
}

/// Aggregate view over a batch of signals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalSummary {
    pub total_signals: usize,
    pub buy_signals: usize,
    pub sell_signals: usize,
    pub average_confidence: f64,
    pub top_picks: Vec<TopPick>,
}
