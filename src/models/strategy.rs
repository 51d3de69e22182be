//! Evidence-counting data models shared by the strategy branches.

use serde::{Deserialize, Serialize};

use super::signal::SignalType;

/// Which side a rule's finding supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Evidence {
    Bullish,
    Bearish,
    Neutral,
}

/// Result of evaluating a single rule
#[derive(Debug, Clone, PartialEq)]
pub struct RuleResult {
    pub rule_id: &'static str,
    pub evidence: Evidence,
    pub weight: u32,
    pub reason: Option<String>,
}

impl RuleResult {
    pub fn new(rule_id: &'static str, evidence: Evidence, weight: u32, reason: impl Into<String>) -> Self {
        Self {
            rule_id,
            evidence,
            weight,
            reason: Some(reason.into()),
        }
    }

    pub fn neutral(rule_id: &'static str) -> Self {
        Self {
            rule_id,
            evidence: Evidence::Neutral,
            weight: 0,
            reason: None,
        }
    }
}

/// Bullish/bearish counters plus the ordered reasons that fed them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvidenceTally {
    pub bullish: u32,
    pub bearish: u32,
    pub reasons: Vec<String>,
}

impl EvidenceTally {
    pub fn record(&mut self, result: RuleResult) {
        match result.evidence {
            Evidence::Bullish => self.bullish += result.weight,
            Evidence::Bearish => self.bearish += result.weight,
            Evidence::Neutral => return,
        }
        if let Some(reason) = result.reason {
            self.reasons.push(reason);
        }
    }

    /// Side currently ahead, if any.
    pub fn leader(&self) -> Evidence {
        if self.bullish > self.bearish {
            Evidence::Bullish
        } else if self.bearish > self.bullish {
            Evidence::Bearish
        } else {
            Evidence::Neutral
        }
    }
}

/// Minimum tallies for a branch to emit a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmissionThresholds {
    pub signal: u32,
    pub strong: u32,
}

impl EmissionThresholds {
    /// Bullish side is checked first; ties where both sides qualify go long.
    pub fn classify(&self, tally: &EvidenceTally) -> Option<SignalType> {
        if tally.bullish >= self.signal {
            Some(if tally.bullish >= self.strong {
                SignalType::StrongBuy
            } else {
                SignalType::Buy
            })
        } else if tally.bearish >= self.signal {
            Some(if tally.bearish >= self.strong {
                SignalType::StrongSell
            } else {
                SignalType::Sell
            })
        } else {
            None
        }
    }
}

/// A branch's verdict before confidence scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyDecision {
    pub signal_type: SignalType,
    pub tally: EvidenceTally,
}
