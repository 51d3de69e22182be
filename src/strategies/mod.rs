//! Regime-selected strategy branches.
//!
//! Each branch is an ordered list of [`Rule`]s evaluated once against an
//! [`IndicatorSnapshot`]. Rules see the tally accumulated by the rules before
//! them, which is how the volume-surge amplifier knows which side leads.

pub mod mean_reversion;
pub mod momentum;

use serde::{Deserialize, Serialize};

use crate::models::{
    EmissionThresholds, EvidenceTally, IndicatorSnapshot, Regime, RuleResult, StrategyDecision,
};

/// A single named check in a strategy branch.
#[derive(Clone, Copy)]
pub struct Rule {
    pub id: &'static str,
    pub check: fn(&IndicatorSnapshot, &EvidenceTally) -> RuleResult,
}

/// The two strategy branches. Selection is total over [`Regime`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Momentum,
    MeanReversion,
}

impl Strategy {
    pub fn for_regime(regime: Regime) -> Self {
        match regime {
            Regime::TrendingUp | Regime::TrendingDown => Strategy::Momentum,
            Regime::MeanReverting | Regime::Sideways | Regime::HighVolatility => {
                Strategy::MeanReversion
            }
        }
    }

    pub fn rules(self) -> &'static [Rule] {
        match self {
            Strategy::Momentum => momentum::RULES,
            Strategy::MeanReversion => mean_reversion::RULES,
        }
    }

    pub fn thresholds(self) -> EmissionThresholds {
        match self {
            Strategy::Momentum => momentum::THRESHOLDS,
            Strategy::MeanReversion => mean_reversion::THRESHOLDS,
        }
    }

    /// Run every rule once, in order.
    pub fn tally(self, snapshot: &IndicatorSnapshot) -> EvidenceTally {
        let mut tally = EvidenceTally::default();
        for rule in self.rules() {
            let result = (rule.check)(snapshot, &tally);
            tally.record(result);
        }
        tally
    }

    /// Tally the evidence and classify it; `None` when neither side reaches
    /// the branch's emission threshold.
    pub fn evaluate(self, snapshot: &IndicatorSnapshot) -> Option<StrategyDecision> {
        let tally = self.tally(snapshot);
        let signal_type = self.thresholds().classify(&tally)?;
        Some(StrategyDecision { signal_type, tally })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Momentum => "momentum",
            Strategy::MeanReversion => "mean_reversion",
        }
    }
}
