//! Regime-adaptive signal generator.

use chrono::Utc;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::config::SignalConfig;
use crate::error::Result;
use crate::models::{validate_bars, OhlcvColumns, PriceBar, Regime, SignalType, TradingSignal};
use crate::regime;
use crate::signals::decision::StopLossTakeProfit;
use crate::signals::scoring::calculate_confidence;
use crate::signals::snapshot::build_snapshot;
use crate::strategies::Strategy;

pub const MIN_BARS: usize = 50;

/// Why a well-formed history did or did not produce a signal.
#[derive(Debug, Clone, PartialEq)]
pub enum SignalOutcome {
    Emitted(TradingSignal),
    InsufficientData {
        bars: usize,
        required: usize,
    },
    /// The selected branch found no qualifying evidence.
    NoSetup {
        regime: Regime,
        strategy: Strategy,
    },
    /// A setup was found but scored under `min_confidence`.
    BelowConfidence {
        signal_type: SignalType,
        confidence: f64,
    },
    /// A setup was found but its numbers cannot produce valid levels.
    Degenerate {
        signal_type: SignalType,
        reason: &'static str,
    },
}

impl SignalOutcome {
    pub fn into_signal(self) -> Option<TradingSignal> {
        match self {
            SignalOutcome::Emitted(signal) => Some(signal),
            _ => None,
        }
    }

    pub fn is_emitted(&self) -> bool {
        matches!(self, SignalOutcome::Emitted(_))
    }
}

/// Stateless per call; holds only its configuration.
#[derive(Debug, Clone, Default)]
pub struct SignalGenerator {
    config: SignalConfig,
}

impl SignalGenerator {
    pub fn new(config: SignalConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SignalConfig {
        &self.config
    }

    /// Evaluate one instrument's history.
    ///
    /// Broken bar tables are the only error; every other way of not
    /// producing a signal is a [`SignalOutcome`] variant.
    pub fn evaluate(&self, instrument_id: &str, bars: &[PriceBar]) -> Result<SignalOutcome> {
        validate_bars(instrument_id, bars)?;

        if bars.len() < MIN_BARS {
            debug!(
                symbol = %instrument_id,
                bars = bars.len(),
                "Insufficient data for signal generation"
            );
            return Ok(SignalOutcome::InsufficientData {
                bars: bars.len(),
                required: MIN_BARS,
            });
        }

        let cols = OhlcvColumns::from_bars(bars);
        let assessment = regime::assess(&cols.close);
        let strategy = Strategy::for_regime(assessment.regime);

        let Some(snapshot) = build_snapshot(&cols, &assessment) else {
            return Ok(SignalOutcome::InsufficientData {
                bars: bars.len(),
                required: MIN_BARS,
            });
        };

        let Some(decision) = strategy.evaluate(&snapshot) else {
            debug!(
                symbol = %instrument_id,
                regime = %assessment.regime,
                strategy = strategy.as_str(),
                "No setup"
            );
            return Ok(SignalOutcome::NoSetup {
                regime: assessment.regime,
                strategy,
            });
        };
        let signal_type = decision.signal_type;

        let confidence = calculate_confidence(&snapshot, assessment.regime, signal_type);
        if confidence < self.config.min_confidence {
            debug!(
                symbol = %instrument_id,
                signal = %signal_type,
                confidence,
                min_confidence = self.config.min_confidence,
                "Signal below confidence floor"
            );
            return Ok(SignalOutcome::BelowConfidence {
                signal_type,
                confidence,
            });
        }

        let entry_price = snapshot.price;
        let Some(levels) = StopLossTakeProfit::from_atr(
            signal_type,
            entry_price,
            snapshot.atr,
            self.config.volatility_factor,
        ) else {
            warn!(
                symbol = %instrument_id,
                signal = %signal_type,
                atr = ?snapshot.atr,
                "Cannot place stop and target"
            );
            return Ok(SignalOutcome::Degenerate {
                signal_type,
                reason: "average true range is not positive",
            });
        };

        debug!(
            symbol = %instrument_id,
            signal = %signal_type,
            regime = %assessment.regime,
            confidence,
            bullish = decision.tally.bullish,
            bearish = decision.tally.bearish,
            "Signal generated"
        );

        Ok(SignalOutcome::Emitted(TradingSignal {
            instrument_id: instrument_id.to_string(),
            signal_type,
            confidence,
            entry_price,
            stop_loss: levels.stop_loss,
            target_price: levels.target_price,
            regime: assessment.regime,
            indicator_snapshot: snapshot.to_map(),
            generated_at: Utc::now(),
            reasons: decision.tally.reasons,
        }))
    }

    /// Signal for one instrument, or `None` for any non-emitting outcome.
    /// Malformed histories are logged and also yield `None`.
    pub fn generate_signal(&self, instrument_id: &str, bars: &[PriceBar]) -> Option<TradingSignal> {
        match self.evaluate(instrument_id, bars) {
            Ok(outcome) => outcome.into_signal(),
            Err(e) => {
                warn!(symbol = %instrument_id, error = %e, "Rejected price history");
                None
            }
        }
    }

    /// Signals for every instrument, most confident first.
    pub fn generate_portfolio_signals(
        &self,
        portfolio: &BTreeMap<String, Vec<PriceBar>>,
    ) -> Vec<TradingSignal> {
        let mut signals: Vec<TradingSignal> = portfolio
            .iter()
            .filter_map(|(id, bars)| self.generate_signal(id, bars))
            .collect();
        signals.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        signals
    }
}
