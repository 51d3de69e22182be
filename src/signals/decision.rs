//! Stop-loss and take-profit placement from ATR.

use crate::models::SignalType;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopLossTakeProfit {
    pub stop_loss: f64,
    pub target_price: f64,
}

impl StopLossTakeProfit {
    /// Stop one `atr * volatility_factor` against the position, target two
    /// in its favour.
    ///
    /// Returns `None` when the distance is not strictly positive and finite
    /// (the stop and target would not bracket the entry) or for HOLD.
    pub fn from_atr(
        signal_type: SignalType,
        entry: f64,
        atr: Option<f64>,
        volatility_factor: f64,
    ) -> Option<Self> {
        let distance = atr? * volatility_factor;
        if !distance.is_finite() || distance <= 0.0 {
            return None;
        }

        if signal_type.is_buy() {
            Some(Self {
                stop_loss: entry - distance,
                target_price: entry + 2.0 * distance,
            })
        } else if signal_type.is_sell() {
            Some(Self {
                stop_loss: entry + distance,
                target_price: entry - 2.0 * distance,
            })
        } else {
            None
        }
    }
}
