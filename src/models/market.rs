use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// One daily OHLCV row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PriceBar {
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    fn check(&self) -> std::result::Result<(), String> {
        let fields = [self.open, self.high, self.low, self.close, self.volume];
        if fields.iter().any(|v| !v.is_finite()) {
            return Err(format!("non-finite value in bar at {}", self.timestamp));
        }
        let body_high = self.open.max(self.close);
        let body_low = self.open.min(self.close);
        if self.high < body_high || body_low < self.low || self.low < 0.0 {
            return Err(format!(
                "bar at {} violates high >= max(open, close) >= min(open, close) >= low >= 0",
                self.timestamp
            ));
        }
        if self.volume < 0.0 {
            return Err(format!("negative volume in bar at {}", self.timestamp));
        }
        Ok(())
    }
}

/// Check the OHLC invariants and timestamp ordering of a table.
pub fn validate_bars(instrument: &str, bars: &[PriceBar]) -> Result<()> {
    for bar in bars {
        bar.check().map_err(|reason| EngineError::MalformedInput {
            instrument: instrument.to_string(),
            reason,
        })?;
    }
    if let Some(pair) = bars.windows(2).find(|w| w[1].timestamp <= w[0].timestamp) {
        return Err(EngineError::MalformedInput {
            instrument: instrument.to_string(),
            reason: format!(
                "timestamps not strictly increasing at {}",
                pair[1].timestamp
            ),
        });
    }
    Ok(())
}

/// Column view over a bar table, the shape every range indicator consumes.
#[derive(Debug, Clone, Default)]
pub struct OhlcvColumns {
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
    pub volume: Vec<f64>,
}

impl OhlcvColumns {
    pub fn from_bars(bars: &[PriceBar]) -> Self {
        let mut cols = Self {
            open: Vec::with_capacity(bars.len()),
            high: Vec::with_capacity(bars.len()),
            low: Vec::with_capacity(bars.len()),
            close: Vec::with_capacity(bars.len()),
            volume: Vec::with_capacity(bars.len()),
        };
        for bar in bars {
            cols.open.push(bar.open);
            cols.high.push(bar.high);
            cols.low.push(bar.low);
            cols.close.push(bar.close);
            cols.volume.push(bar.volume);
        }
        cols
    }

    pub fn len(&self) -> usize {
        self.close.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }
}
