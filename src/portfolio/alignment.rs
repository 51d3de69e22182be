//! Common date axis across instruments.

use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet};

use crate::common::math;
use crate::error::{EngineError, Result};
use crate::models::{validate_bars, PriceBar, Weights};

/// Closing prices restricted to the timestamps every instrument shares.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedPrices {
    pub instruments: Vec<String>,
    pub timestamps: Vec<DateTime<Utc>>,
    /// One column of closes per instrument, in `instruments` order.
    pub closes: Vec<Vec<f64>>,
}

/// Simple returns derived from [`AlignedPrices`]; one row shorter.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedReturns {
    pub instruments: Vec<String>,
    pub columns: Vec<Vec<f64>>,
}

impl AlignedPrices {
    pub fn returns(&self) -> AlignedReturns {
        AlignedReturns {
            instruments: self.instruments.clone(),
            columns: self.closes.iter().map(|c| math::pct_change(c)).collect(),
        }
    }
}

impl AlignedReturns {
    pub fn column(&self, instrument: &str) -> Option<&[f64]> {
        let idx = self.instruments.iter().position(|id| id == instrument)?;
        Some(&self.columns[idx])
    }

    /// Number of return observations.
    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Intersect the instruments' timestamps on close prices.
///
/// Instruments with empty tables are ignored. No usable instrument, or no
/// shared timestamp, is a hard failure.
pub fn align(data: &BTreeMap<String, Vec<PriceBar>>) -> Result<AlignedPrices> {
    let mut tables: Vec<(&String, BTreeMap<DateTime<Utc>, f64>)> = Vec::new();
    for (id, bars) in data {
        if bars.is_empty() {
            continue;
        }
        validate_bars(id, bars)?;
        tables.push((id, bars.iter().map(|b| (b.timestamp, b.close)).collect()));
    }
    if tables.is_empty() {
        return Err(EngineError::EmptyPortfolio);
    }

    let mut common: BTreeSet<DateTime<Utc>> = tables[0].1.keys().copied().collect();
    for (_, table) in &tables[1..] {
        common.retain(|ts| table.contains_key(ts));
    }
    if common.is_empty() {
        return Err(EngineError::MisalignedInput {
            instruments: tables.len(),
        });
    }

    let timestamps: Vec<DateTime<Utc>> = common.into_iter().collect();
    let closes = tables
        .iter()
        .map(|(_, table)| {
            timestamps
                .iter()
                .filter_map(|ts| table.get(ts).copied())
                .collect()
        })
        .collect();

    Ok(AlignedPrices {
        instruments: tables.iter().map(|(id, _)| (*id).clone()).collect(),
        timestamps,
        closes,
    })
}

/// Weighted portfolio returns. Weights are restricted to the aligned
/// instruments and re-normalised to sum to 1 over that subset.
pub fn portfolio_returns(returns: &AlignedReturns, weights: &Weights) -> Result<Vec<f64>> {
    let available: Vec<(usize, f64)> = returns
        .instruments
        .iter()
        .enumerate()
        .filter_map(|(idx, id)| weights.get(id).map(|w| (idx, *w)))
        .collect();
    let total_weight: f64 = available.iter().map(|(_, w)| w).sum();
    if total_weight == 0.0 {
        return Err(EngineError::InvalidArgument(
            "No valid weights for available instruments".to_string(),
        ));
    }

    let mut combined = vec![0.0; returns.len()];
    for (idx, weight) in available {
        let normalised = weight / total_weight;
        for (acc, r) in combined.iter_mut().zip(&returns.columns[idx]) {
            *acc += r * normalised;
        }
    }
    Ok(combined)
}
