//! Weights derived from share positions.

use std::collections::BTreeMap;

use crate::models::Weights;

/// Market value of the positions priced in `prices`. Unpriced holdings are
/// left out.
pub fn total_value(shares: &BTreeMap<String, f64>, prices: &BTreeMap<String, f64>) -> f64 {
    shares
        .iter()
        .filter_map(|(id, qty)| prices.get(id).map(|p| qty * p))
        .sum()
}

/// Each priced position's share of [`total_value`]. A zero total gives
/// every priced position a weight of 0.
pub fn weights_from_positions(
    shares: &BTreeMap<String, f64>,
    prices: &BTreeMap<String, f64>,
) -> Weights {
    let total = total_value(shares, prices);
    shares
        .iter()
        .filter_map(|(id, qty)| {
            let price = prices.get(id)?;
            let weight = if total > 0.0 { qty * price / total } else { 0.0 };
            Some((id.clone(), weight))
        })
        .collect()
}
