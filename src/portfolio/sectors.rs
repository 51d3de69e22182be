//! Static sector lookup and sector concentration.

use std::collections::BTreeMap;

use crate::models::{ConcentrationLevel, SectorConcentration, Weights};

pub const OTHER_SECTOR: &str = "Other";
const MEDIUM_SECTOR_WEIGHT: f64 = 0.25;

pub fn sector_for(ticker: &str) -> &'static str {
    match ticker {
        "AAPL" | "MSFT" | "GOOGL" | "META" | "NVDA" | "QTUM" | "QBTS" => "Technology",
        "JPM" | "BAC" => "Financial",
        "PG" | "KO" => "Consumer Staples",
        "JNJ" => "Healthcare",
        "VTI" | "SPY" => "Diversified",
        "SIEGY" => "Industrial",
        "VWAGY" | "BYDDY" => "Auto",
        "SYIEY" => "Consumer Goods",
        _ => OTHER_SECTOR,
    }
}

/// Sum weights per sector. The heaviest sector above `max_sector_weight` is
/// high concentration, above 25% medium.
pub fn sector_concentration(weights: &Weights, max_sector_weight: f64) -> SectorConcentration {
    let mut sector_weights: BTreeMap<String, f64> = BTreeMap::new();
    for (ticker, weight) in weights {
        *sector_weights.entry(sector_for(ticker).to_string()).or_default() += weight;
    }

    let heaviest = sector_weights.values().copied().fold(0.0, f64::max);
    let concentration_risk = if heaviest > max_sector_weight {
        ConcentrationLevel::High
    } else if heaviest > MEDIUM_SECTOR_WEIGHT {
        ConcentrationLevel::Medium
    } else {
        ConcentrationLevel::Low
    };

    SectorConcentration {
        sector_weights,
        max_sector_weight: heaviest,
        concentration_risk,
    }
}
