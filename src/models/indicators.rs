use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Indicator output aligned 1:1 with its input. `None` marks positions where
/// the lookback window is not yet filled.
pub type Series = Vec<Option<f64>>;

/// Value on the final bar; `None` when undefined there.
pub fn last_defined(series: &[Option<f64>]) -> Option<f64> {
    series.last().copied().flatten()
}

#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub macd: Series,
    pub signal: Series,
    pub histogram: Series,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BollingerSeries {
    pub upper: Series,
    pub middle: Series,
    pub lower: Series,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StochasticSeries {
    pub k: Series,
    pub d: Series,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdxSeries {
    pub adx: Series,
    pub plus_di: Series,
    pub minus_di: Series,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IchimokuCloud {
    pub conversion_line: Series,
    pub base_line: Series,
    pub leading_span_a: Series,
    pub leading_span_b: Series,
    pub lagging_span: Series,
}

/// Bollinger-inside-Keltner squeeze state per bar.
#[derive(Debug, Clone, PartialEq)]
pub struct SqueezeSeries {
    pub squeeze_on: Vec<Option<bool>>,
    pub squeeze_off: Vec<Option<bool>>,
    pub momentum: Series,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FibonacciLevels {
    pub level_0: f64,
    pub level_236: f64,
    pub level_382: f64,
    pub level_500: f64,
    pub level_618: f64,
    pub level_786: f64,
    pub level_100: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PivotPoints {
    pub pivot: f64,
    pub r1: f64,
    pub r2: f64,
    pub r3: f64,
    pub s1: f64,
    pub s2: f64,
    pub s3: f64,
}

/// Tail values of every indicator the strategies consult.
///
/// Fields that may be undefined on the last bar stay `Option`; the strategy
/// rules treat `None` as "no evidence".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub price: f64,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_histogram: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_middle: Option<f64>,
    pub bb_lower: Option<f64>,
    pub bb_position: f64,
    pub stoch_k: Option<f64>,
    pub stoch_d: Option<f64>,
    pub williams_r: Option<f64>,
    pub atr: Option<f64>,
    pub adx: Option<f64>,
    pub plus_di: Option<f64>,
    pub minus_di: Option<f64>,
    pub sma_20: Option<f64>,
    pub sma_50: Option<f64>,
    pub ema_12: Option<f64>,
    pub ema_26: Option<f64>,
    pub cci: Option<f64>,
    pub volume_sma: Option<f64>,
    pub volume_ratio: Option<f64>,
    pub momentum_score: f64,
    pub mean_reversion_score: f64,
    pub squeeze_on: bool,
    pub squeeze_momentum: Option<f64>,
    pub hurst: f64,
    pub trend_strength: f64,
}

impl IndicatorSnapshot {
    pub const STRONG_TREND_ADX: f64 = 25.0;
    pub const VOLUME_SURGE_RATIO: f64 = 1.5;

    pub fn macd_bullish(&self) -> bool {
        matches!((self.macd, self.macd_signal), (Some(m), Some(s)) if m > s)
    }

    pub fn strong_trend(&self) -> bool {
        self.adx.is_some_and(|adx| adx > Self::STRONG_TREND_ADX)
    }

    pub fn volume_surge(&self) -> bool {
        self.volume_ratio
            .is_some_and(|ratio| ratio > Self::VOLUME_SURGE_RATIO)
    }

    /// Flatten into the name -> value map carried by a trading signal.
    /// Undefined values are omitted; booleans become 0/1.
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        let mut map = BTreeMap::new();
        let mut put = |name: &str, value: Option<f64>| {
            if let Some(v) = value {
                map.insert(name.to_string(), v);
            }
        };

        put("price", Some(self.price));
        put("rsi", self.rsi);
        put("macd", self.macd);
        put("macd_signal", self.macd_signal);
        put("macd_histogram", self.macd_histogram);
        put("bb_upper", self.bb_upper);
        put("bb_middle", self.bb_middle);
        put("bb_lower", self.bb_lower);
        put("bb_position", Some(self.bb_position));
        put("stoch_k", self.stoch_k);
        put("stoch_d", self.stoch_d);
        put("williams_r", self.williams_r);
        put("atr", self.atr);
        put("adx", self.adx);
        put("di_plus", self.plus_di);
        put("di_minus", self.minus_di);
        put("sma_20", self.sma_20);
        put("sma_50", self.sma_50);
        put("ema_12", self.ema_12);
        put("ema_26", self.ema_26);
        put("cci", self.cci);
        put("volume_sma", self.volume_sma);
        put("volume_ratio", self.volume_ratio);
        put("momentum_score", Some(self.momentum_score));
        put("mean_reversion_score", Some(self.mean_reversion_score));
        put("squeeze_on", Some(if self.squeeze_on { 1.0 } else { 0.0 }));
        put("squeeze_momentum", self.squeeze_momentum);
        put("hurst", Some(self.hurst));
        put("trend_strength", Some(self.trend_strength));
        map
    }
}
