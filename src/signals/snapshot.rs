//! Indicator snapshot: the last-bar values every strategy rule reads.

use crate::common::math;
use crate::indicators::{
    band_position, calculate_adx_default, calculate_atr_default, calculate_bollinger_bands_default,
    calculate_cci, calculate_macd_default, calculate_rsi_default, calculate_squeeze_default,
    calculate_stochastic_default, calculate_williams_r_default, ema, mean_reversion_score,
    momentum_score, sma,
};
use crate::models::indicators::last_defined;
use crate::models::{IndicatorSnapshot, OhlcvColumns};
use crate::regime::RegimeAssessment;

const VOLUME_PERIOD: usize = 20;
const CCI_PERIOD: usize = 20;
const MEAN_REVERSION_PERIOD: usize = 20;

/// Compute every indicator over the full history and keep the last bar.
/// Returns `None` for an empty table.
pub fn build_snapshot(cols: &OhlcvColumns, regime: &RegimeAssessment) -> Option<IndicatorSnapshot> {
    let price = *cols.close.last()?;
    let (high, low, close) = (&cols.high, &cols.low, &cols.close);

    let rsi = last_defined(&calculate_rsi_default(close));
    let macd = calculate_macd_default(close);
    let (macd_line, macd_signal) = (last_defined(&macd.macd), last_defined(&macd.signal));
    let bands = calculate_bollinger_bands_default(close);
    let (bb_upper, bb_lower) = (last_defined(&bands.upper), last_defined(&bands.lower));
    let stoch = calculate_stochastic_default(high, low, close);
    let stoch_k = last_defined(&stoch.k);
    let williams_r = last_defined(&calculate_williams_r_default(high, low, close));
    let adx = calculate_adx_default(high, low, close);
    let squeeze = calculate_squeeze_default(high, low, close);

    let volume_sma = math::sma(&cols.volume, VOLUME_PERIOD);
    let volume_ratio = match (cols.volume.last(), volume_sma) {
        (Some(&last), Some(avg)) if avg > 0.0 => Some(last / avg),
        _ => None,
    };

    let mean_reversion = mean_reversion_score(
        price,
        math::sma(close, MEAN_REVERSION_PERIOD),
        math::standard_deviation(close, MEAN_REVERSION_PERIOD),
        rsi,
    );

    Some(IndicatorSnapshot {
        price,
        rsi,
        macd: macd_line,
        macd_signal,
        macd_histogram: last_defined(&macd.histogram),
        bb_upper,
        bb_middle: last_defined(&bands.middle),
        bb_lower,
        bb_position: band_position(price, bb_upper, bb_lower),
        stoch_k,
        stoch_d: last_defined(&stoch.d),
        williams_r,
        atr: last_defined(&calculate_atr_default(high, low, close)),
        adx: last_defined(&adx.adx),
        plus_di: last_defined(&adx.plus_di),
        minus_di: last_defined(&adx.minus_di),
        sma_20: last_defined(&sma(close, 20)),
        sma_50: last_defined(&sma(close, 50)),
        ema_12: last_defined(&ema(close, 12)),
        ema_26: last_defined(&ema(close, 26)),
        cci: last_defined(&calculate_cci(high, low, close, CCI_PERIOD)),
        volume_sma,
        volume_ratio,
        momentum_score: momentum_score(rsi, macd_line, macd_signal, stoch_k, williams_r),
        mean_reversion_score: mean_reversion,
        squeeze_on: squeeze.squeeze_on.last().copied().flatten().unwrap_or(false),
        squeeze_momentum: last_defined(&squeeze.momentum),
        hurst: regime.hurst,
        trend_strength: regime.trend_strength,
    })
}
