//! Latest-bar feature row.
//!
//! Runs every indicator over one symbol's full history and keeps the values
//! at the final bar. A window longer than the history leaves its field
//! `None` and every flag derived from it `false`; the row is always built.

use crate::params::*;
use serde::{Deserialize, Serialize};
use sniper_core::traits::{BarIndicator, Indicator, MultiOutputIndicator};
use sniper_core::types::{Bar, Channel};
use sniper_indicators::{
    Atr, BollingerBands, Ema, LinearRegression, Macd, Mfi, Obv, PriorExtremes, RollingExtremes,
    Rsi, Sma, Stochastic, VolumeRatio, EPSILON,
};
use std::fmt;

/// Indicator values and flags at the most recent bar of a series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    // Moving averages
    pub ma5: Option<f64>,
    pub ma10: Option<f64>,
    pub ma20: Option<f64>,
    pub ma50: Option<f64>,
    pub ma200: Option<f64>,
    pub ma_aligned: bool,
    pub ma_partial_aligned: bool,
    pub above_ma200: bool,
    pub above_ma50: bool,
    pub above_ma20: bool,

    // RSI
    pub rsi: Option<f64>,
    pub rsi_ma: Option<f64>,
    pub rsi_overbought: bool,
    pub rsi_oversold: bool,
    pub rsi_above_ma: bool,

    // MACD
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_hist: Option<f64>,
    pub macd_accel: Option<f64>,
    pub macd_bullish: bool,
    pub macd_cross_up: bool,
    pub macd_cross_down: bool,
    pub macd_above_zero: bool,
    pub macd_accelerating: bool,

    // Bollinger Bands
    pub bb_mid: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_lower: Option<f64>,
    pub bb_percent: Option<f64>,
    pub bb_width: Option<f64>,
    pub bb_squeeze: bool,
    pub near_bb_lower: bool,
    pub near_bb_upper: bool,

    // Stochastic
    pub stoch_k: Option<f64>,
    pub stoch_d: Option<f64>,
    pub stoch_overbought: bool,
    pub stoch_oversold: bool,
    pub stoch_bullish_cross: bool,

    // ATR
    pub atr: Option<f64>,
    pub atr_percent: Option<f64>,

    // Volume
    pub vol_ma: Option<f64>,
    pub vol_ratio: Option<f64>,
    pub vol_surge: bool,
    pub vol_above_avg: bool,

    // MFI
    pub mfi: Option<f64>,
    pub mfi_bullish: bool,
    pub mfi_overbought: bool,
    pub mfi_oversold: bool,

    // OBV
    pub obv: Option<f64>,
    pub obv_ma: Option<f64>,
    pub obv_rising: bool,

    // Linear regression channel
    pub lr_value: Option<f64>,
    pub lr_slope: Option<f64>,
    pub lr_slope_pct: Option<f64>,
    pub lr_upper: Option<f64>,
    pub lr_lower: Option<f64>,
    pub channel: Channel,
    pub uptrend_channel: bool,
    pub downtrend_channel: bool,
    pub sideways_channel: bool,
    pub slope_up: bool,
    pub slope_down: bool,
    pub slope_flat: bool,
    pub channel_position: Option<f64>,
    pub near_channel_bottom: bool,
    pub near_channel_top: bool,

    // Breakouts against the prior window
    pub highest_20: Option<f64>,
    pub highest_50: Option<f64>,
    pub lowest_20: Option<f64>,
    pub lowest_50: Option<f64>,
    pub breakout_20: bool,
    pub breakout_50: bool,
    pub breakdown_20: bool,
    pub breakdown_50: bool,

    // Support and resistance
    pub support: Option<f64>,
    pub resistance: Option<f64>,
    pub near_support: bool,
    pub near_resistance: bool,
}

/// One named cell of a feature row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue {
    /// Numeric indicator, `None` when its window was not filled
    Number(Option<f64>),
    /// Boolean flag
    Flag(bool),
    /// Categorical label
    Label(&'static str),
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Number(Some(v)) => write!(f, "{v}"),
            FeatureValue::Number(None) => Ok(()),
            FeatureValue::Flag(b) => write!(f, "{b}"),
            FeatureValue::Label(s) => f.write_str(s),
        }
    }
}

impl FeatureRow {
    /// Every field as `(name, value)`, in a fixed column order.
    pub fn entries(&self) -> Vec<(&'static str, FeatureValue)> {
        use FeatureValue::{Flag, Label, Number};

        vec![
            ("ma5", Number(self.ma5)),
            ("ma10", Number(self.ma10)),
            ("ma20", Number(self.ma20)),
            ("ma50", Number(self.ma50)),
            ("ma200", Number(self.ma200)),
            ("ma_aligned", Flag(self.ma_aligned)),
            ("ma_partial_aligned", Flag(self.ma_partial_aligned)),
            ("above_ma200", Flag(self.above_ma200)),
            ("above_ma50", Flag(self.above_ma50)),
            ("above_ma20", Flag(self.above_ma20)),
            ("rsi", Number(self.rsi)),
            ("rsi_ma", Number(self.rsi_ma)),
            ("rsi_overbought", Flag(self.rsi_overbought)),
            ("rsi_oversold", Flag(self.rsi_oversold)),
            ("rsi_above_ma", Flag(self.rsi_above_ma)),
            ("macd", Number(self.macd)),
            ("macd_signal", Number(self.macd_signal)),
            ("macd_hist", Number(self.macd_hist)),
            ("macd_accel", Number(self.macd_accel)),
            ("macd_bullish", Flag(self.macd_bullish)),
            ("macd_cross_up", Flag(self.macd_cross_up)),
            ("macd_cross_down", Flag(self.macd_cross_down)),
            ("macd_above_zero", Flag(self.macd_above_zero)),
            ("macd_accelerating", Flag(self.macd_accelerating)),
            ("bb_mid", Number(self.bb_mid)),
            ("bb_upper", Number(self.bb_upper)),
            ("bb_lower", Number(self.bb_lower)),
            ("bb_percent", Number(self.bb_percent)),
            ("bb_width", Number(self.bb_width)),
            ("bb_squeeze", Flag(self.bb_squeeze)),
            ("near_bb_lower", Flag(self.near_bb_lower)),
            ("near_bb_upper", Flag(self.near_bb_upper)),
            ("stoch_k", Number(self.stoch_k)),
            ("stoch_d", Number(self.stoch_d)),
            ("stoch_overbought", Flag(self.stoch_overbought)),
            ("stoch_oversold", Flag(self.stoch_oversold)),
            ("stoch_bullish_cross", Flag(self.stoch_bullish_cross)),
            ("atr", Number(self.atr)),
            ("atr_percent", Number(self.atr_percent)),
            ("vol_ma", Number(self.vol_ma)),
            ("vol_ratio", Number(self.vol_ratio)),
            ("vol_surge", Flag(self.vol_surge)),
            ("vol_above_avg", Flag(self.vol_above_avg)),
            ("mfi", Number(self.mfi)),
            ("mfi_bullish", Flag(self.mfi_bullish)),
            ("mfi_overbought", Flag(self.mfi_overbought)),
            ("mfi_oversold", Flag(self.mfi_oversold)),
            ("obv", Number(self.obv)),
            ("obv_ma", Number(self.obv_ma)),
            ("obv_rising", Flag(self.obv_rising)),
            ("lr_value", Number(self.lr_value)),
            ("lr_slope", Number(self.lr_slope)),
            ("lr_slope_pct", Number(self.lr_slope_pct)),
            ("lr_upper", Number(self.lr_upper)),
            ("lr_lower", Number(self.lr_lower)),
            ("channel_regime", Label(self.channel.as_str())),
            ("uptrend_channel", Flag(self.uptrend_channel)),
            ("downtrend_channel", Flag(self.downtrend_channel)),
            ("sideways_channel", Flag(self.sideways_channel)),
            ("slope_up", Flag(self.slope_up)),
            ("slope_down", Flag(self.slope_down)),
            ("slope_flat", Flag(self.slope_flat)),
            ("channel_position", Number(self.channel_position)),
            ("near_channel_bottom", Flag(self.near_channel_bottom)),
            ("near_channel_top", Flag(self.near_channel_top)),
            ("highest_20", Number(self.highest_20)),
            ("highest_50", Number(self.highest_50)),
            ("lowest_20", Number(self.lowest_20)),
            ("lowest_50", Number(self.lowest_50)),
            ("breakout_20", Flag(self.breakout_20)),
            ("breakout_50", Flag(self.breakout_50)),
            ("breakdown_20", Flag(self.breakdown_20)),
            ("breakdown_50", Flag(self.breakdown_50)),
            ("support", Number(self.support)),
            ("resistance", Number(self.resistance)),
            ("near_support", Flag(self.near_support)),
            ("near_resistance", Flag(self.near_resistance)),
        ]
    }
}

/// Compute the feature row for the last bar of time-ascending `bars`.
///
/// An empty slice yields the all-undefined default row.
pub fn compute_features(bars: &[Bar]) -> FeatureRow {
    let mut row = FeatureRow::default();
    let Some(latest) = bars.last() else {
        return row;
    };
    let close = latest.close;
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let volumes: Vec<f64> = bars.iter().map(|b| b.volume).collect();

    moving_averages(&mut row, &closes, close);
    rsi(&mut row, &closes);
    macd(&mut row, &closes);
    bollinger(&mut row, &closes);
    stochastic(&mut row, bars);
    atr(&mut row, bars, close);
    volume(&mut row, &volumes);
    money_flow(&mut row, bars);
    obv(&mut row, bars);
    regression_channel(&mut row, &closes, close);
    breakouts(&mut row, bars);
    support_resistance(&mut row, bars, close);

    row
}

fn last<T: Copy>(values: &[T]) -> Option<T> {
    values.last().copied()
}

fn previous<T: Copy>(values: &[T]) -> Option<T> {
    values.len().checked_sub(2).map(|i| values[i])
}

/// Trailing `n` elements (or all of them if shorter).
fn tail<T>(values: &[T], n: usize) -> &[T] {
    &values[values.len().saturating_sub(n)..]
}

/// `a > b`, false when either side is undefined.
fn gt(a: Option<f64>, b: Option<f64>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a > b)
}

fn above(value: Option<f64>, threshold: f64) -> bool {
    value.is_some_and(|v| v > threshold)
}

fn below(value: Option<f64>, threshold: f64) -> bool {
    value.is_some_and(|v| v < threshold)
}

fn moving_averages(row: &mut FeatureRow, closes: &[f64], close: f64) {
    let [ma5, ma10, ma20, ma50] = EMA_PERIODS.map(|period| Ema::new(period).latest(closes));
    row.ma5 = ma5;
    row.ma10 = ma10;
    row.ma20 = ma20;
    row.ma50 = ma50;
    row.ma200 = Sma::new(SMA_LONG_PERIOD).latest(closes);

    row.ma_aligned = gt(ma5, ma10) && gt(ma10, ma20) && gt(ma20, ma50);
    row.ma_partial_aligned = gt(ma10, ma20) && gt(ma20, ma50);
    row.above_ma200 = gt(Some(close), row.ma200);
    row.above_ma50 = gt(Some(close), row.ma50);
    row.above_ma20 = gt(Some(close), row.ma20);
}

fn rsi(row: &mut FeatureRow, closes: &[f64]) {
    let values = Rsi::new(RSI_PERIOD).calculate(closes);
    row.rsi = last(&values);
    row.rsi_ma = Sma::new(RSI_MA_PERIOD).latest(&values);

    row.rsi_overbought = above(row.rsi, RSI_OVERBOUGHT);
    row.rsi_oversold = below(row.rsi, RSI_OVERSOLD);
    row.rsi_above_ma = gt(row.rsi, row.rsi_ma);
}

fn macd(row: &mut FeatureRow, closes: &[f64]) {
    let values = Macd::with_periods(MACD_FAST, MACD_SLOW, MACD_SIGNAL).calculate(closes);
    let Some(current) = last(&values) else {
        return;
    };

    row.macd = Some(current.macd);
    row.macd_signal = Some(current.signal);
    row.macd_hist = Some(current.histogram);
    row.macd_bullish = current.macd > current.signal;
    row.macd_above_zero = current.macd > 0.0;

    if let Some(prior) = previous(&values) {
        row.macd_cross_up = current.macd > current.signal && prior.macd <= prior.signal;
        row.macd_cross_down = current.macd < current.signal && prior.macd >= prior.signal;

        let accel = current.histogram - prior.histogram;
        row.macd_accel = Some(accel);
        row.macd_accelerating = accel > 0.0;
    }
}

fn bollinger(row: &mut FeatureRow, closes: &[f64]) {
    let bands = BollingerBands::with_params(BB_PERIOD, BB_STD).calculate(closes);
    let Some(current) = last(&bands) else {
        return;
    };

    row.bb_mid = Some(current.middle);
    row.bb_upper = Some(current.upper);
    row.bb_lower = Some(current.lower);
    row.bb_percent = Some(current.percent);
    row.bb_width = Some(current.width);
    row.near_bb_lower = current.percent < BB_NEAR_LOWER;
    row.near_bb_upper = current.percent > BB_NEAR_UPPER;

    let widths: Vec<f64> = bands.iter().map(|b| b.width).collect();
    if let Some(avg_width) = Sma::new(BB_SQUEEZE_PERIOD).latest(&widths) {
        row.bb_squeeze = current.width < avg_width * BB_SQUEEZE_FACTOR;
    }
}

fn stochastic(row: &mut FeatureRow, bars: &[Bar]) {
    let values = Stochastic::with_periods(STOCH_K, STOCH_D).calculate(bars);
    let Some(current) = last(&values) else {
        return;
    };

    row.stoch_k = Some(current.k);
    row.stoch_d = Some(current.d);
    row.stoch_overbought = current.k > STOCH_OVERBOUGHT;
    row.stoch_oversold = current.k < STOCH_OVERSOLD;
    row.stoch_bullish_cross = previous(&values)
        .is_some_and(|prior| current.k > current.d && prior.k <= prior.d);
}

fn atr(row: &mut FeatureRow, bars: &[Bar], close: f64) {
    row.atr = last(&Atr::new(ATR_PERIOD).calculate(bars));
    row.atr_percent = row
        .atr
        .filter(|_| close != 0.0)
        .map(|atr| atr / close * 100.0);
}

fn volume(row: &mut FeatureRow, volumes: &[f64]) {
    row.vol_ma = Sma::new(VOL_MA_PERIOD).latest(volumes);
    row.vol_ratio = VolumeRatio::new(VOL_MA_PERIOD).latest(volumes);

    row.vol_surge = above(row.vol_ratio, VOL_SURGE_THRESHOLD);
    row.vol_above_avg = above(row.vol_ratio, VOL_ABOVE_AVG_THRESHOLD);
}

fn money_flow(row: &mut FeatureRow, bars: &[Bar]) {
    row.mfi = last(&Mfi::new(MFI_PERIOD).calculate(bars));

    row.mfi_bullish = above(row.mfi, MFI_BULLISH);
    row.mfi_overbought = above(row.mfi, MFI_OVERBOUGHT);
    row.mfi_oversold = below(row.mfi, MFI_OVERSOLD);
}

fn obv(row: &mut FeatureRow, bars: &[Bar]) {
    let values = Obv::new().calculate(bars);
    row.obv = last(&values);
    row.obv_ma = Sma::new(OBV_MA_PERIOD).latest(&values);
    row.obv_rising = gt(row.obv, row.obv_ma);
}

fn regression_channel(row: &mut FeatureRow, closes: &[f64], close: f64) {
    let fit = LinearRegression::with_params(LR_PERIOD, LR_STD).calculate(tail(closes, LR_PERIOD));
    if let Some(lr) = last(&fit) {
        row.lr_value = Some(lr.value);
        row.lr_slope = Some(lr.slope);
        row.lr_slope_pct = Some(lr.slope_pct);
        row.lr_upper = Some(lr.upper);
        row.lr_lower = Some(lr.lower);
        row.channel_position = Some((close - lr.lower) / (lr.upper - lr.lower + EPSILON) * 100.0);
    }

    // An undefined slope reads as a sideways, flat channel
    let slope_pct = row.lr_slope_pct;
    row.uptrend_channel = above(slope_pct, CHANNEL_UPTREND_THRESHOLD);
    row.downtrend_channel = below(slope_pct, CHANNEL_DOWNTREND_THRESHOLD);
    row.sideways_channel = !row.uptrend_channel && !row.downtrend_channel;
    row.channel = if row.uptrend_channel {
        Channel::Uptrend
    } else if row.downtrend_channel {
        Channel::Downtrend
    } else {
        Channel::Sideways
    };

    row.slope_up = above(slope_pct, SLOPE_UP_THRESHOLD);
    row.slope_down = below(slope_pct, SLOPE_DOWN_THRESHOLD);
    row.slope_flat = !row.slope_up && !row.slope_down;

    row.near_channel_bottom = below(row.channel_position, NEAR_CHANNEL_BOTTOM);
    row.near_channel_top = above(row.channel_position, NEAR_CHANNEL_TOP);
}

fn breakouts(row: &mut FeatureRow, bars: &[Bar]) {
    let short = PriorExtremes::new(BREAKOUT_SHORT_PERIOD);
    if let Some(level) = last(&short.calculate(tail(bars, short.period()))) {
        row.highest_20 = Some(level.highest);
        row.lowest_20 = Some(level.lowest);
        row.breakout_20 = level.breakout;
        row.breakdown_20 = level.breakdown;
    }

    let long = PriorExtremes::new(BREAKOUT_LONG_PERIOD);
    if let Some(level) = last(&long.calculate(tail(bars, long.period()))) {
        row.highest_50 = Some(level.highest);
        row.lowest_50 = Some(level.lowest);
        row.breakout_50 = level.breakout;
        row.breakdown_50 = level.breakdown;
    }
}

fn support_resistance(row: &mut FeatureRow, bars: &[Bar], close: f64) {
    let levels = RollingExtremes::new(SUPPORT_RESISTANCE_PERIOD);
    let Some(level) = last(&levels.calculate(tail(bars, levels.period()))) else {
        return;
    };

    row.support = Some(level.lowest);
    row.resistance = Some(level.highest);
    if close != 0.0 {
        row.near_support = (close - level.lowest) / close < NEAR_LEVEL_PCT;
        row.near_resistance = (level.highest - close) / close < NEAR_LEVEL_PCT;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY_MS: i64 = 86_400_000;

    fn series(closes: &[f64], volume: f64) -> Vec<Bar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar::new(i as i64 * DAY_MS, c, c * 1.01, c * 0.99, c, volume))
            .collect()
    }

    #[test]
    fn test_empty_series_is_default() {
        assert_eq!(compute_features(&[]), FeatureRow::default());
    }

    #[test]
    fn test_short_series_leaves_fields_undefined() {
        let bars = series(&[10.0, 10.5, 10.2, 10.8, 11.0], 1000.0);
        let row = compute_features(&bars);

        // Exponential averages are defined from the first bar
        assert!(row.ma5.is_some() && row.ma50.is_some());
        assert!(row.macd.is_some());
        assert!(row.ma200.is_none());
        assert!(row.rsi.is_none());
        assert!(row.lr_value.is_none());
        assert!(!row.above_ma200);
        // No regression yet: sideways and flat
        assert_eq!(row.channel, Channel::Sideways);
        assert!(row.sideways_channel && row.slope_flat);
        assert!(!row.near_channel_bottom);
    }

    #[test]
    fn test_short_rising_history_is_aligned() {
        let closes: Vec<f64> = (0..40).map(|i| 10.0 + 0.1 * i as f64).collect();
        let row = compute_features(&series(&closes, 1000.0));

        assert!(row.ma50.is_some());
        assert!(row.ma_aligned);
        assert!(row.ma_partial_aligned);
        assert!(row.above_ma50);
    }

    #[test]
    fn test_long_series_fills_every_number() {
        let closes: Vec<f64> = (0..260)
            .map(|i| 50.0 + (i as f64 * 0.2).sin() * 4.0 + i as f64 * 0.05)
            .collect();
        let row = compute_features(&series(&closes, 25_000.0));

        for (name, value) in row.entries() {
            if let FeatureValue::Number(v) = value {
                let v = v.unwrap_or_else(|| panic!("{name} undefined"));
                assert!(v.is_finite(), "{name} not finite");
            }
        }
    }

    #[test]
    fn test_moving_average_alignment() {
        let closes: Vec<f64> = (0..80).map(|i| 100.0 * 1.01f64.powi(i)).collect();
        let row = compute_features(&series(&closes, 1000.0));

        assert!(row.ma_aligned);
        assert!(row.ma_partial_aligned);
        assert!(row.above_ma20 && row.above_ma50);
        assert!(!row.above_ma200);
    }

    #[test]
    fn test_breakout_uses_prior_window() {
        let mut closes = vec![100.0; 59];
        closes.push(110.0);
        let row = compute_features(&series(&closes, 1000.0));

        assert!((row.highest_20.unwrap() - 101.0).abs() < 1e-9);
        assert!(row.breakout_20);
        assert!(row.breakout_50);
        assert!(!row.breakdown_20);
        // Resistance includes the current bar
        assert!((row.resistance.unwrap() - 111.1).abs() < 1e-9);
        assert!(row.near_resistance);
    }

    #[test]
    fn test_volume_ratio_flags() {
        let mut bars = series(&[20.0; 30], 1000.0);
        if let Some(last) = bars.last_mut() {
            last.volume = 5000.0;
        }
        let row = compute_features(&bars);

        // avg = (19 * 1000 + 5000) / 20 = 1200
        assert!((row.vol_ratio.unwrap() - 5000.0 / 1201.0).abs() < 1e-9);
        assert!(row.vol_surge);
        assert!(row.vol_above_avg);
    }

    #[test]
    fn test_entries_cover_labels() {
        let row = FeatureRow::default();
        let entries = row.entries();

        let channel = entries.iter().find(|(name, _)| *name == "channel_regime").unwrap();
        assert_eq!(channel.1.to_string(), "SIDEWAYS");

        let rsi = entries.iter().find(|(name, _)| *name == "rsi").unwrap();
        assert_eq!(rsi.1.to_string(), "");
    }

    fn alternating(n: usize) -> Vec<f64> {
        (0..n).map(|i| if i % 2 == 0 { 101.0 } else { 99.0 }).collect()
    }

    #[test]
    fn test_bollinger_squeeze() {
        let mut closes = alternating(40);
        closes.extend([100.0; 20]);
        let row = compute_features(&series(&closes, 1000.0));

        // Zero-width band against a wider recent average
        assert!(row.bb_width.unwrap().abs() < 1e-12);
        assert!((row.bb_percent.unwrap() - 50.0).abs() < 1e-12);
        assert!(row.bb_squeeze);

        let steady = compute_features(&series(&alternating(60), 1000.0));
        assert!(!steady.bb_squeeze);
    }

    #[test]
    fn test_near_bb_lower() {
        let mut closes = alternating(59);
        closes.push(95.0);
        let row = compute_features(&series(&closes, 1000.0));

        assert!(row.bb_percent.unwrap() < 0.0);
        assert!(row.near_bb_lower);
        assert!(!row.near_bb_upper);
    }

    #[test]
    fn test_macd_cross_up_and_acceleration() {
        let mut closes: Vec<f64> = (0..40).map(|i| 100.0 - i as f64).collect();
        closes.push(74.0);
        let row = compute_features(&series(&closes, 1000.0));

        assert!(row.macd_cross_up);
        assert!(!row.macd_cross_down);
        assert!(row.macd_bullish);
        assert!(row.macd_accel.unwrap() > 0.0);
        assert!(row.macd_accelerating);
    }

    #[test]
    fn test_macd_cross_down() {
        let mut closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        closes.push(124.0);
        let row = compute_features(&series(&closes, 1000.0));

        assert!(row.macd_cross_down);
        assert!(!row.macd_cross_up);
        assert!(!row.macd_accelerating);
    }

    #[test]
    fn test_stochastic_bullish_cross() {
        let mut closes = vec![100.0; 30];
        closes.extend([98.0, 104.0]);
        let row = compute_features(&series(&closes, 1000.0));

        // %K 24.6 under %D 41.5 on the dip, then 87.0 over 53.9
        assert!(row.stoch_k.unwrap() > row.stoch_d.unwrap());
        assert!(row.stoch_bullish_cross);

        let flat = compute_features(&series(&[100.0; 32], 1000.0));
        assert!(!flat.stoch_bullish_cross);
    }

    #[test]
    fn test_obv_rising() {
        let rising: Vec<f64> = (0..30).map(|i| 10.0 + i as f64).collect();
        let row = compute_features(&series(&rising, 1000.0));
        assert!((row.obv.unwrap() - 29_000.0).abs() < 1e-9);
        assert!(row.obv_rising);

        let falling: Vec<f64> = rising.iter().rev().copied().collect();
        let row = compute_features(&series(&falling, 1000.0));
        assert!(row.obv.unwrap() < row.obv_ma.unwrap());
        assert!(!row.obv_rising);
    }

    #[test]
    fn test_channel_position_flat_band() {
        let row = compute_features(&series(&[100.0; 60], 1000.0));

        // Zero-width channel: the epsilon keeps the position finite
        assert_eq!(row.lr_upper, row.lr_lower);
        assert!(row.channel_position.unwrap().abs() < 1e-9);
        assert!(row.near_channel_bottom);
        assert!(!row.near_channel_top);
    }

    #[test]
    fn test_channel_position_extremes() {
        let mut closes = alternating(59);
        closes.push(101.0);
        let top = compute_features(&series(&closes, 1000.0));
        let position = top.channel_position.unwrap();
        assert!(position > 70.0 && position < 80.0);
        assert!(top.near_channel_top);
        assert!(!top.near_channel_bottom);

        closes.pop();
        closes.push(99.0);
        let bottom = compute_features(&series(&closes, 1000.0));
        let position = bottom.channel_position.unwrap();
        assert!(position > 20.0 && position < 30.0);
        assert!(bottom.near_channel_bottom);
        assert!(!bottom.near_channel_top);
    }
}
