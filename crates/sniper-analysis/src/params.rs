//! Indicator periods, thresholds and score cut-offs.

use std::ops::RangeInclusive;

// Moving averages
pub const EMA_PERIODS: [usize; 4] = [5, 10, 20, 50];
pub const SMA_LONG_PERIOD: usize = 200;

// RSI
pub const RSI_PERIOD: usize = 14;
pub const RSI_MA_PERIOD: usize = 14;
pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const RSI_OVERSOLD: f64 = 30.0;

// MACD
pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;

// Bollinger Bands
pub const BB_PERIOD: usize = 20;
pub const BB_STD: f64 = 2.0;
pub const BB_SQUEEZE_PERIOD: usize = 20;
pub const BB_SQUEEZE_FACTOR: f64 = 0.8;
pub const BB_NEAR_LOWER: f64 = 20.0;
pub const BB_NEAR_UPPER: f64 = 80.0;

// Stochastic
pub const STOCH_K: usize = 14;
pub const STOCH_D: usize = 3;
pub const STOCH_OVERBOUGHT: f64 = 80.0;
pub const STOCH_OVERSOLD: f64 = 20.0;

// ATR
pub const ATR_PERIOD: usize = 14;

// Volume
pub const VOL_MA_PERIOD: usize = 20;
pub const VOL_SURGE_THRESHOLD: f64 = 1.5;
pub const VOL_ABOVE_AVG_THRESHOLD: f64 = 1.0;

// MFI
pub const MFI_PERIOD: usize = 14;
pub const MFI_BULLISH: f64 = 50.0;
pub const MFI_OVERBOUGHT: f64 = 80.0;
pub const MFI_OVERSOLD: f64 = 20.0;

// OBV
pub const OBV_MA_PERIOD: usize = 20;

// Linear regression channel
pub const LR_PERIOD: usize = 50;
pub const LR_STD: f64 = 2.0;
/// Slope (% of close per bar) above which the channel is an uptrend.
pub const CHANNEL_UPTREND_THRESHOLD: f64 = 0.03;
/// Slope (% of close per bar) below which the channel is a downtrend.
pub const CHANNEL_DOWNTREND_THRESHOLD: f64 = -0.03;
pub const SLOPE_UP_THRESHOLD: f64 = 0.02;
pub const SLOPE_DOWN_THRESHOLD: f64 = -0.02;
pub const NEAR_CHANNEL_BOTTOM: f64 = 30.0;
pub const NEAR_CHANNEL_TOP: f64 = 70.0;

// Breakouts and levels
pub const BREAKOUT_SHORT_PERIOD: usize = 20;
pub const BREAKOUT_LONG_PERIOD: usize = 50;
pub const SUPPORT_RESISTANCE_PERIOD: usize = 20;
/// Distance from close, as a fraction, that counts as "near" a level.
pub const NEAR_LEVEL_PCT: f64 = 0.03;

// Neutral stand-ins for undefined scoring inputs
pub const NEUTRAL_RSI: f64 = 50.0;
pub const NEUTRAL_MFI: f64 = 50.0;
pub const NEUTRAL_CHANNEL_POSITION: f64 = 50.0;
pub const NEUTRAL_VOL_RATIO: f64 = 1.0;
pub const NEUTRAL_LR_SLOPE_PCT: f64 = 0.0;

// Score tier bands
pub const QUALITY_RSI_IDEAL: RangeInclusive<f64> = 40.0..=60.0;
pub const QUALITY_RSI_ACCEPTABLE: RangeInclusive<f64> = 30.0..=70.0;
pub const QUALITY_MFI_FLOOR: f64 = 40.0;
/// Channel position below which the close sits in the lower half.
pub const CHANNEL_POSITION_MID: f64 = 50.0;
pub const MOMENTUM_RSI_IDEAL: RangeInclusive<f64> = 50.0..=70.0;
pub const MOMENTUM_RSI_FLOOR: f64 = 40.0;
pub const VOL_RATIO_STRONG: f64 = 2.0;

// Score ranges
pub const QUALITY_MAX: f64 = 25.0;
pub const MOMENTUM_MAX: f64 = 15.0;

// Rating cut-offs, highest first: score >= cut-off[i] rates 5 - i
pub const QUALITY_RATING_CUTOFFS: [f64; 4] = [16.0, 12.0, 8.0, 5.0];
pub const MOMENTUM_RATING_CUTOFFS: [f64; 4] = [10.0, 7.0, 4.0, 2.0];

// Signal gates
pub const MOMENTUM_SIGNAL_MIN_SCORE: f64 = 7.0;
pub const PULLBACK_MIN_QUALITY: f64 = 8.0;
pub const REVERSAL_MIN_SLOPE_PCT: f64 = -0.05;

// Universe reporting
pub const PROGRESS_EVERY: usize = 50;
