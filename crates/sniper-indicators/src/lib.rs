//! Technical indicators for daily price series.
//!
//! This crate provides the indicator primitives the screener combines:
//! - Moving averages (SMA, EMA)
//! - Momentum oscillators (RSI, MACD, Stochastic, MFI)
//! - Volatility (Standard Deviation, ATR, Bollinger Bands)
//! - Volume (OBV, relative volume)
//! - Trend (linear regression channel)
//! - Price levels (rolling highs/lows, prior-window breakouts)
//!
//! Every batch indicator returns a trimmed vector whose last element lines up
//! with the last input bar. Ratio-style oscillators add [`EPSILON`] to their
//! denominators rather than branching on zero.

pub mod levels;
pub mod momentum;
pub mod moving_average;
pub mod trend;
pub mod volatility;
pub mod volume;

pub use levels::{PriorExtremes, PriorExtremesOutput, RollingExtremes, RollingExtremesOutput};
pub use momentum::{Macd, MacdOutput, Mfi, Rsi, Stochastic, StochasticOutput};
pub use moving_average::{Ema, Sma};
pub use trend::{LinearRegression, RegressionOutput};
pub use volatility::{Atr, BollingerBands, BollingerOutput, StdDev};
pub use volume::{Obv, VolumeRatio};

/// Denominator guard for ratio-style indicators.
pub const EPSILON: f64 = 0.0001;

/// Map an up/down magnitude pair onto a 0-100 oscillator.
///
/// Both sides carry [`EPSILON`] so a window with no movement lands on 50
/// instead of dividing by zero.
#[inline]
pub fn guarded_oscillator(up: f64, down: f64) -> f64 {
    let ratio = (up + EPSILON) / (down + EPSILON);
    100.0 - 100.0 / (1.0 + ratio)
}
