//! Signal classifications produced by the screener.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Buy-side setup detected on the latest bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuySignal {
    /// No buy setup
    #[default]
    None,
    /// Fresh high inside a rising channel on heavy volume
    Breakout,
    /// Rising channel with bullish MACD and strong momentum score
    Momentum,
    /// Dip toward the channel or band floor in a healthy trend
    Pullback,
    /// Falling channel near its floor with a flattening slope
    Reversal,
}

impl BuySignal {
    /// Whether this is an actual setup (not `None`).
    pub fn is_some(&self) -> bool {
        !matches!(self, BuySignal::None)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BuySignal::None => "NONE",
            BuySignal::Breakout => "BREAKOUT",
            BuySignal::Momentum => "MOMENTUM",
            BuySignal::Pullback => "PULLBACK",
            BuySignal::Reversal => "REVERSAL",
        }
    }
}

/// Sell-side warning detected on the latest bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SellSignal {
    /// No sell warning
    #[default]
    None,
    /// Falling channel with a falling slope
    ChannelBreak,
    /// MACD crossed down while below the 20-day average
    Technical,
    /// Close under the prior 20-bar low
    Breakdown,
}

impl SellSignal {
    /// Whether this is an actual warning (not `None`).
    pub fn is_some(&self) -> bool {
        !matches!(self, SellSignal::None)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SellSignal::None => "NONE",
            SellSignal::ChannelBreak => "CHANNEL_BREAK",
            SellSignal::Technical => "TECHNICAL",
            SellSignal::Breakdown => "BREAKDOWN",
        }
    }
}

/// Regime of the linear regression channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Channel {
    Uptrend,
    #[default]
    Sideways,
    Downtrend,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Uptrend => "UPTREND",
            Channel::Sideways => "SIDEWAYS",
            Channel::Downtrend => "DOWNTREND",
        }
    }
}

impl fmt::Display for BuySignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Display for SellSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
