//! Buy and sell classification.
//!
//! Both sides are ordered `(predicate, variant)` tables; the first matching
//! entry wins and an exhausted table yields `None`.

use crate::features::FeatureRow;
use crate::params::{
    MOMENTUM_SIGNAL_MIN_SCORE, NEUTRAL_LR_SLOPE_PCT, PULLBACK_MIN_QUALITY, REVERSAL_MIN_SLOPE_PCT,
};
use crate::scoring::Scores;
use serde::{Deserialize, Serialize};
use sniper_core::types::{BuySignal, Channel, SellSignal};

type BuyPredicate = fn(&FeatureRow, &Scores) -> bool;
type SellPredicate = fn(&FeatureRow) -> bool;

fn near_floor(row: &FeatureRow) -> bool {
    row.near_channel_bottom || row.near_bb_lower
}

/// Buy setups in priority order.
pub static BUY_RULES: &[(BuyPredicate, BuySignal)] = &[
    (
        |r: &FeatureRow, _: &Scores| {
            (r.breakout_20 || r.breakout_50) && r.uptrend_channel && r.slope_up && r.vol_surge
        },
        BuySignal::Breakout,
    ),
    (
        |r: &FeatureRow, s: &Scores| {
            r.uptrend_channel
                && r.slope_up
                && r.macd_bullish
                && s.momentum_score >= MOMENTUM_SIGNAL_MIN_SCORE
        },
        BuySignal::Momentum,
    ),
    (
        |r: &FeatureRow, s: &Scores| {
            (r.uptrend_channel || r.sideways_channel)
                && !r.slope_down
                && near_floor(r)
                && s.quality_score >= PULLBACK_MIN_QUALITY
        },
        BuySignal::Pullback,
    ),
    (
        |r: &FeatureRow, _: &Scores| {
            r.downtrend_channel
                && near_floor(r)
                && r.lr_slope_pct.unwrap_or(NEUTRAL_LR_SLOPE_PCT) > REVERSAL_MIN_SLOPE_PCT
        },
        BuySignal::Reversal,
    ),
];

/// Sell warnings in priority order.
pub static SELL_RULES: &[(SellPredicate, SellSignal)] = &[
    (
        |r: &FeatureRow| r.downtrend_channel && r.slope_down,
        SellSignal::ChannelBreak,
    ),
    (
        |r: &FeatureRow| r.macd_cross_down && !r.above_ma20,
        SellSignal::Technical,
    ),
    (|r: &FeatureRow| r.breakdown_20, SellSignal::Breakdown),
];

/// Classification of one row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signals {
    pub buy_signal: BuySignal,
    pub sell_signal: SellSignal,
    pub channel: Channel,
}

/// First matching buy setup.
pub fn classify_buy(row: &FeatureRow, scores: &Scores) -> BuySignal {
    BUY_RULES
        .iter()
        .find(|(predicate, _)| predicate(row, scores))
        .map_or(BuySignal::None, |&(_, signal)| signal)
}

/// First matching sell warning.
pub fn classify_sell(row: &FeatureRow) -> SellSignal {
    SELL_RULES
        .iter()
        .find(|(predicate, _)| predicate(row))
        .map_or(SellSignal::None, |&(_, signal)| signal)
}

/// Buy, sell and channel label together.
pub fn classify(row: &FeatureRow, scores: &Scores) -> Signals {
    Signals {
        buy_signal: classify_buy(row, scores),
        sell_signal: classify_sell(row),
        channel: row.channel,
    }
}
