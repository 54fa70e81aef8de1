//! Quality and momentum scores.
//!
//! Each score is an ordered list of rules. A rule is a list of
//! `(predicate, points)` tiers and awards the points of the first tier that
//! matches, if any. Rule points are summed and the total is clamped once.

use crate::features::FeatureRow;
use crate::params::*;
use serde::{Deserialize, Serialize};

type Predicate = fn(&FeatureRow) -> bool;

/// A named scoring rule with first-match tiers.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub tiers: &'static [(Predicate, f64)],
}

impl Rule {
    /// Points of the first matching tier.
    pub fn evaluate(&self, row: &FeatureRow) -> Option<f64> {
        self.tiers
            .iter()
            .find(|(predicate, _)| predicate(row))
            .map(|&(_, points)| points)
    }
}

// Neutral stand-ins for undefined inputs

fn rsi(row: &FeatureRow) -> f64 {
    row.rsi.unwrap_or(NEUTRAL_RSI)
}

fn mfi(row: &FeatureRow) -> f64 {
    row.mfi.unwrap_or(NEUTRAL_MFI)
}

fn channel_position(row: &FeatureRow) -> f64 {
    row.channel_position.unwrap_or(NEUTRAL_CHANNEL_POSITION)
}

fn vol_ratio(row: &FeatureRow) -> f64 {
    row.vol_ratio.unwrap_or(NEUTRAL_VOL_RATIO)
}

/// Trend health and entry-zone rules, max 25.
pub static QUALITY_RULES: &[Rule] = &[
    Rule {
        name: "ma_alignment",
        tiers: &[
            (|r: &FeatureRow| r.ma_aligned, 3.0),
            (|r: &FeatureRow| r.ma_partial_aligned, 2.0),
        ],
    },
    Rule {
        name: "above_ma200",
        tiers: &[(|r: &FeatureRow| r.above_ma200, 1.0)],
    },
    Rule {
        name: "channel",
        tiers: &[
            (|r: &FeatureRow| r.uptrend_channel, 3.0),
            (|r: &FeatureRow| r.sideways_channel, 1.5),
        ],
    },
    Rule {
        name: "slope",
        tiers: &[
            (|r: &FeatureRow| r.slope_up, 2.0),
            (|r: &FeatureRow| r.slope_flat, 1.0),
        ],
    },
    Rule {
        name: "rsi_zone",
        tiers: &[
            (|r: &FeatureRow| QUALITY_RSI_IDEAL.contains(&rsi(r)), 2.0),
            (|r: &FeatureRow| QUALITY_RSI_ACCEPTABLE.contains(&rsi(r)), 1.0),
        ],
    },
    Rule {
        name: "money_flow",
        tiers: &[
            (|r: &FeatureRow| r.mfi_bullish, 2.0),
            (|r: &FeatureRow| mfi(r) > QUALITY_MFI_FLOOR, 1.0),
        ],
    },
    Rule {
        name: "volume",
        tiers: &[
            (|r: &FeatureRow| r.vol_surge, 2.0),
            (|r: &FeatureRow| r.vol_above_avg, 1.0),
        ],
    },
    Rule {
        name: "macd",
        tiers: &[(|r: &FeatureRow| r.macd_bullish, 2.0)],
    },
    Rule {
        name: "channel_position",
        tiers: &[
            (|r: &FeatureRow| r.near_channel_bottom, 2.0),
            (|r: &FeatureRow| channel_position(r) < CHANNEL_POSITION_MID, 1.0),
        ],
    },
    Rule {
        name: "squeeze_in_uptrend",
        tiers: &[(|r: &FeatureRow| r.bb_squeeze && r.uptrend_channel, 2.0)],
    },
    Rule {
        name: "rsi_overbought",
        tiers: &[(|r: &FeatureRow| r.rsi_overbought, -2.0)],
    },
    Rule {
        name: "near_channel_top",
        tiers: &[(|r: &FeatureRow| r.near_channel_top, -1.0)],
    },
];

/// Breakout and acceleration rules, max 15.
pub static MOMENTUM_RULES: &[Rule] = &[
    Rule {
        name: "breakout",
        tiers: &[
            (|r: &FeatureRow| r.breakout_50, 4.0),
            (|r: &FeatureRow| r.breakout_20, 2.0),
        ],
    },
    Rule {
        name: "relative_volume",
        tiers: &[
            (|r: &FeatureRow| vol_ratio(r) > VOL_RATIO_STRONG, 4.0),
            (|r: &FeatureRow| vol_ratio(r) > VOL_SURGE_THRESHOLD, 3.0),
            (|r: &FeatureRow| vol_ratio(r) > VOL_ABOVE_AVG_THRESHOLD, 2.0),
        ],
    },
    Rule {
        name: "macd",
        tiers: &[
            (|r: &FeatureRow| r.macd_cross_up, 3.0),
            (|r: &FeatureRow| r.macd_bullish && r.macd_accelerating, 2.0),
            (|r: &FeatureRow| r.macd_bullish, 1.0),
        ],
    },
    Rule {
        name: "rsi_momentum",
        tiers: &[
            (|r: &FeatureRow| MOMENTUM_RSI_IDEAL.contains(&rsi(r)), 2.0),
            (|r: &FeatureRow| rsi(r) > MOMENTUM_RSI_FLOOR, 1.0),
        ],
    },
    Rule {
        name: "stoch_cross",
        tiers: &[(|r: &FeatureRow| r.stoch_bullish_cross, 2.0)],
    },
    Rule {
        name: "rsi_overbought",
        tiers: &[(|r: &FeatureRow| r.rsi_overbought, -2.0)],
    },
    Rule {
        name: "stoch_overbought",
        tiers: &[(|r: &FeatureRow| r.stoch_overbought, -1.0)],
    },
];

/// Points one rule contributed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Contribution {
    pub rule: &'static str,
    pub points: f64,
}

/// Rules that fired for each score, in evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub quality: Vec<Contribution>,
    pub momentum: Vec<Contribution>,
}

impl ScoreBreakdown {
    /// Clamped quality score.
    pub fn quality_score(&self) -> f64 {
        clamp_sum(&self.quality, QUALITY_MAX)
    }

    /// Clamped momentum score.
    pub fn momentum_score(&self) -> f64 {
        clamp_sum(&self.momentum, MOMENTUM_MAX)
    }
}

/// Composite scores of one row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub quality_score: f64,
    pub momentum_score: f64,
    pub total_score: f64,
}

fn contributions(rules: &[Rule], row: &FeatureRow) -> Vec<Contribution> {
    rules
        .iter()
        .filter_map(|rule| {
            rule.evaluate(row).map(|points| Contribution {
                rule: rule.name,
                points,
            })
        })
        .collect()
}

fn clamp_sum(contributions: &[Contribution], max: f64) -> f64 {
    contributions
        .iter()
        .map(|c| c.points)
        .sum::<f64>()
        .clamp(0.0, max)
}

/// Every rule that fired for `row`.
pub fn score_breakdown(row: &FeatureRow) -> ScoreBreakdown {
    ScoreBreakdown {
        quality: contributions(QUALITY_RULES, row),
        momentum: contributions(MOMENTUM_RULES, row),
    }
}

/// Quality score in `[0, 25]`.
pub fn quality_score(row: &FeatureRow) -> f64 {
    clamp_sum(&contributions(QUALITY_RULES, row), QUALITY_MAX)
}

/// Momentum score in `[0, 15]`.
pub fn momentum_score(row: &FeatureRow) -> f64 {
    clamp_sum(&contributions(MOMENTUM_RULES, row), MOMENTUM_MAX)
}

/// Both scores and their sum.
pub fn score(row: &FeatureRow) -> Scores {
    let breakdown = score_breakdown(row);
    let quality_score = breakdown.quality_score();
    let momentum_score = breakdown.momentum_score();

    Scores {
        quality_score,
        momentum_score,
        total_score: quality_score + momentum_score,
    }
}
