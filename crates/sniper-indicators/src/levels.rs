//! Price levels: rolling highs and lows.

use serde::{Deserialize, Serialize};
use sniper_core::traits::BarIndicator;
use sniper_core::types::Bar;

/// Highest high and lowest low of a window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollingExtremesOutput {
    /// Highest high (resistance)
    pub highest: f64,
    /// Lowest low (support)
    pub lowest: f64,
}

fn extremes(window: &[Bar]) -> (f64, f64) {
    window.iter().fold(
        (f64::NEG_INFINITY, f64::INFINITY),
        |(hi, lo), bar| (hi.max(bar.high), lo.min(bar.low)),
    )
}

/// Rolling high/low over the last `period` bars, current bar included.
#[derive(Debug, Clone)]
pub struct RollingExtremes {
    period: usize,
}

impl RollingExtremes {
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl BarIndicator for RollingExtremes {
    type Output = RollingExtremesOutput;

    fn calculate(&self, bars: &[Bar]) -> Vec<RollingExtremesOutput> {
        if bars.len() < self.period {
            return vec![];
        }

        bars.windows(self.period)
            .map(|window| {
                let (highest, lowest) = extremes(window);
                RollingExtremesOutput { highest, lowest }
            })
            .collect()
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "RollingExtremes"
    }
}

/// Prior-window extremes compared with the current close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriorExtremesOutput {
    /// Highest high of the prior window
    pub highest: f64,
    /// Lowest low of the prior window
    pub lowest: f64,
    /// Close above the prior highest high
    pub breakout: bool,
    /// Close below the prior lowest low
    pub breakdown: bool,
}

/// High/low of the `period` bars before the current one.
///
/// The current bar is excluded, so a close can actually clear the level.
#[derive(Debug, Clone)]
pub struct PriorExtremes {
    period: usize,
}

impl PriorExtremes {
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl BarIndicator for PriorExtremes {
    type Output = PriorExtremesOutput;

    fn calculate(&self, bars: &[Bar]) -> Vec<PriorExtremesOutput> {
        if bars.len() <= self.period {
            return vec![];
        }

        bars.windows(self.period + 1)
            .map(|window| {
                let (prior, current) = window.split_at(self.period);
                let (highest, lowest) = extremes(prior);
                let close = current[0].close;
                PriorExtremesOutput {
                    highest,
                    lowest,
                    breakout: close > highest,
                    breakdown: close < lowest,
                }
            })
            .collect()
    }

    fn period(&self) -> usize {
        self.period + 1
    }

    fn name(&self) -> &str {
        "PriorExtremes"
    }
}
