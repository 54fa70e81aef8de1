//! Volume indicators.

use crate::moving_average::Sma;
use sniper_core::traits::{BarIndicator, Indicator};
use sniper_core::types::Bar;

/// On-Balance Volume (OBV).
///
/// Running total of volume, added on up closes and subtracted on down
/// closes. Starts at 0 on the first bar, so the output is as long as the input.
#[derive(Debug, Clone, Default)]
pub struct Obv;

impl Obv {
    pub fn new() -> Self {
        Self
    }
}

impl BarIndicator for Obv {
    type Output = f64;

    fn calculate(&self, bars: &[Bar]) -> Vec<f64> {
        let mut result = Vec::with_capacity(bars.len());
        let mut obv = 0.0;
        let mut prev_close: Option<f64> = None;

        for bar in bars {
            if let Some(prev) = prev_close {
                if bar.close > prev {
                    obv += bar.volume;
                } else if bar.close < prev {
                    obv -= bar.volume;
                }
            }
            prev_close = Some(bar.close);
            result.push(obv);
        }

        result
    }

    fn period(&self) -> usize {
        1
    }

    fn name(&self) -> &str {
        "OBV"
    }
}

/// Relative volume: volume over its rolling average.
///
/// The average carries `+1` in the denominator so a zero-volume window
/// yields 0 instead of a division error.
#[derive(Debug, Clone)]
pub struct VolumeRatio {
    average: Sma,
}

impl VolumeRatio {
    /// Create a ratio against the `period`-bar average volume.
    pub fn new(period: usize) -> Self {
        Self {
            average: Sma::new(period),
        }
    }
}

impl Indicator for VolumeRatio {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        let averages = self.average.calculate(data);
        let offset = self.average.period() - 1;

        averages
            .iter()
            .enumerate()
            .map(|(i, avg)| data[offset + i] / (avg + 1.0))
            .collect()
    }

    fn period(&self) -> usize {
        self.average.period()
    }

    fn name(&self) -> &str {
        "VolumeRatio"
    }
}
