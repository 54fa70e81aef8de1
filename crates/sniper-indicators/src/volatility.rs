//! Volatility indicators.

use serde::{Deserialize, Serialize};
use sniper_core::traits::{BarIndicator, Indicator, MultiOutputIndicator};
use sniper_core::types::Bar;

/// Rolling standard deviation of one window.
///
/// `ddof` is 0 for the population estimate and 1 for the sample estimate.
fn window_std(window: &[f64], mean: f64, ddof: usize) -> f64 {
    let denom = (window.len() - ddof) as f64;
    let variance: f64 = window.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / denom;
    variance.sqrt()
}

/// Standard Deviation.
#[derive(Debug, Clone)]
pub struct StdDev {
    period: usize,
    ddof: usize,
}

impl StdDev {
    /// Population standard deviation (divides by N).
    pub fn new(period: usize) -> Self {
        assert!(period > 1, "Period must be greater than 1");
        Self { period, ddof: 0 }
    }

    /// Sample standard deviation (divides by N - 1).
    pub fn sample(period: usize) -> Self {
        assert!(period > 1, "Period must be greater than 1");
        Self { period, ddof: 1 }
    }
}

impl Indicator for StdDev {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() < self.period {
            return vec![];
        }

        let period_f64 = self.period as f64;
        data.windows(self.period)
            .map(|window| {
                let mean: f64 = window.iter().sum::<f64>() / period_f64;
                window_std(window, mean, self.ddof)
            })
            .collect()
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "StdDev"
    }
}

/// Average True Range (ATR).
///
/// Simple rolling mean of the true range. The first bar has no previous
/// close, so its true range is its high-low span.
#[derive(Debug, Clone)]
pub struct Atr {
    period: usize,
}

impl Atr {
    /// Create a new ATR indicator.
    ///
    /// Common period is 14.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    /// True range of every bar.
    pub fn true_ranges(bars: &[Bar]) -> Vec<f64> {
        let mut prev_close = None;
        bars.iter()
            .map(|bar| {
                let tr = bar.true_range(prev_close);
                prev_close = Some(bar.close);
                tr
            })
            .collect()
    }
}

impl BarIndicator for Atr {
    type Output = f64;

    fn calculate(&self, bars: &[Bar]) -> Vec<f64> {
        if bars.len() < self.period {
            return vec![];
        }

        let tr = Self::true_ranges(bars);
        let period_f64 = self.period as f64;
        let mut result = Vec::with_capacity(tr.len() - self.period + 1);

        let mut sum: f64 = tr[..self.period].iter().sum();
        result.push(sum / period_f64);

        for i in self.period..tr.len() {
            sum = sum - tr[i - self.period] + tr[i];
            result.push(sum / period_f64);
        }

        result
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "ATR"
    }
}

/// Bollinger Bands output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerOutput {
    /// Upper band
    pub upper: f64,
    /// Middle band (SMA)
    pub middle: f64,
    /// Lower band
    pub lower: f64,
    /// Band width as a percentage of the middle band
    pub width: f64,
    /// Position of the price inside the band on a 0-100 scale
    pub percent: f64,
}

impl BollingerOutput {
    /// Check if price is above upper band.
    pub fn is_overbought(&self, price: f64) -> bool {
        price > self.upper
    }

    /// Check if price is below lower band.
    pub fn is_oversold(&self, price: f64) -> bool {
        price < self.lower
    }
}

/// Bollinger Bands.
///
/// Consists of a middle band (SMA) with upper and lower bands
/// at a specified number of sample standard deviations.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    period: usize,
    std_dev_multiplier: f64,
}

impl BollingerBands {
    /// Create new Bollinger Bands with default parameters (20, 2.0).
    pub fn new() -> Self {
        Self::with_params(20, 2.0)
    }

    /// Create Bollinger Bands with custom parameters.
    pub fn with_params(period: usize, std_dev_multiplier: f64) -> Self {
        assert!(period > 1, "Period must be greater than 1");
        assert!(
            std_dev_multiplier > 0.0,
            "Std dev multiplier must be positive"
        );
        Self {
            period,
            std_dev_multiplier,
        }
    }
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiOutputIndicator for BollingerBands {
    type Outputs = BollingerOutput;

    fn calculate(&self, data: &[f64]) -> Vec<BollingerOutput> {
        if data.len() < self.period {
            return vec![];
        }

        let period_f64 = self.period as f64;
        let mut result = Vec::with_capacity(data.len() - self.period + 1);

        for (i, window) in data.windows(self.period).enumerate() {
            let mean: f64 = window.iter().sum::<f64>() / period_f64;
            let std_dev = window_std(window, mean, 1);

            let upper = mean + self.std_dev_multiplier * std_dev;
            let lower = mean - self.std_dev_multiplier * std_dev;

            let width = if mean != 0.0 {
                (upper - lower) / mean * 100.0
            } else {
                0.0
            };

            let price = data[self.period - 1 + i];
            let percent = if upper != lower {
                (price - lower) / (upper - lower) * 100.0
            } else {
                50.0
            };

            result.push(BollingerOutput {
                upper,
                middle: mean,
                lower,
                width,
                percent,
            });
        }

        result
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "BollingerBands"
    }
}
