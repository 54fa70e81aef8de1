//! Trend indicators.

use serde::{Deserialize, Serialize};
use sniper_core::traits::MultiOutputIndicator;

/// Linear regression channel output for one bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionOutput {
    /// Fitted value at the last bar of the window
    pub value: f64,
    /// Slope in price units per bar
    pub slope: f64,
    /// Slope as a percentage of the closing price
    pub slope_pct: f64,
    /// Upper channel band
    pub upper: f64,
    /// Lower channel band
    pub lower: f64,
    /// Sample standard deviation of the window
    pub std_dev: f64,
}

/// Least-squares regression of price against bar index.
///
/// Each window is fitted with `x = 0..period`; the centerline is evaluated at
/// the last bar and the bands sit `std_dev_multiplier` sample deviations away.
#[derive(Debug, Clone)]
pub struct LinearRegression {
    period: usize,
    std_dev_multiplier: f64,
}

impl LinearRegression {
    /// Create a regression channel with default parameters (50, 2.0).
    pub fn new() -> Self {
        Self::with_params(50, 2.0)
    }

    /// Create a regression channel with custom parameters.
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

    /// Fit one window, returning `(slope, intercept)`.
    pub fn fit(window: &[f64]) -> (f64, f64) {
        let n = window.len() as f64;
        let x_mean = (n - 1.0) / 2.0;
        let y_mean = window.iter().sum::<f64>() / n;

        let mut covariance = 0.0;
        let mut x_variance = 0.0;
        for (i, &y) in window.iter().enumerate() {
            let dx = i as f64 - x_mean;
            covariance += dx * (y - y_mean);
            x_variance += dx * dx;
        }

        let slope = if x_variance > 0.0 {
            covariance / x_variance
        } else {
            0.0
        };
        (slope, y_mean - slope * x_mean)
    }
}

impl Default for LinearRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiOutputIndicator for LinearRegression {
    type Outputs = RegressionOutput;

    fn calculate(&self, data: &[f64]) -> Vec<RegressionOutput> {
        if data.len() < self.period {
            return vec![];
        }

        let n = self.period as f64;
        data.windows(self.period)
            .map(|window| {
                let (slope, intercept) = Self::fit(window);
                let value = intercept + slope * (n - 1.0);
                let close = window[self.period - 1];

                let mean = window.iter().sum::<f64>() / n;
                let variance =
                    window.iter().map(|y| (y - mean).powi(2)).sum::<f64>() / (n - 1.0);
                let std_dev = variance.sqrt();

                let slope_pct = if close != 0.0 {
                    slope / close * 100.0
                } else {
                    0.0
                };

                RegressionOutput {
                    value,
                    slope,
                    slope_pct,
                    upper: value + self.std_dev_multiplier * std_dev,
                    lower: value - self.std_dev_multiplier * std_dev,
                    std_dev,
                }
            })
            .collect()
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "LinearRegression"
    }
}
