//! Momentum indicators.

use crate::guarded_oscillator;
use crate::moving_average::{Ema, Sma};
use crate::EPSILON;
use serde::{Deserialize, Serialize};
use sniper_core::traits::{BarIndicator, Indicator, MultiOutputIndicator};
use sniper_core::types::Bar;

/// Relative Strength Index (RSI).
///
/// Average gain and average loss are simple means over the trailing
/// `period` price changes; their ratio goes through [`guarded_oscillator`].
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    /// Create a new RSI indicator.
    ///
    /// Common periods are 14 (default) or 9.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Indicator for Rsi {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() <= self.period {
            return vec![];
        }

        // Calculate price changes
        let (gains, losses): (Vec<f64>, Vec<f64>) = data
            .windows(2)
            .map(|w| {
                let change = w[1] - w[0];
                (change.max(0.0), (-change).max(0.0))
            })
            .unzip();

        let average = Sma::new(self.period);
        let avg_gains = average.calculate(&gains);
        let avg_losses = average.calculate(&losses);

        avg_gains
            .iter()
            .zip(avg_losses.iter())
            // Sliding sums can drift a hair below zero
            .map(|(&gain, &loss)| guarded_oscillator(gain.max(0.0), loss.max(0.0)))
            .collect()
    }

    fn period(&self) -> usize {
        self.period + 1 // Need period+1 data points
    }

    fn name(&self) -> &str {
        "RSI"
    }
}

/// MACD (Moving Average Convergence Divergence) output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdOutput {
    /// MACD line (fast EMA - slow EMA)
    pub macd: f64,
    /// Signal line (EMA of MACD)
    pub signal: f64,
    /// Histogram (MACD - Signal)
    pub histogram: f64,
}

/// MACD indicator.
///
/// Uses two EMAs to identify trend direction and momentum.
#[derive(Debug, Clone)]
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
}

impl Macd {
    /// Create a new MACD with default parameters (12, 26, 9).
    pub fn new() -> Self {
        Self::with_periods(12, 26, 9)
    }

    /// Create a MACD with custom periods.
    pub fn with_periods(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast > 0 && slow > 0 && signal > 0);
        assert!(fast < slow, "Fast period must be less than slow period");
        Self {
            fast_period: fast,
            slow_period: slow,
            signal_period: signal,
        }
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiOutputIndicator for Macd {
    type Outputs = MacdOutput;

    fn calculate(&self, data: &[f64]) -> Vec<MacdOutput> {
        let fast_ema = Ema::new(self.fast_period).calculate(data);
        let slow_ema = Ema::new(self.slow_period).calculate(data);

        // Calculate MACD line
        let macd_line: Vec<f64> = fast_ema
            .iter()
            .zip(slow_ema.iter())
            .map(|(f, s)| f - s)
            .collect();

        // Calculate signal line (EMA of MACD)
        let signal_line = Ema::new(self.signal_period).calculate(&macd_line);

        macd_line
            .iter()
            .zip(signal_line.iter())
            .map(|(&macd, &signal)| MacdOutput {
                macd,
                signal,
                histogram: macd - signal,
            })
            .collect()
    }

    /// Defined from the first bar, like the EMAs it is built on.
    fn period(&self) -> usize {
        1
    }

    fn name(&self) -> &str {
        "MACD"
    }
}

/// Stochastic oscillator output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StochasticOutput {
    /// %K (fast stochastic)
    pub k: f64,
    /// %D (slow stochastic / signal)
    pub d: f64,
}

/// Stochastic oscillator.
///
/// Compares closing price to the high/low range over a period. The range
/// carries [`EPSILON`], so a flat window reads 0 rather than failing.
#[derive(Debug, Clone)]
pub struct Stochastic {
    k_period: usize,
    d_period: usize,
}

impl Stochastic {
    /// Create a new stochastic oscillator with default parameters (14, 3).
    pub fn new() -> Self {
        Self::with_periods(14, 3)
    }

    /// Create with custom periods.
    pub fn with_periods(k_period: usize, d_period: usize) -> Self {
        assert!(k_period > 0 && d_period > 0);
        Self { k_period, d_period }
    }

    /// Calculate stochastic from OHLC data.
    pub fn calculate_ohlc(
        &self,
        high: &[f64],
        low: &[f64],
        close: &[f64],
    ) -> Vec<StochasticOutput> {
        let len = high.len().min(low.len()).min(close.len());
        if len < self.k_period + self.d_period - 1 {
            return vec![];
        }

        // Calculate raw %K values
        let mut k_values = Vec::with_capacity(len - self.k_period + 1);

        for i in (self.k_period - 1)..len {
            let start = i + 1 - self.k_period;
            let highest = high[start..=i]
                .iter()
                .cloned()
                .fold(f64::NEG_INFINITY, f64::max);
            let lowest = low[start..=i]
                .iter()
                .cloned()
                .fold(f64::INFINITY, f64::min);

            k_values.push(100.0 * (close[i] - lowest) / (highest - lowest + EPSILON));
        }

        // Calculate %D (SMA of %K)
        let mut result = Vec::with_capacity(k_values.len() - self.d_period + 1);
        let d_period_f64 = self.d_period as f64;

        for i in (self.d_period - 1)..k_values.len() {
            let k = k_values[i];
            let d: f64 = k_values[(i + 1 - self.d_period)..=i].iter().sum::<f64>() / d_period_f64;
            result.push(StochasticOutput { k, d });
        }

        result
    }
}

impl Default for Stochastic {
    fn default() -> Self {
        Self::new()
    }
}

impl BarIndicator for Stochastic {
    type Output = StochasticOutput;

    fn calculate(&self, bars: &[Bar]) -> Vec<StochasticOutput> {
        let high: Vec<f64> = bars.iter().map(|b| b.high).collect();
        let low: Vec<f64> = bars.iter().map(|b| b.low).collect();
        let close: Vec<f64> = bars.iter().map(|b| b.close).collect();
        self.calculate_ohlc(&high, &low, &close)
    }

    fn period(&self) -> usize {
        self.k_period + self.d_period - 1
    }

    fn name(&self) -> &str {
        "Stochastic"
    }
}

/// Money Flow Index (MFI).
///
/// Volume-weighted RSI over the typical price. Flows are bucketed by the
/// direction of the typical-price change; an unchanged bar counts in neither.
#[derive(Debug, Clone)]
pub struct Mfi {
    period: usize,
}

impl Mfi {
    /// Create a new MFI indicator.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl BarIndicator for Mfi {
    type Output = f64;

    fn calculate(&self, bars: &[Bar]) -> Vec<f64> {
        if bars.len() <= self.period {
            return vec![];
        }

        // Signed flows: (positive, negative) per bar transition
        let flows: Vec<(f64, f64)> = bars
            .windows(2)
            .map(|w| {
                let prev_tp = w[0].typical_price();
                let tp = w[1].typical_price();
                let money_flow = tp * w[1].volume;
                if tp > prev_tp {
                    (money_flow, 0.0)
                } else if tp < prev_tp {
                    (0.0, money_flow)
                } else {
                    (0.0, 0.0)
                }
            })
            .collect();

        let mut result = Vec::with_capacity(flows.len() - self.period + 1);
        let mut positive: f64 = flows[..self.period].iter().map(|f| f.0).sum();
        let mut negative: f64 = flows[..self.period].iter().map(|f| f.1).sum();
        result.push(guarded_oscillator(positive, negative));

        for i in self.period..flows.len() {
            positive += flows[i].0 - flows[i - self.period].0;
            negative += flows[i].1 - flows[i - self.period].1;
            // Running sums can drift a hair below zero
            result.push(guarded_oscillator(positive.max(0.0), negative.max(0.0)));
        }

        result
    }

    fn period(&self) -> usize {
        self.period + 1
    }

    fn name(&self) -> &str {
        "MFI"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(close: f64, volume: f64) -> Bar {
        Bar::new(0, close, close + 1.0, close - 1.0, close, volume)
    }

    #[test]
    fn test_rsi_basic() {
        let rsi = Rsi::new(14);
        // Generate test data with alternating up/down moves
        let data: Vec<f64> = (0..30)
            .map(|i| 100.0 + (i as f64 * 0.5).sin() * 5.0)
            .collect();

        let result = rsi.calculate(&data);
        assert_eq!(result.len(), 30 - 14);

        // All RSI values should be between 0 and 100
        for value in &result {
            assert!(*value >= 0.0 && *value <= 100.0);
        }
    }

    #[test]
    fn test_rsi_all_gains() {
        let rsi = Rsi::new(5);
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        let result = rsi.calculate(&data);

        assert!(!result.is_empty());
        assert!(result[0] > 99.9);
    }

    #[test]
    fn test_rsi_all_losses() {
        let rsi = Rsi::new(5);
        let data = vec![7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0];
        let result = rsi.calculate(&data);

        assert!(!result.is_empty());
        assert!(result[0] < 0.1);
    }

    #[test]
    fn test_rsi_flat_is_neutral() {
        let rsi = Rsi::new(14);
        let data = vec![42.0; 40];

        let value = rsi.latest(&data).unwrap();
        assert!((value - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_rsi_uses_trailing_window_mean() {
        let rsi = Rsi::new(3);
        // Changes: -2, -2, +1, -0.5, +1.5; last window is +1, -0.5, +1.5
        let data = vec![20.0, 18.0, 16.0, 17.0, 16.5, 18.0];
        let gain = 2.5 / 3.0;
        let loss = 0.5 / 3.0;
        let expected = 100.0 - 100.0 / (1.0 + (gain + 0.0001) / (loss + 0.0001));

        let result = rsi.calculate(&data);
        assert_eq!(result.len(), 3);
        assert!((result[2] - expected).abs() < 1e-9);
    }

    #[test]
    fn test_rsi_forgets_changes_outside_window() {
        // 30 bars falling 2/day, then 14 rising 0.5/day
        let mut data: Vec<f64> = (0..30).map(|i| 200.0 - 2.0 * i as f64).collect();
        let turn = *data.last().unwrap();
        data.extend((1..=14).map(|i| turn + 0.5 * i as f64));

        let value = Rsi::new(14).latest(&data).unwrap();
        let expected = 100.0 - 100.0 / (1.0 + (0.5 + 0.0001) / 0.0001);
        assert!((value - expected).abs() < 1e-6);
        assert!(value > 99.9);
    }

    #[test]
    fn test_rsi_insufficient_data() {
        let rsi = Rsi::new(14);
        assert!(rsi.calculate(&[1.0; 14]).is_empty());
        assert_eq!(rsi.calculate(&[1.0; 15]).len(), 1);
    }

    #[test]
    fn test_macd_basic() {
        let macd = Macd::new();
        let data: Vec<f64> = (0..50).map(|i| 100.0 + i as f64).collect();
        let result = macd.calculate(&data);

        assert_eq!(result.len(), 50);
        // In an uptrend, MACD should be positive
        assert!(result.last().unwrap().macd > 0.0);
    }

    #[test]
    fn test_macd_custom_periods() {
        let macd = Macd::with_periods(5, 10, 3);
        let data: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let result = macd.calculate(&data);

        assert!(!result.is_empty());
        let last = result.last().unwrap();
        assert!((last.histogram - (last.macd - last.signal)).abs() < 1e-12);
    }

    #[test]
    fn test_macd_defined_from_first_bar() {
        let macd = Macd::new();
        let result = macd.calculate(&[10.0, 11.0, 12.0]);

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].macd, 0.0);
        assert_eq!(result[0].signal, 0.0);
        let fast = Ema::new(12).latest(&[10.0, 11.0, 12.0]).unwrap();
        let slow = Ema::new(26).latest(&[10.0, 11.0, 12.0]).unwrap();
        assert!((result[2].macd - (fast - slow)).abs() < 1e-12);
        assert!(result[2].macd > 0.0);
    }

    #[test]
    fn test_macd_flat_is_zero() {
        let macd = Macd::new();
        let result = macd.calculate(&[10.0; 60]);

        let last = result.last().unwrap();
        assert_eq!(last.macd, 0.0);
        assert_eq!(last.histogram, 0.0);
    }

    #[test]
    fn test_stochastic_basic() {
        let stoch = Stochastic::new();
        let high: Vec<f64> = (0..30).map(|i| 105.0 + i as f64).collect();
        let low: Vec<f64> = (0..30).map(|i| 95.0 + i as f64).collect();
        let close: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();

        let result = stoch.calculate_ohlc(&high, &low, &close);
        assert_eq!(result.len(), 30 - 16 + 1);

        // All values should be between 0 and 100
        for output in &result {
            assert!(output.k >= 0.0 && output.k <= 100.0);
            assert!(output.d >= 0.0 && output.d <= 100.0);
        }
    }

    #[test]
    fn test_stochastic_flat_range() {
        let stoch = Stochastic::new();
        let bars: Vec<Bar> = (0..20).map(|_| Bar::new(0, 5.0, 5.0, 5.0, 5.0, 1.0)).collect();

        let result = BarIndicator::calculate(&stoch, &bars);
        let last = result.last().unwrap();
        assert!(last.k.is_finite());
        assert!(last.k.abs() < 1e-10);
    }

    #[test]
    fn test_mfi_rising_prices() {
        let mfi = Mfi::new(14);
        let bars: Vec<Bar> = (0..20).map(|i| bar(100.0 + i as f64, 1000.0)).collect();

        let result = mfi.calculate(&bars);
        assert_eq!(result.len(), 20 - 15 + 1);
        assert!(*result.last().unwrap() > 99.9);
    }

    #[test]
    fn test_mfi_balanced_flows() {
        let mfi = Mfi::new(2);
        // Up 1 then down 1 with equal volume: flows nearly cancel
        let bars = vec![bar(10.0, 100.0), bar(11.0, 100.0), bar(10.0, 100.0)];

        let result = mfi.calculate(&bars);
        assert_eq!(result.len(), 1);
        // Positive flow 1100, negative flow 1000
        let expected = 100.0 - 100.0 / (1.0 + 1100.0 / 1000.0);
        assert!((result[0] - expected).abs() < 1e-3);
    }

    #[test]
    fn test_mfi_insufficient_data() {
        let mfi = Mfi::new(14);
        let bars: Vec<Bar> = (0..14).map(|i| bar(10.0 + i as f64, 1.0)).collect();
        assert!(mfi.calculate(&bars).is_empty());
    }
}
