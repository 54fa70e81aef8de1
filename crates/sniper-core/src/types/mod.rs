//! Core data types for the screener.

mod ohlcv;
mod signal;

pub use ohlcv::{Bar, BarSeries, PriceRow, PriceTable};
pub use signal::{BuySignal, Channel, SellSignal};
