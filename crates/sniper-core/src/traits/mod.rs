//! Core traits for the screener.

mod indicator;

pub use indicator::{BarIndicator, Indicator, MultiOutputIndicator};
