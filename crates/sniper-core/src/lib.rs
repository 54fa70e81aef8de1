//! Core types and traits for the screener.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Bar, BarSeries, PriceTable)
//! - Signal classifications (buy, sell, channel regime)
//! - Indicator traits shared by every indicator implementation
//! - Error types

pub mod types;
pub mod traits;
pub mod error;

pub use error::{AnalysisError, DataError};
pub use types::*;
pub use traits::*;
