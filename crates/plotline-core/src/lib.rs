//! Core types for the plotline workspace.
//!
//! This crate provides fundamental data structures with no external dependencies:
//! - `Candle` - OHLCV bar data
//! - `Timeframe` - Time period enumeration and candle aggregation
//! - `BarSeries` - Bar cache with nominal spacing and logical-index extrapolation
//! - `ValidityPolicy` - Configurable time/price validity predicates

pub mod candle;
pub mod series;
pub mod timeframe;
pub mod validation;

pub use candle::{Candle, OHLCV};
pub use series::BarSeries;
pub use timeframe::{aggregate_candles, Timeframe};
pub use validation::{validate_candle, ValidityPolicy};
