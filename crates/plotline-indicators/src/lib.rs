//! Technical indicators computed over candle histories.
//!
//! Each indicator turns a bar slice into one or more time/value lines the
//! host chart can plot. [`IndicatorEngine`] keeps a set of named
//! indicators over a bar history and recomputes them as replay bars
//! arrive.

pub mod bollinger;
pub mod ema;
pub mod engine;
pub mod indicator;
pub mod sma;

pub use bollinger::{Bollinger, BollingerConfig};
pub use ema::{Ema, EmaConfig};
pub use engine::IndicatorEngine;
pub use indicator::{Indicator, IndicatorOutput, IndicatorPoint, PriceSource};
pub use sma::{Sma, SmaConfig};
