//! Core indicator traits and types.

use plotline_core::Candle;

/// Which price to use for indicator calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceSource {
    Open,
    High,
    Low,
    #[default]
    Close,
    /// (High + Low) / 2
    HL2,
    /// (High + Low + Close) / 3
    HLC3,
    /// (Open + High + Low + Close) / 4
    OHLC4,
}

impl PriceSource {
    /// Extract the price from a candle based on this source.
    pub fn extract(&self, candle: &Candle) -> f64 {
        match self {
            PriceSource::Open => candle.open,
            PriceSource::High => candle.high,
            PriceSource::Low => candle.low,
            PriceSource::Close => candle.close,
            PriceSource::HL2 => (candle.high + candle.low) / 2.0,
            PriceSource::HLC3 => (candle.high + candle.low + candle.close) / 3.0,
            PriceSource::OHLC4 => {
                (candle.open + candle.high + candle.low + candle.close) / 4.0
            }
        }
    }
}

/// One plotted point of an indicator line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorPoint {
    pub time: f64,
    pub value: f64,
}

impl IndicatorPoint {
    pub fn new(time: f64, value: f64) -> Self {
        Self { time, value }
    }
}

/// Output from an indicator calculation.
///
/// Warm-up bars produce no points, so each line starts at the first bar
/// with enough history behind it.
#[derive(Debug, Clone, PartialEq)]
pub enum IndicatorOutput {
    /// Single line output (e.g. SMA, EMA).
    Line(Vec<IndicatorPoint>),
    /// Multiple named lines (e.g. Bollinger Bands).
    MultiLine(Vec<(String, Vec<IndicatorPoint>)>),
}

/// Pair computed values with the timestamps of the bars they belong to,
/// starting `offset` bars in (the warm-up window).
pub(crate) fn line_points(
    candles: &[Candle],
    offset: usize,
    values: &[f64],
) -> Vec<IndicatorPoint> {
    candles
        .iter()
        .skip(offset)
        .zip(values)
        .map(|(candle, &value)| IndicatorPoint::new(candle.timestamp, value))
        .collect()
}

/// Trait for technical indicators.
///
/// Construction is per-indicator (each has its own config type); the
/// trait covers only what a registry needs, so it stays object-safe.
pub trait Indicator {
    /// Calculate the indicator values for the given candles.
    ///
    /// Returns empty lines when the history is shorter than
    /// [`Indicator::min_periods`].
    fn calculate(&self, candles: &[Candle]) -> IndicatorOutput;

    /// Minimum number of bars required before the indicator produces
    /// valid output.
    fn min_periods(&self) -> usize;

    /// Whether this indicator is overlaid on the price chart (true) or
    /// displayed in a separate pane (false).
    fn is_overlay(&self) -> bool;

    /// Human-readable name of the indicator.
    fn name(&self) -> &str;
}
