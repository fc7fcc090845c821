//! Timeframe types and candle aggregation.

use crate::candle::Candle;

/// Timeframe enumeration for different chart periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeframe {
    Min1,  // 1 minute
    Min15, // 15 minutes
    Hour1, // 1 hour
    Day1,  // 1 day
    Week1, // 1 week
}

impl Timeframe {
    /// Returns the duration of this timeframe in seconds.
    pub fn seconds(&self) -> f64 {
        match self {
            Timeframe::Min1 => 60.0,
            Timeframe::Min15 => 60.0 * 15.0,
            Timeframe::Hour1 => 60.0 * 60.0,
            Timeframe::Day1 => 60.0 * 60.0 * 24.0,
            Timeframe::Week1 => 60.0 * 60.0 * 24.0 * 7.0,
        }
    }

    /// Returns a short label for this timeframe.
    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::Min1 => "1m",
            Timeframe::Min15 => "15m",
            Timeframe::Hour1 => "1h",
            Timeframe::Day1 => "1D",
            Timeframe::Week1 => "1w",
        }
    }

    /// Parses a short label back into a timeframe.
    pub fn parse(label: &str) -> Option<Self> {
        Self::all().iter().copied().find(|tf| tf.label() == label)
    }

    /// Returns all available timeframes in order.
    pub fn all() -> &'static [Timeframe] {
        &[
            Timeframe::Min1,
            Timeframe::Min15,
            Timeframe::Hour1,
            Timeframe::Day1,
            Timeframe::Week1,
        ]
    }
}

/// Resample candles into a larger timeframe.
///
/// Bars are bucketed by flooring their timestamp to a multiple of the
/// timeframe's duration: open is the bucket's first open, high/low the
/// extremes, close the last close, volume the sum. Buckets with no source
/// bars produce no output bar. Input is assumed time-sorted.
pub fn aggregate_candles(candles: &[Candle], timeframe: Timeframe) -> Vec<Candle> {
    let interval = timeframe.seconds();
    let mut aggregated: Vec<Candle> = Vec::new();

    for candle in candles {
        let bucket = (candle.timestamp / interval).floor() * interval;
        match aggregated.last_mut() {
            Some(current) if current.timestamp == bucket => {
                current.high = current.high.max(candle.high);
                current.low = current.low.min(candle.low);
                current.close = candle.close;
                current.volume += candle.volume;
            }
            _ => aggregated.push(Candle::new(
                bucket,
                candle.open,
                candle.high,
                candle.low,
                candle.close,
                candle.volume,
            )),
        }
    }

    aggregated
}
