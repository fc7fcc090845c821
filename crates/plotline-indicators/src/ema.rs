//! Exponential Moving Average indicator.

use plotline_core::Candle;

use crate::indicator::{line_points, Indicator, IndicatorOutput, PriceSource};

/// EMA indicator configuration.
#[derive(Debug, Clone)]
pub struct EmaConfig {
    /// Smoothing window in bars (default: 20).
    pub period: usize,
    /// Price source for calculation.
    pub price_source: PriceSource,
}

impl Default for EmaConfig {
    fn default() -> Self {
        Self {
            period: 20,
            price_source: PriceSource::Close,
        }
    }
}

/// Exponential Moving Average.
pub struct Ema {
    config: EmaConfig,
}

impl Ema {
    pub fn new(config: EmaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EmaConfig {
        &self.config
    }
}

impl Indicator for Ema {
    fn calculate(&self, candles: &[Candle]) -> IndicatorOutput {
        let prices: Vec<f64> = candles
            .iter()
            .map(|c| self.config.price_source.extract(c))
            .collect();
        let values = exponential_moving_average(&prices, self.config.period);
        IndicatorOutput::Line(line_points(
            candles,
            self.config.period.saturating_sub(1),
            &values,
        ))
    }

    fn min_periods(&self) -> usize {
        self.config.period
    }

    fn is_overlay(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "EMA"
    }
}

/// EMA with multiplier `2 / (period + 1)`, seeded from the SMA of the
/// first `period` prices; output starts at index `period - 1`.
pub(crate) fn exponential_moving_average(prices: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || prices.len() < period {
        return Vec::new();
    }

    let multiplier = 2.0 / (period as f64 + 1.0);
    let mut values = Vec::with_capacity(prices.len() - period + 1);
    let mut prev = prices[..period].iter().sum::<f64>() / period as f64;
    values.push(prev);

    for price in &prices[period..] {
        prev = (price - prev) * multiplier + prev;
        values.push(prev);
    }

    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicator::IndicatorPoint;

    fn candles(closes: &[f64]) -> Vec<Candle> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Candle::new(i as f64 * 60.0, close, close, close, close, 100.0))
            .collect()
    }

    #[test]
    fn test_seeded_from_sma() {
        // Period 3 over 1..=5: seed 2, then (4-2)*0.5+2=3, (5-3)*0.5+3=4.
        let values = exponential_moving_average(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert_eq!(values, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_tracks_constant_series() {
        let values = exponential_moving_average(&[7.0; 6], 4);
        assert!(values.iter().all(|&v| v == 7.0));
    }

    #[test]
    fn test_too_few_prices() {
        assert!(exponential_moving_average(&[1.0, 2.0], 3).is_empty());
    }

    #[test]
    fn test_points_align_with_bars() {
        let ema = Ema::new(EmaConfig {
            period: 3,
            price_source: PriceSource::Close,
        });
        let IndicatorOutput::Line(points) = ema.calculate(&candles(&[1.0, 2.0, 3.0, 4.0, 5.0]))
        else {
            panic!("expected single line output");
        };
        assert_eq!(points[0], IndicatorPoint::new(120.0, 2.0));
        assert_eq!(points.len(), 3);
    }
}
