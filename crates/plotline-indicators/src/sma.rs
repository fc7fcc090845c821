//! Simple Moving Average indicator.

use plotline_core::Candle;

use crate::indicator::{line_points, Indicator, IndicatorOutput, PriceSource};

/// SMA indicator configuration.
#[derive(Debug, Clone)]
pub struct SmaConfig {
    /// Averaging window in bars (default: 20).
    pub period: usize,
    /// Price source for calculation.
    pub price_source: PriceSource,
}

impl Default for SmaConfig {
    fn default() -> Self {
        Self {
            period: 20,
            price_source: PriceSource::Close,
        }
    }
}

/// Simple Moving Average.
pub struct Sma {
    config: SmaConfig,
}

impl Sma {
    pub fn new(config: SmaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SmaConfig {
        &self.config
    }
}

impl Indicator for Sma {
    fn calculate(&self, candles: &[Candle]) -> IndicatorOutput {
        let prices: Vec<f64> = candles
            .iter()
            .map(|c| self.config.price_source.extract(c))
            .collect();
        let values = simple_moving_average(&prices, self.config.period);
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
        "SMA"
    }
}

/// Rolling mean over a fixed window; output starts at index `period - 1`.
pub(crate) fn simple_moving_average(prices: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || prices.len() < period {
        return Vec::new();
    }

    let mut values = Vec::with_capacity(prices.len() - period + 1);
    let mut sum: f64 = prices[..period].iter().sum();
    values.push(sum / period as f64);

    for i in period..prices.len() {
        sum += prices[i] - prices[i - period];
        values.push(sum / period as f64);
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
    fn test_rolling_mean() {
        let values = simple_moving_average(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert_eq!(values, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_too_few_prices() {
        assert!(simple_moving_average(&[1.0, 2.0], 3).is_empty());
        assert!(simple_moving_average(&[1.0], 0).is_empty());
    }

    #[test]
    fn test_points_skip_warmup() {
        let sma = Sma::new(SmaConfig {
            period: 3,
            price_source: PriceSource::Close,
        });
        let output = sma.calculate(&candles(&[1.0, 2.0, 3.0, 4.0, 5.0]));

        let IndicatorOutput::Line(points) = output else {
            panic!("expected single line output");
        };
        assert_eq!(points[0], IndicatorPoint::new(120.0, 2.0));
        assert_eq!(points.last(), Some(&IndicatorPoint::new(240.0, 4.0)));
    }

    #[test]
    fn test_short_history_yields_empty_line() {
        let sma = Sma::new(SmaConfig::default());
        let IndicatorOutput::Line(points) = sma.calculate(&candles(&[1.0, 2.0])) else {
            panic!("expected single line output");
        };
        assert!(points.is_empty());
    }
}
