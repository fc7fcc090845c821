//! Bollinger Bands indicator.

use plotline_core::Candle;

use crate::indicator::{line_points, Indicator, IndicatorOutput, IndicatorPoint, PriceSource};
use crate::sma::simple_moving_average;

/// Bollinger Bands configuration.
#[derive(Debug, Clone)]
pub struct BollingerConfig {
    /// Averaging window in bars (default: 20).
    pub period: usize,
    /// Band width in standard deviations (default: 2.0).
    pub std_dev: f64,
    /// Price source for calculation.
    pub price_source: PriceSource,
}

impl Default for BollingerConfig {
    fn default() -> Self {
        Self {
            period: 20,
            std_dev: 2.0,
            price_source: PriceSource::Close,
        }
    }
}

/// Bollinger Bands: an SMA middle band with upper/lower bands offset by a
/// multiple of the window's population standard deviation.
pub struct Bollinger {
    config: BollingerConfig,
}

impl Bollinger {
    pub fn new(config: BollingerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BollingerConfig {
        &self.config
    }

    /// Calculate the three bands as (upper, middle, lower) point lines.
    pub fn calculate_bands(
        &self,
        candles: &[Candle],
    ) -> (
        Vec<IndicatorPoint>,
        Vec<IndicatorPoint>,
        Vec<IndicatorPoint>,
    ) {
        let period = self.config.period;
        let prices: Vec<f64> = candles
            .iter()
            .map(|c| self.config.price_source.extract(c))
            .collect();

        let middle = simple_moving_average(&prices, period);
        if middle.is_empty() {
            return (Vec::new(), Vec::new(), Vec::new());
        }

        let mut upper = Vec::with_capacity(middle.len());
        let mut lower = Vec::with_capacity(middle.len());
        for (i, &mean) in middle.iter().enumerate() {
            let window = &prices[i..i + period];
            let variance =
                window.iter().map(|p| (p - mean) * (p - mean)).sum::<f64>() / period as f64;
            let offset = self.config.std_dev * variance.sqrt();
            upper.push(mean + offset);
            lower.push(mean - offset);
        }

        let warmup = period - 1;
        (
            line_points(candles, warmup, &upper),
            line_points(candles, warmup, &middle),
            line_points(candles, warmup, &lower),
        )
    }
}

impl Indicator for Bollinger {
    fn calculate(&self, candles: &[Candle]) -> IndicatorOutput {
        let (upper, middle, lower) = self.calculate_bands(candles);
        IndicatorOutput::MultiLine(vec![
            ("Upper".to_string(), upper),
            ("Middle".to_string(), middle),
            ("Lower".to_string(), lower),
        ])
    }

    fn min_periods(&self) -> usize {
        self.config.period
    }

    fn is_overlay(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "Bollinger Bands"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candles(closes: &[f64]) -> Vec<Candle> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Candle::new(i as f64 * 60.0, close, close, close, close, 100.0))
            .collect()
    }

    fn bollinger(period: usize, std_dev: f64) -> Bollinger {
        Bollinger::new(BollingerConfig {
            period,
            std_dev,
            price_source: PriceSource::Close,
        })
    }

    #[test]
    fn test_bands_around_middle() {
        let (upper, middle, lower) =
            bollinger(3, 2.0).calculate_bands(&candles(&[1.0, 2.0, 3.0, 4.0, 5.0]));

        assert_eq!(middle.len(), 3);
        assert_eq!(middle[0].value, 2.0);
        assert_eq!(middle[0].time, 120.0);

        // Population stddev of [1, 2, 3] is sqrt(2/3).
        let offset = 2.0 * (2.0f64 / 3.0).sqrt();
        assert!((upper[0].value - (2.0 + offset)).abs() < 1e-12);
        assert!((lower[0].value - (2.0 - offset)).abs() < 1e-12);
    }

    #[test]
    fn test_flat_series_collapses_bands() {
        let (upper, middle, lower) = bollinger(3, 2.0).calculate_bands(&candles(&[5.0; 4]));

        for i in 0..middle.len() {
            assert_eq!(upper[i].value, 5.0);
            assert_eq!(middle[i].value, 5.0);
            assert_eq!(lower[i].value, 5.0);
        }
    }

    #[test]
    fn test_short_history_yields_empty_bands() {
        let (upper, middle, lower) = bollinger(20, 2.0).calculate_bands(&candles(&[1.0, 2.0]));
        assert!(upper.is_empty());
        assert!(middle.is_empty());
        assert!(lower.is_empty());
    }

    #[test]
    fn test_multiline_output_names() {
        let IndicatorOutput::MultiLine(lines) =
            bollinger(3, 2.0).calculate(&candles(&[1.0, 2.0, 3.0, 4.0]))
        else {
            panic!("expected multi-line output");
        };
        let names: Vec<&str> = lines.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["Upper", "Middle", "Lower"]);
    }
}
