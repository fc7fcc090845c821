//! Named indicator registry over a bar history.

use plotline_core::Candle;

use crate::indicator::{Indicator, IndicatorOutput};

/// Holds a bar history plus a set of named indicators, recomputing them
/// as the history changes.
///
/// Replay hosts feed each streamed bar through [`IndicatorEngine::update_bar`];
/// a bar with a known timestamp replaces the existing one (the live bar
/// repainting), otherwise it is inserted in time order.
#[derive(Default)]
pub struct IndicatorEngine {
    bars: Vec<Candle>,
    indicators: Vec<(String, Box<dyn Indicator>)>,
}

impl IndicatorEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current bar history.
    pub fn bars(&self) -> &[Candle] {
        &self.bars
    }

    /// Replace the whole bar history.
    pub fn set_data(&mut self, bars: Vec<Candle>) {
        self.bars = bars;
    }

    /// Merge one bar into the history, replacing a bar with the same
    /// timestamp or inserting in time order.
    pub fn update_bar(&mut self, bar: Candle) {
        let index = self.bars.partition_point(|b| b.timestamp < bar.timestamp);
        if index < self.bars.len() && self.bars[index].timestamp == bar.timestamp {
            self.bars[index] = bar;
        } else {
            self.bars.insert(index, bar);
        }
    }

    /// Register an indicator under a name, replacing any previous one
    /// with that name.
    pub fn add(&mut self, name: impl Into<String>, indicator: Box<dyn Indicator>) {
        let name = name.into();
        log::debug!("adding indicator {name}");
        self.remove(&name);
        self.indicators.push((name, indicator));
    }

    /// Remove an indicator by name. Returns whether one was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.indicators.len();
        self.indicators.retain(|(n, _)| n != name);
        before != self.indicators.len()
    }

    /// Names of the registered indicators, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.indicators.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Compute every registered indicator over the current history.
    pub fn calculate_all(&self) -> Vec<(String, IndicatorOutput)> {
        self.indicators
            .iter()
            .map(|(name, indicator)| (name.clone(), indicator.calculate(&self.bars)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicator::{IndicatorPoint, PriceSource};
    use crate::sma::{Sma, SmaConfig};

    fn bar(ts: f64, close: f64) -> Candle {
        Candle::new(ts, close, close, close, close, 100.0)
    }

    fn sma3() -> Box<dyn Indicator> {
        Box::new(Sma::new(SmaConfig {
            period: 3,
            price_source: PriceSource::Close,
        }))
    }

    #[test]
    fn test_add_remove_names() {
        let mut engine = IndicatorEngine::new();
        engine.add("SMA (3)", sma3());
        engine.add("SMA (3)", sma3());

        assert_eq!(engine.names(), vec!["SMA (3)"]);
        assert!(engine.remove("SMA (3)"));
        assert!(!engine.remove("SMA (3)"));
        assert!(engine.names().is_empty());
    }

    #[test]
    fn test_new_bar_extends_indicator() {
        let mut engine = IndicatorEngine::new();
        engine.set_data(vec![bar(0.0, 1.0), bar(60.0, 2.0), bar(120.0, 3.0)]);
        engine.add("SMA (3)", sma3());

        engine.update_bar(bar(180.0, 4.0));

        let results = engine.calculate_all();
        let IndicatorOutput::Line(points) = &results[0].1 else {
            panic!("expected single line output");
        };
        assert_eq!(
            points,
            &vec![
                IndicatorPoint::new(120.0, 2.0),
                IndicatorPoint::new(180.0, 3.0)
            ]
        );
    }

    #[test]
    fn test_repainted_bar_replaces_existing() {
        let mut engine = IndicatorEngine::new();
        engine.set_data(vec![bar(0.0, 1.0), bar(60.0, 2.0), bar(120.0, 3.0)]);
        engine.add("SMA (3)", sma3());

        // Same timestamp: the live bar repaints instead of duplicating.
        engine.update_bar(bar(120.0, 9.0));
        assert_eq!(engine.bars().len(), 3);

        let results = engine.calculate_all();
        let IndicatorOutput::Line(points) = &results[0].1 else {
            panic!("expected single line output");
        };
        assert_eq!(points, &vec![IndicatorPoint::new(120.0, 4.0)]);
    }

    #[test]
    fn test_out_of_order_bar_inserted_sorted() {
        let mut engine = IndicatorEngine::new();
        engine.set_data(vec![bar(0.0, 1.0), bar(120.0, 3.0)]);
        engine.update_bar(bar(60.0, 2.0));

        let times: Vec<f64> = engine.bars().iter().map(|b| b.timestamp).collect();
        assert_eq!(times, vec![0.0, 60.0, 120.0]);
    }
}
