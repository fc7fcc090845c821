//! Bar series container with nominal spacing derivation.

use crate::candle::Candle;

/// A cached sequence of bars plus the nominal time delta between
/// consecutive bars ("span").
///
/// The span is used to extrapolate an x-coordinate when the host chart
/// reports only a logical bar index rather than a timestamp, which happens
/// when the cursor is beyond the last plotted bar. It is derived as the
/// median of consecutive deltas so that gaps (weekends, holidays) and the
/// occasional missing bar do not skew it.
#[derive(Debug, Clone, Default)]
pub struct BarSeries {
    bars: Vec<Candle>,
    span: Option<f64>,
}

impl BarSeries {
    /// Creates a series from a bar sequence, deriving the nominal span.
    pub fn new(bars: Vec<Candle>) -> Self {
        let span = median_delta(&bars);
        Self { bars, span }
    }

    /// Returns the number of bars.
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Returns true if the series holds no bars.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Gets the bar at the given index.
    pub fn get(&self, index: usize) -> Option<&Candle> {
        self.bars.get(index)
    }

    /// Returns the underlying bar slice.
    pub fn bars(&self) -> &[Candle] {
        &self.bars
    }

    /// Returns the timestamp of the first bar.
    pub fn first_time(&self) -> Option<f64> {
        self.bars.first().map(|b| b.timestamp)
    }

    /// Returns the nominal time delta between consecutive bars.
    pub fn span(&self) -> Option<f64> {
        self.span
    }

    /// Extrapolates a timestamp from a host-chart logical index.
    ///
    /// Returns `None` when the series is empty or no span could be derived.
    pub fn time_at_logical(&self, logical: f64) -> Option<f64> {
        let first = self.first_time()?;
        let span = self.span?;
        Some(first + logical * span)
    }
}

/// Median of the positive deltas between consecutive bar timestamps.
fn median_delta(bars: &[Candle]) -> Option<f64> {
    let mut deltas: Vec<f64> = bars
        .windows(2)
        .map(|w| w[1].timestamp - w[0].timestamp)
        .filter(|d| d.is_finite() && *d > 0.0)
        .collect();

    if deltas.is_empty() {
        return None;
    }

    deltas.sort_by(|a, b| a.total_cmp(b));
    Some(deltas[deltas.len() / 2])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(ts: f64) -> Candle {
        Candle::new(ts, 100.0, 110.0, 90.0, 105.0, 1000.0)
    }

    #[test]
    fn test_span_regular() {
        let series = BarSeries::new(vec![bar(100.0), bar(200.0), bar(300.0), bar(400.0)]);
        assert_eq!(series.span(), Some(100.0));
    }

    #[test]
    fn test_span_gappy_uses_median() {
        // Weekend gap of 300 between otherwise regular 100-spaced bars.
        let series = BarSeries::new(vec![
            bar(100.0),
            bar(200.0),
            bar(500.0),
            bar(600.0),
            bar(700.0),
        ]);
        assert_eq!(series.span(), Some(100.0));
    }

    #[test]
    fn test_span_ignores_zero_deltas() {
        let series = BarSeries::new(vec![bar(100.0), bar(100.0), bar(200.0)]);
        assert_eq!(series.span(), Some(100.0));
    }

    #[test]
    fn test_span_empty_and_single() {
        assert_eq!(BarSeries::new(vec![]).span(), None);
        assert_eq!(BarSeries::new(vec![bar(100.0)]).span(), None);
    }

    #[test]
    fn test_time_at_logical() {
        let series = BarSeries::new(vec![bar(100.0), bar(200.0), bar(300.0), bar(400.0)]);
        // Logical index 5 is one bar past the last plotted bar.
        assert_eq!(series.time_at_logical(5.0), Some(600.0));
        assert_eq!(series.time_at_logical(0.0), Some(100.0));
    }

    #[test]
    fn test_time_at_logical_empty() {
        assert_eq!(BarSeries::default().time_at_logical(3.0), None);
    }
}
