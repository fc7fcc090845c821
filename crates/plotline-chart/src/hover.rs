//! Hit-testing for hover detection against a trendline.

use crate::types::{ChartPoint, Trendline};

/// Hover detection parameters.
#[derive(Debug, Clone, Copy)]
pub struct HoverConfig {
    /// Price tolerance as a percentage of the reference price.
    pub threshold_pct: f64,
    /// Endpoint time tolerance, in multiples of the nominal bar span.
    pub time_tolerance_spans: f64,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            threshold_pct: 1.5,
            time_tolerance_spans: 2.0,
        }
    }
}

/// Outcome of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// Cursor is on an endpoint (0 = earlier, 1 = later).
    Endpoint(usize),
    /// Cursor is on the line body between the endpoints.
    Segment,
    /// No hit.
    Miss,
}

/// Test whether the cursor is on the line or one of its endpoints.
///
/// Endpoints are checked first so that grabbing an endpoint wins over a
/// whole-line grab near the ends. The endpoint time tolerance is
/// `time_tolerance_spans × span`; when no span is known the time must match
/// exactly.
#[must_use]
pub fn hit_test(cursor: ChartPoint, line: &Trendline, config: &HoverConfig, span: Option<f64>) -> Hit {
    for (index, endpoint) in line.points().iter().enumerate() {
        if within_price_threshold(cursor.price, endpoint.price, config.threshold_pct)
            && within_time_tolerance(cursor.time, endpoint.time, config.time_tolerance_spans, span)
        {
            return Hit::Endpoint(index);
        }
    }

    if cursor.time >= line.a().time && cursor.time <= line.b().time {
        let estimated = line.price_at(cursor.time);
        if within_price_threshold(cursor.price, estimated, config.threshold_pct) {
            return Hit::Segment;
        }
    }

    Hit::Miss
}

fn within_price_threshold(price: f64, reference: f64, threshold_pct: f64) -> bool {
    if reference == 0.0 || !reference.is_finite() {
        return false;
    }
    (price - reference).abs() / reference.abs() * 100.0 < threshold_pct
}

fn within_time_tolerance(time: f64, reference: f64, tolerance_spans: f64, span: Option<f64>) -> bool {
    match span {
        Some(span) => (time - reference).abs() <= tolerance_spans * span,
        None => time == reference,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> Trendline {
        Trendline::between(ChartPoint::new(150.0, 10.0), ChartPoint::new(350.0, 20.0)).unwrap()
    }

    fn config() -> HoverConfig {
        HoverConfig {
            threshold_pct: 1.0,
            time_tolerance_spans: 2.0,
        }
    }

    #[test]
    fn test_endpoint_hit() {
        let hit = hit_test(ChartPoint::new(150.0, 10.005), &line(), &config(), Some(100.0));
        assert_eq!(hit, Hit::Endpoint(0));
    }

    #[test]
    fn test_endpoint_hit_within_span_tolerance() {
        // 150 time units away from endpoint 1, inside 2 spans of 100.
        let hit = hit_test(ChartPoint::new(200.0, 20.0), &line(), &config(), Some(100.0));
        assert_eq!(hit, Hit::Endpoint(1));
    }

    #[test]
    fn test_endpoint_exact_time_when_no_span() {
        assert_eq!(
            hit_test(ChartPoint::new(150.0, 10.0), &line(), &config(), None),
            Hit::Endpoint(0)
        );
        assert_eq!(
            hit_test(ChartPoint::new(151.0, 10.0), &line(), &config(), None),
            Hit::Miss
        );
    }

    #[test]
    fn test_segment_hit() {
        // Interpolated price at t=250 is 15.0.
        let hit = hit_test(ChartPoint::new(250.0, 15.05), &line(), &config(), Some(10.0));
        assert_eq!(hit, Hit::Segment);
    }

    #[test]
    fn test_segment_miss_outside_threshold() {
        let hit = hit_test(ChartPoint::new(250.0, 16.0), &line(), &config(), Some(10.0));
        assert_eq!(hit, Hit::Miss);
    }

    #[test]
    fn test_miss_outside_time_range() {
        // Price matches the extrapolated line but cursor time is past b.
        let hit = hit_test(ChartPoint::new(400.0, 22.5), &line(), &config(), Some(10.0));
        assert_eq!(hit, Hit::Miss);
    }

    #[test]
    fn test_zero_reference_price_never_hits() {
        let flat =
            Trendline::between(ChartPoint::new(100.0, 0.0), ChartPoint::new(200.0, 0.0)).unwrap();
        let hit = hit_test(ChartPoint::new(150.0, 0.0), &flat, &config(), Some(10.0));
        assert_eq!(hit, Hit::Miss);
    }
}
