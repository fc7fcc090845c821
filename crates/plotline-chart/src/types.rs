//! Geometry types for trendline drawings.

/// A point in chart coordinates.
///
/// `time` is a scale-native x-coordinate (seconds since epoch, or a value
/// extrapolated from a logical bar index); `price` is in the instrument's
/// quote currency.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChartPoint {
    pub time: f64,
    pub price: f64,
}

impl ChartPoint {
    /// Create a new chart point.
    #[must_use]
    pub const fn new(time: f64, price: f64) -> Self {
        Self { time, price }
    }

    /// Translate by a delta.
    #[must_use]
    pub fn translate(self, d_time: f64, d_price: f64) -> Self {
        Self {
            time: self.time + d_time,
            price: self.price + d_price,
        }
    }
}

/// A two-point trendline with strictly ascending endpoint times.
///
/// The ordering invariant (`a.time < b.time`) is enforced at construction,
/// so a `Trendline` can never be zero-width or time-reversed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trendline {
    a: ChartPoint,
    b: ChartPoint,
}

impl Trendline {
    /// Build a trendline from two points in any order.
    ///
    /// The earlier point becomes `a`. Returns `None` when the times are
    /// equal or not finite, since the ordering invariant cannot hold.
    #[must_use]
    pub fn between(p: ChartPoint, q: ChartPoint) -> Option<Self> {
        if !p.time.is_finite() || !q.time.is_finite() || p.time == q.time {
            return None;
        }
        if p.time < q.time {
            Some(Self { a: p, b: q })
        } else {
            Some(Self { a: q, b: p })
        }
    }

    /// The earlier endpoint.
    #[must_use]
    pub const fn a(&self) -> ChartPoint {
        self.a
    }

    /// The later endpoint.
    #[must_use]
    pub const fn b(&self) -> ChartPoint {
        self.b
    }

    /// Both endpoints in ascending time order.
    #[must_use]
    pub const fn points(&self) -> [ChartPoint; 2] {
        [self.a, self.b]
    }

    /// Linearly interpolated price at the given time.
    #[must_use]
    pub fn price_at(&self, time: f64) -> f64 {
        let slope = (self.b.price - self.a.price) / (self.b.time - self.a.time);
        self.a.price + slope * (time - self.a.time)
    }

    /// Move both endpoints by the given delta.
    #[must_use]
    pub fn translate(self, d_time: f64, d_price: f64) -> Self {
        Self {
            a: self.a.translate(d_time, d_price),
            b: self.b.translate(d_time, d_price),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_between_orders_by_time() {
        let line = Trendline::between(ChartPoint::new(350.0, 20.0), ChartPoint::new(150.0, 10.0))
            .unwrap();
        assert_eq!(line.a(), ChartPoint::new(150.0, 10.0));
        assert_eq!(line.b(), ChartPoint::new(350.0, 20.0));
    }

    #[test]
    fn test_between_rejects_zero_width() {
        assert!(Trendline::between(ChartPoint::new(150.0, 10.0), ChartPoint::new(150.0, 20.0))
            .is_none());
    }

    #[test]
    fn test_between_rejects_non_finite_time() {
        assert!(Trendline::between(
            ChartPoint::new(f64::NAN, 10.0),
            ChartPoint::new(150.0, 20.0)
        )
        .is_none());
    }

    #[test]
    fn test_price_at_interpolates() {
        let line = Trendline::between(ChartPoint::new(150.0, 10.0), ChartPoint::new(350.0, 20.0))
            .unwrap();
        assert!((line.price_at(250.0) - 15.0).abs() < 1e-12);
        assert!((line.price_at(150.0) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_translate() {
        let line = Trendline::between(ChartPoint::new(150.0, 10.0), ChartPoint::new(350.0, 20.0))
            .unwrap()
            .translate(10.0, 1.0);
        assert_eq!(line.a(), ChartPoint::new(160.0, 11.0));
        assert_eq!(line.b(), ChartPoint::new(360.0, 21.0));
    }
}
