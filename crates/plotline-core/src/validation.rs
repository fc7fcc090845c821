//! Validity predicates for chart coordinates and bar data.

use crate::candle::Candle;

/// Configurable validity predicate for chart coordinates.
///
/// The positivity requirement is a pragmatic sanity check for quote
/// currencies, not a domain law (negative-price instruments exist), so it
/// can be switched off.
#[derive(Debug, Clone, Copy)]
pub struct ValidityPolicy {
    /// Require time and price to be strictly positive.
    pub require_positive: bool,
}

impl ValidityPolicy {
    pub fn new(require_positive: bool) -> Self {
        Self { require_positive }
    }

    /// Check a scale-native x-coordinate.
    pub fn valid_time(&self, time: f64) -> bool {
        time.is_finite() && (!self.require_positive || time > 0.0)
    }

    /// Check a price value.
    pub fn valid_price(&self, price: f64) -> bool {
        price.is_finite() && (!self.require_positive || price > 0.0)
    }
}

impl Default for ValidityPolicy {
    fn default() -> Self {
        Self {
            require_positive: true,
        }
    }
}

/// Validate a candle has reasonable values.
pub fn validate_candle(candle: &Candle) -> bool {
    candle.timestamp.is_finite()
        && candle.open.is_finite()
        && candle.high.is_finite()
        && candle.low.is_finite()
        && candle.close.is_finite()
        && candle.volume.is_finite()
        && candle.high >= candle.low
        && candle.open > 0.0
        && candle.close > 0.0
        && candle.low > 0.0
        && candle.volume >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_price() {
        let policy = ValidityPolicy::default();
        assert!(policy.valid_price(100.0));
        assert!(!policy.valid_price(0.0));
        assert!(!policy.valid_price(-5.0));
        assert!(!policy.valid_price(f64::NAN));
        assert!(!policy.valid_price(f64::INFINITY));
    }

    #[test]
    fn test_valid_time() {
        let policy = ValidityPolicy::default();
        assert!(policy.valid_time(1_700_000_000.0));
        assert!(!policy.valid_time(0.0));
        assert!(!policy.valid_time(f64::NAN));
    }

    #[test]
    fn test_non_positive_allowed() {
        let policy = ValidityPolicy::new(false);
        assert!(policy.valid_price(-12.5));
        assert!(policy.valid_time(0.0));
        assert!(!policy.valid_price(f64::NAN));
    }

    #[test]
    fn test_validate_candle_valid() {
        let candle = Candle::new(1000.0, 100.0, 105.0, 95.0, 102.0, 1000.0);
        assert!(validate_candle(&candle));
    }

    #[test]
    fn test_validate_candle_high_below_low() {
        let candle = Candle::new(1000.0, 100.0, 90.0, 95.0, 102.0, 1000.0);
        assert!(!validate_candle(&candle));
    }

    #[test]
    fn test_validate_candle_nan() {
        let candle = Candle::new(1000.0, f64::NAN, 105.0, 95.0, 102.0, 1000.0);
        assert!(!validate_candle(&candle));
    }
}
