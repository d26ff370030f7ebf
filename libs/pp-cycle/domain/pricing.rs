//! Price point calculation
//!
//! Buy and sell levels sit half the total spread below and above the base
//! price, quantized to 8 fractional digits with banker's rounding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Fractional digits carried by every price and amount
pub const PRICE_DECIMALS: u32 = 8;

/// Round to 8 fractional digits, half to even
pub fn round8(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(PRICE_DECIMALS, RoundingStrategy::MidpointNearestEven)
}

/// Static buy/sell levels derived from a base price and a total spread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricePoints {
    pub buy: Decimal,
    pub sell: Decimal,
}

impl PricePoints {
    /// Spread is not validated: zero gives equal levels, negative gives inverted ones.
    pub fn from_spread(base_price: Decimal, total_spread: Decimal) -> Self {
        let half_spread = total_spread / Decimal::TWO;
        Self {
            buy: round8(base_price - half_spread),
            sell: round8(base_price + half_spread),
        }
    }

    pub fn width(&self) -> Decimal {
        self.sell - self.buy
    }

    pub fn is_crossed(&self) -> bool {
        self.buy > self.sell
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_price_points() {
        let points = PricePoints::from_spread(dec!(2000.00000000), dec!(100.00000000));
        assert_eq!(points.buy, dec!(1950.00000000));
        assert_eq!(points.sell, dec!(2050.00000000));
        assert_eq!(points.width(), dec!(100));
    }

    #[test]
    fn test_round8_half_even() {
        assert_eq!(round8(dec!(1.000000005)), dec!(1.00000000));
        assert_eq!(round8(dec!(1.000000015)), dec!(1.00000002));
        assert_eq!(round8(dec!(-1.000000025)), dec!(-1.00000002));
    }

    #[test]
    fn test_odd_spread_rounds_each_side() {
        // half of 0.00000001 is 0.000000005; both sides land on an even digit
        let points = PricePoints::from_spread(dec!(100), dec!(0.00000001));
        assert_eq!(points.buy, dec!(100.00000000));
        assert_eq!(points.sell, dec!(100.00000000));
    }

    #[test]
    fn test_degenerate_spreads_are_accepted() {
        let flat = PricePoints::from_spread(dec!(2000), Decimal::ZERO);
        assert_eq!(flat.buy, flat.sell);
        assert!(!flat.is_crossed());

        let inverted = PricePoints::from_spread(dec!(2000), dec!(-10));
        assert_eq!(inverted.buy, dec!(2005));
        assert_eq!(inverted.sell, dec!(1995));
        assert!(inverted.is_crossed());
    }
}
