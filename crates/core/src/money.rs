use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub};

/// Fixed-scale (2 decimal places) money, half-up rounding, no floating point.
///
/// Signed zero is canonicalised: `Money::from_decimal(Decimal::NEGATIVE_ZERO)`
/// compares equal to and displays the same as `Money::zero()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Money(Decimal);

impl Money {
    pub fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    pub fn to_cents(self) -> i64 {
        (self.0 * Decimal::from(100)).round().to_i64().unwrap_or(0)
    }

    /// Rounds to 2 decimal places, half-up, and canonicalises signed zero.
    pub fn from_decimal(decimal: Decimal) -> Self {
        let rounded = decimal.round_dp_with_strategy(
            2,
            rust_decimal::RoundingStrategy::MidpointAwayFromZero,
        );
        if rounded.is_zero() {
            Money(Decimal::ZERO)
        } else {
            Money(rounded)
        }
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    pub fn abs(self) -> Self {
        Money(self.0.abs())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Add for Money {
    type Output = Money;
    fn add(self, rhs: Self) -> Money {
        Money::from_decimal(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;
    fn sub(self, rhs: Self) -> Money {
        Money::from_decimal(self.0 - rhs.0)
    }
}

impl Neg for Money {
    type Output = Money;
    fn neg(self) -> Money {
        Money::from_decimal(-self.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_canonical() {
        assert_eq!(Money::from_decimal(Decimal::new(0, 2)), Money::zero());
        assert_eq!(Money::from_decimal(-Decimal::new(0, 2)), Money::zero());
    }

    #[test]
    fn from_cents_round_trip() {
        assert_eq!(Money::from_cents(123456).to_cents(), 123456);
        assert_eq!(Money::from_cents(-500).to_cents(), -500);
    }

    #[test]
    fn rounds_half_up() {
        let m = Money::from_decimal(Decimal::new(12345, 3)); // 12.345
        assert_eq!(m.to_string(), "12.35");
    }

    #[test]
    fn add_and_sub() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(250);
        assert_eq!((a + b).to_cents(), 1250);
        assert_eq!((a - b).to_cents(), 750);
    }

    #[test]
    fn sum_over_iterator() {
        let values = vec![Money::from_cents(100), Money::from_cents(200), Money::from_cents(300)];
        let total: Money = values.into_iter().sum();
        assert_eq!(total.to_cents(), 600);
    }

    #[test]
    fn abs_and_is_negative() {
        let neg = Money::from_cents(-500);
        assert!(neg.is_negative());
        assert_eq!(neg.abs().to_cents(), 500);
        assert!(!Money::zero().is_negative());
    }
}
