use std::fmt;

use rust_decimal::{Decimal, prelude::ToPrimitive};

/// Money amount represented as **integer minor units** (cents).
///
/// Use this type for every monetary value inside the engine (expense
/// amounts, totals, thresholds) to avoid floating-point drift. The API layer
/// speaks [`Decimal`]; conversions in both directions are exact.
///
/// # Examples
///
/// ```rust
/// use engine::Money;
///
/// let amount = Money::new(12_34);
/// assert_eq!(amount.cents(), 1234);
/// assert_eq!(amount.to_string(), "12.34");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Number of fractional digits carried by every amount.
    pub const SCALE: u32 = 2;

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Exact conversion from a decimal value.
    ///
    /// Returns `None` when the value carries more than two significant
    /// fractional digits (`1.005`) or does not fit in `i64` cents. Trailing
    /// zeros are ignored, so `4.500` converts to 450 cents.
    #[must_use]
    pub fn from_decimal(value: Decimal) -> Option<Money> {
        if value.normalize().scale() > Self::SCALE {
            return None;
        }
        value
            .checked_mul(Decimal::ONE_HUNDRED)?
            .trunc()
            .to_i64()
            .map(Money)
    }

    /// The amount as a decimal with exactly two fractional digits.
    #[must_use]
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, Self::SCALE)
    }
}

/// Largest cent count `c` such that `c / 100 <= value`.
///
/// An integer cent amount `a` satisfies `a / 100 > value` exactly when
/// `a > floor_cents(value)`, whatever the scale of `value`. `None` means the
/// result does not fit in `i64`.
pub(crate) fn floor_cents(value: Decimal) -> Option<i64> {
    value
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.floor().to_i64())
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = abs / 100;
        let cents = abs % 100;
        write!(f, "{sign}{units}.{cents:02}")
    }
}
