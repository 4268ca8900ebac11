//! Money - fixed-point currency amount
//!
//! Amounts are stored as an integer count of thousandths, so `50_000_000`
//! represents `50000.000`. All arithmetic is checked; nothing ever rounds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed-point money value with 3 implied decimal places
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Number of smallest units in one whole currency unit
    pub const SCALE: i64 = 1000;

    pub const ZERO: Money = Money(0);

    /// Create from a raw count of thousandths
    #[inline]
    pub const fn from_thousandths(value: i64) -> Self {
        Self(value)
    }

    /// Raw count of thousandths
    #[inline]
    pub const fn thousandths(self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }

    /// Multiply by an integer count (e.g. price per pack times packs)
    pub fn checked_mul(self, count: i64) -> Option<Money> {
        self.0.checked_mul(count).map(Money)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let scale = Self::SCALE.unsigned_abs();
        write!(f, "{sign}{}.{:03}", abs / scale, abs % scale)
    }
}
