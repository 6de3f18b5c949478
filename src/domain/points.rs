//! Ranking points backed by rust_decimal.
//!
//! Points are persisted as canonical decimal text and serialized to JSON as a
//! number. Two fractional digits are kept, matching the ladder's storage scale.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const SCALE: u32 = 2;

/// Points carried by a ranking entry.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Points(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Points {
    pub fn zero() -> Self {
        Points(Decimal::ZERO)
    }

    pub fn from_whole(value: i64) -> Self {
        Points(Decimal::from(value))
    }

    /// Parse points from text, rounding to the storage scale.
    ///
    /// # Errors
    /// Returns an error if the string is not a valid decimal number.
    pub fn parse(s: &str) -> Result<Self, rust_decimal::Error> {
        Decimal::from_str(s.trim()).map(|d| Points(d.round_dp(SCALE)))
    }

    /// Canonical text form without exponent or trailing zeros.
    pub fn to_canonical_string(&self) -> String {
        format!("{}", self.0.normalize())
    }

    pub fn inner(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_canonical_string())
    }
}

impl FromStr for Points {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Decimal> for Points {
    fn from(value: Decimal) -> Self {
        Points(value.round_dp(SCALE))
    }
}

impl std::ops::Add for Points {
    type Output = Points;

    fn add(self, rhs: Points) -> Points {
        Points(self.0 + rhs.0)
    }
}
