use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// A sum of money expressed in the smallest currency unit (cents).
///
/// Operation and debt sums are plain `i64` minor units; `Money` is the
/// presentation wrapper collaborators use to read them from user input and
/// render them back.
///
/// ```rust
/// use engine::Money;
///
/// assert_eq!(Money::new(1050).to_string(), "10.50");
/// assert_eq!("10,5".parse::<Money>().unwrap().minor(), 1050);
/// assert!("1.234".parse::<Money>().is_err());
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    #[must_use]
    pub const fn new(minor: i64) -> Self {
        Self(minor)
    }

    /// Raw value in minor units.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }
}

/// Adds two minor-unit amounts, failing with [`EngineError::AmountOverflow`].
pub(crate) fn checked_add(lhs: i64, rhs: i64, what: &'static str) -> Result<i64, EngineError> {
    lhs.checked_add(rhs).ok_or(EngineError::AmountOverflow(what))
}

/// Subtracts two minor-unit amounts, failing with [`EngineError::AmountOverflow`].
pub(crate) fn checked_sub(lhs: i64, rhs: i64, what: &'static str) -> Result<i64, EngineError> {
    lhs.checked_sub(rhs).ok_or(EngineError::AmountOverflow(what))
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl FromStr for Money {
    type Err = EngineError;

    /// Parses a decimal amount typed by a user.
    ///
    /// Accepts `.` or `,` as separator and at most 2 fractional digits.
    /// Negative amounts are rejected: every sum in a room is positive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |msg: &str| EngineError::InvalidAmount(format!("{msg}: {}", s.trim()));

        let raw = s.trim().strip_prefix('+').unwrap_or(s.trim());
        if raw.is_empty() {
            return Err(EngineError::InvalidAmount("empty amount".to_string()));
        }
        if raw.starts_with('-') {
            return Err(invalid("amount must not be negative"));
        }

        let (units, fraction) = match raw.split_once(['.', ',']) {
            Some((units, fraction)) => (units, fraction),
            None => (raw, ""),
        };
        let is_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if units.is_empty() || !is_digits(units) || !is_digits(fraction) {
            return Err(invalid("invalid amount"));
        }
        if fraction.len() > 2 {
            return Err(invalid("too many decimals"));
        }

        let units: i64 = units.parse().map_err(|_| invalid("amount too large"))?;
        let cents = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid("invalid amount"))? * 10,
            _ => fraction.parse::<i64>().map_err(|_| invalid("invalid amount"))?,
        };

        units
            .checked_mul(100)
            .and_then(|v| v.checked_add(cents))
            .map(Money)
            .ok_or_else(|| invalid("amount too large"))
    }
}
