//! Money type for representing currency amounts
//!
//! Amounts are minor currency units (i64 cents) end to end, so totals never
//! pick up binary floating-point drift. Formatting always prints two
//! decimals behind a currency symbol.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Neg, Sub};

/// A monetary amount in cents
///
/// ```
/// use tallybook::models::Money;
///
/// let rent = Money::from_cents(95000);
/// assert_eq!(rent.to_string(), "$950.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create an amount from a cent count
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// The zero amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// The amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole currency units, truncated toward zero
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// The cent remainder (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Parse user-entered text like "10.50", "$10.50", "-3"
    ///
    /// A minus sign must come before the currency symbol. Digits past the
    /// second decimal place are cut off, not rounded. Amounts too large
    /// for the cent representation are rejected.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();
        let invalid = || MoneyParseError::InvalidFormat(trimmed.to_string());

        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let body = body.strip_prefix('$').unwrap_or(body);

        if !body.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let cents = match body.split_once('.') {
            None => body
                .parse::<i64>()
                .map_err(|_| invalid())?
                .checked_mul(100)
                .ok_or_else(invalid)?,
            Some((whole, frac)) => {
                let units: i64 = whole.parse().map_err(|_| invalid())?;
                let frac_cents = match frac.len() {
                    0 => 0,
                    1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
                    _ => frac
                        .get(..2)
                        .ok_or_else(invalid)?
                        .parse::<i64>()
                        .map_err(|_| invalid())?,
                };
                units
                    .checked_mul(100)
                    .and_then(|whole_cents| whole_cents.checked_add(frac_cents))
                    .ok_or_else(invalid)?
            }
        };

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Format with the given currency symbol ("€42.75", "-€0.50")
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol("$"))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|m| m.0).sum())
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid amount: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
