//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Every amount is a whole number of cents, so every stored value is    │
//! │    already rounded to 2 decimals. Rounding only happens where a rate    │
//! │    is applied (tax) or where input carries extra digits (parsing),     │
//! │    and it is always ROUND HALF UP.                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use dreams_core::money::Money;
//!
//! let price = Money::from_cents(1099);        // $10.99
//! let line = price.checked_multiply_quantity(3).unwrap(); // $32.97
//! let parsed: Money = "10.995".parse().unwrap();
//! assert_eq!(parsed.cents(), 1100);                      // half up
//! assert_eq!(line.cents(), 3297);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use std::str::FromStr;

use crate::error::ValidationError;
use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Arithmetic stays closed under subtraction
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON receipts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use dreams_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Calculates tax, rounding half up (away from zero) to the cent.
    ///
    /// ## Implementation
    /// Integer math on the magnitude: `(|amount| * bps + 5000) / 10000`.
    /// The +5000 provides rounding (5000/10000 = 0.5).
    ///
    /// ## Example
    /// ```rust
    /// use dreams_core::money::Money;
    /// use dreams_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(1050); // $10.50
    /// let rate = TaxRate::from_bps(1600);     // 16% IVA
    ///
    /// // $10.50 × 16% = $1.68
    /// assert_eq!(subtotal.calculate_tax(rate).cents(), 168);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 keeps large subtotals from overflowing before the division
        let magnitude = (self.0 as i128).abs();
        let tax = (magnitude * rate.bps() as i128 + 5000) / 10000;
        let signed = if self.0 < 0 { -tax } else { tax };
        Money::from_cents(signed as i64)
    }

    /// Multiplies money by a quantity, `None` on overflow.
    ///
    /// ## User Workflow
    /// ```text
    /// Product: Audífonos $299.90
    /// Quantity: 3
    ///      │
    ///      ▼
    /// checked_multiply_quantity(3) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Line Subtotal: $899.70
    /// ```
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Money> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds two amounts, `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses a non-negative decimal string into an integer scaled by `10^places`.
///
/// Digits beyond `places` are rounded half up. Accepts an optional leading
/// `$` and thousands separators.
pub(crate) fn parse_decimal(s: &str, field: &str, places: u32) -> Result<i64, ValidationError> {
    let cleaned: String = s
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();

    if cleaned.is_empty() {
        return Err(ValidationError::required(field));
    }
    if cleaned.starts_with('-') {
        return Err(ValidationError::negative(field));
    }

    let (whole, frac) = cleaned.split_once('.').unwrap_or((cleaned.as_str(), ""));

    let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
    if (whole.is_empty() && frac.is_empty()) || !all_digits(whole) || !all_digits(frac) {
        return Err(ValidationError::invalid_format(
            field,
            format!("'{}' is not a decimal number", s.trim()),
        ));
    }

    let overflow = || ValidationError::invalid_format(field, "value is too large");

    let mut value: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| overflow())?
    };

    let mut digits = frac.chars().filter_map(|c| c.to_digit(10)).map(i64::from);
    for _ in 0..places {
        let digit = digits.next().unwrap_or(0);
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(digit))
            .ok_or_else(overflow)?;
    }
    if digits.next().is_some_and(|d| d >= 5) {
        value = value.checked_add(1).ok_or_else(overflow)?;
    }

    Ok(value)
}

/// Parses amounts such as `"10"`, `"10.5"` or `"$1,299.99"`.
///
/// Digits beyond the second decimal are rounded half up, matching how
/// amounts are rounded everywhere else in the engine.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_decimal(s, "amount", 2).map(Money)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `$12.34`. The console applies its configured symbol instead.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.major().abs(), self.minor())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
