// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Arbitrary-precision rational quantities.
//!
//! Every quantity in the database (work-time fractions, accrual rates,
//! balances) is an exact rational. Parsing accepts integer, fraction,
//! decimal, and mixed decimal-fraction forms; the stored value is always
//! in canonical reduced form.

use crate::error::DomainError;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;

/// An exact rational quantity in canonical reduced form.
///
/// Canonical form keeps the denominator positive and the fraction fully
/// reduced. The textual rendering is a plain integer when the denominator
/// is 1 and `num/den` otherwise, with the sign carried by the numerator.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rational(BigRational);

impl Rational {
    /// Parses a rational from its textual form.
    ///
    /// The accepted shape is `[-]?DIGITS(.DIGITS)?(/[-]?DIGITS(.DIGITS)?)?`:
    /// an optional sign, an integer or decimal body, and an optional `/`
    /// followed by another optionally signed integer or decimal body.
    /// Whitespace is not accepted. Decimals on either side of the `/` are
    /// scaled away by a shared power of ten before reduction, so
    /// `"3.1/12.532"` parses to `775/3133`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidNumber` if the text does not match the
    /// accepted shape or the denominator is zero.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let invalid = || DomainError::InvalidNumber {
            input: input.to_string(),
        };

        let (numerator_text, denominator_text) = match input.split_once('/') {
            Some((numerator, denominator)) => (numerator, Some(denominator)),
            None => (input, None),
        };

        let (numerator_digits, numerator_places) =
            parse_component(numerator_text).ok_or_else(invalid)?;
        let (denominator_digits, denominator_places) = match denominator_text {
            Some(text) => parse_component(text).ok_or_else(invalid)?,
            None => (BigInt::one(), 0),
        };

        if denominator_digits.is_zero() {
            return Err(invalid());
        }

        // Scale both sides by the larger decimal-place count so the
        // fraction is integer over integer before reduction.
        let scale = numerator_places.max(denominator_places);
        let numerator = numerator_digits * pow_ten(scale - numerator_places);
        let denominator = denominator_digits * pow_ten(scale - denominator_places);

        Ok(Self(BigRational::new(numerator, denominator)))
    }

    /// Creates a rational from an integer.
    #[must_use]
    pub fn from_integer(value: i64) -> Self {
        Self(BigRational::from_integer(BigInt::from(value)))
    }

    /// The additive identity.
    #[must_use]
    pub fn zero() -> Self {
        Self(BigRational::zero())
    }

    /// The multiplicative identity.
    #[must_use]
    pub fn one() -> Self {
        Self(BigRational::one())
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Returns `true` if the value is strictly below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }
}

/// Parses one side of a fraction: optional sign, digits, optional single
/// decimal point with digits on both sides of it. Returns the digits with
/// the point stripped and the number of decimal places.
fn parse_component(text: &str) -> Option<(BigInt, usize)> {
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let (whole, fraction) = match body.split_once('.') {
        Some((whole, fraction)) if !fraction.is_empty() => (whole, fraction),
        Some(_) => return None,
        None => (body, ""),
    };

    if whole.is_empty()
        || !whole.bytes().all(|b| b.is_ascii_digit())
        || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let mut digits: BigInt = format!("{whole}{fraction}").parse().ok()?;
    if negative {
        digits = -digits;
    }
    Some((digits, fraction.len()))
}

fn pow_ten(places: usize) -> BigInt {
    num_traits::pow(BigInt::from(10), places)
}

impl std::fmt::Display for Rational {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.denom().is_one() {
            write!(f, "{}", self.0.numer())
        } else {
            write!(f, "{}/{}", self.0.numer(), self.0.denom())
        }
    }
}

impl FromStr for Rational {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Rational {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rational {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

impl Add for Rational {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Rational {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Rational {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Rational {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Mul for Rational {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self(self.0 * rhs.0)
    }
}

impl Div for Rational {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Self(self.0 / rhs.0)
    }
}

impl Neg for Rational {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}
