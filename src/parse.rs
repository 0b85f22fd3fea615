// Copyright 2021 CoD Technologies Corp.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Decimal parsing utilities.

use crate::error::DecimalParseError;
use crate::Decimal;
use ethnum::U256;
use std::str::FromStr;

/// Splits a decimal string at its last point into the unscaled digits and the scale.
///
/// The unscaled digits are written to `buf`.
#[inline]
fn split_point<'a>(s: &'a str, buf: &'a mut String) -> Result<(&'a str, u8), DecimalParseError> {
    match s.rfind('.') {
        None => Ok((s, 0)),
        Some(point) => {
            let (integral, fractional) = (&s[..point], &s[point + 1..]);
            if fractional.len() > u8::MAX as usize {
                return Err(DecimalParseError::ScaleOverflow);
            }

            buf.reserve(integral.len() + fractional.len());
            buf.push_str(integral);
            buf.push_str(fractional);
            Ok((buf.as_str(), fractional.len() as u8))
        }
    }
}

/// Splits off the sign, if any.
#[inline]
fn extract_sign(s: &str) -> (bool, &str) {
    match s.as_bytes().first() {
        Some(b'+') => (false, &s[1..]),
        Some(b'-') => (true, &s[1..]),
        _ => (false, s),
    }
}

/// Parses a string slice and creates a decimal.
///
/// The scale is the count of characters after the last point, so trailing
/// zeros are kept. No whitespace and no exponent is accepted.
fn from_str(s: &str) -> Result<Decimal, DecimalParseError> {
    let mut buf = String::new();
    let (unscaled, scale) = split_point(s, &mut buf)?;
    if unscaled.is_empty() {
        return Err(DecimalParseError::Empty);
    }

    let (negative, digits) = extract_sign(unscaled);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DecimalParseError::Invalid);
    }

    // only digits are left, so any failure is an overflow of 256 bits
    let int = U256::from_str_radix(digits, 10).map_err(|_| DecimalParseError::Overflow)?;
    let (high, low) = int.into_words();
    if high != 0 {
        return Err(DecimalParseError::Overflow);
    }

    Ok(Decimal::from_magnitude(low, scale, !negative || low == 0))
}

impl FromStr for Decimal {
    type Err = DecimalParseError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        from_str(s)
    }
}
