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

//! Conversion between `Decimal` and primitive number types.

use crate::decimal::Decimal;
use crate::DecimalConvertError;
use std::convert::TryFrom;

/// Largest scale a float can be converted with.
pub const MAX_FLOAT_SCALE: u8 = 38;

/// Largest absolute float value accepted, i.e. 2^128.
const MAX_F64_REPR: f64 = 3.402823669209385e+38;

const WORD_BASE: f64 = 4294967296.0;

pub(crate) const POWERS_10_F64: [f64; MAX_FLOAT_SCALE as usize + 1] = [
    1e0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8, 1e9, 1e10, 1e11, 1e12, 1e13, 1e14, 1e15, 1e16, 1e17, 1e18,
    1e19, 1e20, 1e21, 1e22, 1e23, 1e24, 1e25, 1e26, 1e27, 1e28, 1e29, 1e30, 1e31, 1e32, 1e33, 1e34, 1e35,
    1e36, 1e37, 1e38,
];

impl Decimal {
    /// Converts a float to a decimal with the smallest scale that makes the
    /// value an integer at float resolution.
    ///
    /// Values that never become integral within [`MAX_FLOAT_SCALE`] digits are
    /// truncated to that scale.
    #[inline]
    pub fn from_f64(value: f64) -> Result<Decimal, DecimalConvertError> {
        float_to_decimal(value, None)
    }

    /// Converts a float to a decimal with exactly `scale` fractional digits,
    /// truncating the rest.
    ///
    /// `scale` larger than [`MAX_FLOAT_SCALE`] is an overflow.
    #[inline]
    pub fn from_f64_with_scale(value: f64, scale: u8) -> Result<Decimal, DecimalConvertError> {
        float_to_decimal(value, Some(scale))
    }

    /// Converts `self` to the nearest float.
    pub fn to_f64(&self) -> f64 {
        let mut v = 0f64;
        for &word in self.words.iter().rev() {
            v = v * WORD_BASE + word as f64;
        }

        if !self.positive {
            v = -v;
        }

        if self.scale != 0 {
            v /= match POWERS_10_F64.get(self.scale as usize) {
                Some(&power) => power,
                None => 10f64.powi(self.scale as i32),
            };
        }

        v
    }

    /// Creates a decimal of `val * 10^-scale`.
    ///
    /// `i64::MIN` cannot be negated, so it always yields
    /// `-9223372036854775808` with scale 0 and `scale` is ignored.
    #[inline]
    pub const fn from_i64(val: i64, scale: u8) -> Decimal {
        if val == i64::MIN {
            return Decimal::from_parts([0, 0x8000_0000, 0, 0], crate::DEFAULT_PRECISION, 0, false);
        }

        let positive = val >= 0;
        let abs = val.unsigned_abs();
        Decimal::from_parts(
            [abs as u32, (abs >> 32) as u32, 0, 0],
            crate::DEFAULT_PRECISION,
            scale,
            positive,
        )
    }
}

fn float_to_decimal(value: f64, scale: Option<u8>) -> Result<Decimal, DecimalConvertError> {
    if value.is_nan() || value.is_infinite() {
        return Err(DecimalConvertError::Invalid);
    }

    let positive = value >= 0.0;
    let value = value.abs();
    if value > MAX_F64_REPR {
        return Err(DecimalConvertError::Overflow);
    }

    let (scale, int) = match scale {
        Some(scale) => {
            let power = POWERS_10_F64
                .get(scale as usize)
                .ok_or(DecimalConvertError::Overflow)?;
            (scale, value * power)
        }
        None => find_scale(value),
    };

    let magnitude = pack(int.trunc())?;
    Ok(Decimal::from_magnitude(magnitude, scale, positive))
}

/// Scans the powers of ten for the first one making `value` integral.
fn find_scale(value: f64) -> (u8, f64) {
    for (scale, power) in POWERS_10_F64.iter().enumerate() {
        let int = value * power;
        if int.fract() == 0.0 {
            return (scale as u8, int);
        }
    }

    (MAX_FLOAT_SCALE, value * POWERS_10_F64[MAX_FLOAT_SCALE as usize])
}

/// Converts a non-negative integral float to a 128-bit magnitude.
#[inline]
fn pack(int: f64) -> Result<u128, DecimalConvertError> {
    debug_assert!(int >= 0.0 && int.fract() == 0.0);

    // 2^128 itself is representable as a float but not as a magnitude
    if int >= MAX_F64_REPR {
        return Err(DecimalConvertError::Overflow);
    }

    Ok(int as u128)
}

impl TryFrom<f64> for Decimal {
    type Error = DecimalConvertError;

    #[inline]
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Decimal::from_f64(value)
    }
}

impl From<&Decimal> for f64 {
    #[inline]
    fn from(val: &Decimal) -> Self {
        val.to_f64()
    }
}

impl From<Decimal> for f64 {
    #[inline]
    fn from(val: Decimal) -> Self {
        val.to_f64()
    }
}

impl From<&Decimal> for f32 {
    #[inline]
    fn from(val: &Decimal) -> Self {
        val.to_f64() as f32
    }
}

impl From<Decimal> for f32 {
    #[inline]
    fn from(val: Decimal) -> Self {
        f32::from(&val)
    }
}

macro_rules! impl_from_small_int {
    ($ty: ty) => {
        impl From<$ty> for Decimal {
            #[inline]
            fn from(val: $ty) -> Self {
                Decimal::from_i64(val as i64, 0)
            }
        }
    };
    ($($ty: ty), * $(,)?) => {
        $(impl_from_small_int!($ty);)*
    };
}

impl_from_small_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Decimal {
    #[inline]
    fn from(val: u64) -> Self {
        Decimal::from_magnitude(val as u128, 0, true)
    }
}

impl From<bool> for Decimal {
    #[inline]
    fn from(b: bool) -> Self {
        if b {
            Decimal::ONE
        } else {
            Decimal::ZERO
        }
    }
}

impl TryFrom<&Decimal> for i64 {
    type Error = DecimalConvertError;

    /// Converts the integral part, truncating the fraction toward zero.
    #[inline]
    fn try_from(value: &Decimal) -> Result<Self, Self::Error> {
        let int_val = match 10u128.checked_pow(value.scale as u32) {
            Some(power) => value.magnitude() / power,
            None => 0,
        };

        if value.is_sign_negative() {
            if int_val > i64::MAX as u128 + 1 {
                Err(DecimalConvertError::Overflow)
            } else {
                Ok((int_val as i64).wrapping_neg())
            }
        } else if int_val > i64::MAX as u128 {
            Err(DecimalConvertError::Overflow)
        } else {
            Ok(int_val as i64)
        }
    }
}

impl TryFrom<Decimal> for i64 {
    type Error = DecimalConvertError;

    #[inline]
    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        i64::try_from(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryInto;

    #[test]
    fn test_powers_ten() {
        for (i, power) in POWERS_10_F64.iter().enumerate() {
            let expected = format!("1e{}", i).parse::<f64>().unwrap();
            assert_eq!(*power, expected);
        }
        assert_eq!(MAX_F64_REPR, 2f64.powi(128));
    }

    fn assert_from_f64(val: f64, expected: &str) {
        let decimal = Decimal::from_f64(val).unwrap();
        assert_eq!(decimal.to_string(), expected);
        assert_eq!(decimal.precision(), crate::DEFAULT_PRECISION);
    }

    fn assert_from_f64_with_scale(val: f64, scale: u8, expected: &str) {
        let decimal = Decimal::from_f64_with_scale(val, scale).unwrap();
        assert_eq!(decimal.scale(), scale);
        assert_eq!(decimal.to_string(), expected);
    }

    #[test]
    fn test_from_f64() {
        assert_from_f64(0.0, "0");
        assert_from_f64(-0.0, "0");
        assert_from_f64(1.0, "1");
        assert_from_f64(-1.0, "-1");
        assert_from_f64(0.5, "0.5");
        assert_from_f64(-1234.5, "-1234.5");
        assert_from_f64(123456789.0, "123456789");
        assert_from_f64(9007199254740992.0, "9007199254740992");
        assert_from_f64(1e20, "100000000000000000000");
        assert_from_f64(2f64.powi(127), "170141183460469231731687303715884105728");

        let d = Decimal::from_f64(1234.0001).unwrap();
        assert!(d.scale() >= 4);
        assert!((d.to_f64() - 1234.0001).abs() < 0.0001);
    }

    #[test]
    fn test_from_f64_saturates_scale() {
        let d = Decimal::from_f64(1e-300).unwrap();
        assert_eq!(d.scale(), MAX_FLOAT_SCALE);
        assert!(d.is_zero());

        let d = Decimal::from_f64(-1.5e-30).unwrap();
        assert!(d.scale() <= MAX_FLOAT_SCALE);
        assert!(d.is_sign_negative());
        assert!((d.to_f64() + 1.5e-30).abs() < 1e-37);
    }

    #[test]
    fn test_from_f64_with_scale() {
        assert_from_f64_with_scale(0.0, 0, "0");
        assert_from_f64_with_scale(1.0, 2, "1.00");
        assert_from_f64_with_scale(-1234.5, 0, "-1234");
        assert_from_f64_with_scale(-1234.5, 1, "-1234.5");
        assert_from_f64_with_scale(-1234.5, 3, "-1234.500");
        assert_from_f64_with_scale(0.25, 1, "0.2");
        assert_from_f64_with_scale(1.0, 20, "1.00000000000000000000");
        assert_eq!(Decimal::from_f64_with_scale(1.0, MAX_FLOAT_SCALE).unwrap().scale(), MAX_FLOAT_SCALE);
    }

    #[test]
    fn test_from_f64_error() {
        fn assert_error(val: f64, scale: Option<u8>, expected: DecimalConvertError) {
            let result = match scale {
                Some(scale) => Decimal::from_f64_with_scale(val, scale),
                None => Decimal::from_f64(val),
            };
            assert_eq!(result.unwrap_err(), expected);
        }

        assert_error(f64::NAN, None, DecimalConvertError::Invalid);
        assert_error(f64::NAN, Some(2), DecimalConvertError::Invalid);
        assert_error(f64::INFINITY, None, DecimalConvertError::Invalid);
        assert_error(f64::INFINITY, Some(0), DecimalConvertError::Invalid);
        assert_error(f64::NEG_INFINITY, Some(5), DecimalConvertError::Invalid);
        assert_error(3.5e38, None, DecimalConvertError::Overflow);
        assert_error(-3.5e38, Some(0), DecimalConvertError::Overflow);
        assert_error(f64::MAX, None, DecimalConvertError::Overflow);
        assert_error(MAX_F64_REPR, None, DecimalConvertError::Overflow);
        assert_error(1.0, Some(MAX_FLOAT_SCALE + 1), DecimalConvertError::Overflow);
        assert_error(1e30, Some(10), DecimalConvertError::Overflow);

        let result: Result<Decimal, _> = f64::NAN.try_into();
        assert_eq!(result.unwrap_err(), DecimalConvertError::Invalid);
    }

    #[test]
    fn test_to_f64() {
        fn assert_to_f64(words: [u32; 4], scale: u8, positive: bool, expected: f64) {
            let d = Decimal::from_parts(words, crate::DEFAULT_PRECISION, scale, positive);
            assert_eq!(d.to_f64(), expected);
            assert_eq!(f64::from(d), expected);
        }

        assert_to_f64([0; 4], 0, true, 0.0);
        assert_to_f64([1, 0, 0, 0], 0, true, 1.0);
        assert_to_f64([123456, 0, 0, 0], 2, false, -1234.56);
        assert_to_f64([0, 1, 0, 0], 0, true, 4294967296.0);
        assert_to_f64([0, 0, 1, 0], 0, true, 18446744073709551616.0);
        assert_to_f64([0, 0, 0, 1], 0, true, 2f64.powi(96));

        let tiny = Decimal::from_parts([5, 0, 0, 0], crate::DEFAULT_PRECISION, 40, true).to_f64();
        assert!((tiny - 5e-40).abs() < 1e-54);
        assert_eq!(f32::from(Decimal::from_i64(-15, 1)), -1.5f32);
    }

    #[test]
    fn test_from_i64() {
        fn assert_from_i64(val: i64, scale: u8, expected: &str) {
            let d = Decimal::from_i64(val, scale);
            assert_eq!(d.to_string(), expected);
            assert_eq!(d.precision(), crate::DEFAULT_PRECISION);
        }

        assert_from_i64(0, 0, "0");
        assert_from_i64(1, 0, "1");
        assert_from_i64(-1, 0, "-1");
        assert_from_i64(-123456, 2, "-1234.56");
        assert_from_i64(i64::MAX, 0, "9223372036854775807");
        assert_from_i64(i64::MAX, 5, "92233720368547.75807");
        assert_from_i64(-i64::MAX, 0, "-9223372036854775807");
        assert_from_i64(5, 10, "0.0000000005");

        let d = Decimal::from_i64(0x1_2345_6789, 3);
        assert_eq!(d.words(), [0x2345_6789, 1, 0, 0]);
        assert_eq!(d.scale(), 3);
    }

    #[test]
    fn test_from_i64_min() {
        for scale in [0u8, 1, 2, 10, 38, 255].iter() {
            let d = Decimal::from_i64(i64::MIN, *scale);
            assert_eq!(d.scale(), 0);
            assert_eq!(d.words(), [0, 0x8000_0000, 0, 0]);
            assert!(d.is_sign_negative());
            assert_eq!(d.to_f64(), -9223372036854775808.0);
            assert_eq!(d.to_string(), "-9223372036854775808");
        }
    }

    #[test]
    fn test_i64_to_f64() {
        let values = [
            0i64,
            1,
            -1,
            42,
            -1234,
            4294967295,
            4294967296,
            -4294967297,
            9007199254740993,
            i64::MAX,
            i64::MIN + 1,
        ];
        for &val in values.iter() {
            for &scale in [0u8, 1, 2, 9, 18, 38].iter() {
                let actual = Decimal::from_i64(val, scale).to_f64();
                let expected = val as f64 / POWERS_10_F64[scale as usize];
                let tolerance = expected.abs() * 1e-15;
                assert!(
                    (actual - expected).abs() <= tolerance,
                    "{} scale {}: {} != {}",
                    val,
                    scale,
                    actual,
                    expected
                );
            }
            assert_eq!(Decimal::from_i64(val, 0).to_f64(), val as f64);
        }
    }

    #[test]
    fn test_from_small_int() {
        assert_eq!(Decimal::from(-128i8).to_string(), "-128");
        assert_eq!(Decimal::from(32767i16).to_string(), "32767");
        assert_eq!(Decimal::from(i32::MIN).to_string(), "-2147483648");
        assert_eq!(Decimal::from(i64::MIN).to_string(), "-9223372036854775808");
        assert_eq!(Decimal::from(255u8).to_string(), "255");
        assert_eq!(Decimal::from(u32::MAX).to_string(), "4294967295");
        assert_eq!(Decimal::from(u64::MAX).to_string(), "18446744073709551615");
        assert_eq!(Decimal::from(true), Decimal::ONE);
        assert_eq!(Decimal::from(false), Decimal::ZERO);
    }

    #[test]
    fn test_into_i64() {
        fn assert_into(val: Decimal, expected: i64) {
            assert_eq!(i64::try_from(val).unwrap(), expected);
        }

        fn assert_into_overflow(val: Decimal) {
            assert_eq!(i64::try_from(&val).unwrap_err(), DecimalConvertError::Overflow);
        }

        assert_into(Decimal::ZERO, 0);
        assert_into(Decimal::from_i64(-123456, 2), -1234);
        assert_into(Decimal::from_i64(199, 2), 1);
        assert_into(Decimal::from_i64(i64::MIN, 0), i64::MIN);
        assert_into(Decimal::from_i64(i64::MAX, 0), i64::MAX);
        assert_into(Decimal::from_parts([u32::MAX; 4], 20, 200, true), 0);
        assert_into_overflow(Decimal::from(u64::MAX));
        assert_into_overflow(Decimal::from_parts([1, 0x8000_0000, 0, 0], 20, 0, false));
    }
}
