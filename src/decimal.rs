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

//! Decimal implementation.

use crate::error::DecimalConvertError;
use ethnum::I256;
use stack_buf::StackVec;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::io;

/// Precision tag carried by every decimal built from a float, an integer or text.
pub const DEFAULT_PRECISION: u8 = 20;
/// Maximum binary data size of `Decimal`, i.e. one sign byte and 16 magnitude bytes.
pub const MAX_BINARY_SIZE: usize = 17;

const SIGN_POSITIVE: u8 = 1;
const SIGN_NEGATIVE: u8 = 0;

/// Large enough for a sign, `0.` and 255 fractional digits.
pub(crate) type Buf = StackVec<u8, 260>;

/// Fixed-point decimal in the layout of the TDS `DECIMAL`/`NUMERIC` types.
///
/// The unscaled magnitude is an unsigned 128-bit integer stored as four 32-bit
/// words, least significant first. The value is `magnitude * 10^-scale`,
/// negated when the sign is negative.
#[derive(Copy, Clone, Debug)]
pub struct Decimal {
    pub(crate) words: [u32; 4],
    // `true` for zero and positive values; a negative zero is representable
    pub(crate) positive: bool,
    pub(crate) precision: u8,
    pub(crate) scale: u8,
}

impl Decimal {
    /// Zero value, i.e. `0`.
    pub const ZERO: Decimal = Decimal {
        words: [0; 4],
        positive: true,
        precision: DEFAULT_PRECISION,
        scale: 0,
    };

    /// i.e. `1`.
    pub const ONE: Decimal = Decimal {
        words: [1, 0, 0, 0],
        positive: true,
        precision: DEFAULT_PRECISION,
        scale: 0,
    };

    /// Creates a `Decimal` from the fields a wire decoder reads off the stream.
    ///
    /// `words` holds the unscaled magnitude, least significant word first.
    #[inline]
    pub const fn from_parts(words: [u32; 4], precision: u8, scale: u8, positive: bool) -> Decimal {
        Decimal {
            words,
            positive,
            precision,
            scale,
        }
    }

    #[inline]
    pub(crate) const fn from_magnitude(magnitude: u128, scale: u8, positive: bool) -> Decimal {
        Decimal {
            words: [
                magnitude as u32,
                (magnitude >> 32) as u32,
                (magnitude >> 64) as u32,
                (magnitude >> 96) as u32,
            ],
            positive,
            precision: DEFAULT_PRECISION,
            scale,
        }
    }

    /// Returns the magnitude words, least significant first.
    #[inline]
    pub const fn words(&self) -> [u32; 4] {
        self.words
    }

    /// Returns the unscaled magnitude.
    #[inline]
    pub const fn magnitude(&self) -> u128 {
        (self.words[0] as u128)
            | ((self.words[1] as u128) << 32)
            | ((self.words[2] as u128) << 64)
            | ((self.words[3] as u128) << 96)
    }

    /// Returns the precision tag. It is not a count of digits.
    #[inline]
    pub const fn precision(&self) -> u8 {
        self.precision
    }

    /// Returns the scale, i.e. the count of decimal digits in the fractional part.
    #[inline]
    pub const fn scale(&self) -> u8 {
        self.scale
    }

    /// Returns `true` if the decimal is less than zero.
    #[inline]
    pub const fn is_sign_negative(&self) -> bool {
        !self.positive && !self.is_zero()
    }

    /// Returns `true` if the decimal is zero or greater.
    #[inline]
    pub const fn is_sign_positive(&self) -> bool {
        !self.is_sign_negative()
    }

    /// Checks if `self` is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.words[0] == 0 && self.words[1] == 0 && self.words[2] == 0 && self.words[3] == 0
    }

    /// Returns the signed unscaled value.
    pub fn to_bigint(&self) -> I256 {
        let mut bytes = [0u8; 16];
        for (chunk, word) in bytes.chunks_exact_mut(4).zip(self.words.iter().rev()) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }

        let int = I256::from_words(0, u128::from_be_bytes(bytes) as i128);
        if self.positive {
            int
        } else {
            -int
        }
    }

    /// Returns the unscaled magnitude as minimal big-endian bytes, without sign.
    ///
    /// Zero has no bytes.
    #[inline]
    pub fn unscaled_bytes(&self) -> Vec<u8> {
        let bytes = self.magnitude().to_be_bytes();
        let start = bytes.iter().take_while(|b| **b == 0).count();
        bytes[start..].to_vec()
    }

    /// Encodes `self` to `writer` as a `DECIMALN` value: a sign byte followed
    /// by the magnitude in 4, 8, 12 or 16 little-endian bytes, whichever is the
    /// smallest that holds it.
    ///
    /// Returns total size on success, which is not larger than [`MAX_BINARY_SIZE`].
    pub fn encode<W: io::Write>(&self, mut writer: W) -> io::Result<usize> {
        let magnitude = self.magnitude();
        let int_bytes: [u8; 16] = magnitude.to_le_bytes();

        let used = (128 - magnitude.leading_zeros() as usize + 7) / 8;
        let width = ((used + 3) / 4).max(1) * 4;

        let sign = if self.is_sign_negative() {
            SIGN_NEGATIVE
        } else {
            SIGN_POSITIVE
        };
        writer.write_all(&[sign])?;
        writer.write_all(&int_bytes[..width])?;

        Ok(width + 1)
    }

    /// Decodes a `DECIMALN` value whose precision and scale come from the
    /// column metadata.
    pub fn decode(precision: u8, scale: u8, bytes: &[u8]) -> Result<Decimal, DecimalConvertError> {
        let (&sign, int_bytes) = bytes.split_first().ok_or(DecimalConvertError::Invalid)?;

        if !matches!(int_bytes.len(), 4 | 8 | 12 | 16) {
            return Err(DecimalConvertError::Invalid);
        }

        let positive = match sign {
            SIGN_POSITIVE => true,
            SIGN_NEGATIVE => false,
            _ => return Err(DecimalConvertError::Invalid),
        };

        let mut words = [0u32; 4];
        for (word, chunk) in words.iter_mut().zip(int_bytes.chunks_exact(4)) {
            *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }

        Ok(Decimal::from_parts(words, precision, scale, positive))
    }

    /// Writes the digits with the decimal point `scale` digits from the right.
    /// Fractional zeros are kept, they are part of the value.
    pub(crate) fn fmt_internal<W: fmt::Write>(&self, append_sign: bool, mut w: W) -> fmt::Result {
        use std::fmt::Write;

        const ZERO_BUF: [u8; 256] = [b'0'; 256];

        if append_sign && self.is_sign_negative() {
            w.write_byte(b'-')?;
        }

        let mut buf = StackVec::<u8, 40>::new();
        write!(&mut buf, "{}", self.magnitude())?;
        let digits = buf.as_slice();

        let scale = self.scale as usize;
        let len = digits.len();
        if scale == 0 {
            w.write_bytes(digits)?;
        } else if len <= scale {
            w.write_byte(b'0')?;
            w.write_byte(b'.')?;
            w.write_bytes(&ZERO_BUF[..scale - len])?;
            w.write_bytes(digits)?;
        } else {
            let (int_digits, frac_digits) = digits.split_at(len - scale);
            w.write_bytes(int_digits)?;
            w.write_byte(b'.')?;
            w.write_bytes(frac_digits)?;
        }

        Ok(())
    }
}

trait WriteExt: fmt::Write {
    #[inline(always)]
    fn write_byte(&mut self, byte: u8) -> fmt::Result {
        self.write_bytes(&[byte])
    }

    #[inline(always)]
    fn write_bytes(&mut self, bytes: &[u8]) -> fmt::Result {
        let s = unsafe { std::str::from_utf8_unchecked(bytes) };
        self.write_str(s)
    }
}

impl<W: fmt::Write> WriteExt for W {}

impl fmt::Display for Decimal {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut buf = Buf::new();
        self.fmt_internal(false, &mut buf)?;
        let str = unsafe { std::str::from_utf8_unchecked(buf.as_slice()) };
        f.pad_integral(self.is_sign_positive(), "", str)
    }
}

impl Default for Decimal {
    #[inline]
    fn default() -> Self {
        Decimal::ZERO
    }
}

impl PartialEq for Decimal {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.scale == other.scale
            && self.words == other.words
            && self.is_sign_negative() == other.is_sign_negative()
    }
}

impl Eq for Decimal {}

impl Hash for Decimal {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.words.hash(state);
        self.scale.hash(state);
        self.is_sign_negative().hash(state);
    }
}
