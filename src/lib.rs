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

//! `DECIMAL`/`NUMERIC` value type of the TDS wire protocol.
//!
//! A [`Decimal`] is a sign, a scale and a 128-bit unsigned magnitude held as
//! four 32-bit words, exactly as the protocol transmits it. It converts from
//! and to floats, 64-bit integers and decimal text without silently dropping
//! digits.
//!
//! ## Optional features
//!
//! ### `serde`
//!
//! When this optional dependency is enabled, `Decimal` implements the `serde::Serialize` and
//! `serde::Deserialize` traits.
//!
//! ## Usage
//!
//! To build a decimal from text, use [`Decimal`]'s `FromStr`. The scale is the
//! count of digits after the point:
//!
//! ```
//! use tds_decimal::Decimal;
//!
//! let n: Decimal = "-1234.560".parse().unwrap();
//! assert_eq!(n.scale(), 3);
//! assert_eq!(n.to_string(), "-1234.560");
//! assert_eq!(n.to_bigint().to_string(), "-1234560");
//! ```
//!
//! To build a decimal from Rust primitive types:
//!
//! ```
//! use tds_decimal::Decimal;
//!
//! let n = Decimal::from_i64(-123456, 2);
//! assert_eq!(n.to_string(), "-1234.56");
//!
//! let n = Decimal::from_f64(1234.5).unwrap();
//! assert_eq!(n.to_string(), "1234.5");
//!
//! let n = Decimal::from_f64_with_scale(1234.5, 3).unwrap();
//! assert_eq!(n.to_string(), "1234.500");
//! assert_eq!(n.to_f64(), 1234.5);
//! ```
//!
//! Decimal can be encoded to `DECIMALN` value bytes and decoded from them.
//!
//! ```
//! use tds_decimal::{Decimal, DEFAULT_PRECISION};
//!
//! let n1 = "123456789.987654321".parse::<Decimal>().unwrap();
//! let mut bytes = Vec::new();
//! n1.encode(&mut bytes).unwrap();
//! let n2 = Decimal::decode(DEFAULT_PRECISION, n1.scale(), &bytes).unwrap();
//! assert_eq!(n1, n2);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

mod convert;
mod decimal;
mod error;
mod parse;

#[cfg(feature = "serde")]
mod serde;

pub use crate::convert::MAX_FLOAT_SCALE;
pub use crate::decimal::{Decimal, DEFAULT_PRECISION, MAX_BINARY_SIZE};
pub use crate::error::{DecimalConvertError, DecimalParseError};
pub use ethnum::I256;
