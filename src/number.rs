// Copyright 2023 Datafuse Labs.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::cmp::Ordering;
use std::fmt::Display;
use std::fmt::Formatter;

use num_traits::ToPrimitive;
use ordered_float::OrderedFloat;
use serde::de;
use serde::de::Deserialize;
use serde::de::Deserializer;
use serde::de::Visitor;
use serde::ser::Serialize;
use serde::ser::Serializer;

use crate::constants::LIT_INFINITY;
use crate::constants::LIT_NAN;
use crate::constants::MAX_SAFE_INTEGER;
use crate::constants::MAX_SAFE_INTEGER_F64;
use crate::error::Error;
use crate::error::ParseErrorCode;
use crate::error::Result;
use crate::util::decode_hex_val;

// Exponents beyond this are clamped; the result is already 0 or infinity.
const MAX_EXPONENT: i64 = 1_000_000;

/// Represents a JSON5 number.
///
/// Integral values are kept as `Int64`. A value that went through a double,
/// because its literal had a fraction or an exponent or because it was built
/// from an `f64`, is `Int64` only when it is integral and its magnitude is at
/// most 2^53, otherwise it stays `Float64`.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    /// 64-bit signed integer
    Int64(i64),
    /// 64-bit floating-point
    Float64(f64),
}

impl Number {
    /// Builds a number from a double, applying the safe-integer classification.
    pub fn from_f64(v: f64) -> Number {
        if v.fract() == 0.0 && v.abs() <= MAX_SAFE_INTEGER_F64 {
            if let Some(i) = v.to_i64() {
                return Number::Int64(i);
            }
        }
        Number::Float64(v)
    }

    /// Builds a number from an unsigned integer, falling back to a double
    /// when it does not fit an `i64`.
    pub fn from_u64(v: u64) -> Number {
        match i64::try_from(v) {
            Ok(i) => Number::Int64(i),
            Err(_) => Number::Float64(v as f64),
        }
    }

    pub fn is_i64(&self) -> bool {
        matches!(self, Number::Int64(_))
    }

    pub fn is_f64(&self) -> bool {
        matches!(self, Number::Float64(_))
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Int64(v) => Some(*v),
            Number::Float64(_) => None,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Int64(v) => *v as f64,
            Number::Float64(v) => *v,
        }
    }
}

impl Default for Number {
    fn default() -> Self {
        Number::Int64(0)
    }
}

fn cmp_int_float(i: i64, f: f64) -> Ordering {
    match OrderedFloat(i as f64).cmp(&OrderedFloat(f)) {
        // `f` is integral here and within the i64 range after rounding.
        Ordering::Equal => (i as i128).cmp(&(f as i128)),
        ord => ord,
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Number::Int64(l), Number::Int64(r)) => l.cmp(r),
            (Number::Float64(l), Number::Float64(r)) => OrderedFloat(*l).cmp(&OrderedFloat(*r)),
            (Number::Int64(l), Number::Float64(r)) => cmp_int_float(*l, *r),
            (Number::Float64(l), Number::Int64(r)) => cmp_int_float(*r, *l).reverse(),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Number {}

impl Display for Number {
    /// Formats the number as JSON5 text.
    ///
    /// Finite doubles use the shortest representation that reads back to the
    /// same value. Non-finite doubles use the JSON5 keywords.
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Number::Int64(v) => {
                let mut buffer = itoa::Buffer::new();
                f.write_str(buffer.format(*v))
            }
            Number::Float64(v) => {
                if v.is_nan() {
                    f.write_str("NaN")
                } else if v.is_infinite() {
                    if v.is_sign_negative() {
                        f.write_str("-Infinity")
                    } else {
                        f.write_str("Infinity")
                    }
                } else {
                    let mut buffer = ryu::Buffer::new();
                    f.write_str(buffer.format_finite(*v))
                }
            }
        }
    }
}

impl Serialize for Number {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Number::Int64(v) => serializer.serialize_i64(*v),
            Number::Float64(v) => serializer.serialize_f64(*v),
        }
    }
}

impl<'de> Deserialize<'de> for Number {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NumberVisitor;

        impl Visitor<'_> for NumberVisitor {
            type Value = Number;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a number (int64, uint64, or float64)")
            }

            fn visit_i64<E>(self, v: i64) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Number::Int64(v))
            }

            fn visit_u64<E>(self, v: u64) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Number::from_u64(v))
            }

            fn visit_f64<E>(self, v: f64) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Number::from_f64(v))
            }
        }
        deserializer.deserialize_any(NumberVisitor)
    }
}

#[inline]
fn step_digits(buf: &[u8], idx: &mut usize) -> usize {
    let start = *idx;
    while let Some(c) = buf.get(*idx) {
        if !c.is_ascii_digit() {
            break;
        }
        *idx += 1;
    }
    *idx - start
}

/// Scan a JSON5 numeric literal starting at `*idx` and advance past it.
///
/// Recognizes, in order:
/// - an optional `+` or `-` sign
/// - `Infinity` and `NaN`
/// - hexadecimal integers such as `0xdecaf`
/// - decimals with optional leading or trailing dot (`.5`, `5.`) and an optional exponent
///
/// Plain integer literals keep their exact value when they fit an `i64` and
/// promote to a double on overflow. Literals with a fraction or exponent are
/// integers only if their exact value is integral and within 2^53.
pub(crate) fn scan_number(buf: &[u8], idx: &mut usize) -> Result<Number> {
    let mut negative = false;
    match buf.get(*idx) {
        Some(b'-') => {
            negative = true;
            *idx += 1;
        }
        Some(b'+') => {
            *idx += 1;
        }
        _ => {}
    }

    let rest = &buf[*idx..];
    if rest.starts_with(LIT_INFINITY) {
        *idx += LIT_INFINITY.len();
        let v = if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        return Ok(Number::Float64(v));
    }
    if rest.starts_with(LIT_NAN) {
        *idx += LIT_NAN.len();
        return Ok(Number::Float64(f64::NAN));
    }
    if rest.len() >= 2 && rest[0] == b'0' && (rest[1] == b'x' || rest[1] == b'X') {
        *idx += 2;
        return scan_hex(buf, idx, negative);
    }

    let unsigned_start = *idx;
    step_digits(buf, idx);
    let int_digits = &buf[unsigned_start..*idx];

    let mut has_fraction = false;
    let mut frac_digits: &[u8] = &[];
    if buf.get(*idx) == Some(&b'.') {
        has_fraction = true;
        *idx += 1;
        let frac_start = *idx;
        step_digits(buf, idx);
        frac_digits = &buf[frac_start..*idx];
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return Err(Error::Syntax(ParseErrorCode::InvalidNumberValue, *idx));
    }

    let mut exponent = None;
    if matches!(buf.get(*idx), Some(b'e') | Some(b'E')) {
        *idx += 1;
        let mut exp_negative = false;
        match buf.get(*idx) {
            Some(b'-') => {
                exp_negative = true;
                *idx += 1;
            }
            Some(b'+') => {
                *idx += 1;
            }
            _ => {}
        }
        let exp_start = *idx;
        if step_digits(buf, idx) == 0 {
            return Err(Error::Syntax(ParseErrorCode::InvalidNumberValue, *idx));
        }
        let mut exp = 0_i64;
        for d in &buf[exp_start..*idx] {
            exp = (exp * 10 + (d - b'0') as i64).min(MAX_EXPONENT);
        }
        exponent = Some(if exp_negative { -exp } else { exp });
    }

    if !has_fraction && exponent.is_none() {
        if let Some(v) = integer_from_digits(int_digits, negative) {
            return Ok(Number::Int64(v));
        }
    } else if let Some(v) = exact_integral(int_digits, frac_digits, exponent.unwrap_or(0)) {
        if v <= MAX_SAFE_INTEGER {
            let v = v as i64;
            return Ok(Number::Int64(if negative { -v } else { v }));
        }
    }

    let v = parse_float(int_digits, frac_digits, exponent, &buf[unsigned_start..*idx])
        .ok_or(Error::Syntax(ParseErrorCode::InvalidNumberValue, *idx))?;
    Ok(Number::Float64(if negative { -v } else { v }))
}

fn scan_hex(buf: &[u8], idx: &mut usize, negative: bool) -> Result<Number> {
    let start = *idx;
    let mut value = 0_u64;
    // Set once the digits no longer fit a u64.
    let mut approx: Option<f64> = None;
    while let Some(n) = buf.get(*idx).and_then(|c| decode_hex_val(*c)) {
        let n = n as u64;
        approx = match approx {
            Some(a) => Some(a * 16.0 + n as f64),
            None => match value.checked_mul(16).and_then(|v| v.checked_add(n)) {
                Some(v) => {
                    value = v;
                    None
                }
                None => Some(value as f64 * 16.0 + n as f64),
            },
        };
        *idx += 1;
    }
    if *idx == start {
        return Err(Error::Syntax(ParseErrorCode::InvalidHexNumber, *idx));
    }

    if let Some(a) = approx {
        return Ok(Number::Float64(if negative { -a } else { a }));
    }
    if negative {
        if value <= 1 << 63 {
            Ok(Number::Int64((value as i64).wrapping_neg()))
        } else {
            Ok(Number::Float64(-(value as f64)))
        }
    } else {
        Ok(Number::from_u64(value))
    }
}

/// Accumulate decimal digits into an `i64`, `None` on overflow.
fn integer_from_digits(digits: &[u8], negative: bool) -> Option<i64> {
    let mut value = 0_u64;
    for d in digits {
        value = value.checked_mul(10)?.checked_add((d - b'0') as u64)?;
    }
    if negative {
        if value <= 1 << 63 {
            Some((value as i64).wrapping_neg())
        } else {
            None
        }
    } else {
        i64::try_from(value).ok()
    }
}

/// The exact magnitude of `int.frac × 10^exponent` if it is an integer that
/// fits a `u64`.
fn exact_integral(int_digits: &[u8], frac_digits: &[u8], exponent: i64) -> Option<u64> {
    let total = int_digits.len() + frac_digits.len();
    let trailing_zeros = int_digits
        .iter()
        .chain(frac_digits)
        .rev()
        .take_while(|d| **d == b'0')
        .count();
    if trailing_zeros == total {
        return Some(0);
    }
    let scale = exponent - frac_digits.len() as i64 + trailing_zeros as i64;
    if scale < 0 {
        return None;
    }
    let mut value = 0_u64;
    for d in int_digits.iter().chain(frac_digits).take(total - trailing_zeros) {
        value = value.checked_mul(10)?.checked_add((d - b'0') as u64)?;
    }
    let scale = u32::try_from(scale).ok()?;
    value.checked_mul(10_u64.checked_pow(scale)?)
}

/// Correctly rounded conversion of the unsigned decimal literal to a double.
fn parse_float(
    int_digits: &[u8],
    frac_digits: &[u8],
    exponent: Option<i64>,
    literal: &[u8],
) -> Option<f64> {
    if let Ok(v) = fast_float2::parse::<f64, _>(literal) {
        return Some(v);
    }
    // Spell out forms like `.5` or `5.e3` in full.
    let mut normalized = String::with_capacity(literal.len() + 24);
    if int_digits.is_empty() {
        normalized.push('0');
    } else {
        normalized.push_str(std::str::from_utf8(int_digits).ok()?);
    }
    normalized.push('.');
    if frac_digits.is_empty() {
        normalized.push('0');
    } else {
        normalized.push_str(std::str::from_utf8(frac_digits).ok()?);
    }
    if let Some(exp) = exponent {
        normalized.push('e');
        normalized.push_str(itoa::Buffer::new().format(exp));
    }
    fast_float2::parse::<f64, _>(normalized.as_bytes()).ok()
}
