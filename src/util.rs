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

use super::constants::*;
use super::error::Error;
use super::error::ParseErrorCode;
use super::error::Result;

#[allow(clippy::zero_prefixed_literal)]
static HEX: [u8; 256] = {
    const __: u8 = 255; // not a hex digit
    [
        //   1   2   3   4   5   6   7   8   9   A   B   C   D   E   F
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 0
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 1
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 2
        00, 01, 02, 03, 04, 05, 06, 07, 08, 09, __, __, __, __, __, __, // 3
        __, 10, 11, 12, 13, 14, 15, __, __, __, __, __, __, __, __, __, // 4
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 5
        __, 10, 11, 12, 13, 14, 15, __, __, __, __, __, __, __, __, __, // 6
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 7
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 8
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 9
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // A
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // B
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // C
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // D
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // E
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // F
    ]
};

#[inline]
pub(crate) fn is_ident_start(c: u8) -> bool {
    c == b'_' || c == b'$' || c.is_ascii_alphabetic()
}

#[inline]
pub(crate) fn is_ident_part(c: u8) -> bool {
    c == b'_' || c == b'$' || c.is_ascii_alphanumeric()
}

/// Append `bytes`, reporting allocation failure instead of aborting.
#[inline]
pub(crate) fn try_extend(buf: &mut Vec<u8>, bytes: &[u8]) -> Result<()> {
    buf.try_reserve(bytes.len())?;
    buf.extend_from_slice(bytes);
    Ok(())
}

#[inline]
pub(crate) fn try_push<T>(buf: &mut Vec<T>, value: T) -> Result<()> {
    if buf.len() == buf.capacity() {
        buf.try_reserve(buf.capacity().max(4))?;
    }
    buf.push(value);
    Ok(())
}

/// Decode the `XXXX` of a `\u` escape at `*idx` into UTF-8 bytes.
///
/// A high surrogate followed by an escaped low surrogate is combined into a
/// single code point. A lone surrogate is copied back as its original
/// `\uXXXX` text, and `*idx` is left on whatever follows it.
pub(crate) fn parse_unicode_escape(buf: &[u8], idx: &mut usize, out: &mut Vec<u8>) -> Result<()> {
    let numbers = read_unicode_digits(buf, idx)?;
    let hex = decode_hex_escape(&numbers, *idx)?;

    let c = match hex {
        0xDC00..=0xDFFF => {
            // Low surrogate without preceding high surrogate
            return encode_invalid_unicode(&numbers, out);
        }

        // Non-BMP characters are encoded as a sequence of two hex
        // escapes, representing UTF-16 surrogates.
        n1 @ 0xD800..=0xDBFF => {
            let lower = match buf.get(*idx..*idx + 2 + UNICODE_LEN) {
                Some(next) if next.starts_with(b"\\u") => {
                    decode_hex_escape(&next[2..], *idx + 2 + UNICODE_LEN).ok()
                }
                _ => None,
            };
            match lower {
                Some(n2 @ 0xDC00..=0xDFFF) => {
                    *idx += 2 + UNICODE_LEN;
                    #[allow(clippy::precedence)]
                    let n = (((n1 - 0xD800) as u32) << 10 | (n2 - 0xDC00) as u32) + 0x1_0000;
                    match char::from_u32(n) {
                        Some(ch) => ch,
                        None => return encode_invalid_unicode(&numbers, out),
                    }
                }
                // The following escape is not consumed and decodes on its own.
                _ => return encode_invalid_unicode(&numbers, out),
            }
        }

        n => match char::from_u32(n as u32) {
            Some(ch) => ch,
            None => return encode_invalid_unicode(&numbers, out),
        },
    };
    let mut utf8 = [0_u8; 4];
    try_extend(out, c.encode_utf8(&mut utf8).as_bytes())
}

#[inline]
fn read_unicode_digits(buf: &[u8], idx: &mut usize) -> Result<[u8; UNICODE_LEN]> {
    let mut numbers = [0_u8; UNICODE_LEN];
    match buf.get(*idx..*idx + UNICODE_LEN) {
        Some(digits) => numbers.copy_from_slice(digits),
        None => {
            return Err(Error::Syntax(
                ParseErrorCode::UnexpectedEndOfHexEscape,
                *idx,
            ))
        }
    }
    *idx += UNICODE_LEN;
    Ok(numbers)
}

#[inline]
fn encode_invalid_unicode(numbers: &[u8], out: &mut Vec<u8>) -> Result<()> {
    try_extend(out, b"\\u")?;
    try_extend(out, numbers)
}

#[inline]
pub(crate) fn decode_hex_val(val: u8) -> Option<u16> {
    let n = HEX[val as usize] as u16;
    if n == 255 {
        None
    } else {
        Some(n)
    }
}

#[inline]
fn decode_hex_escape(numbers: &[u8], idx: usize) -> Result<u16> {
    let mut n = 0;
    for number in numbers {
        if let Some(hex) = decode_hex_val(*number) {
            n = (n << 4) + hex;
        } else {
            return Err(Error::Syntax(ParseErrorCode::InvalidHex(*number), idx));
        }
    }
    Ok(n)
}
