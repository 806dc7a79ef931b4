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

use std::fmt::Write as _;
use std::io;

use super::constants::*;
use super::error::Error;
use super::error::Result;
use super::number::Number;
use super::value::Value;

const SPACES: &[u8; 64] = b"                                                                ";
const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Serialize a [`Value`] as JSON5 text.
///
/// With `indent == 0` the output is a single line, elements separated by
/// `", "` and keys by `": "`. With `indent > 0` every element goes on its own
/// line, indented by `indent` spaces per nesting level. Trailing commas are
/// never written.
///
/// Fails only when the output buffer cannot grow or an extension value fails
/// to format itself.
///
/// The serializer recurses once per nesting level and has no depth limit of
/// its own. Trees produced by the parser are bounded by
/// [`ParseOptions::max_depth`](crate::ParseOptions::max_depth) and dump
/// safely. A hand-built tree nested far deeper can exhaust the stack.
pub fn dump(value: &Value, indent: usize) -> Result<String> {
    let mut writer = ReserveWriter::default();
    let mut ser = Serializer::new(&mut writer, indent);
    ser.serialize(value)?;
    // SAFETY: the serializer only writes whole `str`s and ASCII bytes.
    Ok(unsafe { String::from_utf8_unchecked(writer.buf) })
}

/// Serialize a [`Value`] as JSON5 text into an `io::Write`.
///
/// Shares the layout and the recursion limits of [`dump`].
pub fn to_writer<W: io::Write>(writer: W, value: &Value, indent: usize) -> Result<()> {
    let mut ser = Serializer::new(writer, indent);
    ser.serialize(value)?;
    ser.writer.flush()?;
    Ok(())
}

// A byte buffer whose growth reports allocation failure as an io error.
#[derive(Default)]
struct ReserveWriter {
    buf: Vec<u8>,
}

impl io::Write for ReserveWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf
            .try_reserve(data.len())
            .map_err(|_| io::Error::from(io::ErrorKind::OutOfMemory))?;
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

struct Serializer<W> {
    writer: W,
    indent: usize,
}

impl<W: io::Write> Serializer<W> {
    fn new(writer: W, indent: usize) -> Serializer<W> {
        Self { writer, indent }
    }

    fn serialize(&mut self, value: &Value) -> Result<()> {
        self.serialize_value(value, 0)
    }

    fn serialize_value(&mut self, value: &Value, level: usize) -> Result<()> {
        match value {
            Value::Null => self.write_bytes(LIT_NULL),
            Value::Bool(true) => self.write_bytes(LIT_TRUE),
            Value::Bool(false) => self.write_bytes(LIT_FALSE),
            Value::Number(n) => self.serialize_number(n),
            Value::String(s) => self.serialize_string(s),
            Value::Array(values) => self.serialize_array(values, level),
            Value::Object(obj) => self.serialize_object(obj, level),
            Value::Extension(ext) => {
                let mut text = String::new();
                write!(text, "{}", ext).map_err(|_| Error::Format)?;
                self.write_bytes(text.as_bytes())
            }
        }
    }

    fn serialize_number(&mut self, n: &Number) -> Result<()> {
        match n {
            Number::Int64(v) => {
                let mut buffer = itoa::Buffer::new();
                self.write_bytes(buffer.format(*v).as_bytes())
            }
            Number::Float64(v) if v.is_finite() => {
                let mut buffer = ryu::Buffer::new();
                self.write_bytes(buffer.format_finite(*v).as_bytes())
            }
            Number::Float64(v) if v.is_nan() => self.write_bytes(LIT_NAN),
            Number::Float64(v) => {
                if v.is_sign_negative() {
                    self.write_bytes(b"-")?;
                }
                self.write_bytes(LIT_INFINITY)
            }
        }
    }

    fn serialize_string(&mut self, s: &str) -> Result<()> {
        let bytes = s.as_bytes();
        self.write_bytes(&[QU])?;
        let mut start = 0;
        for (i, &c) in bytes.iter().enumerate() {
            let escape: &[u8] = match c {
                QU => b"\\\"",
                BS => b"\\\\",
                BB => b"\\b",
                FF => b"\\f",
                NN => b"\\n",
                RR => b"\\r",
                TT => b"\\t",
                0x00..=0x1F => &[
                    BS,
                    b'u',
                    b'0',
                    b'0',
                    HEX_DIGITS[(c >> 4) as usize],
                    HEX_DIGITS[(c & 0xF) as usize],
                ],
                _ => continue,
            };
            if start < i {
                self.write_bytes(&bytes[start..i])?;
            }
            self.write_bytes(escape)?;
            start = i + 1;
        }
        if start < bytes.len() {
            self.write_bytes(&bytes[start..])?;
        }
        self.write_bytes(&[QU])
    }

    fn serialize_array(&mut self, values: &[Value], level: usize) -> Result<()> {
        self.write_bytes(b"[")?;
        if values.is_empty() {
            return self.write_bytes(b"]");
        }
        self.begin_block()?;
        for (i, value) in values.iter().enumerate() {
            self.write_indent(level + 1)?;
            self.serialize_value(value, level + 1)?;
            self.end_element(i + 1 == values.len())?;
        }
        self.write_indent(level)?;
        self.write_bytes(b"]")
    }

    fn serialize_object(&mut self, obj: &crate::Object, level: usize) -> Result<()> {
        self.write_bytes(b"{")?;
        if obj.is_empty() {
            return self.write_bytes(b"}");
        }
        self.begin_block()?;
        for (i, (k, v)) in obj.iter().enumerate() {
            self.write_indent(level + 1)?;
            self.serialize_string(k)?;
            self.write_bytes(b": ")?;
            self.serialize_value(v, level + 1)?;
            self.end_element(i + 1 == obj.len())?;
        }
        self.write_indent(level)?;
        self.write_bytes(b"}")
    }

    #[inline]
    fn begin_block(&mut self) -> Result<()> {
        if self.indent > 0 {
            self.write_bytes(b"\n")?;
        }
        Ok(())
    }

    #[inline]
    fn end_element(&mut self, last: bool) -> Result<()> {
        match (last, self.indent > 0) {
            (false, false) => self.write_bytes(b", "),
            (false, true) => self.write_bytes(b",\n"),
            (true, false) => Ok(()),
            (true, true) => self.write_bytes(b"\n"),
        }
    }

    fn write_indent(&mut self, level: usize) -> Result<()> {
        let mut n = self.indent * level;
        while n > 0 {
            let chunk = n.min(SPACES.len());
            self.write_bytes(&SPACES[..chunk])?;
            n -= chunk;
        }
        Ok(())
    }

    #[inline]
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes)?;
        Ok(())
    }
}
