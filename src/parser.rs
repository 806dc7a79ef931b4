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
use super::number::scan_number;
use super::number::Number;
use super::options::ParseOptions;
use super::util::is_ident_part;
use super::util::is_ident_start;
use super::util::parse_unicode_escape;
use super::util::try_extend;
use super::util::try_push;
use super::value::Object;
use super::value::Value;

/// Parse JSON5 text into a [`Value`] using the default [`ParseOptions`].
///
/// The whole input must be a single value, optionally surrounded by
/// whitespace and comments.
pub fn parse_value(buf: &[u8]) -> Result<Value> {
    parse_value_with_options(buf, &ParseOptions::default())
}

/// Parse JSON5 text into a [`Value`] with explicit [`ParseOptions`].
pub fn parse_value_with_options(buf: &[u8], options: &ParseOptions) -> Result<Value> {
    let mut parser = Parser::new(buf, *options);
    parser.parse()
}

struct Parser<'a> {
    buf: &'a [u8],
    idx: usize,
    depth: usize,
    options: ParseOptions,
}

impl<'a> Parser<'a> {
    fn new(buf: &'a [u8], options: ParseOptions) -> Parser<'a> {
        Self {
            buf,
            idx: 0,
            depth: 0,
            options,
        }
    }

    fn parse(&mut self) -> Result<Value> {
        self.skip_trivia()?;
        let value = self.parse_json_value()?;
        self.skip_trivia()?;
        if self.idx < self.buf.len() {
            return Err(self.error(ParseErrorCode::UnexpectedTrailingCharacters));
        }
        Ok(value)
    }

    fn parse_json_value(&mut self) -> Result<Value> {
        let c = match self.peek() {
            Some(c) => c,
            None => return Err(self.error(ParseErrorCode::InvalidEOF)),
        };
        match c {
            b'{' => self.parse_json_object(),
            b'[' => self.parse_json_array(),
            QU | AP => self.parse_json_string().map(Value::String),
            b't' => self.parse_literal(LIT_TRUE, Value::Bool(true)),
            b'f' => self.parse_literal(LIT_FALSE, Value::Bool(false)),
            b'n' => self.parse_literal(LIT_NULL, Value::Null),
            b'I' => self.parse_literal(LIT_INFINITY, Value::Number(Number::Float64(f64::INFINITY))),
            b'N' => self.parse_literal(LIT_NAN, Value::Number(Number::Float64(f64::NAN))),
            b'-' | b'+' | b'.' | b'0'..=b'9' => {
                let n = scan_number(self.buf, &mut self.idx)?;
                Ok(Value::Number(n))
            }
            _ => Err(self.error(ParseErrorCode::UnexpectedToken)),
        }
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.buf.get(self.idx).copied()
    }

    #[inline]
    fn error(&self, code: ParseErrorCode) -> Error {
        Error::Syntax(code, self.idx)
    }

    /// Skip whitespace, control bytes and comments.
    fn skip_trivia(&mut self) -> Result<()> {
        while let Some(c) = self.peek() {
            if c <= 0x20 {
                self.idx += 1;
                continue;
            }
            if c != b'/' {
                break;
            }
            let body = self.idx + 2;
            match self.buf.get(self.idx + 1) {
                Some(b'/') => {
                    self.idx = match self.buf[body..].iter().position(|&c| c == NN) {
                        Some(pos) => body + pos + 1,
                        None => self.buf.len(),
                    };
                }
                Some(b'*') => {
                    match self.buf[body..].windows(2).position(|w| w == b"*/") {
                        Some(pos) => self.idx = body + pos + 2,
                        None if self.options.allow_unclosed_comments => {
                            self.idx = self.buf.len();
                        }
                        None => return Err(self.error(ParseErrorCode::UnterminatedComment)),
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    fn parse_literal(&mut self, literal: &[u8], value: Value) -> Result<Value> {
        if self.buf[self.idx..].starts_with(literal) {
            self.idx += literal.len();
            Ok(value)
        } else {
            Err(self.error(ParseErrorCode::UnexpectedToken))
        }
    }

    #[inline]
    fn enter_container(&mut self) -> Result<()> {
        if self.depth >= self.options.max_depth {
            return Err(self.error(ParseErrorCode::RecursionLimitExceeded));
        }
        self.depth += 1;
        Ok(())
    }

    fn parse_json_string(&mut self) -> Result<String> {
        let start = self.idx;
        let quote = self.buf[start];
        self.idx += 1;

        let mut data = Vec::new();
        loop {
            let rest = &self.buf[self.idx..];
            let Some(pos) = rest.iter().position(|&c| c == quote || c == BS) else {
                self.idx = self.buf.len();
                return Err(self.error(ParseErrorCode::UnterminatedString));
            };
            try_extend(&mut data, &rest[..pos])?;
            self.idx += pos + 1;
            if rest[pos] == quote {
                break;
            }

            let Some(escaped) = self.peek() else {
                return Err(self.error(ParseErrorCode::UnterminatedString));
            };
            self.idx += 1;
            match escaped {
                b'n' => try_push(&mut data, NN)?,
                b't' => try_push(&mut data, TT)?,
                b'r' => try_push(&mut data, RR)?,
                b'b' => try_push(&mut data, BB)?,
                b'f' => try_push(&mut data, FF)?,
                // line continuation
                NN => {}
                RR => {
                    if self.peek() == Some(NN) {
                        self.idx += 1;
                    }
                }
                b'u' if self.options.decode_unicode_escapes => {
                    parse_unicode_escape(self.buf, &mut self.idx, &mut data)?;
                }
                c => try_push(&mut data, c)?,
            }
        }

        String::from_utf8(data)
            .map_err(|_| Error::Syntax(ParseErrorCode::InvalidStringValue, start))
    }

    fn parse_json_key(&mut self) -> Result<String> {
        if matches!(self.peek(), Some(QU) | Some(AP)) {
            return self.parse_json_string();
        }
        let start = self.idx;
        let rest = &self.buf[start..];
        let len = rest
            .iter()
            .position(|&c| c == b':' || c <= 0x20 || c == b',' || c == b'}' || c == b'/')
            .unwrap_or(rest.len());
        let key = &rest[..len];

        if key.is_empty() {
            return Err(self.error(ParseErrorCode::InvalidKey));
        }
        if !is_ident_start(key[0]) {
            return Err(self.error(ParseErrorCode::InvalidKeyStart));
        }
        if let Some(pos) = key[1..].iter().position(|&c| !is_ident_part(c)) {
            return Err(Error::Syntax(ParseErrorCode::InvalidKeyChar, start + 1 + pos));
        }
        self.idx += len;

        let mut name = String::new();
        name.try_reserve(len)?;
        // identifier bytes are all ASCII
        name.extend(key.iter().map(|&c| c as char));
        Ok(name)
    }

    fn parse_json_array(&mut self) -> Result<Value> {
        self.enter_container()?;
        self.idx += 1;

        let mut values = Vec::new();
        loop {
            self.skip_trivia()?;
            match self.peek() {
                None => return Err(self.error(ParseErrorCode::UnterminatedArray)),
                Some(b']') => {
                    self.idx += 1;
                    break;
                }
                Some(_) => {}
            }

            let value = self.parse_json_value()?;
            try_push(&mut values, value)?;

            self.skip_trivia()?;
            match self.peek() {
                None => return Err(self.error(ParseErrorCode::UnterminatedArray)),
                Some(b',') => self.idx += 1,
                Some(b']') => {
                    self.idx += 1;
                    break;
                }
                Some(_) => return Err(self.error(ParseErrorCode::ExpectedArrayCommaOrEnd)),
            }
        }

        self.depth -= 1;
        Ok(Value::Array(values))
    }

    fn parse_json_object(&mut self) -> Result<Value> {
        self.enter_container()?;
        self.idx += 1;

        let mut obj = Object::new();
        loop {
            self.skip_trivia()?;
            match self.peek() {
                None => return Err(self.error(ParseErrorCode::UnterminatedObject)),
                Some(b'}') => {
                    self.idx += 1;
                    break;
                }
                Some(_) => {}
            }

            let key = self.parse_json_key()?;

            self.skip_trivia()?;
            match self.peek() {
                None => return Err(self.error(ParseErrorCode::UnterminatedObject)),
                Some(b':') => self.idx += 1,
                Some(_) => return Err(self.error(ParseErrorCode::ExpectedColon)),
            }

            self.skip_trivia()?;
            if self.peek().is_none() {
                return Err(self.error(ParseErrorCode::UnterminatedObject));
            }
            let value = self.parse_json_value()?;
            obj.try_reserve(1)?;
            obj.insert(key, value);

            self.skip_trivia()?;
            match self.peek() {
                None => return Err(self.error(ParseErrorCode::UnterminatedObject)),
                Some(b',') => self.idx += 1,
                Some(b'}') => {
                    self.idx += 1;
                    break;
                }
                Some(_) => return Err(self.error(ParseErrorCode::ExpectedObjectCommaOrEnd)),
            }
        }

        self.depth -= 1;
        Ok(Value::Object(obj))
    }
}
