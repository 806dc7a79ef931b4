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

use std::collections::TryReserveError;
use std::fmt::Display;
use std::fmt::Formatter;

/// The kind of syntax error found while parsing JSON5 text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorCode {
    InvalidEOF,
    UnexpectedToken,
    InvalidKey,
    InvalidKeyStart,
    InvalidKeyChar,
    ExpectedColon,
    ExpectedObjectCommaOrEnd,
    ExpectedArrayCommaOrEnd,
    UnterminatedObject,
    UnterminatedArray,
    UnterminatedString,
    UnterminatedComment,
    InvalidHexNumber,
    InvalidNumberValue,
    InvalidStringValue,
    InvalidHex(u8),
    UnexpectedEndOfHexEscape,
    UnexpectedTrailingCharacters,
    RecursionLimitExceeded,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Display for ParseErrorCode {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match *self {
            ParseErrorCode::InvalidEOF => f.write_str("EOF while parsing a value"),
            ParseErrorCode::UnexpectedToken => f.write_str("unexpected token"),
            ParseErrorCode::InvalidKey => f.write_str("invalid key"),
            ParseErrorCode::InvalidKeyStart => f.write_str("invalid unquoted key start"),
            ParseErrorCode::InvalidKeyChar => f.write_str("invalid unquoted key char"),
            ParseErrorCode::ExpectedColon => f.write_str("missing colon"),
            ParseErrorCode::ExpectedObjectCommaOrEnd => f.write_str("expected `}` or `,`"),
            ParseErrorCode::ExpectedArrayCommaOrEnd => f.write_str("expected `]` or `,`"),
            ParseErrorCode::UnterminatedObject => f.write_str("unterminated object"),
            ParseErrorCode::UnterminatedArray => f.write_str("unterminated array"),
            ParseErrorCode::UnterminatedString => f.write_str("unterminated string"),
            ParseErrorCode::UnterminatedComment => f.write_str("unterminated block comment"),
            ParseErrorCode::InvalidHexNumber => f.write_str("invalid hexadecimal number"),
            ParseErrorCode::InvalidNumberValue => f.write_str("invalid number literal"),
            ParseErrorCode::InvalidStringValue => f.write_str("invalid string value"),
            ParseErrorCode::InvalidHex(c) => write!(f, "invalid hex digit `{}`", c as char),
            ParseErrorCode::UnexpectedEndOfHexEscape => f.write_str("unexpected end of hex escape"),
            ParseErrorCode::UnexpectedTrailingCharacters => {
                f.write_str("extra data after top-level value")
            }
            ParseErrorCode::RecursionLimitExceeded => f.write_str("recursion limit exceeded"),
        }
    }
}

#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// A syntax error and the byte offset where it was detected.
    Syntax(ParseErrorCode, usize),
    OutOfMemory,
    /// An extension value failed to format itself during serialization.
    Format,
    Io(std::io::Error),
}

impl Error {
    /// The syntax error kind, if this is a syntax error.
    pub fn code(&self) -> Option<&ParseErrorCode> {
        match self {
            Error::Syntax(code, _) => Some(code),
            _ => None,
        }
    }

    pub fn position(&self) -> Option<usize> {
        match self {
            Error::Syntax(_, pos) => Some(*pos),
            _ => None,
        }
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, Error::Syntax(_, _))
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Error::Syntax(code, pos) => write!(f, "{}, pos {}", code, pos),
            Error::OutOfMemory => f.write_str("out of memory"),
            Error::Format => f.write_str("failed to format extension value"),
            Error::Io(err) => write!(f, "io error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::OutOfMemory => Error::OutOfMemory,
            _ => Error::Io(error),
        }
    }
}

impl From<TryReserveError> for Error {
    fn from(_error: TryReserveError) -> Self {
        Error::OutOfMemory
    }
}

impl From<indexmap::TryReserveError> for Error {
    fn from(_error: indexmap::TryReserveError) -> Self {
        Error::OutOfMemory
    }
}
