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

//! `qjson5` is a small, fast [JSON5](https://json5.org/) codec: a recursive-descent
//! parser that turns JSON5 text into a [`Value`] tree, and a serializer that turns a
//! [`Value`] back into text.
//!
//! ## Features
//!
//! - JSON5 syntax: `//` and `/* */` comments, unquoted identifier keys, single-quoted
//!   strings, trailing commas, hexadecimal and `+`/`.`-prefixed numbers,
//!   `Infinity`/`NaN` and string line continuations.
//! - Exact numbers: integers are kept as `i64` whenever the literal is integral and
//!   representable, other literals are converted to correctly rounded `f64`s.
//! - Ordered objects: members keep their first-insertion order, and a repeated key
//!   overwrites the earlier value in place.
//! - Bounded resources: nesting depth is limited and allocation failure is reported
//!   as [`Error::OutOfMemory`] instead of aborting.
//!
//! ## Example
//!
//! ```rust
//! let value = qjson5::parse_value(b"{name: 'qjson5', tags: ['fast', 'small',], hex: 0xff}").unwrap();
//! assert_eq!(value.get("hex").and_then(|v| v.as_i64()), Some(255));
//!
//! let text = qjson5::dump(&value, 0).unwrap();
//! assert_eq!(text, r#"{"name": "qjson5", "tags": ["fast", "small"], "hex": 255}"#);
//! ```
//!
//! Parsing is configurable through [`ParseOptions`]:
//!
//! ```rust
//! use qjson5::ParseOptions;
//!
//! let options = ParseOptions::new().allow_unclosed_comments(false);
//! let err = qjson5::parse_value_with_options(b"1 /* open", &options).unwrap_err();
//! assert_eq!(err.to_string(), "unterminated block comment, pos 2");
//! ```

#![allow(clippy::uninlined_format_args)]

mod constants;
mod de;
mod error;
mod extension;
mod from;
mod number;
mod options;
mod parser;
mod ser;
mod util;
mod value;

pub use de::from_reader;
pub use de::from_str;
pub use error::Error;
pub use error::ParseErrorCode;
pub use error::Result;
pub use extension::Extension;
pub use extension::ExtensionValue;
#[allow(unused_imports)]
pub use from::*;
pub use number::Number;
pub use options::ParseOptions;
pub use parser::parse_value;
pub use parser::parse_value_with_options;
pub use ser::dump;
pub use ser::to_writer;
pub use value::*;
