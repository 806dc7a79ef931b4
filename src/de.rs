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

use std::io::Read;
use std::str::FromStr;

use super::error::Error;
use super::error::Result;
use super::parser::parse_value;
use super::value::Value;

/// Parse JSON5 text from a string slice.
pub fn from_str(s: &str) -> Result<Value> {
    parse_value(s.as_bytes())
}

/// Read the whole of `reader` and parse it as JSON5 text.
///
/// Read failures are returned as [`Error::Io`].
pub fn from_reader<R: Read>(mut reader: R) -> Result<Value> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    parse_value(&buf)
}

impl FromStr for Value {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        from_str(s)
    }
}
