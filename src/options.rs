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

use crate::constants::DEFAULT_MAX_DEPTH;

/// Configuration options for the JSON5 parser.
///
/// The defaults describe the lenient dialect accepted by [`parse_value`](crate::parse_value).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Whether a `/* ...` block comment left open at end of input is accepted.
    ///
    /// When `false`, an unclosed block comment is reported as
    /// [`ParseErrorCode::UnterminatedComment`](crate::ParseErrorCode::UnterminatedComment).
    ///
    /// # Default
    ///
    /// `true`
    pub allow_unclosed_comments: bool,

    /// Whether `\uXXXX` escapes in strings are decoded into characters.
    ///
    /// When `false`, the backslash is dropped and the remaining bytes are
    /// copied, so `"\u0041"` parses to the string `u0041`.
    ///
    /// # Default
    ///
    /// `false`
    pub decode_unicode_escapes: bool,

    /// Maximum nesting depth of arrays and objects.
    ///
    /// # Default
    ///
    /// `512`
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            allow_unclosed_comments: true,
            decode_unicode_escapes: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allow_unclosed_comments(mut self, allow: bool) -> Self {
        self.allow_unclosed_comments = allow;
        self
    }

    pub fn decode_unicode_escapes(mut self, decode: bool) -> Self {
        self.decode_unicode_escapes = decode;
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
