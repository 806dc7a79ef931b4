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

// JSON5 text constants
pub(crate) const UNICODE_LEN: usize = 4;

// JSON5 text escape characters constants
pub(crate) const BS: u8 = b'\x5C'; // \\ Backslash
pub(crate) const QU: u8 = b'\x22'; // \" Quotation mark
pub(crate) const AP: u8 = b'\x27'; // \' Apostrophe
pub(crate) const BB: u8 = b'\x08'; // \b Backspace
pub(crate) const FF: u8 = b'\x0C'; // \f Formfeed Page Break
pub(crate) const NN: u8 = b'\x0A'; // \n Newline
pub(crate) const RR: u8 = b'\x0D'; // \r Carriage Return
pub(crate) const TT: u8 = b'\x09'; // \t Horizontal Tab

// JSON5 keyword literals
pub(crate) const LIT_NULL: &[u8] = b"null";
pub(crate) const LIT_TRUE: &[u8] = b"true";
pub(crate) const LIT_FALSE: &[u8] = b"false";
pub(crate) const LIT_INFINITY: &[u8] = b"Infinity";
pub(crate) const LIT_NAN: &[u8] = b"NaN";

// Largest integer magnitude an IEEE double represents exactly, 2^53.
pub(crate) const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_992;
pub(crate) const MAX_SAFE_INTEGER_F64: f64 = 9_007_199_254_740_992.0;

pub(crate) const DEFAULT_MAX_DEPTH: usize = 512;
