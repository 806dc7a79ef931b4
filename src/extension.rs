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

use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Write;
use std::sync::Arc;

/// A host-specific value that has no JSON5 counterpart.
///
/// Anything that is `Display + Debug + Send + Sync` qualifies. The serializer
/// writes such values with their own `Display` output, unquoted and
/// unescaped, so the text is not necessarily valid JSON5.
///
/// A `Display` impl that returns an error makes [`dump`](crate::dump) fail
/// with [`Error::Format`](crate::Error::Format), and makes the extension
/// unequal to every other extension, itself included unless it is the same
/// shared handle. Formatting such a [`Value`](crate::Value) through
/// `to_string()` panics, as `ToString` does for any failing `Display`.
pub trait ExtensionValue: Display + Debug + Send + Sync {}

impl<T> ExtensionValue for T where T: Display + Debug + Send + Sync {}

/// Shared handle to an [`ExtensionValue`] stored in a [`Value`](crate::Value).
#[derive(Clone)]
pub struct Extension(Arc<dyn ExtensionValue>);

impl Extension {
    pub fn new<T>(value: T) -> Extension
    where
        T: ExtensionValue + 'static,
    {
        Extension(Arc::new(value))
    }
}

impl Display for Extension {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl Debug for Extension {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

/// Extensions are equal when they render the same text.
impl PartialEq for Extension {
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.0, &other.0) {
            return true;
        }
        match (render(self), render(other)) {
            (Some(l), Some(r)) => l == r,
            _ => false,
        }
    }
}

fn render(ext: &Extension) -> Option<String> {
    let mut text = String::new();
    write!(text, "{}", ext.0).ok()?;
    Some(text)
}
