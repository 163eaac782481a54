//! Header collection used for responses and batch parts.

use crate::http::externals::Headers;
use http::header::{HeaderName, HeaderValue};
use http::HeaderMap;
use std::str::FromStr;

/// An appendable header collection that preserves insertion order.
///
/// Names are compared case-insensitively and stored as given, so headers
/// parsed out of a batch part survive even when they would not be valid
/// `http` header names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderList {
    headers: Vec<(String, String)>,
}

impl HeaderList {
    pub fn new() -> Self {
        Self {
            headers: Vec::new(),
        }
    }

    /// Append a value, keeping any existing values for the same name.
    pub fn append(&mut self, name: &str, value: &str) {
        self.headers.push((name.to_owned(), value.to_owned()));
    }

    /// First value for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Convert to a standard `http::HeaderMap`.
    ///
    /// Entries that are not valid HTTP header names or values are dropped.
    pub fn to_header_map(&self) -> HeaderMap {
        let mut map = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            match (HeaderName::from_str(name), HeaderValue::from_str(value)) {
                (Ok(n), Ok(v)) => {
                    map.append(n, v);
                }
                _ => tracing::debug!(header = %name, "dropping invalid header"),
            }
        }
        map
    }
}

impl From<&HeaderMap> for HeaderList {
    fn from(map: &HeaderMap) -> Self {
        let mut list = HeaderList::new();
        for (name, value) in map {
            list.append(name.as_str(), &String::from_utf8_lossy(value.as_bytes()));
        }
        list
    }
}

impl Headers for HeaderList {
    fn append(&mut self, name: &str, value: &str) {
        HeaderList::append(self, name, value);
    }

    fn get(&self, name: &str) -> Option<&str> {
        HeaderList::get(self, name)
    }
}
