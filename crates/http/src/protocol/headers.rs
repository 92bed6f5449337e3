//! Header collection shared by requests and responses.
//!
//! Field names are stored lower-cased so lookups are case-insensitive. Setting a
//! field that already exists appends the new value to the old one separated by
//! `", "`, the way repeated fields are combined on the wire.

use std::collections::BTreeMap;
use std::collections::btree_map;

use http::header;

/// A case-insensitive mapping of field name to field value.
///
/// Iteration yields fields ordered by their lower-cased name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    inner: BTreeMap<String, String>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// The headers written with every generated response: the given
    /// `content-length`, `connection: close` and a plain text content type.
    pub fn default_response(content_length: usize) -> Self {
        let mut headers = Self::new();
        headers.set(header::CONTENT_LENGTH.as_str(), content_length.to_string());
        headers.set(header::CONNECTION.as_str(), "close");
        headers.set(header::CONTENT_TYPE.as_str(), mime::TEXT_PLAIN.essence_str());
        headers
    }

    /// Returns the value stored for `name`, ignoring ASCII case.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Parses the value stored for `name` as an unsigned integer, falling back to
    /// `default` when the field is absent or its value is not a number.
    pub fn get_int(&self, name: &str, default: usize) -> usize {
        self.get(name).and_then(|value| value.trim().parse().ok()).unwrap_or(default)
    }

    /// Declared body size, 0 when missing or unparseable.
    pub fn content_length(&self) -> usize {
        self.get_int(header::CONTENT_LENGTH.as_str(), 0)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains_key(&name.to_ascii_lowercase())
    }

    /// Inserts `value` under `name`, or merges it into the existing value as
    /// `"<old>, <value>"`.
    pub fn set<V: Into<String>>(&mut self, name: &str, value: V) {
        let value = value.into();
        match self.inner.entry(name.to_ascii_lowercase()) {
            btree_map::Entry::Vacant(entry) => {
                entry.insert(value);
            }
            btree_map::Entry::Occupied(mut entry) => {
                let existing = entry.get_mut();
                existing.push_str(", ");
                existing.push_str(&value);
            }
        }
    }

    /// Overwrites any value stored under `name`.
    pub fn replace<V: Into<String>>(&mut self, name: &str, value: V) {
        self.inner.insert(name.to_ascii_lowercase(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.inner.remove(&name.to_ascii_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case() {
        let mut headers = Headers::new();
        headers.set("Content-Type", "text/html");

        assert_eq!(headers.get("content-type"), Some("text/html"));
        assert_eq!(headers.get("CONTENT-TYPE"), Some("text/html"));
        assert!(headers.contains("Content-type"));
        assert_eq!(headers.get("MissingKey"), None);
    }

    #[test]
    fn set_joins_repeated_fields() {
        let mut headers = Headers::new();
        headers.set("Host", "a");
        headers.set("host", "b");
        headers.set("HOST", "c");

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("host"), Some("a, b, c"));
    }

    #[test]
    fn replace_overwrites() {
        let mut headers = Headers::default_response(0);
        headers.replace("Content-Type", "text/html");
        headers.replace("content-length", "42");

        assert_eq!(headers.get("content-type"), Some("text/html"));
        assert_eq!(headers.content_length(), 42);
        assert_eq!(headers.len(), 3);
    }

    #[test]
    fn get_int_falls_back_to_default() {
        let mut headers = Headers::new();
        assert_eq!(headers.get_int("content-length", 7), 7);

        headers.set("content-length", "abc");
        assert_eq!(headers.get_int("content-length", 7), 7);

        headers.replace("content-length", "-5");
        assert_eq!(headers.get_int("content-length", 0), 0);

        headers.replace("content-length", " 13 ");
        assert_eq!(headers.get_int("content-length", 0), 13);
    }

    #[test]
    fn default_response_headers() {
        let headers = Headers::default_response(12);
        let fields: Vec<_> = headers.iter().collect();

        assert_eq!(fields, vec![("connection", "close"), ("content-length", "12"), ("content-type", "text/plain")]);
    }

    #[test]
    fn remove_field() {
        let mut headers = Headers::new();
        headers.set("X-Trace", "1");

        assert_eq!(headers.remove("x-trace"), Some("1".to_string()));
        assert!(headers.is_empty());
    }
}
