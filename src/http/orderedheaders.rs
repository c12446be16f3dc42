use crate::base::neterror::NetError;
use http::header::{HeaderName, HeaderValue};
use http::HeaderMap;
use std::str::FromStr;

/// A header map that strictly preserves insertion order.
///
/// Browser-shaped requests are partly identified by header order, so every
/// request the crate sends is assembled through this type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedHeaderMap {
    headers: Vec<(HeaderName, HeaderValue)>,
}

impl OrderedHeaderMap {
    pub fn new() -> Self {
        Self {
            headers: Vec::new(),
        }
    }

    /// Insert a header. An existing entry with the same (case-insensitive)
    /// name is updated in place and keeps its position; otherwise the
    /// header is appended.
    pub fn insert(&mut self, name: &str, value: &str) -> Result<(), NetError> {
        let name_header = HeaderName::from_str(name).map_err(|_| {
            tracing::debug!(name = %name, "rejecting invalid header name");
            NetError::InvalidHeader
        })?;
        let value_header = HeaderValue::from_str(value).map_err(|_| {
            tracing::debug!(name = %name, "rejecting invalid header value");
            NetError::InvalidHeader
        })?;

        // HeaderName is lowercased on parse, so equality is case-insensitive.
        if let Some((_, v)) = self.headers.iter_mut().find(|(n, _)| *n == name_header) {
            *v = value_header;
        } else {
            self.headers.push((name_header, value_header));
        }
        Ok(())
    }

    pub fn remove(&mut self, name: &str) {
        if let Ok(target) = HeaderName::from_str(name) {
            self.headers.retain(|(n, _)| *n != target);
        }
    }

    pub fn get(&self, name: &str) -> Option<&HeaderValue> {
        let target = HeaderName::from_str(name).ok()?;
        self.headers
            .iter()
            .find(|(n, _)| *n == target)
            .map(|(_, v)| v)
    }

    /// Value as text, when it is visible ASCII.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&HeaderName, &HeaderValue)> {
        self.headers.iter().map(|(n, v)| (n, v))
    }

    /// Header names in wire order.
    pub fn names(&self) -> Vec<&str> {
        self.headers.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Consumes the map and returns a standard `http::HeaderMap`.
    /// `http::HeaderMap` iterates in insertion order for distinct names.
    pub fn to_header_map(self) -> HeaderMap {
        let mut map = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in self.headers {
            map.append(name, value);
        }
        map
    }
}

/// Generate a `sec-ch-ua` header value for Chrome-based browsers.
///
/// Format: `"Brand";v="version", ...`
pub fn generate_sec_ch_ua(browser: &str, version: u16, include_not_a_brand: bool) -> String {
    let mut brands = Vec::with_capacity(3);

    brands.push(format!("\"Chromium\";v=\"{}\"", version));

    match browser.to_lowercase().as_str() {
        "chrome" => brands.push(format!("\"Google Chrome\";v=\"{}\"", version)),
        "edge" => brands.push(format!("\"Microsoft Edge\";v=\"{}\"", version)),
        _ => brands.push(format!("\"{}\";v=\"{}\"", browser, version)),
    }

    if include_not_a_brand {
        brands.push("\"Not-A.Brand\";v=\"99\"".to_string());
    }

    brands.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut headers = OrderedHeaderMap::new();
        headers.insert("Content-Type", "application/json").unwrap();
        assert_eq!(headers.get_str("content-type"), Some("application/json"));
    }

    #[test]
    fn test_case_insensitive_get() {
        let mut headers = OrderedHeaderMap::new();
        headers.insert("X-CSRF-TOKEN", "abc").unwrap();
        assert!(headers.contains("x-csrf-token"));
        assert!(headers.contains("X-Csrf-Token"));
    }

    #[test]
    fn test_update_keeps_position() {
        let mut headers = OrderedHeaderMap::new();
        headers.insert("accept", "*/*").unwrap();
        headers.insert("content-type", "application/x-www-form-urlencoded").unwrap();
        headers.insert("user-agent", "test").unwrap();
        headers.insert("Content-Type", "application/json").unwrap();

        assert_eq!(headers.names(), vec!["accept", "content-type", "user-agent"]);
        assert_eq!(headers.get_str("content-type"), Some("application/json"));
        assert_eq!(headers.len(), 3);
    }

    #[test]
    fn test_remove_header() {
        let mut headers = OrderedHeaderMap::new();
        headers.insert("X-Custom", "value").unwrap();
        headers.remove("x-custom");
        assert!(headers.is_empty());
    }

    #[test]
    fn test_to_header_map_preserves_order() {
        let mut headers = OrderedHeaderMap::new();
        headers.insert("authorization", "Bearer t").unwrap();
        headers.insert("cookie", "a=b").unwrap();
        headers.insert("x-csrf-token", "t").unwrap();

        let map = headers.to_header_map();
        let names: Vec<_> = map.keys().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["authorization", "cookie", "x-csrf-token"]);
    }

    #[test]
    fn test_invalid_header_name() {
        let mut headers = OrderedHeaderMap::new();
        assert_eq!(
            headers.insert("Invalid Header", "value"),
            Err(NetError::InvalidHeader)
        );
    }

    #[test]
    fn test_invalid_header_value() {
        let mut headers = OrderedHeaderMap::new();
        assert_eq!(
            headers.insert("valid", "invalid\nvalue"),
            Err(NetError::InvalidHeader)
        );
        assert!(headers.is_empty());
    }

    #[test]
    fn test_sec_ch_ua_chrome() {
        let ua = generate_sec_ch_ua("Chrome", 133, true);
        assert_eq!(
            ua,
            "\"Chromium\";v=\"133\", \"Google Chrome\";v=\"133\", \"Not-A.Brand\";v=\"99\""
        );
    }

    #[test]
    fn test_sec_ch_ua_without_fake_brand() {
        let ua = generate_sec_ch_ua("Edge", 132, false);
        assert!(ua.contains("Microsoft Edge"));
        assert!(!ua.contains("Not-A.Brand"));
    }
}
