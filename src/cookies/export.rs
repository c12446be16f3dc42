//! Decoding of exported cookie sets.
//!
//! Two formats are accepted:
//!
//! - JSON array export, as produced by browser cookie-editor extensions:
//!   `[{"name":"auth_token","value":"...","domain":".x.com",...}, ...]`.
//!   Only `name` and `value` are read; other fields are ignored.
//! - Netscape cookie file (curl/wget format):
//!   `domain\tinclude_subdomains\tpath\tsecure\texpiry\tname\tvalue`.

use crate::base::neterror::NetError;
use serde::Deserialize;

/// A single exported name/value pair.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CookiePair {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

impl CookiePair {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Parse a JSON cookie export.
///
/// The array may be embedded in surrounding text (for example a line of an
/// accounts file); the outermost `[` ... `]` span is decoded. Entries
/// without a `name` are skipped.
pub fn parse_json_export(text: &str) -> Result<Vec<CookiePair>, NetError> {
    let start = text
        .find('[')
        .ok_or_else(|| NetError::decode("cookie export has no opening '['"))?;
    let end = text
        .rfind(']')
        .filter(|end| *end > start)
        .ok_or_else(|| NetError::decode("cookie export has no closing ']'"))?;

    let entries: Vec<serde_json::Value> = serde_json::from_str(&text[start..=end])
        .map_err(|e| NetError::decode(format!("invalid cookie json: {}", e)))?;

    let pairs = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<CookiePair>(entry).ok())
        .collect();

    Ok(pairs)
}

/// Parse a Netscape cookie file.
///
/// Comment and blank lines are skipped, as are rows with fewer than seven
/// columns. `#HttpOnly_` prefixed rows are regular cookies.
pub fn parse_netscape(content: &str) -> Result<Vec<CookiePair>, NetError> {
    let mut pairs = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        let line = line.strip_prefix("#HttpOnly_").unwrap_or(line);

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split('\t').collect();
        if parts.len() < 7 {
            continue;
        }

        pairs.push(CookiePair::new(parts[5], parts[6]));
    }

    if pairs.is_empty() {
        return Err(NetError::decode("netscape cookie file has no cookie rows"));
    }

    Ok(pairs)
}
