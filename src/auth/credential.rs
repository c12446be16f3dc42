use crate::base::neterror::NetError;
use crate::cookies::export::{self, CookiePair};
use std::fmt;
use zeroize::Zeroizing;

/// Length at which a "raw secret" is assumed to be something else.
///
/// A real `auth_token` is 40 hex characters; anything at or above this
/// threshold is rejected rather than guessed at.
pub const RAW_SECRET_MAX_LEN: usize = 60;

/// How the caller authenticates the account.
///
/// The variant is chosen explicitly by the caller; nothing sniffs the
/// credential text to decide.
#[derive(Clone)]
pub enum Credential {
    /// A bare `auth_token` value. A fresh security token is generated.
    RawSecret(Zeroizing<String>),
    /// A pre-exported cookie set, expected to contain `auth_token` and `ct0`.
    StructuredCookies(Vec<CookiePair>),
}

impl Credential {
    pub fn raw(secret: impl Into<String>) -> Self {
        Credential::RawSecret(Zeroizing::new(secret.into()))
    }

    pub fn cookies(pairs: Vec<CookiePair>) -> Self {
        Credential::StructuredCookies(pairs)
    }

    /// Decode a JSON cookie export (see [`export::parse_json_export`]).
    pub fn from_json_export(text: &str) -> Result<Self, NetError> {
        export::parse_json_export(text).map(Credential::StructuredCookies)
    }

    /// Decode a Netscape cookie file (see [`export::parse_netscape`]).
    pub fn from_netscape(content: &str) -> Result<Self, NetError> {
        export::parse_netscape(content).map(Credential::StructuredCookies)
    }

    /// Look up a pair by name in a structured credential.
    pub fn cookie(&self, name: &str) -> Option<&str> {
        match self {
            Credential::RawSecret(_) => None,
            Credential::StructuredCookies(pairs) => pairs
                .iter()
                .rev()
                .find(|p| p.name == name)
                .map(|p| p.value.as_str()),
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credential::RawSecret(_) => f.write_str("RawSecret(<redacted>)"),
            Credential::StructuredCookies(pairs) => f
                .debug_tuple("StructuredCookies")
                .field(&pairs.iter().map(|p| p.name.as_str()).collect::<Vec<_>>())
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secret() {
        let cred = Credential::raw("0123456789abcdef");
        let out = format!("{:?}", cred);
        assert!(!out.contains("0123456789abcdef"));
        assert!(out.contains("redacted"));
    }

    #[test]
    fn test_debug_lists_only_names() {
        let cred = Credential::cookies(vec![CookiePair::new("auth_token", "hidden")]);
        let out = format!("{:?}", cred);
        assert!(out.contains("auth_token"));
        assert!(!out.contains("hidden"));
    }

    #[test]
    fn test_cookie_lookup_last_wins() {
        let cred = Credential::cookies(vec![
            CookiePair::new("ct0", "old"),
            CookiePair::new("ct0", "new"),
        ]);
        assert_eq!(cred.cookie("ct0"), Some("new"));
        assert_eq!(Credential::raw("x").cookie("ct0"), None);
    }

    #[test]
    fn test_from_json_export() {
        let cred = Credential::from_json_export(r#"[{"name":"ct0","value":"Y"}]"#).unwrap();
        assert_eq!(cred.cookie("ct0"), Some("Y"));
    }
}
