use crate::base::neterror::NetError;
use base64::{engine::general_purpose, Engine as _};
use std::fmt;
use url::Url;
use zeroize::Zeroizing;

/// HTTP proxy used as a `CONNECT` tunnel.
#[derive(Clone)]
pub struct ProxySettings {
    /// Proxy URL (e.g., `http://proxy.com:8080`)
    pub url: Url,
    /// Proxy username for authentication
    pub username: Option<String>,
    /// Proxy password (zeroized on drop)
    pub password: Option<Zeroizing<String>>,
}

impl ProxySettings {
    /// Parse a proxy address.
    ///
    /// Accepted forms: `user:pass@host:port`, `host:port`, or a full
    /// `http://` URL with optional userinfo. Only HTTP proxies are
    /// supported.
    pub fn parse(address: &str) -> Result<Self, NetError> {
        let address = address.trim();
        let with_scheme = if address.contains("://") {
            address.to_string()
        } else {
            format!("http://{}", address)
        };

        let mut url = Url::parse(&with_scheme).map_err(|e| {
            tracing::debug!(error = %e, "rejecting proxy address");
            NetError::InvalidUrl
        })?;

        if url.scheme() != "http" {
            tracing::debug!(scheme = %url.scheme(), "unsupported proxy scheme");
            return Err(NetError::InvalidUrl);
        }
        if url.host_str().is_none() {
            return Err(NetError::InvalidUrl);
        }

        let username = match url.username() {
            "" => None,
            user => Some(decode_userinfo(user)),
        };
        let password = url.password().map(|p| Zeroizing::new(decode_userinfo(p)));

        // Credentials travel in Proxy-Authorization, never in the URL.
        let _ = url.set_username("");
        let _ = url.set_password(None);

        Ok(Self {
            url,
            username,
            password,
        })
    }

    /// Add authentication credentials.
    pub fn with_auth(mut self, user: &str, pass: &str) -> Self {
        self.username = Some(user.to_string());
        self.password = Some(Zeroizing::new(pass.to_string()));
        self
    }

    /// Get `Proxy-Authorization` header value.
    pub fn get_auth_header(&self) -> Option<Zeroizing<String>> {
        let (u, p) = (self.username.as_ref()?, self.password.as_ref()?);
        let creds = Zeroizing::new(format!("{}:{}", u, p.as_str()));
        let encoded = general_purpose::STANDARD.encode(creds.as_bytes());
        Some(Zeroizing::new(format!("Basic {}", encoded)))
    }

    pub fn requires_auth(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }

    /// Proxy host and port. Port defaults to 80.
    pub fn host_port(&self) -> Option<(&str, u16)> {
        let host = self.url.host_str()?;
        Some((host, self.url.port().unwrap_or(80)))
    }
}

/// Percent-decode a userinfo component. `+` and `&` are literal there.
fn decode_userinfo(part: &str) -> String {
    let escaped = part.replace('+', "%2B").replace('&', "%26");
    url::form_urlencoded::parse(format!("x={}", escaped).as_bytes())
        .next()
        .map(|(_, v)| v.into_owned())
        .unwrap_or_else(|| part.to_string())
}

impl fmt::Debug for ProxySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxySettings")
            .field("url", &self.url.as_str())
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
