//! Session state and the authenticated request pipeline.
//!
//! A [`Session`] is exclusively owned: every operation that reads or rotates
//! the security token takes `&mut Session`, so two requests on one session
//! can never race on the token.
//!
//! - [`executor`]: header assembly, send, cookie/token merge
//! - [`classifier`]: rule table turning responses into [`Outcome`]s
//! - [`init`]: bounded bootstrap and identity resolution

pub mod classifier;
pub mod executor;
pub mod init;
pub mod outcome;

pub use classifier::{Classifier, Rule, StatusScope};
pub use executor::ActionExecutor;
pub use init::{InitState, Initializer};
pub use outcome::{Outcome, OutcomeKind};

use crate::auth::bootstrap::bootstrap;
use crate::auth::credential::Credential;
use crate::base::neterror::NetError;
use crate::cookies::jar::CookieJar;
use crate::cookies::SECURITY_TOKEN_COOKIE;
use std::fmt;
use zeroize::Zeroizing;

/// Authenticated state of one account.
pub struct Session {
    credential: Credential,
    username: String,
    security_token: String,
    auth_token: Zeroizing<String>,
    cookies: CookieJar,
    proxy_address: Option<String>,
}

impl Session {
    pub fn new(credential: Credential, proxy_address: Option<String>) -> Self {
        Self {
            credential,
            username: String::new(),
            security_token: String::new(),
            auth_token: Zeroizing::new(String::new()),
            cookies: CookieJar::new(),
            proxy_address,
        }
    }

    /// Seed cookies and the initial token from the credential.
    pub fn bootstrap(&mut self) -> Result<(), NetError> {
        let seeded = bootstrap(&self.credential, &mut self.cookies)?;
        self.security_token = seeded.security_token;
        self.auth_token = Zeroizing::new(seeded.auth_token);
        tracing::debug!(cookies = self.cookies.len(), "session bootstrapped");
        Ok(())
    }

    /// Merge a response's `Set-Cookie` lines and adopt a rotated token.
    ///
    /// Returns true when the security token changed.
    pub fn absorb(&mut self, set_cookies: &[String]) -> bool {
        if set_cookies.is_empty() {
            return false;
        }
        self.cookies.set_from_response(set_cookies);

        let current = self
            .cookies
            .get(SECURITY_TOKEN_COOKIE)
            .filter(|token| !token.is_empty())
            .map(str::to_string);

        match current {
            Some(token) if token != self.security_token => {
                self.security_token = token;
                tracing::debug!("security token rotated");
                true
            }
            Some(_) => false,
            // the cookie must keep matching the x-csrf-token header
            None => {
                if !self.security_token.is_empty() {
                    self.cookies
                        .set(SECURITY_TOKEN_COOKIE, self.security_token.clone());
                    tracing::debug!("security token cookie cleared by response, restored");
                }
                false
            }
        }
    }

    pub fn cookie_header(&self) -> String {
        self.cookies.to_header_string()
    }

    pub fn security_token(&self) -> &str {
        &self.security_token
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
    }

    pub fn auth_token(&self) -> &str {
        &self.auth_token
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn cookies(&self) -> &CookieJar {
        &self.cookies
    }

    pub fn proxy_address(&self) -> Option<&str> {
        self.proxy_address.as_deref()
    }

    /// Identity resolved and a token present.
    pub fn is_ready(&self) -> bool {
        !self.username.is_empty() && !self.security_token.is_empty()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("username", &self.username)
            .field("credential", &self.credential)
            .field("has_security_token", &!self.security_token.is_empty())
            .field("cookies", &self.cookies.iter().map(|(n, _)| n).collect::<Vec<_>>())
            .field("proxy", &self.proxy_address.is_some())
            .finish()
    }
}
