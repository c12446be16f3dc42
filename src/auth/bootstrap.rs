//! Turning a credential into an initial cookie-jar state.
//!
//! Pure transformation: no network I/O happens here.

use crate::auth::credential::{Credential, RAW_SECRET_MAX_LEN};
use crate::base::neterror::NetError;
use crate::cookies::jar::CookieJar;
use crate::cookies::{AUTH_TOKEN_COOKIE, OPT_IN_COOKIE, SECURITY_TOKEN_COOKIE};
use rand::rngs::OsRng;
use rand::RngCore;

/// Number of random bytes in a generated security token.
const TOKEN_BYTES: usize = 16;

/// Result of a successful bootstrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bootstrap {
    /// Initial security token (`ct0`).
    pub security_token: String,
    /// Resolved long-lived secret (`auth_token`). Empty when a structured
    /// export did not include one.
    pub auth_token: String,
}

/// Seed `jar` from `credential` and return the initial token pair.
pub fn bootstrap(credential: &Credential, jar: &mut CookieJar) -> Result<Bootstrap, NetError> {
    let (security_token, auth_token) = match credential {
        Credential::StructuredCookies(pairs) => {
            let mut security_token = String::new();
            let mut auth_token = String::new();

            for pair in pairs {
                jar.set(pair.name.as_str(), pair.value.as_str());
                if pair.name == SECURITY_TOKEN_COOKIE {
                    security_token = pair.value.clone();
                }
                if pair.name == AUTH_TOKEN_COOKIE {
                    auth_token = pair.value.clone();
                }
            }

            if auth_token.is_empty() {
                tracing::warn!("cookie export has no auth_token cookie");
            }

            (security_token, auth_token)
        }
        Credential::RawSecret(secret) => {
            let secret = secret.as_str();
            validate_raw_secret(secret)?;

            let security_token = generate_csrf_token()?;
            jar.set(AUTH_TOKEN_COOKIE, secret);
            jar.set(SECURITY_TOKEN_COOKIE, security_token.as_str());
            jar.set(OPT_IN_COOKIE, "Y");

            (security_token, secret.to_string())
        }
    };

    if security_token.is_empty() {
        return Err(NetError::MissingToken);
    }

    Ok(Bootstrap {
        security_token,
        auth_token,
    })
}

fn validate_raw_secret(secret: &str) -> Result<(), NetError> {
    if secret.is_empty() {
        return Err(NetError::decode("raw secret is empty"));
    }
    if secret.len() >= RAW_SECRET_MAX_LEN {
        return Err(NetError::decode(format!(
            "raw secret is {} characters; use a structured cookie credential for exports",
            secret.len()
        )));
    }
    if secret.contains(['[', ']', '{']) {
        return Err(NetError::decode(
            "raw secret looks like a cookie export; use Credential::from_json_export",
        ));
    }
    Ok(())
}

/// Generate a new security token.
///
/// 16 bytes from the OS CSPRNG rendered as 32 lowercase hex characters,
/// the same shape the web client produces.
pub fn generate_csrf_token() -> Result<String, NetError> {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.try_fill_bytes(&mut bytes).map_err(|e| {
        tracing::error!(error = %e, "OS random source failed");
        NetError::TokenGenerationFailed
    })?;
    Ok(hex::encode(bytes))
}
