//! Session cookie storage.
//!
//! - **Storage**: flat per-session jar ([`CookieJar`](jar::CookieJar))
//! - **Import**: JSON and Netscape cookie exports ([`export`])
//!
//! # Example
//!
//! ```rust
//! use birdnet::cookies::jar::CookieJar;
//!
//! let mut jar = CookieJar::new();
//! jar.set("auth_token", "secret");
//! jar.set_from_response(["ct0=abc; Path=/; Secure"]);
//! assert_eq!(jar.to_header_string(), "auth_token=secret; ct0=abc");
//! ```

pub mod export;
pub mod jar;

/// Cookie that carries the rotating security token.
pub const SECURITY_TOKEN_COOKIE: &str = "ct0";

/// Cookie that carries the long-lived credential.
pub const AUTH_TOKEN_COOKIE: &str = "auth_token";

/// Opt-in marker sent alongside a freshly bootstrapped session.
pub const OPT_IN_COOKIE: &str = "des_opt_in";
