//! Credentials and token bootstrap.
//!
//! - [`Credential`](credential::Credential): raw `auth_token` or exported cookie set
//! - [`bootstrap`](bootstrap::bootstrap): seeds a cookie jar and produces the first security token

pub mod bootstrap;
pub mod credential;
