//! Browser emulation.
//!
//! Requests are shaped like the official web client running in desktop
//! Chrome: a fixed baseline header set in a fixed order, a matching
//! User-Agent and client hints. TLS shape lives in
//! [`TlsConfig`](crate::socket::tls::TlsConfig).

mod profile;

pub use profile::{BrowserProfile, ProfileType, ACCEPT_ENCODING};
