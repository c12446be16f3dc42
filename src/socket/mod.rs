//! Connection establishment.
//!
//! - [`connectjob`]: DNS → TCP → optional proxy tunnel → TLS
//! - [`proxy`]: HTTP `CONNECT` proxy settings
//! - [`stream`]: type-erased connection stream
//! - [`tls`]: BoringSSL client configuration

pub mod connectjob;
pub mod proxy;
pub mod stream;
pub mod tls;
