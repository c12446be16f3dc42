//! Base types and error handling.
//!
//! - [`NetError`](neterror::NetError): every failure the crate reports
//! - [`IoResultExt`](context::IoResultExt): context helpers for socket I/O

pub mod context;
pub mod neterror;
