//! Request description, header ordering and the HTTP/1.1 transport.
//!
//! - [`request`]: action-level [`RequestSpec`] with session-bound header slots
//! - [`orderedheaders`]: insertion-ordered header map
//! - [`transport`]: the [`Transport`] seam
//! - [`transaction`]: [`NetworkTransport`], the default implementation
//! - [`retry`]: jittered retry timing
//! - [`decode`]: `Content-Encoding` removal

pub mod decode;
pub mod orderedheaders;
pub mod request;
pub mod response;
pub mod retry;
pub mod transaction;
pub mod transport;

pub use orderedheaders::OrderedHeaderMap;
pub use request::{HeaderSource, RequestSpec};
pub use response::RawResponse;
pub use transaction::NetworkTransport;
pub use transport::{Transport, TransportRequest};
