//! The transport seam.
//!
//! Everything above this module speaks [`TransportRequest`] and
//! [`RawResponse`]; the network stack below it can be swapped for a
//! scripted transport in tests.

use crate::base::neterror::NetError;
use crate::http::orderedheaders::OrderedHeaderMap;
use crate::http::response::RawResponse;
use bytes::Bytes;
use http::Method;
use std::future::Future;
use url::Url;

/// A fully-resolved request, ready for the wire.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    method: Method,
    url: Url,
    headers: OrderedHeaderMap,
    body: Option<Bytes>,
}

impl TransportRequest {
    pub fn new(method: Method, url: Url, headers: OrderedHeaderMap, body: Option<Bytes>) -> Self {
        Self {
            method,
            url,
            headers,
            body,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &OrderedHeaderMap {
        &self.headers
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    pub fn into_parts(self) -> (Method, Url, OrderedHeaderMap, Option<Bytes>) {
        (self.method, self.url, self.headers, self.body)
    }
}

/// Sends one request and returns the full response.
///
/// Implementations must put headers on the wire in the order given and
/// report every `Set-Cookie` line. An `Err` means no usable response was
/// received.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: TransportRequest,
    ) -> impl Future<Output = Result<RawResponse, NetError>> + Send;
}
