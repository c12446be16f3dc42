use crate::base::neterror::NetError;
use crate::http::decode::decode_body;
use crate::http::orderedheaders::OrderedHeaderMap;
use crate::http::response::RawResponse;
use crate::http::transport::{Transport, TransportRequest};
use crate::socket::connectjob::ConnectJob;
use crate::socket::proxy::ProxySettings;
use crate::socket::tls::TlsConfig;
use bytes::Bytes;
use http::header::{HeaderValue, CONTENT_ENCODING, HOST, SET_COOKIE};
use http::{HeaderMap, Request, Version};
use http_body_util::{BodyExt, Full};
use hyper::client::conn::http1;
use hyper_util::rt::TokioIo;
use std::future::Future;
use std::time::Duration;
use url::Url;

/// Default per-request deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP/1.1 transport over a fresh connection per request.
///
/// Each round trip runs DNS, TCP, an optional proxy `CONNECT`, TLS and a
/// single HTTP/1.1 exchange under one deadline. Bodies are returned with
/// their `Content-Encoding` removed. `Host` goes first on the
/// wire, followed by the request headers in their given order.
#[derive(Debug, Clone)]
pub struct NetworkTransport {
    proxy: Option<ProxySettings>,
    tls: TlsConfig,
    timeout: Duration,
}

impl Default for NetworkTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkTransport {
    pub fn new() -> Self {
        Self {
            proxy: None,
            tls: TlsConfig::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_proxy(mut self, proxy: Option<ProxySettings>) -> Self {
        self.proxy = proxy;
        self
    }

    pub fn with_tls_config(mut self, tls: TlsConfig) -> Self {
        self.tls = tls;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn proxy(&self) -> Option<&ProxySettings> {
        self.proxy.as_ref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn round_trip(&self, request: TransportRequest) -> Result<RawResponse, NetError> {
        let (method, url, headers, body) = request.into_parts();

        let socket = ConnectJob::connect(&url, self.proxy.as_ref(), &self.tls).await?;

        let (mut sender, conn) = http1::handshake(TokioIo::new(socket))
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "HTTP/1.1 handshake failed");
                NetError::ConnectionFailed
            })?;

        tokio::spawn(async move {
            if let Err(e) = conn.await {
                tracing::debug!(error = %e, "connection closed with error");
            }
        });

        let mut req = Request::builder()
            .method(method)
            .uri(origin_form(&url))
            .version(Version::HTTP_11)
            .body(Full::new(body.unwrap_or_default()))
            .map_err(|_| NetError::InvalidUrl)?;
        *req.headers_mut() = wire_headers(&url, headers)?;

        tracing::debug!(method = %req.method(), url = %url, "sending request");

        let resp = sender.send_request(req).await.map_err(|e| {
            tracing::debug!(error = %e, "request failed");
            NetError::InvalidResponse
        })?;

        let (parts, incoming) = resp.into_parts();
        let set_cookies = parts
            .headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect();

        let body: Bytes = incoming
            .collect()
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "reading response body failed");
                NetError::HttpBodyError
            })?
            .to_bytes();

        let encoding = parts
            .headers
            .get(CONTENT_ENCODING)
            .and_then(|v| v.to_str().ok());
        let body = decode_body(encoding, body)?;

        tracing::debug!(status = %parts.status, bytes = body.len(), "response received");
        Ok(RawResponse::new(parts.status, set_cookies, body))
    }
}

impl Transport for NetworkTransport {
    fn send(
        &self,
        request: TransportRequest,
    ) -> impl Future<Output = Result<RawResponse, NetError>> + Send {
        async move {
            match tokio::time::timeout(self.timeout, self.round_trip(request)).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::debug!(timeout = ?self.timeout, "request timed out");
                    Err(NetError::ConnectionTimedOut)
                }
            }
        }
    }
}

/// Path and query, as sent on the request line.
fn origin_form(url: &Url) -> String {
    match url.query() {
        Some(q) => format!("{}?{}", url.path(), q),
        None => url.path().to_string(),
    }
}

/// `Host` first, then the caller's headers in order.
fn wire_headers(url: &Url, headers: OrderedHeaderMap) -> Result<HeaderMap, NetError> {
    let host = url.host_str().ok_or(NetError::InvalidUrl)?;
    let host = match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    };

    let mut map = HeaderMap::with_capacity(headers.len() + 1);
    map.insert(
        HOST,
        HeaderValue::from_str(&host).map_err(|_| NetError::InvalidUrl)?,
    );
    for (name, value) in headers.to_header_map() {
        if let Some(name) = name {
            if name != HOST {
                map.append(name, value);
            }
        }
    }
    Ok(map)
}
