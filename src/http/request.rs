//! Action request description.
//!
//! A [`RequestSpec`] is built by an action before the session is touched.
//! Headers whose value depends on session state are declared as slots and
//! resolved by the executor at send time, so the values on the wire are
//! always the newest ones.

use crate::base::neterror::NetError;
use bytes::Bytes;
use http::Method;
use url::Url;

/// Where a header value comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderSource {
    /// Fixed text supplied by the action.
    Literal(String),
    /// The session's current cookie header.
    SessionCookies,
    /// The session's current security token.
    SecurityToken,
}

/// Method, URL, optional body and ordered header list for one request.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    method: Method,
    url: Url,
    headers: Vec<(String, HeaderSource)>,
    body: Option<Bytes>,
}

impl RequestSpec {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(url: &str) -> Result<Self, NetError> {
        Ok(Self::new(Method::GET, parse_url(url)?))
    }

    pub fn post(url: &str) -> Result<Self, NetError> {
        Ok(Self::new(Method::POST, parse_url(url)?))
    }

    /// Append a query parameter. The value is percent-encoded.
    pub fn query(mut self, name: &str, value: &str) -> Self {
        self.url.query_pairs_mut().append_pair(name, value);
        self
    }

    /// Set a literal header. Re-setting a name keeps its original position.
    pub fn header(self, name: &str, value: impl Into<String>) -> Self {
        self.with_source(name, HeaderSource::Literal(value.into()))
    }

    /// Place the session cookie header at this position.
    pub fn cookie_slot(self) -> Self {
        self.with_source("cookie", HeaderSource::SessionCookies)
    }

    /// Place the security token header at this position.
    pub fn csrf_slot(self) -> Self {
        self.with_source("x-csrf-token", HeaderSource::SecurityToken)
    }

    fn with_source(mut self, name: &str, source: HeaderSource) -> Self {
        match self
            .headers
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
        {
            Some((_, s)) => *s = source,
            None => self.headers.push((name.to_ascii_lowercase(), source)),
        }
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `value` as the body. Does not set `content-type`.
    pub fn json_body<T: serde::Serialize>(self, value: &T) -> Result<Self, NetError> {
        let bytes = serde_json::to_vec(value)?;
        Ok(self.body(bytes))
    }

    /// Encode `pairs` as `application/x-www-form-urlencoded`. Does not set
    /// `content-type`.
    pub fn form_body<'a, I>(self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let encoded = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs)
            .finish();
        self.body(encoded)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &[(String, HeaderSource)] {
        &self.headers
    }

    pub fn body_bytes(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.headers.iter().any(|(n, _)| n.eq_ignore_ascii_case(name))
    }

    pub fn into_parts(self) -> (Method, Url, Vec<(String, HeaderSource)>, Option<Bytes>) {
        (self.method, self.url, self.headers, self.body)
    }
}

fn parse_url(url: &str) -> Result<Url, NetError> {
    Url::parse(url).map_err(|e| {
        tracing::debug!(url = %url, error = %e, "rejecting request url");
        NetError::InvalidUrl
    })
}
