use crate::base::neterror::NetError;
use crate::emulation::BrowserProfile;
use crate::http::orderedheaders::OrderedHeaderMap;
use crate::http::request::{HeaderSource, RequestSpec};
use crate::http::response::RawResponse;
use crate::http::transport::{Transport, TransportRequest};
use crate::session::Session;

/// The shared request pipeline.
///
/// Assembles headers from the browser profile, the action and the session,
/// sends through the transport, then folds the response's cookies and any
/// rotated token back into the session before returning it. The body is
/// not interpreted here.
#[derive(Debug)]
pub struct ActionExecutor<T> {
    transport: T,
    profile: BrowserProfile,
}

impl<T: Transport> ActionExecutor<T> {
    pub fn new(transport: T, profile: BrowserProfile) -> Self {
        Self { transport, profile }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn profile(&self) -> &BrowserProfile {
        &self.profile
    }

    /// Resolve the final ordered header list for `spec` against the
    /// session's current state.
    pub fn assemble(&self, session: &Session, spec: &RequestSpec) -> Result<OrderedHeaderMap, NetError> {
        let mut headers = self.profile.baseline_headers()?;
        let cookie_header = session.cookie_header();

        for (name, source) in spec.headers() {
            let value = match source {
                HeaderSource::Literal(v) => v.as_str(),
                HeaderSource::SessionCookies => cookie_header.as_str(),
                HeaderSource::SecurityToken => session.security_token(),
            };
            headers.insert(name, value)?;
        }

        if !headers.contains("cookie") {
            headers.insert("cookie", &cookie_header)?;
        }
        if !headers.contains("x-csrf-token") {
            headers.insert("x-csrf-token", session.security_token())?;
        }

        Ok(headers)
    }

    /// Send one request on behalf of `session`.
    ///
    /// On a transport error the session is left untouched. On any response,
    /// whatever its status, cookies are merged and the token updated first.
    pub async fn execute(&self, session: &mut Session, spec: RequestSpec) -> Result<RawResponse, NetError> {
        let headers = self.assemble(session, &spec)?;
        tracing::debug!(headers = ?headers.names(), "assembled request headers");

        let (method, url, _, body) = spec.into_parts();
        let response = self
            .transport
            .send(TransportRequest::new(method, url, headers, body))
            .await?;

        session.absorb(response.set_cookies());
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::credential::Credential;
    use crate::cookies::export::CookiePair;
    use http::StatusCode;
    use std::future::Future;
    use std::sync::Mutex;

    /// Answers every request with a fixed response and keeps the last request.
    struct Fixed {
        response: Result<RawResponse, NetError>,
        seen: Mutex<Option<TransportRequest>>,
    }

    impl Transport for Fixed {
        fn send(
            &self,
            request: TransportRequest,
        ) -> impl Future<Output = Result<RawResponse, NetError>> + Send {
            *self.seen.lock().unwrap() = Some(request);
            let response = self.response.clone();
            async move { response }
        }
    }

    fn session() -> Session {
        let mut s = Session::new(
            Credential::cookies(vec![
                CookiePair::new("auth_token", "X"),
                CookiePair::new("ct0", "Y"),
            ]),
            None,
        );
        s.bootstrap().unwrap();
        s
    }

    fn executor(response: Result<RawResponse, NetError>) -> ActionExecutor<Fixed> {
        ActionExecutor::new(
            Fixed {
                response,
                seen: Mutex::new(None),
            },
            BrowserProfile::default(),
        )
    }

    #[test]
    fn test_assemble_layers_action_headers() {
        let exec = executor(Err(NetError::ConnectionFailed));
        let spec = RequestSpec::post("https://x.com/a")
            .unwrap()
            .header("accept", "application/json")
            .header("authorization", "Bearer t")
            .header("content-type", "application/json")
            .cookie_slot()
            .csrf_slot();

        let headers = exec.assemble(&session(), &spec).unwrap();
        let names = headers.names();

        // updated in place
        assert_eq!(names[0], "accept");
        assert_eq!(headers.get_str("accept"), Some("application/json"));
        assert_eq!(names[1], "accept-encoding");
        assert_eq!(names[2], "content-type");
        // appended after the baseline
        assert_eq!(
            &names[names.len() - 3..],
            &["authorization", "cookie", "x-csrf-token"]
        );
        assert_eq!(headers.get_str("cookie"), Some("auth_token=X; ct0=Y"));
        assert_eq!(headers.get_str("x-csrf-token"), Some("Y"));
    }

    #[test]
    fn test_assemble_appends_missing_slots() {
        let exec = executor(Err(NetError::ConnectionFailed));
        let spec = RequestSpec::get("https://x.com/a").unwrap();
        let headers = exec.assemble(&session(), &spec).unwrap();
        let names = headers.names();
        assert_eq!(&names[names.len() - 2..], &["cookie", "x-csrf-token"]);
    }

    #[test]
    fn test_invalid_literal_rejected() {
        let exec = executor(Err(NetError::ConnectionFailed));
        let spec = RequestSpec::get("https://x.com/a")
            .unwrap()
            .header("referer", "bad\r\nvalue");
        assert_eq!(
            exec.assemble(&session(), &spec),
            Err(NetError::InvalidHeader)
        );
    }

    #[tokio::test]
    async fn test_execute_merges_cookies_on_error_status() {
        let exec = executor(Ok(RawResponse::new(
            StatusCode::FORBIDDEN,
            vec!["ct0=Z; Path=/".to_string()],
            "Could not authenticate you",
        )));
        let mut s = session();

        let resp = exec
            .execute(&mut s, RequestSpec::get("https://x.com/a").unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(s.security_token(), "Z");
    }

    #[tokio::test]
    async fn test_execute_transport_error_leaves_session() {
        let exec = executor(Err(NetError::ConnectionTimedOut));
        let mut s = session();
        let before = s.cookie_header();

        let err = exec
            .execute(&mut s, RequestSpec::get("https://x.com/a").unwrap())
            .await
            .unwrap_err();

        assert_eq!(err, NetError::ConnectionTimedOut);
        assert_eq!(s.security_token(), "Y");
        assert_eq!(s.cookie_header(), before);
    }

    #[tokio::test]
    async fn test_execute_sends_current_token() {
        let exec = executor(Ok(RawResponse::new(StatusCode::OK, Vec::new(), "{}")));
        let mut s = session();
        s.absorb(&["ct0=fresh".to_string()]);

        exec.execute(&mut s, RequestSpec::get("https://x.com/a").unwrap().csrf_slot())
            .await
            .unwrap();

        let seen = exec.transport().seen.lock().unwrap().take().unwrap();
        assert_eq!(seen.headers().get_str("x-csrf-token"), Some("fresh"));
        assert_eq!(seen.headers().get_str("cookie"), Some("auth_token=X; ct0=fresh"));
    }
}
