//! Fully-read HTTP response.

use bytes::Bytes;
use http::StatusCode;

/// Status, `Set-Cookie` lines and body of a completed round trip.
///
/// The body is read to completion by the transport; nothing downstream
/// streams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    status: StatusCode,
    set_cookies: Vec<String>,
    body: Bytes,
}

impl RawResponse {
    pub fn new(status: StatusCode, set_cookies: Vec<String>, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            set_cookies,
            body: body.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn set_cookies(&self) -> &[String] {
        &self.set_cookies
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body as text, with invalid UTF-8 replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parse the body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(
        &self,
    ) -> Result<T, crate::base::neterror::NetError> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let resp = RawResponse::new(
            StatusCode::OK,
            vec!["ct0=abc; Path=/".to_string()],
            r#"{"ok":true}"#,
        );
        assert!(resp.is_success());
        assert_eq!(resp.set_cookies().len(), 1);
        assert_eq!(resp.text(), r#"{"ok":true}"#);

        let value: serde_json::Value = resp.json().unwrap();
        assert_eq!(value["ok"], true);
    }

    #[test]
    fn test_json_error_is_malformed() {
        let resp = RawResponse::new(StatusCode::OK, Vec::new(), "<html>");
        let err = resp.json::<serde_json::Value>().unwrap_err();
        assert!(matches!(
            err,
            crate::base::neterror::NetError::MalformedPayload { .. }
        ));
    }
}
