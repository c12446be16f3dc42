//! Shared fixtures for integration tests.

#![allow(dead_code)]

use birdnet::auth::credential::Credential;
use birdnet::cookies::export::CookiePair;
use birdnet::http::{RawResponse, Transport, TransportRequest};
use birdnet::NetError;
use http::StatusCode;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// In-memory transport that replays a script and records every request.
///
/// Once the script runs out every send fails with `ConnectionFailed`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<VecDeque<Result<RawResponse, NetError>>>>,
    sent: Arc<Mutex<Vec<TransportRequest>>>,
}

impl ScriptedTransport {
    pub fn new(steps: Vec<Result<RawResponse, NetError>>) -> Self {
        Self {
            script: Arc::new(Mutex::new(steps.into())),
            sent: Arc::default(),
        }
    }

    pub fn push(&self, step: Result<RawResponse, NetError>) {
        self.script.lock().unwrap().push_back(step);
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn last(&self) -> TransportRequest {
        self.sent.lock().unwrap().last().cloned().unwrap()
    }
}

impl Transport for ScriptedTransport {
    fn send(
        &self,
        request: TransportRequest,
    ) -> impl Future<Output = Result<RawResponse, NetError>> + Send {
        self.sent.lock().unwrap().push(request);
        let next = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(NetError::ConnectionFailed));
        async move { next }
    }
}

pub fn respond(status: u16, set_cookies: &[&str], body: &str) -> Result<RawResponse, NetError> {
    Ok(RawResponse::new(
        StatusCode::from_u16(status).unwrap(),
        set_cookies.iter().map(|s| s.to_string()).collect(),
        body.to_string(),
    ))
}

pub fn ok(body: &str) -> Result<RawResponse, NetError> {
    respond(200, &[], body)
}

pub fn viewer(screen_name: &str) -> Result<RawResponse, NetError> {
    ok(&format!(
        r#"{{"data":{{"viewer":{{"user_results":{{"result":{{"legacy":{{"screen_name":"{}"}}}}}}}}}}}}"#,
        screen_name
    ))
}

pub fn structured_credential() -> Credential {
    Credential::cookies(vec![
        CookiePair::new("auth_token", "X"),
        CookiePair::new("ct0", "Y"),
    ])
}
