//! Session initialization.
//!
//! Bootstraps the cookie jar once, then resolves the account's screen name
//! through the `Viewer` query. The whole procedure is bounded by the retry
//! policy; account-status failures end it immediately.

use crate::base::neterror::NetError;
use crate::config::ApiConstants;
use crate::http::request::RequestSpec;
use crate::http::retry::{backoff_delay, RetryPolicy};
use crate::http::transport::Transport;
use crate::session::classifier::Classifier;
use crate::session::executor::ActionExecutor;
use crate::session::outcome::OutcomeKind;
use crate::session::Session;
use std::fmt;

const VIEWER_VARIABLES: &str = r#"{"withCommunitiesMemberships":true}"#;
const VIEWER_FEATURES: &str = r#"{"rweb_tipjar_consumption_enabled":true,"responsive_web_graphql_exclude_directive_enabled":true,"verified_phone_label_enabled":false,"creator_subscriptions_tweet_preview_api_enabled":true,"responsive_web_graphql_skip_user_profile_image_extensions_enabled":false,"responsive_web_graphql_timeline_navigation_enabled":true}"#;
const VIEWER_FIELD_TOGGLES: &str = r#"{"isDelegate":false,"withAuxiliaryUserLabels":false}"#;

/// Where the initializer currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitState {
    Bootstrapping,
    ResolvingIdentity,
    Ready,
    Failed(NetError),
}

impl fmt::Display for InitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitState::Bootstrapping => f.write_str("bootstrapping"),
            InitState::ResolvingIdentity => f.write_str("resolving identity"),
            InitState::Ready => f.write_str("ready"),
            InitState::Failed(err) => write!(f, "failed: {}", err),
        }
    }
}

/// Drives a [`Session`] from a bare credential to `Ready`.
#[derive(Debug)]
pub struct Initializer {
    policy: RetryPolicy,
    state: InitState,
    attempts: usize,
    bootstrapped: bool,
    last_error: Option<NetError>,
}

impl Initializer {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            state: InitState::Bootstrapping,
            attempts: 0,
            bootstrapped: false,
            last_error: None,
        }
    }

    pub fn state(&self) -> &InitState {
        &self.state
    }

    /// Attempts made so far.
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// The most recent retryable failure, if any.
    pub fn last_error(&self) -> Option<&NetError> {
        self.last_error.as_ref()
    }

    pub async fn run<T: Transport>(
        &mut self,
        session: &mut Session,
        executor: &ActionExecutor<T>,
        classifier: &Classifier,
        constants: &ApiConstants,
    ) -> Result<(), NetError> {
        let max_attempts = self.policy.max_attempts;

        for attempt in 0..max_attempts {
            if attempt > 0 {
                let delay = backoff_delay(attempt, &self.policy);
                tracing::debug!(attempt, delay_ms = delay.as_millis() as u64, "retrying initialization");
                tokio::time::sleep(delay).await;
            }
            self.attempts += 1;

            if !self.bootstrapped {
                self.state = InitState::Bootstrapping;
                match session.bootstrap() {
                    Ok(()) => self.bootstrapped = true,
                    // a bad credential stays bad
                    Err(e) if e.is_terminal() => {
                        tracing::error!(error = %e, "credential bootstrap failed");
                        self.state = InitState::Failed(e.clone());
                        return Err(e);
                    }
                    Err(e) => {
                        tracing::warn!(attempt, error = %e, "credential bootstrap failed");
                        self.last_error = Some(e);
                        continue;
                    }
                }
            }

            self.state = InitState::ResolvingIdentity;
            match self.resolve_identity(session, executor, classifier, constants).await {
                Ok(username) => {
                    session.set_username(username);
                    self.state = InitState::Ready;
                    tracing::info!(username = session.username(), "session ready");
                    return Ok(());
                }
                Err(e) if e.is_terminal() => {
                    tracing::error!(attempt, error = %e, "initialization failed");
                    self.state = InitState::Failed(e.clone());
                    return Err(e);
                }
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "identity lookup failed");
                    self.last_error = Some(e);
                }
            }
        }

        let err = NetError::InitializationExhausted {
            attempts: max_attempts,
        };
        tracing::error!(attempts = max_attempts, "unable to initialize session");
        self.state = InitState::Failed(err.clone());
        Err(err)
    }

    async fn resolve_identity<T: Transport>(
        &self,
        session: &mut Session,
        executor: &ActionExecutor<T>,
        classifier: &Classifier,
        constants: &ApiConstants,
    ) -> Result<String, NetError> {
        let response = executor.execute(session, viewer_request(constants)?).await?;
        let body = response.body();

        if contains(body, b"screen_name") {
            return parse_screen_name(body);
        }

        let outcome = classifier.classify(response.status(), body, |_| false);
        match outcome.kind {
            OutcomeKind::Locked => Err(NetError::AccountLocked),
            OutcomeKind::AuthError => Err(NetError::AuthenticationFailed),
            OutcomeKind::InvalidToken => Err(NetError::InvalidToken),
            _ => Err(outcome.detail.unwrap_or(NetError::UnknownResponse {
                status: response.status().as_u16(),
                body: response.text(),
            })),
        }
    }
}

/// The `Viewer` GraphQL query for the authenticated account.
pub fn viewer_request(constants: &ApiConstants) -> Result<RequestSpec, NetError> {
    let url = format!(
        "{}/graphql/{}/Viewer",
        constants.api_base, constants.query_ids.viewer
    );

    Ok(RequestSpec::get(&url)?
        .query("variables", VIEWER_VARIABLES)
        .query("features", VIEWER_FEATURES)
        .query("fieldToggles", VIEWER_FIELD_TOGGLES)
        .header("authorization", constants.bearer_token.as_str())
        .cookie_slot()
        .header("origin", "https://twitter.com")
        .header("referer", "https://twitter.com/")
        .csrf_slot()
        .header("x-twitter-active-user", "no"))
}

fn parse_screen_name(body: &[u8]) -> Result<String, NetError> {
    let value: serde_json::Value = serde_json::from_slice(body)?;
    value
        .pointer("/data/viewer/user_results/result/legacy/screen_name")
        .and_then(|v| v.as_str())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or_else(|| NetError::malformed("viewer response has no screen_name"))
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::credential::Credential;
    use crate::cookies::export::CookiePair;
    use crate::emulation::BrowserProfile;
    use crate::http::response::RawResponse;
    use crate::http::transport::TransportRequest;
    use http::StatusCode;
    use std::collections::VecDeque;
    use std::future::Future;
    use std::sync::Mutex;

    const VIEWER_OK: &str =
        r#"{"data":{"viewer":{"user_results":{"result":{"legacy":{"screen_name":"alice"}}}}}}"#;

    struct Script(Mutex<VecDeque<Result<RawResponse, NetError>>>);

    impl Script {
        fn new(steps: Vec<Result<RawResponse, NetError>>) -> Self {
            Self(Mutex::new(steps.into()))
        }
    }

    impl Transport for Script {
        fn send(
            &self,
            _request: TransportRequest,
        ) -> impl Future<Output = Result<RawResponse, NetError>> + Send {
            let next = self
                .0
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(NetError::ConnectionFailed));
            async move { next }
        }
    }

    fn ok(body: &str) -> Result<RawResponse, NetError> {
        Ok(RawResponse::new(StatusCode::OK, Vec::new(), body.to_string()))
    }

    fn session() -> Session {
        Session::new(
            Credential::cookies(vec![
                CookiePair::new("auth_token", "X"),
                CookiePair::new("ct0", "Y"),
            ]),
            None,
        )
    }

    async fn run(
        steps: Vec<Result<RawResponse, NetError>>,
        session: &mut Session,
    ) -> (Initializer, Result<(), NetError>) {
        let executor = ActionExecutor::new(Script::new(steps), BrowserProfile::default());
        let mut init = Initializer::new(RetryPolicy::default());
        let result = init
            .run(session, &executor, &Classifier::new(), &ApiConstants::default())
            .await;
        (init, result)
    }

    #[tokio::test]
    async fn test_ready_on_first_attempt() {
        let mut s = session();
        let (init, result) = run(vec![ok(VIEWER_OK)], &mut s).await;

        assert_eq!(result, Ok(()));
        assert_eq!(init.state(), &InitState::Ready);
        assert_eq!(init.attempts(), 1);
        assert_eq!(s.username(), "alice");
        assert!(s.is_ready());
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_after_transport_error() {
        let mut s = session();
        let (init, result) = run(
            vec![Err(NetError::ConnectionTimedOut), ok(VIEWER_OK)],
            &mut s,
        )
        .await;

        assert!(result.is_ok());
        assert_eq!(init.attempts(), 2);
        assert_eq!(init.last_error(), Some(&NetError::ConnectionTimedOut));
    }

    #[tokio::test]
    async fn test_locked_is_terminal() {
        let mut s = session();
        let (init, result) = run(
            vec![
                ok(r#"{"errors":[{"message":"To protect our users from spam and other malicious activity, this account is temporarily locked."}]}"#),
                ok(VIEWER_OK),
            ],
            &mut s,
        )
        .await;

        assert_eq!(result, Err(NetError::AccountLocked));
        assert_eq!(init.state(), &InitState::Failed(NetError::AccountLocked));
        assert_eq!(init.attempts(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted() {
        let mut s = session();
        let (init, result) = run(Vec::new(), &mut s).await;

        assert_eq!(result, Err(NetError::InitializationExhausted { attempts: 3 }));
        assert_eq!(init.attempts(), 3);
        assert!(s.username().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rotated_cookies_survive_failed_attempt() {
        let mut s = session();
        let rotated = Ok(RawResponse::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            vec!["ct0=Z".to_string()],
            "oops",
        ));
        let (_, result) = run(vec![rotated, ok(VIEWER_OK)], &mut s).await;

        assert!(result.is_ok());
        // no re-seeding on the second attempt
        assert_eq!(s.security_token(), "Z");
    }

    #[tokio::test]
    async fn test_bad_credential_aborts() {
        let mut s = Session::new(Credential::raw("[{\"name\":\"x\"}"), None);
        let (init, result) = run(vec![ok(VIEWER_OK)], &mut s).await;

        assert!(matches!(result, Err(NetError::Decode { .. })));
        assert_eq!(init.attempts(), 1);
        assert!(matches!(init.state(), InitState::Failed(NetError::Decode { .. })));
    }

    #[test]
    fn test_viewer_request_shape() {
        let spec = viewer_request(&ApiConstants::default()).unwrap();
        assert_eq!(spec.url().path(), "/graphql/UhddhjWCl-JMqeiG4vPtvw/Viewer");
        assert_eq!(spec.url().host_str(), Some("api.x.com"));
        assert!(spec.url().query().unwrap().contains("fieldToggles="));
        assert!(spec.has_header("authorization"));
    }

    #[test]
    fn test_parse_screen_name() {
        assert_eq!(parse_screen_name(VIEWER_OK.as_bytes()).unwrap(), "alice");
        assert!(matches!(
            parse_screen_name(br#"{"screen_name":""}"#),
            Err(NetError::MalformedPayload { .. })
        ));
    }
}
