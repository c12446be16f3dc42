//! Authenticated account client with builder pattern.
//!
//! A [`Client`] owns one initialized [`Session`], the executor that sends on
//! its behalf and the classifier that judges responses. Actions live in
//! [`crate::actions`] and all take `&mut self`.
//!
//! # Example
//!
//! ```rust,ignore
//! use birdnet::{Client, Credential};
//!
//! let mut client = Client::builder(Credential::raw("0123abcd..."))
//!     .proxy("user:pass@10.0.0.1:8080")
//!     .max_retries(5)
//!     .connect()
//!     .await?;
//!
//! let outcome = client.like("https://x.com/someone/status/1234567890").await;
//! assert!(outcome.is_success());
//! ```

use crate::auth::credential::Credential;
use crate::base::neterror::NetError;
use crate::config::{ApiConstants, ClientConfig};
use crate::emulation::BrowserProfile;
use crate::http::request::RequestSpec;
use crate::http::response::RawResponse;
use crate::http::transaction::NetworkTransport;
use crate::http::transport::Transport;
use crate::session::{ActionExecutor, Classifier, Initializer, Outcome, OutcomeKind, Session};
use crate::socket::proxy::ProxySettings;
use crate::socket::tls::TlsConfig;
use std::time::Duration;

/// Client for one account.
///
/// Use [`Client::builder()`] to configure and initialize a client.
#[derive(Debug)]
pub struct Client<T = NetworkTransport> {
    session: Session,
    executor: ActionExecutor<T>,
    classifier: Classifier,
    config: ClientConfig,
}

impl Client {
    /// Start building a client for `credential`.
    pub fn builder(credential: Credential) -> ClientBuilder {
        ClientBuilder::new(credential)
    }
}

impl<T: Transport> Client<T> {
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Screen name resolved during initialization.
    pub fn username(&self) -> &str {
        self.session.username()
    }

    pub fn security_token(&self) -> &str {
        self.session.security_token()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn constants(&self) -> &ApiConstants {
        &self.config.constants
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Send `spec`; a transport failure becomes a logged `Unknown` outcome.
    pub(crate) async fn send(&mut self, action: &str, spec: RequestSpec) -> Result<RawResponse, Outcome> {
        match self.executor.execute(&mut self.session, spec).await {
            Ok(response) => Ok(response),
            Err(e) => {
                let outcome = Outcome::from_error(e);
                outcome.log(action, self.session.username());
                Err(outcome)
            }
        }
    }

    /// Run one action and classify its response with `success`.
    pub(crate) async fn perform<P>(&mut self, action: &str, spec: RequestSpec, success: P) -> Outcome
    where
        P: FnOnce(&[u8]) -> bool,
    {
        let response = match self.send(action, spec).await {
            Ok(response) => response,
            Err(outcome) => return outcome,
        };

        let outcome = self
            .classifier
            .classify(response.status(), response.body(), success);
        outcome.log(action, self.session.username());
        outcome
    }

    /// Run one action whose success carries a value.
    ///
    /// `extract` doubles as the success predicate. An `AlreadyDone` response
    /// has no value to hand back, so it is reported as a malformed payload.
    pub(crate) async fn perform_with<R, F>(
        &mut self,
        action: &str,
        spec: RequestSpec,
        extract: F,
    ) -> Result<R, Outcome>
    where
        F: FnOnce(&[u8]) -> Option<R>,
    {
        let response = self.send(action, spec).await?;

        let mut value = None;
        let outcome = self
            .classifier
            .classify(response.status(), response.body(), |body| {
                value = extract(body);
                value.is_some()
            });

        let result = match (outcome.kind, value) {
            (OutcomeKind::Success, Some(v)) => {
                outcome.log(action, self.session.username());
                return Ok(v);
            }
            (OutcomeKind::AlreadyDone, _) | (OutcomeKind::Success, None) => Outcome::from_kind(
                OutcomeKind::Unknown,
                Some(NetError::malformed(format!(
                    "{} response carried no result: {}",
                    action,
                    response.text()
                ))),
            ),
            _ => outcome,
        };

        result.log(action, self.session.username());
        Err(result)
    }
}

/// Builder for creating a [`Client`].
#[derive(Debug)]
pub struct ClientBuilder {
    credential: Credential,
    proxy: Option<String>,
    config: ClientConfig,
    classifier: Classifier,
    profile: BrowserProfile,
    tls: TlsConfig,
}

impl ClientBuilder {
    pub fn new(credential: Credential) -> Self {
        Self {
            credential,
            proxy: None,
            config: ClientConfig::default(),
            classifier: Classifier::new(),
            profile: BrowserProfile::default(),
            tls: TlsConfig::default(),
        }
    }

    /// Route every request through an HTTP proxy.
    ///
    /// Accepts `user:pass@host:port`, `host:port` or an `http://` URL.
    pub fn proxy(mut self, address: impl Into<String>) -> Self {
        self.proxy = Some(address.into());
        self
    }

    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the initialization attempt budget.
    pub fn max_retries(mut self, max_retries: usize) -> Self {
        self.config = self.config.max_retries(max_retries);
        self
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.timeout(timeout);
        self
    }

    pub fn constants(mut self, constants: ApiConstants) -> Self {
        self.config = self.config.constants(constants);
        self
    }

    /// Replace the rule table.
    pub fn classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn profile(mut self, profile: BrowserProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn tls_config(mut self, tls: TlsConfig) -> Self {
        self.tls = tls;
        self
    }

    /// Initialize over the network.
    pub async fn connect(self) -> Result<Client<NetworkTransport>, NetError> {
        let proxy = self
            .proxy
            .as_deref()
            .map(ProxySettings::parse)
            .transpose()?;

        let transport = NetworkTransport::new()
            .with_proxy(proxy)
            .with_tls_config(self.tls.clone())
            .with_timeout(self.config.timeout);

        self.connect_with(transport).await
    }

    /// Initialize over a caller-supplied transport.
    pub async fn connect_with<T: Transport>(self, transport: T) -> Result<Client<T>, NetError> {
        let mut session = Session::new(self.credential, self.proxy);
        let executor = ActionExecutor::new(transport, self.profile);

        Initializer::new(self.config.retry_policy())
            .run(&mut session, &executor, &self.classifier, &self.config.constants)
            .await?;

        Ok(Client {
            session,
            executor,
            classifier: self.classifier,
            config: self.config,
        })
    }
}
