use thiserror::Error;

/// Broad grouping of [`NetError`] variants.
///
/// The grouping drives retry policy: transport and response errors are
/// retried by the initializer, account errors never are. Of the credential
/// errors only a failed token generation is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Network, DNS, TLS, proxy or framing failure.
    Transport,
    /// Malformed or absent credential.
    Credential,
    /// Platform-reported account condition.
    Account,
    /// Retry budget exhausted.
    Lifecycle,
    /// Response or input that could not be interpreted.
    Response,
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum NetError {
    // Transport Errors
    #[error("Connection failed")]
    ConnectionFailed,
    #[error("Connection to {host}:{port} failed: {message}")]
    ConnectionFailedTo {
        host: String,
        port: u16,
        message: String,
    },
    #[error("Name not resolved: {domain}: {message}")]
    NameNotResolvedFor { domain: String, message: String },
    #[error("Connection timed out")]
    ConnectionTimedOut,
    #[error("Tunnel connection failed")]
    TunnelConnectionFailed,
    #[error("SSL protocol error")]
    SslProtocolError,
    #[error("Invalid URL")]
    InvalidUrl,
    #[error("Invalid header")]
    InvalidHeader,
    #[error("Invalid response")]
    InvalidResponse,
    #[error("HTTP body error")]
    HttpBodyError,

    // Credential Errors
    #[error("Failed to decode credential: {reason}")]
    Decode { reason: String },
    #[error("Failed to get csrf token")]
    MissingToken,
    #[error("Failed to generate csrf token")]
    TokenGenerationFailed,

    // Account Errors
    #[error("Account is temporarily locked")]
    AccountLocked,
    #[error("Authentication failed")]
    AuthenticationFailed,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Rate limit exceeded")]
    RateLimited,
    #[error("Not found")]
    NotFound,

    // Lifecycle Errors
    #[error("Failed to initialize after {attempts} retries")]
    InitializationExhausted { attempts: usize },

    // Response Errors
    #[error("Unknown response ({status}): {body}")]
    UnknownResponse { status: u16, body: String },
    #[error("Failed to get tweet ID from link: {link}")]
    InvalidTweetLink { link: String },
    #[error("Malformed payload: {reason}")]
    MalformedPayload { reason: String },
}

impl NetError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            NetError::ConnectionFailed
            | NetError::ConnectionFailedTo { .. }
            | NetError::NameNotResolvedFor { .. }
            | NetError::ConnectionTimedOut
            | NetError::TunnelConnectionFailed
            | NetError::SslProtocolError
            | NetError::InvalidUrl
            | NetError::InvalidHeader
            | NetError::InvalidResponse
            | NetError::HttpBodyError => ErrorCategory::Transport,

            NetError::Decode { .. } | NetError::MissingToken | NetError::TokenGenerationFailed => {
                ErrorCategory::Credential
            }

            NetError::AccountLocked
            | NetError::AuthenticationFailed
            | NetError::InvalidToken
            | NetError::RateLimited
            | NetError::NotFound => ErrorCategory::Account,

            NetError::InitializationExhausted { .. } => ErrorCategory::Lifecycle,

            NetError::UnknownResponse { .. }
            | NetError::InvalidTweetLink { .. }
            | NetError::MalformedPayload { .. } => ErrorCategory::Response,
        }
    }

    /// True for failures that happened before or during the round trip.
    pub fn is_transport(&self) -> bool {
        self.category() == ErrorCategory::Transport
    }

    /// True when retrying the initialization cannot change the result.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            NetError::Decode { .. }
                | NetError::MissingToken
                | NetError::AccountLocked
                | NetError::AuthenticationFailed
                | NetError::InvalidToken
                | NetError::InitializationExhausted { .. }
        )
    }

    /// Create a connection failed error with host context.
    pub fn connection_failed_to(host: impl Into<String>, port: u16, err: std::io::Error) -> Self {
        NetError::ConnectionFailedTo {
            host: host.into(),
            port,
            message: err.to_string(),
        }
    }

    /// Create a DNS failure error with domain context.
    pub fn dns_failed(domain: impl Into<String>, err: std::io::Error) -> Self {
        NetError::NameNotResolvedFor {
            domain: domain.into(),
            message: err.to_string(),
        }
    }

    /// Create a credential decode error.
    pub fn decode(reason: impl Into<String>) -> Self {
        NetError::Decode {
            reason: reason.into(),
        }
    }

    /// Create a malformed payload error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        NetError::MalformedPayload {
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for NetError {
    fn from(err: serde_json::Error) -> Self {
        NetError::malformed(err.to_string())
    }
}
