use crate::base::neterror::NetError;
use std::fmt;

/// Classification of an action result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    Success,
    /// The platform reports the action as already applied.
    AlreadyDone,
    Locked,
    AuthError,
    InvalidToken,
    NotFound,
    RateLimited,
    Unknown,
}

impl OutcomeKind {
    /// Whether an outcome of this kind counts as success.
    pub fn is_success(self) -> bool {
        matches!(self, OutcomeKind::Success | OutcomeKind::AlreadyDone)
    }

    /// The error carried by a failed outcome of this kind.
    pub fn to_error(self, status: u16, body: &str) -> Option<NetError> {
        match self {
            OutcomeKind::Success | OutcomeKind::AlreadyDone => None,
            OutcomeKind::Locked => Some(NetError::AccountLocked),
            OutcomeKind::AuthError => Some(NetError::AuthenticationFailed),
            OutcomeKind::InvalidToken => Some(NetError::InvalidToken),
            OutcomeKind::NotFound => Some(NetError::NotFound),
            OutcomeKind::RateLimited => Some(NetError::RateLimited),
            OutcomeKind::Unknown => Some(NetError::UnknownResponse {
                status,
                body: body.to_string(),
            }),
        }
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutcomeKind::Success => "success",
            OutcomeKind::AlreadyDone => "already done",
            OutcomeKind::Locked => "locked",
            OutcomeKind::AuthError => "auth error",
            OutcomeKind::InvalidToken => "invalid token",
            OutcomeKind::NotFound => "not found",
            OutcomeKind::RateLimited => "rate limited",
            OutcomeKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Result of one action. Built once, returned, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub success: bool,
    pub kind: OutcomeKind,
    pub detail: Option<NetError>,
}

impl Outcome {
    pub fn success() -> Self {
        Self::from_kind(OutcomeKind::Success, None)
    }

    pub fn already_done() -> Self {
        Self::from_kind(OutcomeKind::AlreadyDone, None)
    }

    /// `success` is always derived from `kind`.
    pub fn from_kind(kind: OutcomeKind, detail: Option<NetError>) -> Self {
        Self {
            success: kind.is_success(),
            kind,
            detail,
        }
    }

    /// An action that failed before a response could be classified.
    pub fn from_error(err: NetError) -> Self {
        Self::from_kind(OutcomeKind::Unknown, Some(err))
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Emit the outcome on the log at a level matching its kind.
    pub fn log(&self, action: &str, username: &str) {
        match self.kind {
            OutcomeKind::Success => {
                tracing::info!(action, username, "action succeeded");
            }
            OutcomeKind::AlreadyDone => {
                tracing::warn!(action, username, "action was already applied");
            }
            OutcomeKind::Locked => {
                tracing::warn!(action, username, "account is temporarily locked");
            }
            kind => match &self.detail {
                Some(detail) => {
                    tracing::error!(action, username, kind = %kind, error = %detail, "action failed")
                }
                None => tracing::error!(action, username, kind = %kind, "action failed"),
            },
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{}: {}", self.kind, detail),
            None => write!(f, "{}", self.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_derived_from_kind() {
        assert!(Outcome::success().success);
        assert!(Outcome::already_done().success);
        assert!(!Outcome::from_kind(OutcomeKind::Locked, None).success);
        assert!(!Outcome::from_error(NetError::ConnectionFailed).success);
    }

    #[test]
    fn test_from_error_is_unknown() {
        let outcome = Outcome::from_error(NetError::ConnectionTimedOut);
        assert_eq!(outcome.kind, OutcomeKind::Unknown);
        assert_eq!(outcome.detail, Some(NetError::ConnectionTimedOut));
    }

    #[test]
    fn test_kind_to_error() {
        assert_eq!(OutcomeKind::Success.to_error(200, ""), None);
        assert_eq!(
            OutcomeKind::AuthError.to_error(403, "x"),
            Some(NetError::AuthenticationFailed)
        );
        assert_eq!(
            OutcomeKind::Unknown.to_error(500, "oops"),
            Some(NetError::UnknownResponse {
                status: 500,
                body: "oops".to_string()
            })
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Outcome::success().to_string(), "success");
        assert_eq!(
            Outcome::from_kind(OutcomeKind::Locked, Some(NetError::AccountLocked)).to_string(),
            "locked: Account is temporarily locked"
        );
    }
}
