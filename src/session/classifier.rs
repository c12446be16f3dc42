//! Response classification.
//!
//! Turns `(status, body, success predicate)` into an [`Outcome`]. The
//! predicate is checked first; after that an ordered rule table decides,
//! first match wins. Anything no rule matches is `Unknown` with the raw
//! body attached.

use crate::session::outcome::{Outcome, OutcomeKind};
use http::StatusCode;

/// Which statuses a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusScope {
    /// Any 2xx status.
    Success,
    /// Any status.
    Any,
    /// Exactly this status.
    Exact(u16),
}

impl StatusScope {
    fn matches(self, status: StatusCode) -> bool {
        match self {
            StatusScope::Success => status.is_success(),
            StatusScope::Any => true,
            StatusScope::Exact(code) => status.as_u16() == code,
        }
    }
}

/// One row of the table.
///
/// Matches when the status is in scope and either `phrases` is empty or
/// the body contains one of them (case-sensitive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub kind: OutcomeKind,
    pub status: StatusScope,
    pub phrases: Vec<String>,
}

impl Rule {
    pub fn new<I, S>(kind: OutcomeKind, status: StatusScope, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind,
            status,
            phrases: phrases.into_iter().map(Into::into).collect(),
        }
    }

    fn matches(&self, status: StatusCode, body: &str) -> bool {
        self.status.matches(status)
            && (self.phrases.is_empty() || self.phrases.iter().any(|p| body.contains(p.as_str())))
    }
}

pub const LOCKED_PHRASE: &str = "this account is temporarily locked";
pub const AUTH_PHRASE: &str = "Could not authenticate you";
pub const CSRF_MISMATCH_PHRASE: &str = "This request requires a matching csrf cookie and header";
pub const RATE_LIMIT_PHRASE: &str = "Rate limit exceeded";

/// Ordered rule table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classifier {
    rules: Vec<Rule>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier {
    /// The standard table.
    pub fn new() -> Self {
        Self {
            rules: vec![
                Rule::new(
                    OutcomeKind::AlreadyDone,
                    StatusScope::Success,
                    ["already", "duplicate"],
                ),
                Rule::new(OutcomeKind::Locked, StatusScope::Any, [LOCKED_PHRASE]),
                Rule::new(OutcomeKind::AuthError, StatusScope::Any, [AUTH_PHRASE]),
                Rule::new(
                    OutcomeKind::InvalidToken,
                    StatusScope::Any,
                    [CSRF_MISMATCH_PHRASE],
                ),
                Rule::new(
                    OutcomeKind::RateLimited,
                    StatusScope::Exact(429),
                    Vec::<String>::new(),
                ),
                Rule::new(OutcomeKind::RateLimited, StatusScope::Any, [RATE_LIMIT_PHRASE]),
                Rule::new(
                    OutcomeKind::NotFound,
                    StatusScope::Any,
                    ["No status found with that ID", "User not found"],
                ),
            ],
        }
    }

    /// A table with no rules: only the predicate and the `Unknown`
    /// fallback apply.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule after the existing ones.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Classify a response. `success` is only consulted for 2xx statuses.
    pub fn classify<P>(&self, status: StatusCode, body: &[u8], success: P) -> Outcome
    where
        P: FnOnce(&[u8]) -> bool,
    {
        if status.is_success() && success(body) {
            return Outcome::success();
        }

        let text = String::from_utf8_lossy(body);
        let kind = self
            .rules
            .iter()
            .find(|rule| rule.matches(status, &text))
            .map(|rule| rule.kind)
            .unwrap_or(OutcomeKind::Unknown);

        Outcome::from_kind(kind, kind.to_error(status.as_u16(), &text))
    }
}
