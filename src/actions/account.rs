use crate::actions::{authenticated, FORM};
use crate::base::neterror::NetError;
use crate::client::Client;
use crate::config::ApiConstants;
use crate::http::request::RequestSpec;
use crate::http::transport::Transport;
use crate::session::{Outcome, OutcomeKind};
use serde::Deserialize;

const SUSPENDED_PHRASE: &str = "User has been suspended";

/// Standing of the session's own account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountInfo {
    pub user_id: String,
    pub name: String,
    pub username: String,
    pub suspended: bool,
    pub protected: bool,
    pub verified: bool,
}

#[derive(Debug, Deserialize)]
struct MultiUserList {
    #[serde(default)]
    users: Vec<ListedUser>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ListedUser {
    user_id: String,
    name: String,
    screen_name: String,
    is_suspended: bool,
    is_verified: bool,
    is_protected: bool,
    is_auth_valid: bool,
}

pub(crate) fn account_request(constants: &ApiConstants) -> Result<RequestSpec, NetError> {
    let url = format!("{}/1.1/account/multi/list.json", constants.api_base);
    Ok(authenticated(
        RequestSpec::get(&url)?,
        constants,
        FORM,
        Some("https://x.com"),
        None,
    ))
}

impl<T: Transport> Client<T> {
    /// Check the session's own account.
    ///
    /// A suspended account is reported through
    /// [`AccountInfo::suspended`], not as a failure.
    pub async fn account_status(&mut self) -> Result<AccountInfo, Outcome> {
        const ACTION: &str = "account_status";
        let spec = self.prepared(ACTION, account_request(self.constants()))?;
        let response = self.send(ACTION, spec).await?;
        let username = self.username().to_string();

        if !response.is_success() && response.text().contains(SUSPENDED_PHRASE) {
            tracing::warn!(username = %username, "account is suspended");
            return Ok(AccountInfo {
                username,
                suspended: true,
                ..Default::default()
            });
        }

        let mut listed = None;
        let outcome = self
            .classifier()
            .classify(response.status(), response.body(), |body| {
                listed = serde_json::from_slice::<MultiUserList>(body).ok();
                listed.is_some()
            });

        let Some(list) = listed.filter(|_| outcome.kind == OutcomeKind::Success) else {
            let outcome = match outcome.kind {
                OutcomeKind::AlreadyDone => Outcome::from_error(NetError::malformed(
                    "account list response could not be read",
                )),
                _ => outcome,
            };
            outcome.log(ACTION, &username);
            return Err(outcome);
        };

        let Some(user) = list
            .users
            .into_iter()
            .find(|u| u.screen_name.eq_ignore_ascii_case(&username))
        else {
            let outcome = Outcome::from_error(NetError::malformed("account not found in response"));
            outcome.log(ACTION, &username);
            return Err(outcome);
        };

        if !user.is_auth_valid {
            let outcome = Outcome::from_kind(
                OutcomeKind::AuthError,
                Some(NetError::AuthenticationFailed),
            );
            outcome.log(ACTION, &username);
            return Err(outcome);
        }

        let info = AccountInfo {
            user_id: user.user_id,
            name: user.name,
            username: user.screen_name,
            suspended: user.is_suspended,
            protected: user.is_protected,
            verified: user.is_verified,
        };
        if info.suspended {
            tracing::warn!(username = %username, "account is suspended");
        } else {
            Outcome::success().log(ACTION, &username);
        }
        Ok(info)
    }
}
