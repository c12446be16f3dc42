use crate::actions::{authenticated, JSON};
use crate::base::neterror::NetError;
use crate::client::Client;
use crate::config::ApiConstants;
use crate::http::request::RequestSpec;
use crate::http::transport::Transport;
use crate::session::Outcome;
use serde::Deserialize;

const USER_FEATURES: &str = r#"{"hidden_profile_subscriptions_enabled":true,"subscriptions_feature_can_gift_premium":true,"profile_label_improvements_pcf_label_in_post_enabled":true,"rweb_tipjar_consumption_enabled":true,"responsive_web_graphql_exclude_directive_enabled":true,"verified_phone_label_enabled":false,"subscriptions_verification_info_is_identity_verified_enabled":true,"subscriptions_verification_info_verified_since_enabled":true,"highlights_tweets_tab_ui_enabled":true,"responsive_web_twitter_article_notes_tab_enabled":true,"creator_subscriptions_tweet_preview_api_enabled":true,"responsive_web_graphql_skip_user_profile_image_extensions_enabled":false,"responsive_web_graphql_timeline_navigation_enabled":true}"#;
const USER_FIELD_TOGGLES: &str = r#"{"withAuxiliaryUserLabels":false}"#;

/// Public profile of an account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserInfo {
    /// Numeric user id.
    pub rest_id: String,
    #[serde(default)]
    pub is_blue_verified: bool,
    pub legacy: UserLegacy,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UserLegacy {
    pub name: String,
    pub screen_name: String,
    pub description: String,
    pub location: String,
    pub created_at: String,
    pub followers_count: u64,
    pub friends_count: u64,
    pub statuses_count: u64,
    pub favourites_count: u64,
    pub listed_count: u64,
    pub media_count: u64,
    pub following: bool,
    pub verified: bool,
}

#[derive(Deserialize)]
struct Envelope {
    data: Data,
}

#[derive(Deserialize)]
struct Data {
    user: UserResult,
}

#[derive(Deserialize)]
struct UserResult {
    result: UserInfo,
}

pub(crate) fn user_request(constants: &ApiConstants, screen_name: &str) -> Result<RequestSpec, NetError> {
    let url = constants.graphql_url(
        &constants.x_base,
        &constants.query_ids.user_by_screen_name,
        "UserByScreenName",
    );
    let variables = serde_json::json!({ "screen_name": screen_name }).to_string();
    let referer = format!("https://x.com/{}", screen_name);

    let spec = RequestSpec::get(&url)?
        .query("variables", &variables)
        .query("features", USER_FEATURES)
        .query("fieldToggles", USER_FIELD_TOGGLES);

    Ok(authenticated(spec, constants, JSON, None, Some(&referer))
        .header("x-twitter-active-user", "no")
        .header("x-twitter-client-language", "en"))
}

pub(crate) fn parse_user(body: &[u8]) -> Option<UserInfo> {
    serde_json::from_slice::<Envelope>(body)
        .ok()
        .map(|e| e.data.user.result)
        .filter(|u| !u.rest_id.is_empty())
}

impl<T: Transport> Client<T> {
    /// Look up a profile by screen name.
    pub async fn user_info(&mut self, screen_name: &str) -> Result<UserInfo, Outcome> {
        let screen_name = screen_name.trim_start_matches('@');
        let spec = self.prepared("user_info", user_request(self.constants(), screen_name))?;
        self.perform_with("user_info", spec, parse_user).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{"data":{"user":{"result":{"__typename":"User","rest_id":"44196397","is_blue_verified":true,"legacy":{"name":"Elon","screen_name":"elonmusk","followers_count":10,"following":false}}}}}"#;

    #[test]
    fn test_parse_user() {
        let user = parse_user(BODY.as_bytes()).unwrap();
        assert_eq!(user.rest_id, "44196397");
        assert!(user.is_blue_verified);
        assert_eq!(user.legacy.screen_name, "elonmusk");
        assert_eq!(user.legacy.followers_count, 10);
        assert_eq!(user.legacy.description, "");
    }

    #[test]
    fn test_parse_user_missing() {
        assert!(parse_user(br#"{"data":{}}"#).is_none());
    }

    #[test]
    fn test_user_request() {
        let spec = user_request(&ApiConstants::default(), "bob").unwrap();
        assert_eq!(spec.url().host_str(), Some("x.com"));
        assert!(spec.url().path().ends_with("/UserByScreenName"));
        let variables = spec
            .url()
            .query_pairs()
            .find(|(k, _)| k == "variables")
            .map(|(_, v)| v.into_owned());
        assert_eq!(variables.as_deref(), Some(r#"{"screen_name":"bob"}"#));
        assert!(spec.has_header("x-twitter-client-language"));
        assert!(!spec.has_header("origin"));
    }
}
