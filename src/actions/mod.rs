//! Account actions.
//!
//! Every action builds a [`RequestSpec`], hands it to the session's executor
//! and classifies the response. Nothing here retries; a failed action is
//! returned once as an [`Outcome`](crate::session::Outcome).

pub mod account;
pub mod follow;
pub mod like;
pub mod media;
pub mod poll;
pub mod retweet;
pub mod tweet;
pub mod tweetid;
pub mod user;

pub use account::AccountInfo;
pub use poll::PollCard;
pub use tweet::TweetDraft;
pub use tweetid::extract_tweet_id;
pub use user::UserInfo;

use crate::base::neterror::NetError;
use crate::client::Client;
use crate::config::ApiConstants;
use crate::http::request::RequestSpec;
use crate::http::transport::Transport;
use crate::session::Outcome;
use serde_json::Value;

pub(crate) const JSON: &str = "application/json";
pub(crate) const FORM: &str = "application/x-www-form-urlencoded";

/// Headers shared by authenticated web-client calls, in the order the web
/// client sends them.
pub(crate) fn authenticated(
    spec: RequestSpec,
    constants: &ApiConstants,
    content_type: &str,
    origin: Option<&str>,
    referer: Option<&str>,
) -> RequestSpec {
    let mut spec = spec
        .header("accept", "*/*")
        .header("authorization", constants.bearer_token.as_str())
        .header("content-type", content_type)
        .cookie_slot();
    if let Some(origin) = origin {
        spec = spec.header("origin", origin);
    }
    if let Some(referer) = referer {
        spec = spec.header("referer", referer);
    }
    spec.csrf_slot()
        .header("x-twitter-active-user", "yes")
        .header("x-twitter-auth-type", "OAuth2Session")
}

/// POST a GraphQL mutation as `{"variables": .., "queryId": ..}`.
pub(crate) fn graphql_mutation(
    constants: &ApiConstants,
    query_id: &str,
    operation: &str,
    variables: Value,
) -> Result<RequestSpec, NetError> {
    let url = constants.graphql_url(&constants.web_base, query_id, operation);
    let body = serde_json::json!({
        "variables": variables,
        "queryId": query_id,
    });

    let spec = authenticated(
        RequestSpec::post(&url)?,
        constants,
        JSON,
        Some("https://twitter.com"),
        None,
    );
    spec.json_body(&body)
}

impl<T: Transport> Client<T> {
    /// Resolve a tweet id or link, logging a bad link as the action's outcome.
    pub(crate) fn tweet_target(&self, action: &str, input: &str) -> Result<String, Outcome> {
        tweetid::resolve_tweet_id(input).map_err(|e| {
            let outcome = Outcome::from_error(e);
            outcome.log(action, self.username());
            outcome
        })
    }

    /// Build a request, turning a construction error into an outcome.
    pub(crate) fn prepared(
        &self,
        action: &str,
        spec: Result<RequestSpec, NetError>,
    ) -> Result<RequestSpec, Outcome> {
        spec.map_err(|e| {
            let outcome = Outcome::from_error(e);
            outcome.log(action, self.username());
            outcome
        })
    }
}

/// Non-empty string at a JSON pointer.
pub(crate) fn string_at(body: &[u8], pointer: &str) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_at() {
        let body = br#"{"data":{"favorite_tweet":"Done","empty":""}}"#;
        assert_eq!(string_at(body, "/data/favorite_tweet").as_deref(), Some("Done"));
        assert_eq!(string_at(body, "/data/empty"), None);
        assert_eq!(string_at(body, "/data/missing"), None);
        assert_eq!(string_at(b"not json", "/data"), None);
    }

    #[test]
    fn test_graphql_mutation_body() {
        let constants = ApiConstants::default();
        let spec = graphql_mutation(
            &constants,
            "abc",
            "FavoriteTweet",
            serde_json::json!({"tweet_id": "1"}),
        )
        .unwrap();

        assert_eq!(spec.url().as_str(), "https://twitter.com/i/api/graphql/abc/FavoriteTweet");
        let body: Value = serde_json::from_slice(spec.body_bytes().unwrap()).unwrap();
        assert_eq!(body["queryId"], "abc");
        assert_eq!(body["variables"]["tweet_id"], "1");
    }

    #[test]
    fn test_authenticated_header_order() {
        let spec = authenticated(
            RequestSpec::post("https://x.com/a").unwrap(),
            &ApiConstants::default(),
            FORM,
            Some("https://x.com"),
            Some("https://x.com/bob"),
        );
        let names: Vec<&str> = spec.headers().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            [
                "accept",
                "authorization",
                "content-type",
                "cookie",
                "origin",
                "referer",
                "x-csrf-token",
                "x-twitter-active-user",
                "x-twitter-auth-type"
            ]
        );
    }
}
