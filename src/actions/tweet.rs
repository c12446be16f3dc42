//! Tweets, replies and quote tweets through `CreateTweet`.

use crate::actions::{authenticated, string_at, JSON};
use crate::base::neterror::NetError;
use crate::client::Client;
use crate::config::ApiConstants;
use crate::http::request::RequestSpec;
use crate::http::transport::Transport;
use crate::session::Outcome;
use serde_json::{json, Map, Value};

const ENABLED_FEATURES: &[&str] = &[
    "tweetypie_unmention_optimization_enabled",
    "responsive_web_edit_tweet_api_enabled",
    "graphql_is_translatable_rweb_tweet_is_translatable_enabled",
    "view_counts_everywhere_api_enabled",
    "longform_notetweets_consumption_enabled",
    "freedom_of_speech_not_reach_fetch_enabled",
    "standardized_nudges_misinfo",
    "tweet_with_visibility_results_prefer_gql_limited_actions_policy_enabled",
    "longform_notetweets_rich_text_read_enabled",
    "longform_notetweets_inline_media_enabled",
    "responsive_web_graphql_exclude_directive_enabled",
    "responsive_web_graphql_timeline_navigation_enabled",
];

const DISABLED_FEATURES: &[&str] = &[
    "responsive_web_twitter_article_tweet_consumption_enabled",
    "tweet_awards_web_tipping_enabled",
    "verified_phone_label_enabled",
    "responsive_web_media_download_video_enabled",
    "responsive_web_graphql_skip_user_profile_image_extensions_enabled",
];

/// Flipped on for replies, off for top-level tweets.
const REPLY_FEATURES: &[&str] = &[
    "rweb_video_timestamps_enabled",
    "c9s_tweet_anatomy_moderator_badge_enabled",
    "responsive_web_enhance_cards_enabled",
];

/// A tweet to publish.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TweetDraft {
    pub text: String,
    /// Already uploaded media.
    pub media_ids: Vec<String>,
    /// Base64 media uploaded just before posting.
    pub media_base64: Option<String>,
    pub reply_to: Option<String>,
    pub quote_url: Option<String>,
}

impl TweetDraft {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn media_id(mut self, id: impl Into<String>) -> Self {
        self.media_ids.push(id.into());
        self
    }

    pub fn media_base64(mut self, data: impl Into<String>) -> Self {
        self.media_base64 = Some(data.into());
        self
    }

    pub fn reply_to(mut self, tweet_id: impl Into<String>) -> Self {
        self.reply_to = Some(tweet_id.into());
        self
    }

    pub fn quote(mut self, tweet_url: impl Into<String>) -> Self {
        self.quote_url = Some(tweet_url.into());
        self
    }

    fn variables(&self) -> Value {
        let media_entities: Vec<Value> = self
            .media_ids
            .iter()
            .map(|id| json!({ "media_id": id, "tagged_users": [] }))
            .collect();

        let mut variables = json!({
            "tweet_text": self.text,
            "dark_request": false,
            "media": {
                "media_entities": media_entities,
                "possibly_sensitive": false,
            },
            "semantic_annotation_ids": [],
        });

        if let Some(url) = &self.quote_url {
            variables["attachment_url"] = json!(url);
        }
        if let Some(id) = &self.reply_to {
            variables["reply"] = json!({
                "in_reply_to_tweet_id": id,
                "exclude_reply_user_ids": [],
            });
        }
        variables
    }
}

fn features(reply: bool) -> Value {
    let mut map = Map::new();
    for name in ENABLED_FEATURES {
        map.insert(name.to_string(), Value::Bool(true));
    }
    for name in DISABLED_FEATURES {
        map.insert(name.to_string(), Value::Bool(false));
    }
    for name in REPLY_FEATURES {
        map.insert(name.to_string(), Value::Bool(reply));
    }
    Value::Object(map)
}

pub(crate) fn create_tweet_request(constants: &ApiConstants, draft: &TweetDraft) -> Result<RequestSpec, NetError> {
    let query_id = &constants.query_ids.create_tweet;
    let url = constants.graphql_url(&constants.web_base, query_id, "CreateTweet");
    let body = json!({
        "variables": draft.variables(),
        "features": features(draft.reply_to.is_some()),
        "queryId": query_id,
    });

    authenticated(
        RequestSpec::post(&url)?,
        constants,
        JSON,
        Some("https://twitter.com"),
        Some("https://twitter.com/compose/tweet"),
    )
    .json_body(&body)
}

impl<T: Transport> Client<T> {
    /// Post a plain tweet.
    pub async fn post(&mut self, text: &str) -> Outcome {
        self.post_with(TweetDraft::new(text)).await
    }

    /// Reply to a tweet by id or link.
    pub async fn comment(&mut self, tweet: &str, text: &str) -> Outcome {
        let tweet_id = match self.tweet_target("comment", tweet) {
            Ok(id) => id,
            Err(outcome) => return outcome,
        };
        self.post_with(TweetDraft::new(text).reply_to(tweet_id)).await
    }

    /// Post a draft, uploading its inline media first.
    pub async fn post_with(&mut self, mut draft: TweetDraft) -> Outcome {
        let action = if draft.reply_to.is_some() { "comment" } else { "post" };

        if let Some(data) = draft.media_base64.take() {
            match self.upload_media(&data).await {
                Ok(id) => draft.media_ids.push(id),
                Err(outcome) => return outcome,
            }
        }

        let spec = match self.prepared(action, create_tweet_request(self.constants(), &draft)) {
            Ok(spec) => spec,
            Err(outcome) => return outcome,
        };

        self.perform(action, spec, |body| {
            string_at(body, "/data/create_tweet/tweet_results/result/rest_id").is_some()
        })
        .await
    }
}
