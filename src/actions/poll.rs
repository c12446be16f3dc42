//! Poll votes.
//!
//! Voting takes two calls: `TweetDetail` to find the poll card attached to
//! the tweet, then the card passthrough endpoint with the chosen option.

use crate::actions::{authenticated, FORM, JSON};
use crate::base::neterror::NetError;
use crate::client::Client;
use crate::config::ApiConstants;
use crate::http::request::RequestSpec;
use crate::http::transport::Transport;
use crate::session::Outcome;

const DETAIL_FEATURES: &str = r#"{"responsive_web_graphql_exclude_directive_enabled":true,"verified_phone_label_enabled":false,"creator_subscriptions_tweet_preview_api_enabled":true,"responsive_web_graphql_timeline_navigation_enabled":true,"responsive_web_graphql_skip_user_profile_image_extensions_enabled":false,"tweetypie_unmention_optimization_enabled":true,"responsive_web_edit_tweet_api_enabled":true,"graphql_is_translatable_rweb_tweet_is_translatable_enabled":true,"view_counts_everywhere_api_enabled":true,"longform_notetweets_consumption_enabled":true,"tweet_awards_web_tipping_enabled":false,"freedom_of_speech_not_reach_fetch_enabled":true,"standardized_nudges_misinfo":true,"tweet_with_visibility_results_prefer_gql_limited_actions_policy_enabled":true,"longform_notetweets_rich_text_read_enabled":true,"longform_notetweets_inline_media_enabled":true,"responsive_web_enhance_cards_enabled":false}"#;
const DETAIL_FIELD_TOGGLES: &str = r#"{"withArticleRichContentState":true}"#;

/// Poll card attached to a tweet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollCard {
    /// `card://<id>` URI.
    pub card_uri: String,
    /// Card template name, e.g. `poll2choice_text_only`.
    pub name: String,
}

impl PollCard {
    /// Find the poll card in a raw `TweetDetail` body.
    pub fn find(body: &str) -> Option<Self> {
        let name = between(body, r#""name":"poll"#, '"')?;
        let card_id = between(body, "card://", '"')?;
        if card_id.is_empty() {
            return None;
        }
        Some(Self {
            card_uri: format!("card://{}", card_id),
            name: format!("poll{}", name),
        })
    }
}

fn between<'a>(haystack: &'a str, start: &str, end: char) -> Option<&'a str> {
    let (_, rest) = haystack.split_once(start)?;
    rest.split(end).next()
}

pub(crate) fn detail_request(constants: &ApiConstants, tweet_id: &str) -> Result<RequestSpec, NetError> {
    let url = constants.graphql_url(
        &constants.web_base,
        &constants.query_ids.tweet_detail,
        "TweetDetail",
    );
    let variables = serde_json::json!({
        "focalTweetId": tweet_id,
        "with_rux_injections": false,
        "includePromotedContent": true,
        "withCommunity": true,
        "withQuickPromoteEligibilityTweetFields": true,
        "withBirdwatchNotes": true,
        "withVoice": true,
        "withV2Timeline": true,
    })
    .to_string();
    let referer = format!("https://twitter.com/i/status/{}", tweet_id);

    let spec = RequestSpec::get(&url)?
        .query("variables", &variables)
        .query("features", DETAIL_FEATURES)
        .query("fieldToggles", DETAIL_FIELD_TOGGLES);

    Ok(authenticated(spec, constants, JSON, None, Some(&referer))
        .header("x-twitter-client-language", "en"))
}

pub(crate) fn vote_request(
    constants: &ApiConstants,
    tweet_id: &str,
    card: &PollCard,
    choice: &str,
) -> Result<RequestSpec, NetError> {
    let url = format!("{}/v2/capi/passthrough/1", constants.caps_base);

    Ok(authenticated(
        RequestSpec::post(&url)?,
        constants,
        FORM,
        Some("https://twitter.com"),
        Some("https://twitter.com/"),
    )
    .form_body([
        ("twitter:string:card_uri", card.card_uri.as_str()),
        ("twitter:long:original_tweet_id", tweet_id),
        ("twitter:string:response_card_name", card.name.as_str()),
        ("twitter:string:cards_platform", "Web-12"),
        ("twitter:string:selected_choice", choice),
    ]))
}

impl<T: Transport> Client<T> {
    /// Vote for option `choice` (1-based, as a string) in a tweet's poll.
    pub async fn vote_poll(&mut self, tweet: &str, choice: &str) -> Outcome {
        const ACTION: &str = "vote_poll";
        let tweet_id = match self.tweet_target(ACTION, tweet) {
            Ok(id) => id,
            Err(outcome) => return outcome,
        };

        let spec = match self.prepared(ACTION, detail_request(self.constants(), &tweet_id)) {
            Ok(spec) => spec,
            Err(outcome) => return outcome,
        };
        let detail = match self.send(ACTION, spec).await {
            Ok(response) => response,
            Err(outcome) => return outcome,
        };

        let Some(card) = PollCard::find(&detail.text()) else {
            let outcome = if detail.is_success() {
                Outcome::from_error(NetError::malformed("tweet has no poll card"))
            } else {
                self.classifier()
                    .classify(detail.status(), detail.body(), |_| false)
            };
            outcome.log(ACTION, self.username());
            return outcome;
        };
        tracing::debug!(card = %card.card_uri, name = %card.name, "found poll card");

        let spec = match self.prepared(ACTION, vote_request(self.constants(), &tweet_id, &card, choice)) {
            Ok(spec) => spec,
            Err(outcome) => return outcome,
        };
        // the passthrough endpoint answers any accepted vote with 2xx
        self.perform(ACTION, spec, |_| true).await
    }
}
