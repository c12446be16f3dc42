use crate::actions::{graphql_mutation, string_at};
use crate::base::neterror::NetError;
use crate::client::Client;
use crate::config::ApiConstants;
use crate::http::request::RequestSpec;
use crate::http::transport::Transport;
use crate::session::Outcome;
use serde_json::json;

pub(crate) fn retweet_request(constants: &ApiConstants, tweet_id: &str) -> Result<RequestSpec, NetError> {
    graphql_mutation(
        constants,
        &constants.query_ids.retweet,
        "CreateRetweet",
        json!({ "tweet_id": tweet_id, "dark_request": false }),
    )
}

pub(crate) fn unretweet_request(constants: &ApiConstants, tweet_id: &str) -> Result<RequestSpec, NetError> {
    graphql_mutation(
        constants,
        &constants.query_ids.unretweet,
        "DeleteRetweet",
        json!({ "source_tweet_id": tweet_id, "dark_request": false }),
    )
}

impl<T: Transport> Client<T> {
    /// Retweet a tweet by id or link.
    pub async fn retweet(&mut self, tweet: &str) -> Outcome {
        let tweet_id = match self.tweet_target("retweet", tweet) {
            Ok(id) => id,
            Err(outcome) => return outcome,
        };
        let spec = match self.prepared("retweet", retweet_request(self.constants(), &tweet_id)) {
            Ok(spec) => spec,
            Err(outcome) => return outcome,
        };

        self.perform("retweet", spec, |body| {
            string_at(body, "/data/create_retweet/retweet_results/result/rest_id").is_some()
        })
        .await
    }

    /// Undo a retweet.
    pub async fn unretweet(&mut self, tweet: &str) -> Outcome {
        let tweet_id = match self.tweet_target("unretweet", tweet) {
            Ok(id) => id,
            Err(outcome) => return outcome,
        };
        let spec = match self.prepared("unretweet", unretweet_request(self.constants(), &tweet_id)) {
            Ok(spec) => spec,
            Err(outcome) => return outcome,
        };

        self.perform("unretweet", spec, |body| {
            string_at(body, "/data/unretweet/source_tweet_results/result/rest_id").is_some()
        })
        .await
    }
}
