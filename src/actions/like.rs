use crate::actions::{graphql_mutation, string_at};
use crate::base::neterror::NetError;
use crate::client::Client;
use crate::config::ApiConstants;
use crate::http::request::RequestSpec;
use crate::http::transport::Transport;
use crate::session::Outcome;
use serde_json::json;

pub(crate) fn like_request(constants: &ApiConstants, tweet_id: &str) -> Result<RequestSpec, NetError> {
    let query_id = &constants.query_ids.like;
    graphql_mutation(constants, query_id, "FavoriteTweet", json!({ "tweet_id": tweet_id }))
}

pub(crate) fn unlike_request(constants: &ApiConstants, tweet_id: &str) -> Result<RequestSpec, NetError> {
    let query_id = &constants.query_ids.unlike;
    graphql_mutation(constants, query_id, "UnfavoriteTweet", json!({ "tweet_id": tweet_id }))
}

impl<T: Transport> Client<T> {
    /// Like a tweet by id or link.
    pub async fn like(&mut self, tweet: &str) -> Outcome {
        let tweet_id = match self.tweet_target("like", tweet) {
            Ok(id) => id,
            Err(outcome) => return outcome,
        };
        let spec = match self.prepared("like", like_request(self.constants(), &tweet_id)) {
            Ok(spec) => spec,
            Err(outcome) => return outcome,
        };

        self.perform("like", spec, |body| {
            string_at(body, "/data/favorite_tweet").as_deref() == Some("Done")
        })
        .await
    }

    /// Remove a like.
    pub async fn unlike(&mut self, tweet: &str) -> Outcome {
        let tweet_id = match self.tweet_target("unlike", tweet) {
            Ok(id) => id,
            Err(outcome) => return outcome,
        };
        let spec = match self.prepared("unlike", unlike_request(self.constants(), &tweet_id)) {
            Ok(spec) => spec,
            Err(outcome) => return outcome,
        };

        self.perform("unlike", spec, |body| {
            string_at(body, "/data/unfavorite_tweet").as_deref() == Some("Done")
        })
        .await
    }
}
