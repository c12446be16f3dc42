//! Client configuration.
//!
//! ```rust
//! use birdnet::config::ClientConfig;
//! use std::time::Duration;
//!
//! let config = ClientConfig::default()
//!     .max_retries(5)
//!     .timeout(Duration::from_secs(10));
//! assert_eq!(config.retry_policy().max_attempts, 5);
//! ```

use crate::http::retry::RetryPolicy;
use std::time::Duration;

/// Public bearer token of the official web client.
pub const BEARER_TOKEN: &str = "Bearer AAAAAAAAAAAAAAAAAAAAANRILgAAAAAAnNwIzUejRCOuH5E6I8xnZz4puTs%3D1Zv7ttfk8LF81IUq16cHjhLTvJu4FA33AGWWjCpTnA";

/// GraphQL operation ids.
///
/// The platform rotates these when it ships a new web client; override
/// them through [`ApiConstants::query_ids`] without a new release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryIds {
    pub like: String,
    pub unlike: String,
    pub retweet: String,
    pub unretweet: String,
    pub create_tweet: String,
    pub viewer: String,
    pub user_by_screen_name: String,
    pub tweet_detail: String,
}

impl Default for QueryIds {
    fn default() -> Self {
        Self {
            like: "lI07N6Otwv1PhnEgXILM7A".to_string(),
            unlike: "ZYKSe-w7KEslx3JhSIk5LA".to_string(),
            retweet: "ojPdsZsimiJrUGLR1sjUtA".to_string(),
            unretweet: "iQtK4dl5hBmXewYZLkNG9A".to_string(),
            create_tweet: "bDE2rBtZb3uyrczSZ_pI9g".to_string(),
            viewer: "UhddhjWCl-JMqeiG4vPtvw".to_string(),
            user_by_screen_name: "32pL5BWe9WKeSK1MoPvFQQ".to_string(),
            tweet_detail: "B9_KmbkLhXt6jRwGjJrweg".to_string(),
        }
    }
}

/// Platform constants sent with every authenticated call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConstants {
    pub bearer_token: String,
    pub query_ids: QueryIds,
    /// Base for GraphQL mutations and most REST calls.
    pub web_base: String,
    /// Base for the viewer query and account listing.
    pub api_base: String,
    /// Base for unfollow and user lookup.
    pub x_base: String,
    pub upload_base: String,
    pub caps_base: String,
}

impl Default for ApiConstants {
    fn default() -> Self {
        Self {
            bearer_token: BEARER_TOKEN.to_string(),
            query_ids: QueryIds::default(),
            web_base: "https://twitter.com".to_string(),
            api_base: "https://api.x.com".to_string(),
            x_base: "https://x.com".to_string(),
            upload_base: "https://upload.twitter.com".to_string(),
            caps_base: "https://caps.twitter.com".to_string(),
        }
    }
}

impl ApiConstants {
    /// Point every endpoint at one base URL. Used to run against a local
    /// server.
    pub fn with_base_url(base: &str) -> Self {
        let base = base.trim_end_matches('/').to_string();
        Self {
            web_base: base.clone(),
            api_base: base.clone(),
            x_base: base.clone(),
            upload_base: base.clone(),
            caps_base: base,
            ..Self::default()
        }
    }

    pub fn graphql_url(&self, base: &str, query_id: &str, operation: &str) -> String {
        format!("{}/i/api/graphql/{}/{}", base, query_id, operation)
    }
}

/// Client configuration (builder style).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Initialization attempts, including the first (default: 3).
    pub max_retries: usize,
    /// Per-request deadline (default: 30s).
    pub timeout: Duration,
    /// Lower bound of the delay between initialization attempts (default: 1s).
    pub retry_min_delay: Duration,
    /// Upper bound of the delay between initialization attempts (default: 5s).
    pub retry_max_delay: Duration,
    pub constants: ApiConstants,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            timeout: Duration::from_secs(30),
            retry_min_delay: Duration::from_secs(1),
            retry_max_delay: Duration::from_secs(5),
            constants: ApiConstants::default(),
        }
    }
}

impl ClientConfig {
    pub fn max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn retry_delay(mut self, min: Duration, max: Duration) -> Self {
        self.retry_min_delay = min;
        self.retry_max_delay = max;
        self
    }

    pub fn constants(mut self, constants: ApiConstants) -> Self {
        self.constants = constants;
        self
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_retries,
            min_delay: self.retry_min_delay,
            max_delay: self.retry_max_delay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.retry_policy(), RetryPolicy::default());
        assert!(config.constants.bearer_token.starts_with("Bearer "));
    }

    #[test]
    fn test_graphql_url() {
        let c = ApiConstants::default();
        assert_eq!(
            c.graphql_url(&c.web_base, &c.query_ids.like, "FavoriteTweet"),
            "https://twitter.com/i/api/graphql/lI07N6Otwv1PhnEgXILM7A/FavoriteTweet"
        );
    }

    #[test]
    fn test_with_base_url() {
        let c = ApiConstants::with_base_url("http://127.0.0.1:9000/");
        assert_eq!(c.api_base, "http://127.0.0.1:9000");
        assert_eq!(c.caps_base, "http://127.0.0.1:9000");
        assert_eq!(c.query_ids, QueryIds::default());
    }
}
