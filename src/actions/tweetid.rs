//! Tweet link parsing.

use crate::base::neterror::NetError;

/// Pull the numeric id out of a tweet link.
///
/// Understands `.../status/<id>` (with or without a query string or
/// trailing path) and the `tweet_id=<id>` query form.
///
/// ```rust
/// use birdnet::actions::extract_tweet_id;
///
/// assert_eq!(
///     extract_tweet_id("https://x.com/jack/status/20?s=20").unwrap(),
///     "20"
/// );
/// ```
pub fn extract_tweet_id(link: &str) -> Result<String, NetError> {
    let link = link.trim();

    let id = if let Some((_, rest)) = link.split_once("tweet_id=") {
        rest.split('&').next().unwrap_or_default()
    } else if let Some((_, rest)) = link.split_once("status/") {
        rest.split(['?', '/', '#']).next().unwrap_or_default()
    } else {
        ""
    };

    if id.is_empty() {
        return Err(NetError::InvalidTweetLink {
            link: link.to_string(),
        });
    }
    Ok(id.to_string())
}

/// Accept either a bare id or a link on one of the platform's domains.
pub(crate) fn resolve_tweet_id(input: &str) -> Result<String, NetError> {
    if input.contains("twitter.com") || input.contains("x.com") {
        extract_tweet_id(input)
    } else {
        Ok(input.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_link() {
        assert_eq!(
            extract_tweet_id("https://twitter.com/user/status/1234567890").unwrap(),
            "1234567890"
        );
    }

    #[test]
    fn test_status_link_with_query_and_suffix() {
        assert_eq!(
            extract_tweet_id("https://x.com/user/status/42?s=46&t=abc").unwrap(),
            "42"
        );
        assert_eq!(
            extract_tweet_id("https://x.com/user/status/42/photo/1").unwrap(),
            "42"
        );
    }

    #[test]
    fn test_tweet_id_query() {
        assert_eq!(
            extract_tweet_id("https://twitter.com/intent/like?tweet_id=77&foo=bar").unwrap(),
            "77"
        );
    }

    #[test]
    fn test_invalid_link() {
        assert_eq!(
            extract_tweet_id("https://x.com/user"),
            Err(NetError::InvalidTweetLink {
                link: "https://x.com/user".to_string()
            })
        );
        assert!(extract_tweet_id("https://x.com/user/status/").is_err());
    }

    #[test]
    fn test_resolve_bare_id() {
        assert_eq!(resolve_tweet_id(" 123 ").unwrap(), "123");
        assert_eq!(resolve_tweet_id("https://x.com/a/status/9").unwrap(), "9");
    }
}
