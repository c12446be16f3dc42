use crate::actions::{authenticated, string_at, FORM};
use crate::base::neterror::NetError;
use crate::client::Client;
use crate::config::ApiConstants;
use crate::http::request::RequestSpec;
use crate::http::transport::Transport;
use crate::session::Outcome;

const FRIENDSHIP_FLAGS: &[&str] = &[
    "include_profile_interstitial_type",
    "include_blocking",
    "include_blocked_by",
    "include_followed_by",
    "include_want_retweets",
    "include_mute_edge",
    "include_can_dm",
    "include_can_media_tag",
];

const EXTENDED_FLAGS: &[&str] = &[
    "include_ext_is_blue_verified",
    "include_ext_verified_type",
    "include_ext_profile_image_shape",
];

pub(crate) fn follow_request(constants: &ApiConstants, screen_name: &str) -> Result<RequestSpec, NetError> {
    let url = format!("{}/i/api/1.1/friendships/create.json", constants.web_base);
    let referer = format!("https://twitter.com/{}", screen_name);

    let mut form: Vec<(&str, &str)> = FRIENDSHIP_FLAGS.iter().map(|f| (*f, "1")).collect();
    form.push(("skip_status", "1"));
    form.push(("screen_name", screen_name));

    Ok(authenticated(
        RequestSpec::post(&url)?,
        constants,
        FORM,
        Some("https://twitter.com"),
        Some(&referer),
    )
    .form_body(form))
}

pub(crate) fn unfollow_request(constants: &ApiConstants, user_id: &str) -> Result<RequestSpec, NetError> {
    let url = format!("{}/i/api/1.1/friendships/destroy.json", constants.x_base);

    let mut form: Vec<(&str, &str)> = FRIENDSHIP_FLAGS
        .iter()
        .chain(EXTENDED_FLAGS)
        .map(|f| (*f, "1"))
        .collect();
    form.push(("skip_status", "1"));
    form.push(("user_id", user_id));

    Ok(authenticated(
        RequestSpec::post(&url)?,
        constants,
        FORM,
        Some("https://x.com"),
        None,
    )
    .form_body(form))
}

fn has_screen_name(body: &[u8]) -> bool {
    string_at(body, "/screen_name").is_some()
}

impl<T: Transport> Client<T> {
    /// Follow an account by screen name.
    pub async fn follow(&mut self, screen_name: &str) -> Outcome {
        let screen_name = screen_name.trim_start_matches('@');
        let spec = match self.prepared("follow", follow_request(self.constants(), screen_name)) {
            Ok(spec) => spec,
            Err(outcome) => return outcome,
        };
        self.perform("follow", spec, has_screen_name).await
    }

    /// Unfollow by numeric user id or screen name.
    ///
    /// A screen name costs one extra `UserByScreenName` lookup.
    pub async fn unfollow(&mut self, user: &str) -> Outcome {
        let user = user.trim_start_matches('@');
        let user_id = if !user.is_empty() && user.bytes().all(|b| b.is_ascii_digit()) {
            user.to_string()
        } else {
            match self.user_info(user).await {
                Ok(info) => info.rest_id,
                Err(outcome) => return outcome,
            }
        };

        let spec = match self.prepared("unfollow", unfollow_request(self.constants(), &user_id)) {
            Ok(spec) => spec,
            Err(outcome) => return outcome,
        };
        self.perform("unfollow", spec, has_screen_name).await
    }
}
