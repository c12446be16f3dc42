use crate::actions::FORM;
use crate::base::neterror::NetError;
use crate::client::Client;
use crate::config::ApiConstants;
use crate::http::request::RequestSpec;
use crate::http::transport::Transport;
use crate::session::Outcome;
use base64::Engine;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct MediaUploadResponse {
    #[serde(default)]
    media_id_string: String,
}

pub(crate) fn upload_request(constants: &ApiConstants, media_base64: &str) -> Result<RequestSpec, NetError> {
    let url = format!("{}/1.1/media/upload.json", constants.upload_base);
    let spec = RequestSpec::post(&url)?
        .header("authorization", constants.bearer_token.as_str())
        .header("content-type", FORM)
        .cookie_slot()
        .csrf_slot()
        .form_body([("media_data", media_base64)]);
    Ok(spec)
}

fn media_id(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<MediaUploadResponse>(body)
        .ok()
        .map(|r| r.media_id_string)
        .filter(|id| !id.is_empty())
}

impl<T: Transport> Client<T> {
    /// Upload base64-encoded media, returning its media id.
    pub async fn upload_media(&mut self, media_base64: &str) -> Result<String, Outcome> {
        let spec = self.prepared("upload_media", upload_request(self.constants(), media_base64))?;
        self.perform_with("upload_media", spec, media_id).await
    }

    /// Upload raw media bytes.
    pub async fn upload_media_bytes(&mut self, media: &[u8]) -> Result<String, Outcome> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(media);
        self.upload_media(&encoded).await
    }
}
