use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client,
};
use serde::Deserialize;
use tracing::debug;

use crate::domain::{
    models::{AccountId, BearerToken, ImageData, UploadReceipt},
    ports::outbound::ImageHost,
    ImageHostError,
};

pub const GRAVATAR_API_URL: &str = "https://api.gravatar.com";
pub const UPLOAD_IMAGE_PATH: &str = "/v1/upload-image";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Uploads avatars to the Gravatar REST API.
#[derive(Debug, Clone)]
pub struct GravatarApiClient {
    client: Client,
    base_url: String,
}

impl GravatarApiClient {
    pub fn new() -> Result<Self, ImageHostError> {
        Self::with_base_url(GRAVATAR_API_URL, DEFAULT_TIMEOUT)
    }

    /// Client against another host, e.g. a local mock server.
    pub fn with_base_url(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ImageHostError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ImageHostError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn upload_url(&self) -> String {
        format!("{}{UPLOAD_IMAGE_PATH}", self.base_url.trim_end_matches('/'))
    }

    fn build_form(image: &ImageData, account: &AccountId) -> Result<Form, ImageHostError> {
        let uri = image
            .parse()
            .map_err(|e| ImageHostError::InvalidPayload(e.to_string()))?;
        let bytes = uri
            .decode()
            .map_err(|e| ImageHostError::InvalidPayload(e.to_string()))?;

        let part = Part::bytes(bytes)
            .file_name(uri.file_name())
            .mime_str(uri.media_type())
            .map_err(|e| ImageHostError::InvalidPayload(e.to_string()))?;

        Ok(Form::new()
            .part("filedata", part)
            .text("account", account.to_string()))
    }
}

#[async_trait]
impl ImageHost for GravatarApiClient {
    async fn upload_image(
        &self,
        image: &ImageData,
        token: &BearerToken,
        account: &AccountId,
    ) -> Result<UploadReceipt, ImageHostError> {
        let form = Self::build_form(image, account)?;

        let resp = self
            .client
            .post(self.upload_url())
            .bearer_auth(token.expose())
            .multipart(form)
            .send()
            .await
            .map_err(|e| ImageHostError::Transport(e.to_string()))?;

        let status = resp.status();
        debug!(%account, status = status.as_u16(), "Gravatar upload responded");

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ImageHostError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        Ok(UploadReceipt {
            status: status.as_u16(),
        })
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// Best-effort human readable reason from an error response body.
fn error_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error.or(parsed.message),
        Err(_) => Some(body.to_string()),
    }
}
