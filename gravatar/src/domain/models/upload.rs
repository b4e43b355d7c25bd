use time::Duration;

use super::{AccountId, BearerToken};

/// How long a freshly uploaded image is preferred over the remote avatar.
///
/// Gravatar's CDN takes a while to serve the new image, so the local preview
/// carried by `ImageReceived` stays authoritative until this has elapsed.
pub const GRAVATAR_CACHE_EXPIRATION: Duration = Duration::minutes(2);

/// A single avatar upload. `F` is whatever handle the file reader accepts.
#[derive(Debug, Clone)]
pub struct UploadRequest<F> {
    pub file: F,
    pub token: BearerToken,
    pub account: AccountId,
}

impl<F> UploadRequest<F> {
    pub fn new(file: F, token: BearerToken, account: AccountId) -> Self {
        Self {
            file,
            token,
            account,
        }
    }
}
