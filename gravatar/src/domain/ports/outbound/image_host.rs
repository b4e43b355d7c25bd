use async_trait::async_trait;

use crate::domain::{
    models::{AccountId, BearerToken, ImageData, UploadReceipt},
    ImageHostError,
};

/// Remote service that stores the uploaded avatar.
///
/// Implementations make exactly one attempt; a 2xx response is `Ok`, any
/// other status or a transport problem is `Err`.
#[async_trait]
pub trait ImageHost: Send + Sync + 'static {
    async fn upload_image(
        &self,
        image: &ImageData,
        token: &BearerToken,
        account: &AccountId,
    ) -> Result<UploadReceipt, ImageHostError>;
}
