use futures::future::BoxFuture;

use crate::domain::models::UploadRequest;

/// Entry point for avatar uploads.
///
/// `upload` reports `RequestStarted` before it returns, so observers see it
/// even if the returned future is never polled. Everything after that,
/// including failures, is reported through the status sink; the future
/// itself always completes with `()`.
pub trait AvatarUploadService: Send + Sync + 'static {
    type File: Send + 'static;

    fn upload(&self, request: UploadRequest<Self::File>) -> BoxFuture<'_, ()>;
}
