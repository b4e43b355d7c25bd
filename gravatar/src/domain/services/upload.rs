use std::sync::Arc;

use futures::future::BoxFuture;
use tracing::{debug, info, warn};

use crate::domain::{
    models::{
        AccountId, StatusEvent, UploadReceipt, UploadRequest, UploadStage,
        GRAVATAR_CACHE_EXPIRATION,
    },
    ports::{
        inbound::AvatarUploadService,
        outbound::{Clock, FileReader, ImageHost, StatusSink},
    },
    UploadFailure,
};

/// Reads an avatar, reports a local preview and submits it to the image host.
///
/// # Type Parameters
///
/// * `R` - FileReader turning the caller's file handle into a data URI
/// * `H` - ImageHost receiving the upload
/// * `C` - Clock used to stamp the preview's expiration
/// * `S` - StatusSink receiving every status event
///
/// The uploader holds no per-upload state, so one instance can serve any
/// number of concurrent uploads.
pub struct GravatarUploader<R, H, C, S> {
    reader: Arc<R>,
    host: Arc<H>,
    clock: Arc<C>,
    sink: Arc<S>,
}

impl<R, H, C, S> GravatarUploader<R, H, C, S> {
    pub fn new(reader: Arc<R>, host: Arc<H>, clock: Arc<C>, sink: Arc<S>) -> Self {
        Self {
            reader,
            host,
            clock,
            sink,
        }
    }
}

impl<R, H, C, S> Clone for GravatarUploader<R, H, C, S> {
    fn clone(&self) -> Self {
        Self {
            reader: Arc::clone(&self.reader),
            host: Arc::clone(&self.host),
            clock: Arc::clone(&self.clock),
            sink: Arc::clone(&self.sink),
        }
    }
}

impl<R, H, C, S> GravatarUploader<R, H, C, S>
where
    R: FileReader,
    H: ImageHost,
    C: Clock,
    S: StatusSink,
{
    async fn run(&self, request: UploadRequest<R::File>, mut outcome: OutcomeGuard<S>) {
        let UploadRequest {
            file,
            token,
            account,
        } = request;

        let stage = advance(&account, UploadStage::Started, UploadStage::ReadPending);
        let image = match self.reader.read_as_data_url(file).await {
            Ok(image) => image,
            Err(err) => {
                outcome.fail(stage, err.into());
                return;
            }
        };

        let expires_at = self.clock.now() + GRAVATAR_CACHE_EXPIRATION;
        let stage = advance(&account, stage, UploadStage::Received);
        self.sink.emit(StatusEvent::ImageReceived {
            image_data: image.clone(),
            expires_at,
        });

        let stage = advance(&account, stage, UploadStage::Requesting);
        match self.host.upload_image(&image, &token, &account).await {
            Ok(receipt) => outcome.succeed(stage, receipt),
            Err(err) => outcome.fail(stage, err.into()),
        }
    }
}

impl<R, H, C, S> AvatarUploadService for GravatarUploader<R, H, C, S>
where
    R: FileReader,
    H: ImageHost,
    C: Clock,
    S: StatusSink,
{
    type File = R::File;

    fn upload(&self, request: UploadRequest<R::File>) -> BoxFuture<'_, ()> {
        advance(&request.account, UploadStage::Idle, UploadStage::Started);
        self.sink.emit(StatusEvent::RequestStarted);

        let outcome = OutcomeGuard::new(Arc::clone(&self.sink), request.account.clone());
        Box::pin(self.run(request, outcome))
    }
}

/// Emits the terminal event of one upload.
///
/// Travels inside the upload future; if the future is dropped before an
/// outcome was reported, the drop reports `UploadFailure::Cancelled`.
struct OutcomeGuard<S: StatusSink> {
    sink: Arc<S>,
    account: AccountId,
    reported: bool,
}

impl<S: StatusSink> OutcomeGuard<S> {
    fn new(sink: Arc<S>, account: AccountId) -> Self {
        Self {
            sink,
            account,
            reported: false,
        }
    }

    fn succeed(&mut self, stage: UploadStage, receipt: UploadReceipt) {
        let stage = advance(&self.account, stage, UploadStage::Succeeded);
        info!(account = %self.account, status = receipt.status, "Gravatar upload succeeded");
        self.report(StatusEvent::RequestSucceeded { receipt });
        advance(&self.account, stage, UploadStage::Done);
    }

    fn fail(&mut self, stage: UploadStage, reason: UploadFailure) {
        let stage = advance(&self.account, stage, UploadStage::Failed);
        warn!(account = %self.account, error = %reason, "Gravatar upload failed");
        self.report(StatusEvent::RequestFailed { reason });
        advance(&self.account, stage, UploadStage::Done);
    }

    fn report(&mut self, event: StatusEvent) {
        self.reported = true;
        self.sink.emit(event);
    }
}

impl<S: StatusSink> Drop for OutcomeGuard<S> {
    fn drop(&mut self) {
        if self.reported {
            return;
        }

        warn!(account = %self.account, "Gravatar upload cancelled");
        self.sink.emit(StatusEvent::RequestFailed {
            reason: UploadFailure::Cancelled,
        });
    }
}

fn advance(account: &AccountId, from: UploadStage, to: UploadStage) -> UploadStage {
    debug_assert!(
        from.can_transition_to(to),
        "invalid upload transition {from} -> {to}"
    );
    debug!(%account, %from, %to, "Gravatar upload stage changed");
    to
}
