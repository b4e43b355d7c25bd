use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use time::OffsetDateTime;

use super::{
    models::{ImageData, StatusEvent},
    ports::outbound::StatusSink,
};

/// Locally uploaded image shown until the remote avatar catches up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempImage {
    pub src: ImageData,
    pub expires_at: OffsetDateTime,
}

/// Upload state derived from the status event stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GravatarStatus {
    is_uploading: bool,
    temp_image: Option<TempImage>,
}

impl GravatarStatus {
    pub fn apply(&mut self, event: &StatusEvent) {
        match event {
            StatusEvent::RequestStarted => self.is_uploading = true,
            StatusEvent::ImageReceived {
                image_data,
                expires_at,
            } => {
                self.temp_image = Some(TempImage {
                    src: image_data.clone(),
                    expires_at: *expires_at,
                });
            }
            StatusEvent::RequestSucceeded { .. } | StatusEvent::RequestFailed { .. } => {
                self.is_uploading = false
            }
        }
    }

    pub fn is_uploading(&self) -> bool {
        self.is_uploading
    }

    pub fn temp_image(&self) -> Option<&TempImage> {
        self.temp_image.as_ref()
    }

    /// The local preview, if it has not expired at `now`.
    pub fn temp_image_src(&self, now: OffsetDateTime) -> Option<&ImageData> {
        self.temp_image
            .as_ref()
            .filter(|image| now < image.expires_at)
            .map(|image| &image.src)
    }
}

/// Thread-safe [`GravatarStatus`] that can be handed to an uploader as its
/// sink while other parts of the application read snapshots.
#[derive(Debug, Clone, Default)]
pub struct SharedGravatarStatus(Arc<Mutex<GravatarStatus>>);

impl SharedGravatarStatus {
    pub fn snapshot(&self) -> GravatarStatus {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, GravatarStatus> {
        // The state is plain data, a panicking writer cannot leave it half-updated.
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StatusSink for SharedGravatarStatus {
    fn emit(&self, event: StatusEvent) {
        self.lock().apply(&event);
    }
}

#[cfg(test)]
mod tests {
    use time::Duration;

    use super::*;
    use crate::domain::{
        models::{UploadReceipt, GRAVATAR_CACHE_EXPIRATION},
        ImageHostError, UploadFailure,
    };

    fn at(millis: i64) -> OffsetDateTime {
        OffsetDateTime::UNIX_EPOCH + Duration::milliseconds(millis)
    }

    fn received(millis: i64) -> StatusEvent {
        StatusEvent::ImageReceived {
            image_data: ImageData::new("tempImageSrc"),
            expires_at: at(millis) + GRAVATAR_CACHE_EXPIRATION,
        }
    }

    #[test]
    fn request_marks_upload_in_progress() {
        let mut status = GravatarStatus::default();
        status.apply(&StatusEvent::RequestStarted);
        assert!(status.is_uploading());
        assert!(status.temp_image().is_none());
    }

    #[test]
    fn success_clears_uploading_and_keeps_temp_image() {
        let mut status = GravatarStatus::default();
        status.apply(&StatusEvent::RequestStarted);
        status.apply(&received(1));
        status.apply(&StatusEvent::RequestSucceeded {
            receipt: UploadReceipt { status: 200 },
        });

        assert!(!status.is_uploading());
        assert_eq!(
            status.temp_image_src(at(1)),
            Some(&ImageData::new("tempImageSrc"))
        );
    }

    #[test]
    fn failure_clears_uploading() {
        let mut status = GravatarStatus::default();
        status.apply(&StatusEvent::RequestStarted);
        status.apply(&StatusEvent::RequestFailed {
            reason: UploadFailure::Request(ImageHostError::Transport("timeout".into())),
        });
        assert!(!status.is_uploading());
    }

    #[test]
    fn temp_image_expires() {
        let mut status = GravatarStatus::default();
        status.apply(&received(1));

        let expires_at = at(1) + GRAVATAR_CACHE_EXPIRATION;
        assert!(status
            .temp_image_src(expires_at - Duration::milliseconds(1))
            .is_some());
        assert!(status.temp_image_src(expires_at).is_none());
        assert!(status.temp_image().is_some());
    }

    #[test]
    fn newer_image_replaces_older_one() {
        let mut status = GravatarStatus::default();
        status.apply(&received(1));
        status.apply(&StatusEvent::ImageReceived {
            image_data: ImageData::new("second"),
            expires_at: at(5) + GRAVATAR_CACHE_EXPIRATION,
        });

        assert_eq!(
            status.temp_image().map(|image| image.src.as_str()),
            Some("second")
        );
    }

    #[test]
    fn shared_status_acts_as_sink() {
        let shared = SharedGravatarStatus::default();
        let sink: Arc<dyn StatusSink> = Arc::new(shared.clone());
        sink.emit(StatusEvent::RequestStarted);
        assert!(shared.snapshot().is_uploading());
    }
}
