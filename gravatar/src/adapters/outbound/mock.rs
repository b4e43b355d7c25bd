//! In-memory port implementations for testing.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use time::{Duration, OffsetDateTime};

use crate::domain::{
    models::{AccountId, BearerToken, ImageData, StatusEvent, UploadReceipt},
    ports::outbound::{Clock, FileReader, ImageHost, StatusSink},
    ImageHostError, ReadError,
};

#[derive(Debug, Clone)]
enum ReadBehavior {
    Return(ImageData),
    Fail(ReadError),
    Pending,
}

/// File reader that ignores the handle and returns a canned result.
///
/// # Examples
///
/// ```
/// use gravatar::adapters::outbound::mock::MockFileReader;
///
/// let reader = MockFileReader::returning("tempImageSrc");
/// ```
#[derive(Debug, Clone)]
pub struct MockFileReader {
    behavior: ReadBehavior,
    call_count: Arc<AtomicUsize>,
}

impl MockFileReader {
    pub fn returning(image: impl Into<ImageData>) -> Self {
        Self::with(ReadBehavior::Return(image.into()))
    }

    pub fn failing(error: ReadError) -> Self {
        Self::with(ReadBehavior::Fail(error))
    }

    /// A reader whose read never completes.
    pub fn pending() -> Self {
        Self::with(ReadBehavior::Pending)
    }

    fn with(behavior: ReadBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FileReader for MockFileReader {
    type File = String;

    async fn read_as_data_url(&self, _file: String) -> Result<ImageData, ReadError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            ReadBehavior::Return(image) => Ok(image.clone()),
            ReadBehavior::Fail(error) => Err(error.clone()),
            ReadBehavior::Pending => std::future::pending().await,
        }
    }
}

/// Arguments of one [`MockImageHost`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHostCall {
    pub image: ImageData,
    pub token: String,
    pub account: String,
}

/// Image host answering every upload with the same outcome.
#[derive(Debug, Clone)]
pub struct MockImageHost {
    outcome: Result<UploadReceipt, ImageHostError>,
    calls: Arc<Mutex<Vec<ImageHostCall>>>,
}

impl MockImageHost {
    /// Answers with `status`; 2xx succeeds, anything else is rejected.
    pub fn responding(status: u16) -> Self {
        let outcome = if (200..300).contains(&status) {
            Ok(UploadReceipt { status })
        } else {
            Err(ImageHostError::Status {
                status,
                message: None,
            })
        };
        Self::with(outcome)
    }

    pub fn failing(error: ImageHostError) -> Self {
        Self::with(Err(error))
    }

    fn with(outcome: Result<UploadReceipt, ImageHostError>) -> Self {
        Self {
            outcome,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_call(&self) -> Option<ImageHostCall> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ImageHost for MockImageHost {
    async fn upload_image(
        &self,
        image: &ImageData,
        token: &BearerToken,
        account: &AccountId,
    ) -> Result<UploadReceipt, ImageHostError> {
        self.calls.lock().unwrap().push(ImageHostCall {
            image: image.clone(),
            token: token.expose().to_string(),
            account: account.to_string(),
        });
        self.outcome.clone()
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(OffsetDateTime);

impl FixedClock {
    pub fn new(now: OffsetDateTime) -> Self {
        Self(now)
    }

    pub fn at_unix_millis(millis: i64) -> Self {
        Self(OffsetDateTime::UNIX_EPOCH + Duration::milliseconds(millis))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}

/// Sink collecting every event in emission order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<StatusEvent>>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<StatusEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl StatusSink for RecordingSink {
    fn emit(&self, event: StatusEvent) {
        self.events.lock().unwrap().push(event);
    }
}
