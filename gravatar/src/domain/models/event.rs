use serde::{Serialize, Serializer};
use strum::IntoStaticStr;
use time::OffsetDateTime;

use super::ImageData;
use crate::domain::UploadFailure;

/// Progress of a single avatar upload, in the order it is emitted.
///
/// Every upload emits `RequestStarted` first and exactly one of
/// `RequestSucceeded` / `RequestFailed` last. `ImageReceived` sits in between
/// and only appears when the file could be read.
///
/// Serialized with the action type as the `type` tag, e.g.
/// `{"type":"GRAVATAR_UPLOAD_RECEIVE","src":"data:...","expiration":120001}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, IntoStaticStr)]
#[serde(tag = "type")]
pub enum StatusEvent {
    #[serde(rename = "GRAVATAR_UPLOAD_REQUEST")]
    #[strum(serialize = "GRAVATAR_UPLOAD_REQUEST")]
    RequestStarted,

    #[serde(rename = "GRAVATAR_UPLOAD_RECEIVE")]
    #[strum(serialize = "GRAVATAR_UPLOAD_RECEIVE")]
    ImageReceived {
        #[serde(rename = "src")]
        image_data: ImageData,
        #[serde(rename = "expiration", serialize_with = "unix_millis")]
        expires_at: OffsetDateTime,
    },

    #[serde(rename = "GRAVATAR_UPLOAD_REQUEST_SUCCESS")]
    #[strum(serialize = "GRAVATAR_UPLOAD_REQUEST_SUCCESS")]
    RequestSucceeded { receipt: UploadReceipt },

    #[serde(rename = "GRAVATAR_UPLOAD_REQUEST_FAILURE")]
    #[strum(serialize = "GRAVATAR_UPLOAD_REQUEST_FAILURE")]
    RequestFailed {
        #[serde(rename = "error", serialize_with = "display")]
        reason: UploadFailure,
    },
}

impl StatusEvent {
    /// Stable action type name, as consumed by state layers.
    pub fn action_type(&self) -> &'static str {
        self.into()
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::RequestSucceeded { .. } | Self::RequestFailed { .. }
        )
    }
}

/// Metadata returned by the image host for an accepted upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UploadReceipt {
    pub status: u16,
}

fn unix_millis<S: Serializer>(value: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    let millis = value.unix_timestamp_nanos() / 1_000_000;
    serializer.serialize_i64(millis as i64)
}

fn display<S: Serializer>(value: &UploadFailure, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::Duration;

    use super::*;
    use crate::domain::ImageHostError;

    #[test]
    fn action_types_are_stable() {
        assert_eq!(
            StatusEvent::RequestStarted.action_type(),
            "GRAVATAR_UPLOAD_REQUEST"
        );
        assert_eq!(
            StatusEvent::RequestSucceeded {
                receipt: UploadReceipt { status: 200 }
            }
            .action_type(),
            "GRAVATAR_UPLOAD_REQUEST_SUCCESS"
        );
    }

    #[test]
    fn only_outcomes_are_terminal() {
        assert!(!StatusEvent::RequestStarted.is_terminal());
        assert!(StatusEvent::RequestFailed {
            reason: UploadFailure::Request(ImageHostError::Transport("reset".into())),
        }
        .is_terminal());
    }

    #[test]
    fn receive_event_serializes_like_an_action() {
        let event = StatusEvent::ImageReceived {
            image_data: ImageData::new("tempImageSrc"),
            expires_at: OffsetDateTime::UNIX_EPOCH + Duration::milliseconds(120_001),
        };

        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "type": "GRAVATAR_UPLOAD_RECEIVE",
                "src": "tempImageSrc",
                "expiration": 120_001,
            })
        );
    }

    #[test]
    fn failure_event_serializes_reason_as_text() {
        let event = StatusEvent::RequestFailed {
            reason: UploadFailure::Request(ImageHostError::Status {
                status: 400,
                message: None,
            }),
        };

        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "type": "GRAVATAR_UPLOAD_REQUEST_FAILURE",
                "error": "uploading the image failed: upload rejected with status 400",
            })
        );
    }
}
