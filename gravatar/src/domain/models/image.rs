use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;
use thiserror::Error;

/// Image contents as produced by a file reader, normally a base64 data URI.
///
/// The value is kept verbatim so it can be shown as a local preview while the
/// upload is in flight; [`ImageData::parse`] is only needed when the bytes
/// themselves have to be sent somewhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ImageData(String);

impl ImageData {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Encodes raw bytes as a `data:<media_type>;base64,...` URI.
    pub fn from_bytes(media_type: &str, bytes: &[u8]) -> Self {
        Self(format!("data:{media_type};base64,{}", STANDARD.encode(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn parse(&self) -> Result<DataUri<'_>, DataUriError> {
        DataUri::parse(&self.0)
    }
}

impl AsRef<str> for ImageData {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ImageData {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ImageData {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataUriError {
    #[error("not a data URI")]
    MissingScheme,
    #[error("data URI has no payload separator")]
    MissingPayload,
    #[error("data URI is not base64 encoded")]
    NotBase64,
    #[error("data URI has no media type")]
    MissingMediaType,
    #[error("invalid base64 payload: {0}")]
    InvalidPayload(String),
}

/// A borrowed view of a base64 data URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataUri<'a> {
    media_type: &'a str,
    payload: &'a str,
}

impl<'a> DataUri<'a> {
    pub fn parse(value: &'a str) -> Result<Self, DataUriError> {
        let rest = value
            .strip_prefix("data:")
            .ok_or(DataUriError::MissingScheme)?;
        let (header, payload) = rest.split_once(',').ok_or(DataUriError::MissingPayload)?;

        let mut params = header.split(';');
        let media_type = params.next().unwrap_or_default().trim();
        if !params.any(|param| param.trim().eq_ignore_ascii_case("base64")) {
            return Err(DataUriError::NotBase64);
        }
        if media_type.is_empty() {
            return Err(DataUriError::MissingMediaType);
        }

        Ok(Self {
            media_type,
            payload,
        })
    }

    pub fn media_type(&self) -> &'a str {
        self.media_type
    }

    pub fn decode(&self) -> Result<Vec<u8>, DataUriError> {
        STANDARD
            .decode(self.payload.trim())
            .map_err(|e| DataUriError::InvalidPayload(e.to_string()))
    }

    /// File name sent alongside the bytes in multipart uploads.
    pub fn file_name(&self) -> String {
        let extension = match self.media_type.split('/').nth(1).unwrap_or_default() {
            "jpeg" | "pjpeg" => "jpg",
            "png" => "png",
            "gif" => "gif",
            "webp" => "webp",
            "svg+xml" => "svg",
            "bmp" => "bmp",
            _ => "img",
        };
        format!("avatar.{extension}")
    }
}
