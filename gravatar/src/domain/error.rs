use thiserror::Error;

/// Errors produced while turning a file handle into image data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    #[error("file not found: {0}")]
    NotFound(String),
    #[error("file is empty")]
    Empty,
    #[error("file is {size} bytes, the limit is {limit} bytes")]
    TooLarge { size: u64, limit: u64 },
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),
    #[error("failed to read file: {0}")]
    Io(String),
}

impl ReadError {
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }
}

/// Errors reported by the image host while submitting an upload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageHostError {
    #[error("upload rejected with status {status}{}", suffix(.message))]
    Status {
        status: u16,
        message: Option<String>,
    },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("image payload cannot be sent: {0}")]
    InvalidPayload(String),
}

impl ImageHostError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

/// Why an upload ended with a failure event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadFailure {
    #[error("reading the image failed: {0}")]
    Read(#[from] ReadError),
    #[error("uploading the image failed: {0}")]
    Request(#[from] ImageHostError),
    #[error("upload was cancelled")]
    Cancelled,
}
