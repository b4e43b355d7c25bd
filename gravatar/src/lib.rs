//! Gravatar avatar uploads with status reporting.
//!
//! The crate is split into a `domain` layer (models, ports and the upload
//! service) and `adapters` implementing the outbound ports against the
//! filesystem, the system clock and the Gravatar REST API.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use gravatar::adapters::outbound::{FsFileReader, GravatarApiClient, SystemClock};
//! use gravatar::domain::ports::inbound::AvatarUploadService;
//! use gravatar::domain::services::GravatarUploader;
//! use gravatar::domain::SharedGravatarStatus;
//!
//! let status = SharedGravatarStatus::default();
//! let uploader = GravatarUploader::new(
//!     Arc::new(FsFileReader::default()),
//!     Arc::new(GravatarApiClient::new()?),
//!     Arc::new(SystemClock),
//!     Arc::new(status.clone()),
//! );
//!
//! uploader.upload(request).await;
//! assert!(!status.snapshot().is_uploading());
//! ```

pub mod adapters;
pub mod domain;

pub use domain::models::{
    AccountId, BearerToken, ImageData, StatusEvent, UploadRequest, GRAVATAR_CACHE_EXPIRATION,
};
pub use domain::{ImageHostError, ReadError, UploadFailure};
