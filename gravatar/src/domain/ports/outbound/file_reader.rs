use async_trait::async_trait;

use crate::domain::{models::ImageData, ReadError};

/// Reads a file handle into a data URI.
#[async_trait]
pub trait FileReader: Send + Sync + 'static {
    type File: Send + 'static;

    async fn read_as_data_url(&self, file: Self::File) -> Result<ImageData, ReadError>;
}
