use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use mime_guess::mime;
use tokio::{fs, io::AsyncReadExt};
use tracing::debug;

use crate::domain::{models::ImageData, ports::outbound::FileReader, ReadError};

pub const DEFAULT_MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// Reads image files from disk into base64 data URIs.
#[derive(Debug, Clone)]
pub struct FsFileReader {
    max_file_size: u64,
}

impl FsFileReader {
    pub fn new(max_file_size: u64) -> Self {
        Self { max_file_size }
    }
}

impl Default for FsFileReader {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FILE_SIZE)
    }
}

#[async_trait]
impl FileReader for FsFileReader {
    type File = PathBuf;

    async fn read_as_data_url(&self, path: PathBuf) -> Result<ImageData, ReadError> {
        let media_type = mime_guess::from_path(&path)
            .first()
            .filter(|guess| guess.type_() == mime::IMAGE)
            .ok_or_else(|| ReadError::UnsupportedMediaType(path.display().to_string()))?;

        let metadata = fs::metadata(&path)
            .await
            .map_err(|e| io_error(&path, e))?;
        if metadata.len() > self.max_file_size {
            return Err(ReadError::TooLarge {
                size: metadata.len(),
                limit: self.max_file_size,
            });
        }

        // The file may have grown since the metadata check.
        let file = fs::File::open(&path)
            .await
            .map_err(|e| io_error(&path, e))?;
        let mut bytes = Vec::new();
        file.take(self.max_file_size.saturating_add(1))
            .read_to_end(&mut bytes)
            .await
            .map_err(|e| io_error(&path, e))?;
        if bytes.len() as u64 > self.max_file_size {
            return Err(ReadError::TooLarge {
                size: bytes.len() as u64,
                limit: self.max_file_size,
            });
        }
        if bytes.is_empty() {
            return Err(ReadError::Empty);
        }

        debug!(
            path = %path.display(),
            media_type = %media_type,
            size = bytes.len(),
            "Read avatar file"
        );
        Ok(ImageData::from_bytes(media_type.essence_str(), &bytes))
    }
}

fn io_error(path: &Path, err: std::io::Error) -> ReadError {
    match err.kind() {
        ErrorKind::NotFound => ReadError::NotFound(path.display().to_string()),
        _ => ReadError::io(format!("{}: {err}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn image_file(suffix: &str, contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents).unwrap();
        file
    }

    #[tokio::test]
    async fn png_is_encoded_as_data_uri() {
        let file = image_file(".png", &[0x89, b'P', b'N', b'G']);

        let image = FsFileReader::default()
            .read_as_data_url(file.path().to_path_buf())
            .await
            .unwrap();

        let uri = image.parse().unwrap();
        assert_eq!(uri.media_type(), "image/png");
        assert_eq!(uri.decode().unwrap(), vec![0x89, b'P', b'N', b'G']);
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.jpg");

        let err = FsFileReader::default()
            .read_as_data_url(path)
            .await
            .unwrap_err();

        assert!(matches!(err, ReadError::NotFound(_)));
    }

    #[tokio::test]
    async fn non_image_is_rejected() {
        let file = image_file(".txt", b"hello");

        let err = FsFileReader::default()
            .read_as_data_url(file.path().to_path_buf())
            .await
            .unwrap_err();

        assert!(matches!(err, ReadError::UnsupportedMediaType(_)));
    }

    #[tokio::test]
    async fn empty_file_is_rejected() {
        let file = image_file(".gif", b"");

        let err = FsFileReader::default()
            .read_as_data_url(file.path().to_path_buf())
            .await
            .unwrap_err();

        assert_eq!(err, ReadError::Empty);
    }

    #[tokio::test]
    async fn oversized_file_is_rejected() {
        let file = image_file(".jpg", &[0u8; 16]);

        let err = FsFileReader::new(8)
            .read_as_data_url(file.path().to_path_buf())
            .await
            .unwrap_err();

        assert_eq!(err, ReadError::TooLarge { size: 16, limit: 8 });
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn read_stops_at_the_limit_when_metadata_understates_size() {
        // A character device reports a length of zero but never runs dry.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("endless.png");
        std::os::unix::fs::symlink("/dev/zero", &path).unwrap();

        let err = FsFileReader::new(8)
            .read_as_data_url(path)
            .await
            .unwrap_err();

        assert_eq!(err, ReadError::TooLarge { size: 9, limit: 8 });
    }
}
