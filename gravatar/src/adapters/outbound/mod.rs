mod clock;
mod fs_reader;
mod gravatar_api;
pub mod mock;

pub use clock::SystemClock;
pub use fs_reader::{FsFileReader, DEFAULT_MAX_FILE_SIZE};
pub use gravatar_api::{GravatarApiClient, GRAVATAR_API_URL, UPLOAD_IMAGE_PATH};
