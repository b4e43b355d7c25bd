mod upload;

pub use upload::GravatarUploader;
