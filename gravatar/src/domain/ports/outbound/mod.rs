mod clock;
mod file_reader;
mod image_host;
mod status_sink;

pub use clock::*;
pub use file_reader::*;
pub use image_host::*;
pub use status_sink::*;
