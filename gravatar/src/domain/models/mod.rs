mod account;
mod event;
mod image;
mod stage;
mod token;
mod upload;

pub use account::*;
pub use event::*;
pub use image::*;
pub use stage::*;
pub use token::*;
pub use upload::*;
