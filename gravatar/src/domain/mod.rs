mod error;
pub mod models;
pub mod ports;
pub mod services;
mod status;

pub use error::*;
pub use status::*;
