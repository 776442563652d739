pub mod config;
pub mod picture_info;

pub use config::{AppConfig, ConverterConfig};
pub use picture_info::{ColourCount, PictureInfo};
