pub mod histogram;
pub mod image_buf;
pub mod kernel;
pub mod loader;
pub mod ops;
pub mod settings;
