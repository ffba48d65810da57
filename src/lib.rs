pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod gallery;
pub mod loader;
pub mod slideshow;
pub mod source;
pub mod swipe;
pub mod texture_loader;
