pub mod controller;
pub mod engine;
pub mod state;

pub use controller::{Slideshow, SlideshowFrame};
pub use engine::SlideshowEngine;
pub use state::SlideshowState;
