use raylib::prelude::*;

use crate::config::ViewerConfig;
use crate::gallery::Gallery;
use crate::source::ImageList;

pub trait Engine {
    fn new(config: &ViewerConfig) -> Self;
    /// Called once the listing has arrived. Returns whether there is anything to show.
    fn initialize(&mut self, images: ImageList, viewport_width: f32) -> bool;
    /// Called for images that could not be downloaded or decoded.
    fn image_failed(&mut self, url: &str);
    /// Update and draw one frame. Returns `false` when the viewer should close.
    fn render_frame(&mut self, dt: f32, rl: &mut RaylibHandle, thread: &RaylibThread, gallery: &mut Gallery) -> bool;
    /// Release timers and other resources before the window closes.
    fn teardown(&mut self) {}
}

// --- Shared drawing helpers ---

pub fn draw_centered_text(d: &mut RaylibDrawHandle, text: &str, y: i32, font_size: i32, color: Color) {
    let width = d.get_screen_width();
    // Default font glyphs are roughly half as wide as they are tall
    let text_width = text.len() as i32 * font_size / 2;
    d.draw_text(text, (width - text_width) / 2, y, font_size, color);
}

/// Source rectangle that crops the centre of a texture to `aspect` (w / h).
pub fn cover_source(texture_width: f32, texture_height: f32, aspect: f32) -> Rectangle {
    if texture_width / texture_height > aspect {
        let width = texture_height * aspect;
        Rectangle::new((texture_width - width) * 0.5, 0.0, width, texture_height)
    } else {
        let height = texture_width / aspect;
        Rectangle::new(0.0, (texture_height - height) * 0.5, texture_width, height)
    }
}

/// Destination size that fits a texture inside a `bounds` square without cropping.
pub fn contain_size(texture_width: f32, texture_height: f32, bounds: f32) -> (f32, f32) {
    let scale = (bounds / texture_width).min(bounds / texture_height);
    (texture_width * scale, texture_height * scale)
}
