use raylib::prelude::*;

use crate::config::ViewerConfig;
use crate::engine::{contain_size, draw_centered_text};
use crate::gallery::Gallery;
use crate::slideshow::controller::Slideshow;
use crate::source::ImageList;

const IMAGE_BOUNDS: f32 = 300.0; // Side of the box each image is fitted into (pixels)

pub struct SlideshowEngine {
    slideshow: Slideshow,
}

impl crate::engine::Engine for SlideshowEngine {
    fn new(config: &ViewerConfig) -> Self {
        Self {
            slideshow: Slideshow::new(config.interval),
        }
    }

    fn initialize(&mut self, images: ImageList, _viewport_width: f32) -> bool {
        self.slideshow.set_images(images);
        self.slideshow.is_running()
    }

    fn image_failed(&mut self, url: &str) {
        log::debug!("Slideshow will show a placeholder for {}", url);
    }

    fn render_frame(&mut self, dt: f32, rl: &mut RaylibHandle, thread: &RaylibThread, gallery: &mut Gallery) -> bool {
        if self.slideshow.tick(dt) > 0 {
            log::debug!("Slideshow advanced to image {}", self.slideshow.current_index());
        }

        if let Some(url) = self.slideshow.current_url() {
            gallery.request(url);
        }
        if let Some(url) = self.slideshow.upcoming_url() {
            gallery.request(url);
        }

        let frame = self.slideshow.frame();
        let screen_width = rl.get_screen_width() as f32;
        let screen_height = rl.get_screen_height() as f32;
        let text_y = (screen_height * 0.5) as i32 - 10;

        let mut d = rl.begin_drawing(thread);
        d.clear_background(Color::WHITE);

        match frame.current_url {
            None => draw_centered_text(&mut d, "Loading...", text_y, 20, Color::DARKGRAY),
            Some(url) => match gallery.texture(url) {
                Some(texture) => {
                    let tex_width = texture.width() as f32;
                    let tex_height = texture.height() as f32;
                    let (width, height) = contain_size(tex_width, tex_height, IMAGE_BOUNDS);
                    d.draw_texture_pro(
                        texture,
                        Rectangle::new(0.0, 0.0, tex_width, tex_height),
                        Rectangle::new((screen_width - width) * 0.5, (screen_height - height) * 0.5, width, height),
                        Vector2::new(0.0, 0.0),
                        0.0,
                        Color::WHITE,
                    );
                }
                None if gallery.failure(url).is_some() => {
                    draw_centered_text(&mut d, "Image unavailable", text_y, 20, Color::GRAY)
                }
                None => draw_centered_text(&mut d, "Loading...", text_y, 20, Color::DARKGRAY),
            },
        }

        true
    }

    fn teardown(&mut self) {
        self.slideshow.stop();
    }
}
