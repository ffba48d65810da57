use std::cell::Cell;
use std::rc::Rc;

use raylib::prelude::*;

use crate::config::ViewerConfig;
use crate::engine::draw_centered_text;
use crate::gallery::Gallery;
use crate::source::ImageList;
use crate::swipe::card::{CardLayout, draw_card, draw_end_screen, draw_indicators};
use crate::swipe::controller::SwipeDeck;

pub struct SwipeEngine {
    deck: Option<SwipeDeck>,
    ended: Rc<Cell<bool>>,
    press_x: Option<f32>,
}

impl crate::engine::Engine for SwipeEngine {
    fn new(_config: &ViewerConfig) -> Self {
        Self {
            deck: None,
            ended: Rc::new(Cell::new(false)),
            press_x: None,
        }
    }

    fn initialize(&mut self, images: ImageList, viewport_width: f32) -> bool {
        let ended = Rc::clone(&self.ended);
        let deck = SwipeDeck::new(images, viewport_width, move || ended.set(true));
        self.deck = Some(deck);
        !self.ended.get()
    }

    fn image_failed(&mut self, url: &str) {
        if let Some(deck) = self.deck.as_mut() {
            deck.mark_load_error(url);
        }
    }

    fn render_frame(&mut self, dt: f32, rl: &mut RaylibHandle, thread: &RaylibThread, gallery: &mut Gallery) -> bool {
        let layout = CardLayout::for_screen(rl.get_screen_width() as f32, rl.get_screen_height() as f32);

        let Some(deck) = self.deck.as_mut() else {
            let mut d = rl.begin_drawing(thread);
            d.clear_background(Color::WHITE);
            draw_centered_text(&mut d, "Loading...", (layout.screen_height * 0.5) as i32, 20, Color::DARKGRAY);
            return true;
        };
        deck.set_viewport_width(layout.screen_width);

        // --- Pointer input ---
        let mouse_x = rl.get_mouse_x() as f32;
        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            if self.ended.get() {
                return false;
            }
            if deck.begin_drag() {
                self.press_x = Some(mouse_x);
            }
        } else if let Some(press_x) = self.press_x {
            if rl.is_mouse_button_down(MouseButton::MOUSE_BUTTON_LEFT) {
                deck.drag_to(mouse_x - press_x);
            } else {
                deck.release(mouse_x - press_x);
                self.press_x = None;
            }
        }

        // --- Animation; completion is handed back explicitly ---
        if let Some(done) = deck.animate(dt) {
            deck.complete(done);
        }

        // --- Keep current and next image coming ---
        if let Some(url) = deck.current_url() {
            gallery.request(url);
        }
        if let Some(url) = deck.upcoming_url() {
            gallery.request(url);
        }

        // --- Draw ---
        let frame = deck.frame();
        let mut d = rl.begin_drawing(thread);
        d.clear_background(Color::RAYWHITE);

        if frame.ended {
            draw_end_screen(&mut d, &layout);
        } else {
            let texture = frame.current_url.and_then(|url| gallery.texture(url));
            draw_card(&mut d, &layout, &frame, texture);
            draw_indicators(&mut d, &layout, &frame);
        }

        true
    }
}
