use raylib::prelude::*;

use crate::constants::*;
use crate::engine::{cover_source, draw_centered_text};
use crate::swipe::controller::{SwipeFrame, indicator_scale};

const CHECK_COLOR: (u8, u8, u8) = (0x4C, 0xAF, 0x50);
const CROSS_COLOR: (u8, u8, u8) = (0xFF, 0x52, 0x52);
const INDICATOR_BOTTOM: f32 = 80.0;           // Indicator centres above the window bottom (pixels)

/// Where the resting card sits for a given window size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardLayout {
    pub center: Vector2,
    pub size: f32,
    pub screen_width: f32,
    pub screen_height: f32,
}

impl CardLayout {
    pub fn for_screen(screen_width: f32, screen_height: f32) -> Self {
        let size = (screen_width - 2.0 * CARD_MARGIN)
            .min(screen_height - 2.0 * CARD_MARGIN - 2.0 * INDICATOR_BOTTOM)
            .min(CARD_MAX_WIDTH)
            .max(0.0);
        Self {
            center: Vector2::new(screen_width * 0.5, (screen_height - INDICATOR_BOTTOM) * 0.5),
            size,
            screen_width,
            screen_height,
        }
    }
}

fn with_alpha((r, g, b): (u8, u8, u8), alpha: f32) -> Color {
    Color::new(r, g, b, (alpha.clamp(0.0, 1.0) * 255.0) as u8)
}

pub fn draw_card(d: &mut RaylibDrawHandle, layout: &CardLayout, frame: &SwipeFrame, texture: Option<&Texture2D>) {
    let size = layout.size;
    let dest = Rectangle::new(layout.center.x + frame.card_offset, layout.center.y, size, size);
    let origin = Vector2::new(size * 0.5, size * 0.5);

    d.draw_rectangle_pro(dest, origin, frame.card_rotation, Color::WHITE);

    match texture {
        Some(texture) => {
            let source = cover_source(texture.width() as f32, texture.height() as f32, 1.0);
            d.draw_texture_pro(texture, source, dest, origin, frame.card_rotation, Color::WHITE);
        }
        None => {
            let message = if frame.load_error { "Image unavailable" } else { "Loading..." };
            d.draw_text(
                message,
                (dest.x - size * 0.25) as i32,
                dest.y as i32 - 10,
                20,
                Color::GRAY,
            );
        }
    }
}

pub fn draw_indicators(d: &mut RaylibDrawHandle, layout: &CardLayout, frame: &SwipeFrame) {
    let y = layout.screen_height - INDICATOR_BOTTOM;
    let spread = layout.screen_width * 0.3;

    // Cross on the left, check on the right
    let cross = Vector2::new(layout.center.x - spread, y);
    let check = Vector2::new(layout.center.x + spread, y);

    let intensity = frame.negative_intensity;
    if intensity > 0.0 {
        let r = INDICATOR_RADIUS * indicator_scale(intensity);
        d.draw_circle(cross.x as i32, cross.y as i32, r, with_alpha(CROSS_COLOR, intensity));
        let arm = r * 0.4;
        let glyph = with_alpha((255, 255, 255), intensity);
        d.draw_line_ex(Vector2::new(cross.x - arm, cross.y - arm), Vector2::new(cross.x + arm, cross.y + arm), 4.0, glyph);
        d.draw_line_ex(Vector2::new(cross.x - arm, cross.y + arm), Vector2::new(cross.x + arm, cross.y - arm), 4.0, glyph);
    }

    let intensity = frame.positive_intensity;
    if intensity > 0.0 {
        let r = INDICATOR_RADIUS * indicator_scale(intensity);
        d.draw_circle(check.x as i32, check.y as i32, r, with_alpha(CHECK_COLOR, intensity));
        let arm = r * 0.4;
        let glyph = with_alpha((255, 255, 255), intensity);
        let knee = Vector2::new(check.x - arm * 0.25, check.y + arm * 0.6);
        d.draw_line_ex(Vector2::new(check.x - arm, check.y), knee, 4.0, glyph);
        d.draw_line_ex(knee, Vector2::new(check.x + arm, check.y - arm * 0.7), 4.0, glyph);
    }
}

pub fn draw_end_screen(d: &mut RaylibDrawHandle, layout: &CardLayout) {
    let y = (layout.screen_height * 0.5) as i32;
    draw_centered_text(d, "No more pets!", y - 30, 30, Color::DARKGRAY);
    draw_centered_text(d, "Click to close", y + 10, 20, Color::GRAY);
}
