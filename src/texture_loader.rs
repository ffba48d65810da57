use std::io::Cursor;
use raylib::prelude::*;
use exif::{Reader, Tag, Value, In};

use crate::error::ImageError;

// --- Helper: Guess the file type raylib should decode from the leading bytes ---
pub fn sniff_extension(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0x89, b'P', b'N', b'G', ..] => Some(".png"),
        [0xFF, 0xD8, 0xFF, ..] => Some(".jpg"),
        [b'G', b'I', b'F', b'8', ..] => Some(".gif"),
        [b'B', b'M', ..] => Some(".bmp"),
        [b'q', b'o', b'i', b'f', ..] => Some(".qoi"),
        _ => None,
    }
}

// --- Helper: Read EXIF orientation, 1 (normal) when absent or unreadable ---
pub fn exif_orientation(bytes: &[u8]) -> u16 {
    match Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) => {
            if let Some(field) = exif.get_field(Tag::Orientation, In::PRIMARY) {
                if let Value::Short(values) = &field.value {
                    if let Some(orientation) = values.first() {
                        return *orientation;
                    }
                }
            }
            1
        }
        Err(e) => {
            log::debug!("No EXIF orientation: {}", e);
            1
        }
    }
}

// --- Decode downloaded bytes, apply EXIF rotation, create texture ---
pub fn load_texture_from_bytes(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    url: &str,
    bytes: Vec<u8>,
) -> Result<Texture2D, ImageError> {
    let extension = sniff_extension(&bytes).ok_or_else(|| ImageError::Decode {
        url: url.to_string(),
        reason: "unrecognised image format".to_string(),
    })?;

    // Only JPEG payloads carry EXIF reliably
    let orientation = if extension == ".jpg" { exif_orientation(&bytes) } else { 1 };

    let mut image = Image::load_image_from_mem(extension, &bytes)
        .map_err(|e| ImageError::Decode { url: url.to_string(), reason: e.to_string() })?;

    // 3 = 180 deg, 6 = 90 deg CW, 8 = 90 deg CCW. Flipped variants are ignored.
    match orientation {
        3 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        6 => image.rotate_cw(),
        8 => image.rotate_ccw(),
        _ => {}
    }
    if orientation != 1 {
        log::debug!("Applied EXIF orientation {} to {}", orientation, url);
    }

    let texture = rl.load_texture_from_image(thread, &image)
        .map_err(|e| ImageError::Texture { url: url.to_string(), reason: e.to_string() })?;

    // Unload the CPU-side copy
    drop(image);

    Ok(texture)
}
