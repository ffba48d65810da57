use std::collections::HashMap;

use raylib::prelude::*;

use crate::error::ImageError;
use crate::loader::ImageFetcher;
use crate::texture_loader::load_texture_from_bytes;

/// Textures for image URLs, downloaded in the background and uploaded on the
/// render thread.
pub struct Gallery {
    fetcher: ImageFetcher,
    textures: HashMap<String, Texture2D>,
    failures: HashMap<String, ImageError>,
    unreported: Vec<String>,
}

impl Gallery {
    pub fn new() -> Self {
        Self {
            fetcher: ImageFetcher::spawn(),
            textures: HashMap::new(),
            failures: HashMap::new(),
            unreported: Vec::new(),
        }
    }

    /// Ask for `url` to be loaded. Cheap to call every frame.
    pub fn request(&mut self, url: &str) {
        if !self.textures.contains_key(url) && !self.failures.contains_key(url) {
            if let Err(e) = self.fetcher.request(url) {
                self.failures.insert(url.to_string(), e);
                self.unreported.push(url.to_string());
            }
        }
    }

    /// Turn finished downloads into textures. Returns the URLs that failed
    /// since the last call.
    pub fn update(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread) -> Vec<String> {
        let mut failed = std::mem::take(&mut self.unreported);
        for (url, result) in self.fetcher.poll() {
            let texture = result.and_then(|bytes| load_texture_from_bytes(rl, thread, &url, bytes));
            match texture {
                Ok(texture) => {
                    log::debug!("Loaded {} ({}x{})", url, texture.width(), texture.height());
                    self.textures.insert(url, texture);
                }
                Err(e) => {
                    log::warn!("Image failed: {}", e);
                    failed.push(url.clone());
                    self.failures.insert(url, e);
                }
            }
        }
        failed
    }

    pub fn texture(&self, url: &str) -> Option<&Texture2D> {
        self.textures.get(url)
    }

    pub fn failure(&self, url: &str) -> Option<&ImageError> {
        self.failures.get(url)
    }
}

impl Default for Gallery {
    fn default() -> Self {
        Self::new()
    }
}
