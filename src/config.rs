use std::path::PathBuf;

use crate::constants::*;
use crate::error::{ConfigError, SourceError};
use crate::source::{BundledSource, HttpSource, ImageSource, Shuffled};

/// Where the image listing comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SourceKind {
    /// Remote pet listing API
    #[default]
    Http,
    /// JSON document on disk
    Bundled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub source: SourceKind,
    pub url: String,
    pub bundle: Option<PathBuf>,
    pub shuffle: bool,
    /// Slideshow interval in seconds
    pub interval: f32,
    pub window_width: i32,
    pub window_height: i32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::Http,
            url: PET_LISTING_URL.to_string(),
            bundle: None,
            shuffle: true,
            interval: SLIDE_INTERVAL,
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
        }
    }
}

impl ViewerConfig {
    pub fn validate(self) -> Result<Self, ConfigError> {
        if !(self.interval.is_finite() && self.interval > 0.0) {
            return Err(ConfigError::Interval(self.interval));
        }
        if self.window_width <= 0 || self.window_height <= 0 {
            return Err(ConfigError::WindowSize(self.window_width, self.window_height));
        }
        if self.source == SourceKind::Bundled && self.bundle.is_none() {
            return Err(ConfigError::MissingBundle);
        }
        Ok(self)
    }

    /// Build the configured provider. Reading a bundle happens here, so a
    /// missing file is reported up front.
    pub fn build_source(&self) -> Result<Box<dyn ImageSource>, SourceError> {
        let source: Box<dyn ImageSource> = match (self.source, &self.bundle) {
            (SourceKind::Bundled, Some(path)) => Box::new(BundledSource::from_path(path)?),
            // Rejected by validate()
            (SourceKind::Bundled, None) => return Err(SourceError::Empty),
            (SourceKind::Http, _) => Box::new(HttpSource::new(self.url.clone())),
        };

        if self.shuffle {
            Ok(Box::new(Shuffled::new(source)))
        } else {
            Ok(source)
        }
    }
}
