use thiserror::Error;

/// Failure to produce an image list. Every variant leaves the viewer on its
/// loading placeholder; nothing is retried automatically.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("listing request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("listing request returned status {0}")]
    Status(u16),

    #[error("could not parse listing: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("could not read bundled listing {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("listing contained no image URLs")]
    Empty,

    #[error("listing worker stopped before reporting")]
    Disconnected,
}

impl SourceError {
    pub fn is_empty(&self) -> bool {
        matches!(self, SourceError::Empty)
    }
}

/// Failure to show a single image. Only ever surfaced as a flag on the
/// controller; the deck keeps moving.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("download of {url} failed: {reason}")]
    Download { url: String, reason: String },

    #[error("could not decode {url}: {reason}")]
    Decode { url: String, reason: String },

    #[error("could not upload texture for {url}: {reason}")]
    Texture { url: String, reason: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("interval must be a positive number of seconds, got {0}")]
    Interval(f32),

    #[error("window size must be positive, got {0}x{1}")]
    WindowSize(i32, i32),

    #[error("the bundled source needs --bundle <path>")]
    MissingBundle,
}
