pub const WINDOW_WIDTH: i32 = 480;            // Default window width (portrait, phone-like)
pub const WINDOW_HEIGHT: i32 = 800;           // Default window height
pub const FPS: u32 = 60;                      // Frames per second
pub const FRAME_TIME: f32 = 1.0 / FPS as f32; // Time per frame (seconds)

pub const SLIDE_INTERVAL: f32 = 10.0;         // Time each image is shown by the slideshow (seconds)

pub const COMMIT_DURATION: f32 = 0.3;         // Card fly-out after a committed swipe (seconds)
pub const SNAP_BACK_DURATION: f32 = 0.3;      // Card return after a cancelled swipe (seconds)
pub const FADE_DURATION: f32 = 0.3;           // Indicator fade after release (seconds)
pub const COMMIT_THRESHOLD_RATIO: f32 = 0.4;  // Fraction of viewport width a drag must exceed to commit
pub const MAX_CARD_ROTATION: f32 = 20.0;      // Card rotation at a full-width offset (degrees)
pub const INDICATOR_SCALE_BOOST: f32 = 0.2;   // Extra indicator scale at full intensity

pub const CARD_MAX_WIDTH: f32 = 400.0;        // Square card size cap (pixels)
pub const CARD_MARGIN: f32 = 20.0;            // Card inset from the window edges (pixels)
pub const INDICATOR_RADIUS: f32 = 30.0;       // Check / cross indicator radius (pixels)

pub const PET_LISTING_URL: &str = "https://thepetnest.com/api/v1/pets?q[category_id_eq]=1";
pub const USER_AGENT: &str = concat!("petdeck/", env!("CARGO_PKG_VERSION"));
