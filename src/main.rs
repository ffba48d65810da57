use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use raylib::prelude::*;

use petdeck::config::{SourceKind, ViewerConfig};
use petdeck::constants::*;
use petdeck::engine::Engine;
use petdeck::gallery::Gallery;
use petdeck::loader::ListingLoader;
use petdeck::slideshow::SlideshowEngine;
use petdeck::swipe::SwipeEngine;

#[derive(Parser)]
#[command(name = "petdeck", version, about = "Browse pet pictures as a slideshow or a swipeable deck")]
struct Cli {
    #[command(subcommand)]
    variant: Variant,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Subcommand)]
enum Variant {
    /// Advance automatically every interval, wrapping at the end
    Slideshow {
        /// Seconds each image stays on screen
        #[arg(long, default_value_t = SLIDE_INTERVAL)]
        interval: f32,
    },
    /// Drag cards left or right to move through the deck
    Swipe,
}

#[derive(Args)]
struct CommonArgs {
    /// Where the image listing comes from
    #[arg(long, value_enum, default_value_t = SourceKind::Http, global = true)]
    source: SourceKind,

    /// Listing URL for the http source
    #[arg(long, default_value = PET_LISTING_URL, global = true)]
    url: String,

    /// JSON listing for the bundled source
    #[arg(long, global = true)]
    bundle: Option<PathBuf>,

    /// Keep the listing order
    #[arg(long, global = true)]
    no_shuffle: bool,

    #[arg(long, default_value_t = WINDOW_WIDTH, global = true)]
    width: i32,

    #[arg(long, default_value_t = WINDOW_HEIGHT, global = true)]
    height: i32,

    /// Log level, overridden by RUST_LOG
    #[arg(long, default_value_t = log::LevelFilter::Info, global = true)]
    log_level: log::LevelFilter,
}

impl Cli {
    fn config(&self) -> ViewerConfig {
        let interval = match self.variant {
            Variant::Slideshow { interval } => interval,
            Variant::Swipe => SLIDE_INTERVAL,
        };
        ViewerConfig {
            source: self.common.source,
            url: self.common.url.clone(),
            bundle: self.common.bundle.clone(),
            shuffle: !self.common.no_shuffle,
            interval,
            window_width: self.common.width,
            window_height: self.common.height,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.common.log_level)
        .parse_default_env()
        .init();

    let config = cli.config().validate()?;

    match cli.variant {
        Variant::Slideshow { .. } => run::<SlideshowEngine>(&config, "Pet Slideshow"),
        Variant::Swipe => run::<SwipeEngine>(&config, "Pet Swipe"),
    }
}

fn run<E: Engine>(config: &ViewerConfig, title: &str) -> Result<()> {
    let source = config.build_source().context("could not prepare the image source")?;

    let (mut rl, thread) = raylib::init()
        .size(config.window_width, config.window_height)
        .title(title)
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    // Declared after the window so textures are released while the GL context is alive
    let mut loader = ListingLoader::spawn(source);
    let mut gallery = Gallery::new();
    let mut engine = E::new(config);

    // --- Main Loop ---
    while !rl.window_should_close() {
        let dt = rl.get_frame_time(); // realtime rendering

        if let Some(result) = loader.poll() {
            match result {
                Ok(images) => {
                    log::info!("Fetched {} images", images.len());
                    if !engine.initialize(images, rl.get_screen_width() as f32) {
                        log::warn!("Nothing to show");
                    }
                }
                // The placeholder stays up; no retry
                Err(e) => log::error!("Image list unavailable: {}", e),
            }
        }

        for url in gallery.update(&mut rl, &thread) {
            engine.image_failed(&url);
        }

        if !engine.render_frame(dt, &mut rl, &thread, &mut gallery) {
            break;
        }
    }

    engine.teardown();
    Ok(())
}
