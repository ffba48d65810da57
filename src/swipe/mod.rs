pub mod card;
pub mod controller;
pub mod engine;
pub mod state;

pub use controller::{Completion, SwipeDeck, SwipeFrame};
pub use engine::SwipeEngine;
pub use state::{Direction, Resolution, SwipePhase};
