#[derive(Debug, PartialEq, Clone, Copy)]
pub enum SlideshowState {
    Loading,  // No images yet, placeholder shown
    Playing,  // Advancing every interval
    Stopped,  // Torn down, timer released
}
