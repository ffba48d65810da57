use crate::slideshow::state::SlideshowState;
use crate::source::ImageList;

/// What the view paints for one slideshow frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideshowFrame<'a> {
    pub current_url: Option<&'a str>,
    pub loading: bool,
}

/// Auto-advancing slideshow over an [`ImageList`], wrapping at the end.
#[derive(Debug)]
pub struct Slideshow {
    images: ImageList,
    current_index: usize,
    interval: f32,
    display_timer: f32,
    state: SlideshowState,
}

impl Slideshow {
    pub fn new(interval: f32) -> Self {
        Self {
            images: ImageList::empty(),
            current_index: 0,
            interval,
            display_timer: 0.0,
            state: SlideshowState::Loading,
        }
    }

    /// Replace the list and restart from the first image. Starts playing if
    /// the list is non-empty. Ignored once stopped.
    pub fn set_images(&mut self, images: ImageList) {
        if self.state == SlideshowState::Stopped {
            return;
        }
        self.images = images;
        self.current_index = 0;
        self.display_timer = 0.0;
        self.state = if self.images.is_empty() {
            SlideshowState::Loading
        } else {
            SlideshowState::Playing
        };
    }

    /// Accumulate frame time; returns how many times the index advanced.
    pub fn tick(&mut self, dt: f32) -> usize {
        if self.state != SlideshowState::Playing || self.interval <= 0.0 {
            return 0;
        }

        self.display_timer += dt;
        if self.display_timer < self.interval {
            return 0;
        }
        let advanced = (self.display_timer / self.interval) as usize;
        self.display_timer -= advanced as f32 * self.interval;
        if self.display_timer < 0.0 {
            self.display_timer = 0.0;
        }
        self.advance_by(advanced);
        advanced
    }

    /// One interval elapsed.
    pub fn advance(&mut self) {
        self.advance_by(1);
    }

    fn advance_by(&mut self, steps: usize) {
        if self.state != SlideshowState::Playing {
            return;
        }
        let len = self.images.len();
        self.current_index = (self.current_index + steps % len) % len;
    }

    pub fn stop(&mut self) {
        self.state = SlideshowState::Stopped;
        self.display_timer = 0.0;
    }

    pub fn state(&self) -> SlideshowState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SlideshowState::Playing
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_url(&self) -> Option<&str> {
        match self.state {
            SlideshowState::Playing => self.images.get(self.current_index).map(String::as_str),
            _ => None,
        }
    }

    /// URL that will be shown after the current one, for prefetching.
    pub fn upcoming_url(&self) -> Option<&str> {
        if self.state != SlideshowState::Playing {
            return None;
        }
        let next = (self.current_index + 1) % self.images.len();
        self.images.get(next).map(String::as_str)
    }

    pub fn frame(&self) -> SlideshowFrame<'_> {
        SlideshowFrame {
            current_url: self.current_url(),
            loading: self.state == SlideshowState::Loading,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(n: usize) -> ImageList {
        ImageList::new((0..n).map(|i| format!("https://pets.test/{i}.jpg")).collect())
    }

    #[test]
    fn test_index_after_k_ticks() {
        let mut slideshow = Slideshow::new(10.0);
        slideshow.set_images(list(3));

        for k in 1..=10 {
            slideshow.tick(10.0);
            assert_eq!(slideshow.current_index(), k % 3);
        }
    }

    #[test]
    fn test_partial_intervals_accumulate() {
        let mut slideshow = Slideshow::new(1.0);
        slideshow.set_images(list(4));

        assert_eq!(slideshow.tick(0.5), 0);
        assert_eq!(slideshow.current_index(), 0);
        assert_eq!(slideshow.tick(0.5), 1);
        assert_eq!(slideshow.current_index(), 1);

        // One long frame covers several intervals.
        assert_eq!(slideshow.tick(3.25), 3);
        assert_eq!(slideshow.current_index(), 0);
    }

    #[test]
    fn test_empty_list_stays_loading() {
        let mut slideshow = Slideshow::new(10.0);
        slideshow.set_images(ImageList::empty());

        for _ in 0..5 {
            assert_eq!(slideshow.tick(10.0), 0);
        }
        let frame = slideshow.frame();
        assert!(frame.loading);
        assert_eq!(frame.current_url, None);
        assert_eq!(slideshow.current_index(), 0);
    }

    #[test]
    fn test_set_images_restarts() {
        let mut slideshow = Slideshow::new(10.0);
        slideshow.set_images(list(3));
        slideshow.tick(25.0);
        assert_eq!(slideshow.current_index(), 2);

        slideshow.set_images(list(5));
        assert_eq!(slideshow.current_index(), 0);
        assert_eq!(slideshow.tick(5.0), 0);
    }

    #[test]
    fn test_stop_releases_timer() {
        let mut slideshow = Slideshow::new(10.0);
        slideshow.set_images(list(3));
        slideshow.stop();

        assert_eq!(slideshow.tick(100.0), 0);
        assert!(!slideshow.is_running());
        assert_eq!(slideshow.current_url(), None);

        slideshow.set_images(list(2));
        assert_eq!(slideshow.state(), SlideshowState::Stopped);
    }

    #[test]
    fn test_tiny_interval_advances_in_one_step() {
        let mut slideshow = Slideshow::new(1e-6);
        slideshow.set_images(list(7));

        let advanced = slideshow.tick(1.0);
        assert!(advanced > 900_000);
        assert_eq!(slideshow.current_index(), advanced % 7);
        assert!(slideshow.display_timer >= 0.0 && slideshow.display_timer < 1e-6);
    }

    #[test]
    fn test_upcoming_wraps() {
        let mut slideshow = Slideshow::new(10.0);
        slideshow.set_images(list(2));
        assert_eq!(slideshow.upcoming_url(), Some("https://pets.test/1.jpg"));
        slideshow.advance();
        assert_eq!(slideshow.upcoming_url(), Some("https://pets.test/0.jpg"));
    }
}
