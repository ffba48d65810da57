use std::collections::HashSet;
use std::fmt;

use raylib::ease::{self, Tween};

use crate::constants::*;
use crate::source::ImageList;
use crate::swipe::state::{Direction, Resolution, SwipePhase};

/// Signals that the resolution started by a release has finished animating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    generation: u64,
    resolution: Resolution,
}

/// Everything the view needs to paint one frame of the deck.
#[derive(Debug, Clone, PartialEq)]
pub struct SwipeFrame<'a> {
    pub current_url: Option<&'a str>,
    pub card_offset: f32,
    pub card_rotation: f32,
    pub positive_intensity: f32,
    pub negative_intensity: f32,
    pub load_error: bool,
    pub ended: bool,
}

/// Scale of an indicator at `intensity`.
pub fn indicator_scale(intensity: f32) -> f32 {
    1.0 + intensity * INDICATOR_SCALE_BOOST
}

pub struct SwipeDeck {
    images: ImageList,
    current_index: usize,
    viewport_width: f32,

    phase: SwipePhase,
    offset: f32,
    positive: f32,
    negative: f32,

    card_motion: Option<Tween>,
    card_target: f32,
    positive_fade: Option<Tween>,
    negative_fade: Option<Tween>,

    generation: u64,
    failed: HashSet<String>,
    on_end: Option<Box<dyn FnOnce()>>,
}

impl SwipeDeck {
    /// Build a deck showing the first image. An empty list yields a deck that
    /// is already ended, and `on_end` runs before this returns.
    pub fn new(images: ImageList, viewport_width: f32, on_end: impl FnOnce() + 'static) -> Self {
        let mut deck = Self {
            images,
            current_index: 0,
            viewport_width,
            phase: SwipePhase::Idle,
            offset: 0.0,
            positive: 0.0,
            negative: 0.0,
            card_motion: None,
            card_target: 0.0,
            positive_fade: None,
            negative_fade: None,
            generation: 0,
            failed: HashSet::new(),
            on_end: Some(Box::new(on_end)),
        };
        if deck.images.is_empty() {
            deck.end();
        }
        deck
    }

    /// Drag distance a release must exceed to commit.
    pub fn threshold(&self) -> f32 {
        self.viewport_width * COMMIT_THRESHOLD_RATIO
    }

    pub fn set_viewport_width(&mut self, width: f32) {
        self.viewport_width = width;
    }

    /// Start a gesture. Refused unless the deck is idle.
    pub fn begin_drag(&mut self) -> bool {
        if self.phase != SwipePhase::Idle {
            log::debug!("Ignoring drag start while {:?}", self.phase);
            return false;
        }
        self.phase = SwipePhase::Dragging;
        self.positive_fade = None;
        self.negative_fade = None;
        true
    }

    /// Pointer moved; `dx` is the horizontal distance from the press point.
    pub fn drag_to(&mut self, dx: f32) {
        if self.phase != SwipePhase::Dragging {
            return;
        }
        self.offset = dx;

        let progress = (dx.abs() / self.threshold().max(f32::EPSILON)).min(1.0);
        if dx > 0.0 {
            self.positive = progress;
            self.negative = 0.0;
        } else {
            self.negative = progress;
            self.positive = 0.0;
        }
    }

    /// Pointer released at `dx`. Decides between commit and cancel and starts
    /// the matching animation.
    pub fn release(&mut self, dx: f32) -> Option<Resolution> {
        if self.phase != SwipePhase::Dragging {
            return None;
        }
        self.drag_to(dx);

        let (resolution, target, duration) = if dx.abs() > self.threshold() {
            let direction = Direction::of(dx);
            (
                Resolution::Commit(direction),
                direction.sign() * self.viewport_width,
                COMMIT_DURATION,
            )
        } else {
            (Resolution::Cancel, 0.0, SNAP_BACK_DURATION)
        };
        log::debug!("Released at {:.1} ({:?})", dx, resolution);

        self.card_motion = Some(Tween::new(ease::cubic_out, self.offset, target, duration));
        self.card_target = target;
        self.positive_fade = Some(Tween::new(ease::cubic_out, self.positive, 0.0, FADE_DURATION));
        self.negative_fade = Some(Tween::new(ease::cubic_out, self.negative, 0.0, FADE_DURATION));

        self.generation += 1;
        self.phase = SwipePhase::Resolving(resolution);
        Some(resolution)
    }

    /// Advance running animations by `dt`. Returns the completion once the
    /// card animation has finished; hand it back through [`Self::complete`].
    pub fn animate(&mut self, dt: f32) -> Option<Completion> {
        step_fade(&mut self.positive_fade, &mut self.positive, dt);
        step_fade(&mut self.negative_fade, &mut self.negative, dt);

        let SwipePhase::Resolving(resolution) = self.phase else {
            return None;
        };
        let motion = self.card_motion.as_mut()?;
        self.offset = motion.apply(dt);
        if !motion.has_completed() {
            return None;
        }
        self.card_motion = None;
        self.offset = self.card_target;
        Some(Completion {
            generation: self.generation,
            resolution,
        })
    }

    /// Apply a finished resolution. Returns `false` for a stale completion.
    pub fn complete(&mut self, completion: Completion) -> bool {
        let SwipePhase::Resolving(resolution) = self.phase else {
            log::debug!("Dropping completion while {:?}", self.phase);
            return false;
        };
        if completion.generation != self.generation || completion.resolution != resolution {
            log::debug!(
                "Dropping stale completion {} (current {})",
                completion.generation,
                self.generation
            );
            return false;
        }

        self.card_motion = None;
        match resolution {
            Resolution::Cancel => {
                self.offset = 0.0;
                self.phase = SwipePhase::Idle;
            }
            Resolution::Commit(_) => {
                let next = self.current_index + 1;
                if next >= self.images.len() {
                    self.end();
                } else {
                    self.current_index = next;
                    self.offset = 0.0;
                    self.phase = SwipePhase::Idle;
                }
            }
        }
        true
    }

    fn end(&mut self) {
        self.phase = SwipePhase::Ended;
        self.offset = 0.0;
        self.card_motion = None;
        log::info!("Reached the end of the deck ({} images)", self.images.len());
        if let Some(on_end) = self.on_end.take() {
            on_end();
        }
    }

    /// Remember a failed image load. The flag shows whenever that image is
    /// the current one, including images that failed while prefetched.
    pub fn mark_load_error(&mut self, url: &str) {
        self.failed.insert(url.to_string());
    }

    pub fn load_error(&self) -> bool {
        self.current_url().is_some_and(|url| self.failed.contains(url))
    }

    pub fn phase(&self) -> SwipePhase {
        self.phase
    }

    pub fn is_ended(&self) -> bool {
        self.phase == SwipePhase::Ended
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_url(&self) -> Option<&str> {
        if self.is_ended() {
            return None;
        }
        self.images.get(self.current_index).map(String::as_str)
    }

    /// Next image in the deck, for prefetching.
    pub fn upcoming_url(&self) -> Option<&str> {
        if self.is_ended() {
            return None;
        }
        self.images.get(self.current_index + 1).map(String::as_str)
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn intensities(&self) -> (f32, f32) {
        (self.positive, self.negative)
    }

    pub fn rotation(&self) -> f32 {
        if self.viewport_width <= 0.0 {
            return 0.0;
        }
        self.offset / self.viewport_width * MAX_CARD_ROTATION
    }

    pub fn frame(&self) -> SwipeFrame<'_> {
        SwipeFrame {
            current_url: self.current_url(),
            card_offset: self.offset,
            card_rotation: self.rotation(),
            positive_intensity: self.positive,
            negative_intensity: self.negative,
            load_error: self.load_error(),
            ended: self.is_ended(),
        }
    }
}

impl fmt::Debug for SwipeDeck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwipeDeck")
            .field("current_index", &self.current_index)
            .field("len", &self.images.len())
            .field("phase", &self.phase)
            .field("offset", &self.offset)
            .field("generation", &self.generation)
            .finish()
    }
}

fn step_fade(fade: &mut Option<Tween>, value: &mut f32, dt: f32) {
    if let Some(tween) = fade {
        *value = tween.apply(dt);
        if tween.has_completed() {
            *value = 0.0;
            *fade = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    const WIDTH: f32 = 400.0;

    fn deck(n: usize) -> (SwipeDeck, Rc<Cell<u32>>) {
        let ended = Rc::new(Cell::new(0));
        let counter = ended.clone();
        let images = ImageList::new((0..n).map(|i| format!("img-{i}")).collect());
        let deck = SwipeDeck::new(images, WIDTH, move || counter.set(counter.get() + 1));
        (deck, ended)
    }

    fn run_until_complete(deck: &mut SwipeDeck) -> Completion {
        for _ in 0..1000 {
            if let Some(done) = deck.animate(FRAME_TIME) {
                return done;
            }
        }
        panic!("resolution never completed");
    }

    fn swipe(deck: &mut SwipeDeck, dx: f32) -> Option<Resolution> {
        assert!(deck.begin_drag());
        deck.drag_to(dx * 0.5);
        deck.drag_to(dx);
        let resolution = deck.release(dx);
        let done = run_until_complete(deck);
        assert!(deck.complete(done));
        resolution
    }

    #[test]
    fn test_drag_intensities() {
        let (mut deck, _) = deck(3);
        deck.begin_drag();

        deck.drag_to(80.0);
        assert_eq!(deck.intensities(), (0.5, 0.0));

        deck.drag_to(400.0);
        assert_eq!(deck.intensities(), (1.0, 0.0));

        deck.drag_to(-40.0);
        assert_eq!(deck.intensities(), (0.0, 0.25));
        assert_eq!(deck.offset(), -40.0);
    }

    #[test]
    fn test_rotation_is_linear() {
        let (mut deck, _) = deck(3);
        deck.begin_drag();
        deck.drag_to(200.0);
        assert_eq!(deck.rotation(), 10.0);
        deck.drag_to(-400.0);
        assert_eq!(deck.frame().card_rotation, -20.0);
    }

    #[test]
    fn test_commit_advances_by_one() {
        let (mut deck, ended) = deck(3);
        let resolution = swipe(&mut deck, 0.5 * WIDTH);
        assert_eq!(resolution, Some(Resolution::Commit(Direction::Positive)));
        assert_eq!(deck.current_index(), 1);
        assert_eq!(deck.offset(), 0.0);
        assert_eq!(deck.phase(), SwipePhase::Idle);
        assert_eq!(ended.get(), 0);
    }

    #[test]
    fn test_both_directions_advance() {
        let (mut deck, _) = deck(3);
        swipe(&mut deck, -0.5 * WIDTH);
        assert_eq!(deck.current_index(), 1);
        swipe(&mut deck, 0.5 * WIDTH);
        assert_eq!(deck.current_index(), 2);
    }

    #[test]
    fn test_cancel_at_threshold() {
        let (mut deck, _) = deck(3);
        let resolution = swipe(&mut deck, 0.4 * WIDTH);
        assert_eq!(resolution, Some(Resolution::Cancel));
        assert_eq!(deck.current_index(), 0);
        assert_eq!(deck.offset(), 0.0);
        assert_eq!(deck.phase(), SwipePhase::Idle);
    }

    #[test]
    fn test_commit_target_is_full_width() {
        let (mut deck, _) = deck(3);
        deck.begin_drag();
        deck.release(-300.0);
        run_until_complete(&mut deck);
        assert_eq!(deck.offset(), -WIDTH);
    }

    #[test]
    fn test_indicators_fade_after_release() {
        let (mut deck, _) = deck(3);
        deck.begin_drag();
        deck.drag_to(100.0);
        deck.release(100.0);
        let done = run_until_complete(&mut deck);
        deck.complete(done);
        for _ in 0..60 {
            deck.animate(FRAME_TIME);
        }
        assert_eq!(deck.intensities(), (0.0, 0.0));
    }

    #[test]
    fn test_no_new_drag_while_resolving() {
        let (mut deck, _) = deck(3);
        deck.begin_drag();
        deck.release(300.0);
        assert!(!deck.begin_drag());
        deck.drag_to(10.0);
        assert!(deck.release(10.0).is_none());
    }

    #[test]
    fn test_stale_completion_is_dropped() {
        let (mut deck, _) = deck(4);
        deck.begin_drag();
        deck.release(300.0);
        let first = run_until_complete(&mut deck);
        assert!(deck.complete(first));
        assert_eq!(deck.current_index(), 1);

        // Delivered twice: no second advance.
        assert!(!deck.complete(first));
        assert_eq!(deck.current_index(), 1);

        // An old completion must not resolve a newer gesture.
        deck.begin_drag();
        deck.release(300.0);
        assert!(!deck.complete(first));
        assert_eq!(deck.current_index(), 1);
        let second = run_until_complete(&mut deck);
        assert!(deck.complete(second));
        assert_eq!(deck.current_index(), 2);
    }

    #[test]
    fn test_end_fires_once() {
        let (mut deck, ended) = deck(1);
        swipe(&mut deck, 300.0);
        assert!(deck.is_ended());
        assert_eq!(deck.current_url(), None);
        assert_eq!(ended.get(), 1);

        assert!(!deck.begin_drag());
        assert_eq!(deck.animate(FRAME_TIME), None);
        assert_eq!(ended.get(), 1);
    }

    #[test]
    fn test_empty_deck_is_born_ended() {
        let (deck, ended) = deck(0);
        assert!(deck.is_ended());
        assert!(deck.frame().ended);
        assert_eq!(ended.get(), 1);
    }

    #[test]
    fn test_load_error_follows_current_image() {
        let (mut deck, _) = deck(3);
        deck.mark_load_error("img-0");
        assert!(deck.frame().load_error);

        // Gestures still work and the flag clears on a healthy image.
        swipe(&mut deck, 300.0);
        assert_eq!(deck.current_index(), 1);
        assert!(!deck.load_error());
    }

    #[test]
    fn test_prefetch_failure_shows_after_advance() {
        let (mut deck, _) = deck(2);
        // The next image fails while the first is still on screen.
        deck.mark_load_error("img-1");
        assert!(!deck.load_error());

        swipe(&mut deck, 300.0);
        assert_eq!(deck.current_url(), Some("img-1"));
        assert!(deck.load_error());
        assert!(deck.frame().load_error);
    }

    #[test]
    fn test_indicator_scale() {
        assert_eq!(indicator_scale(0.0), 1.0);
        assert_eq!(indicator_scale(1.0), 1.2);
    }
}
