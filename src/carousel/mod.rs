//! Carousel Engine.
//!
//! A pure state machine over an ordered photo list. Every operation takes the
//! current time in milliseconds; the engine never reads a clock and never
//! sleeps. Time-driven behavior is expressed as deadlines held by the
//! [`Scheduler`], which the caller honors by calling [`Carousel::advance`].
//! [`driver`] runs an engine on a tokio task with a real clock.
//!
//! ## States
//!
//! ```text
//!                 PointerEnter / TogglePlay
//!   Autoplaying ─────────────────────────────▶ PausedByInteraction
//!     ▲   │  ◀───────────────────────────────        │
//!     │   │       PointerLeave / TogglePlay          │
//!     │   │ Next / Previous / JumpTo / swipe         │ Next / Previous / ...
//!     │   ▼                                          ▼
//!     └─ Suspended ◀─────────────────────────────────┘
//!      (resume timer, resume_after_ms)
//! ```
//!
//! The recurring tick is armed exactly while the engine is mounted,
//! `Autoplaying`, and has at least two photos. Fullscreen is an orthogonal
//! overlay that pins the photo shown when it was entered and does not touch
//! either timer.
//!
//! With no photos the engine is inert: [`Carousel::view`] is `None` and no
//! timer is ever scheduled. With one photo it is a static display.

pub mod driver;
mod scheduler;

pub use scheduler::{Scheduler, Timer};

use crate::types::PhotoEntry;
use tracing::debug;

/// Timing and gesture parameters, configured through `[carousel]` in
/// `site.toml`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselTiming {
    pub autoplay_interval_ms: u64,
    pub resume_after_ms: u64,
    /// Minimum horizontal travel, in pixels, for a touch to count as a swipe.
    pub swipe_threshold_px: f64,
}

impl Default for CarouselTiming {
    fn default() -> Self {
        Self {
            autoplay_interval_ms: 5000,
            resume_after_ms: 4000,
            swipe_threshold_px: 50.0,
        }
    }
}

/// Autoplay axis of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    Autoplaying,
    /// Hovered or paused with the play control; no timer pending.
    PausedByInteraction,
    /// Manual navigation happened; autoplay resumes when the resume timer fires.
    Suspended,
}

/// User and lifecycle events the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    PointerEnter,
    PointerLeave,
    Next,
    Previous,
    JumpTo(usize),
    /// Horizontal coordinate where a touch began.
    TouchStart(f64),
    /// Latest horizontal coordinate of the moving touch.
    TouchMove(f64),
    TouchEnd,
    ToggleFullscreen,
    TogglePlay,
}

/// What the view should show right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub index: usize,
    pub len: usize,
    pub playback: Playback,
    /// Index pinned by the fullscreen overlay, `None` when closed.
    pub fullscreen: Option<usize>,
}

impl Frame {
    pub fn is_autoplaying(&self) -> bool {
        self.playback == Playback::Autoplaying
    }
}

#[derive(Debug)]
pub struct Carousel {
    photos: Vec<PhotoEntry>,
    index: usize,
    playback: Playback,
    fullscreen: Option<usize>,
    touch_start: Option<f64>,
    touch_end: Option<f64>,
    mounted: bool,
    timing: CarouselTiming,
    scheduler: Scheduler,
}

impl Carousel {
    /// Mount a carousel over an already filtered and sorted photo list.
    pub fn new(photos: Vec<PhotoEntry>, timing: CarouselTiming, now_ms: u64) -> Self {
        let mut carousel = Carousel {
            photos,
            index: 0,
            playback: Playback::Autoplaying,
            fullscreen: None,
            touch_start: None,
            touch_end: None,
            mounted: true,
            timing,
            scheduler: Scheduler::new(timing.autoplay_interval_ms),
        };
        carousel.sync_tick(now_ms);
        carousel
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn photos(&self) -> &[PhotoEntry] {
        &self.photos
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn playback(&self) -> Playback {
        self.playback
    }

    pub fn is_autoplaying(&self) -> bool {
        self.playback == Playback::Autoplaying
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// `None` renders nothing.
    pub fn view(&self) -> Option<Frame> {
        if self.photos.is_empty() {
            return None;
        }
        Some(Frame {
            index: self.index,
            len: self.photos.len(),
            playback: self.playback,
            fullscreen: self.fullscreen,
        })
    }

    pub fn current(&self) -> Option<&PhotoEntry> {
        self.photos.get(self.index)
    }

    /// Earliest pending timer deadline.
    pub fn next_deadline(&self) -> Option<u64> {
        self.scheduler.next_deadline()
    }

    pub fn handle(&mut self, input: Input, now_ms: u64) {
        match input {
            Input::PointerEnter => self.set_playback(Playback::PausedByInteraction, now_ms),
            Input::PointerLeave => self.set_playback(Playback::Autoplaying, now_ms),
            Input::TogglePlay => {
                let next = match self.playback {
                    Playback::Autoplaying => Playback::PausedByInteraction,
                    Playback::PausedByInteraction | Playback::Suspended => Playback::Autoplaying,
                };
                self.set_playback(next, now_ms);
            }
            Input::Next => {
                if let Some(len) = self.navigable_len() {
                    self.navigate((self.index + 1) % len, now_ms);
                }
            }
            Input::Previous => {
                if let Some(len) = self.navigable_len() {
                    self.navigate((self.index + len - 1) % len, now_ms);
                }
            }
            Input::JumpTo(target) => {
                if self.navigable_len().is_some_and(|len| target < len) {
                    self.navigate(target, now_ms);
                }
            }
            Input::TouchStart(x) => {
                self.touch_start = Some(x);
                self.touch_end = None;
            }
            Input::TouchMove(x) => self.touch_end = Some(x),
            Input::TouchEnd => self.finish_swipe(now_ms),
            Input::ToggleFullscreen => {
                self.fullscreen = match self.fullscreen {
                    Some(_) => None,
                    None if !self.photos.is_empty() => Some(self.index),
                    None => None,
                };
                debug!(fullscreen = ?self.fullscreen, "carousel fullscreen toggled");
            }
        }
    }

    /// Fire every timer due at `now_ms`, in deadline order. Returns how many
    /// fired.
    pub fn advance(&mut self, now_ms: u64) -> usize {
        let mut fired = 0;
        while let Some((timer, at)) = self.scheduler.pop_due(now_ms) {
            fired += 1;
            match timer {
                Timer::Tick => {
                    let len = self.photos.len();
                    if len > 1 {
                        self.index = (self.index + 1) % len;
                        debug!(index = self.index, at, "carousel autoplay tick");
                    }
                }
                Timer::Resume => {
                    if self.playback == Playback::Suspended {
                        self.playback = Playback::Autoplaying;
                        debug!(at, "carousel autoplay resumed");
                    }
                    self.sync_tick(at);
                }
            }
        }
        fired
    }

    /// Replace the photo list, e.g. after the content cache refreshed.
    ///
    /// The index survives when still in range and resets to `0` otherwise.
    /// Lists of zero or one photo tear every timer down.
    pub fn set_photos(&mut self, photos: Vec<PhotoEntry>, now_ms: u64) {
        self.photos = photos;
        let len = self.photos.len();
        if self.index >= len {
            self.index = 0;
        }
        if self.fullscreen.is_some_and(|i| i >= len) {
            self.fullscreen = None;
        }
        self.touch_start = None;
        self.touch_end = None;
        if len <= 1 {
            self.scheduler.cancel_resume();
            if self.playback == Playback::Suspended {
                self.playback = Playback::Autoplaying;
            }
        }
        self.sync_tick(now_ms);
        debug!(len, index = self.index, "carousel photos replaced");
    }

    /// The view was discarded: drop every timer.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.scheduler.cancel_all();
    }

    pub fn mount(&mut self, now_ms: u64) {
        self.mounted = true;
        // The resume timer did not survive unmounting.
        if self.playback == Playback::Suspended {
            self.playback = Playback::Autoplaying;
        }
        self.sync_tick(now_ms);
    }

    fn navigable_len(&self) -> Option<usize> {
        let len = self.photos.len();
        (len > 1).then_some(len)
    }

    fn navigate(&mut self, target: usize, now_ms: u64) {
        self.index = target;
        self.playback = Playback::Suspended;
        self.sync_tick(now_ms);
        if self.mounted {
            self.scheduler.arm_resume(now_ms, self.timing.resume_after_ms);
        }
        debug!(index = target, now_ms, "carousel manual navigation");
    }

    fn set_playback(&mut self, playback: Playback, now_ms: u64) {
        self.scheduler.cancel_resume();
        if self.playback != playback {
            debug!(from = ?self.playback, to = ?playback, "carousel playback changed");
        }
        self.playback = playback;
        self.sync_tick(now_ms);
    }

    fn finish_swipe(&mut self, now_ms: u64) {
        let (Some(start), Some(end)) = (self.touch_start.take(), self.touch_end.take()) else {
            return;
        };
        let distance = start - end;
        let threshold = self.timing.swipe_threshold_px;
        if distance > threshold {
            self.handle(Input::Next, now_ms);
        } else if distance < -threshold {
            self.handle(Input::Previous, now_ms);
        }
    }

    /// Arm or cancel the tick so it runs exactly while mounted, autoplaying,
    /// and there is more than one photo.
    fn sync_tick(&mut self, now_ms: u64) {
        let should_tick =
            self.mounted && self.playback == Playback::Autoplaying && self.photos.len() > 1;
        if should_tick {
            self.scheduler.arm_tick(now_ms);
        } else {
            self.scheduler.cancel_tick();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::photos;

    fn carousel(n: usize) -> Carousel {
        Carousel::new(photos(n), CarouselTiming::default(), 0)
    }

    fn swipe(c: &mut Carousel, start: f64, end: f64, now_ms: u64) {
        c.handle(Input::TouchStart(start), now_ms);
        c.handle(Input::TouchMove(end), now_ms);
        c.handle(Input::TouchEnd, now_ms);
    }

    #[test]
    fn next_and_previous_are_cyclic() {
        for n in 2..=7 {
            for start in 0..n {
                let mut c = carousel(n);
                c.handle(Input::JumpTo(start), 0);
                for _ in 0..n {
                    c.handle(Input::Next, 0);
                }
                assert_eq!(c.index(), start, "next x{n} from {start}");
                for _ in 0..n {
                    c.handle(Input::Previous, 0);
                }
                assert_eq!(c.index(), start, "previous x{n} from {start}");
            }
        }
    }

    #[test]
    fn previous_from_zero_wraps_to_last() {
        let mut c = carousel(4);
        c.handle(Input::Previous, 0);
        assert_eq!(c.index(), 3);
    }

    #[test]
    fn manual_navigation_suspends_for_exactly_resume_window() {
        let mut c = carousel(3);
        c.handle(Input::Next, 1000);
        assert!(!c.is_autoplaying());
        assert_eq!(c.scheduler().tick_deadline(), None);

        c.advance(4999);
        assert!(!c.is_autoplaying());
        c.advance(5000);
        assert!(c.is_autoplaying());
        assert_eq!(c.scheduler().tick_deadline(), Some(10_000));
        assert_eq!(c.index(), 1);
    }

    #[test]
    fn repeated_navigation_restarts_the_resume_window() {
        let mut c = carousel(3);
        c.handle(Input::Next, 0);
        c.handle(Input::Next, 3000);
        c.advance(4000);
        assert!(!c.is_autoplaying(), "first resume timer must be cancelled");
        c.advance(7000);
        assert!(c.is_autoplaying());
    }

    #[test]
    fn swipe_threshold_is_exclusive() {
        let mut c = carousel(3);
        swipe(&mut c, 200.0, 150.0, 0);
        assert_eq!(c.index(), 0);
        assert!(c.is_autoplaying());
        swipe(&mut c, 150.0, 200.0, 0);
        assert_eq!(c.index(), 0);

        swipe(&mut c, 200.0, 149.0, 0);
        assert_eq!(c.index(), 1);
        assert_eq!(c.playback(), Playback::Suspended);

        swipe(&mut c, 149.0, 200.0, 0);
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn incomplete_gesture_is_a_no_op() {
        let mut c = carousel(3);
        c.handle(Input::TouchStart(300.0), 0);
        c.handle(Input::TouchEnd, 0);
        assert_eq!(c.index(), 0);

        c.handle(Input::TouchMove(10.0), 0);
        c.handle(Input::TouchEnd, 0);
        assert_eq!(c.index(), 0);
        assert!(c.is_autoplaying());
    }

    #[test]
    fn touch_coordinates_reset_between_gestures() {
        let mut c = carousel(3);
        swipe(&mut c, 300.0, 100.0, 0);
        assert_eq!(c.index(), 1);
        c.handle(Input::TouchStart(300.0), 0);
        c.handle(Input::TouchEnd, 0);
        assert_eq!(c.index(), 1);
    }

    #[test]
    fn hover_stops_tick_and_leave_resumes_in_place() {
        let mut c = carousel(3);
        c.advance(5000);
        assert_eq!(c.index(), 1);

        c.handle(Input::PointerEnter, 6000);
        assert_eq!(c.playback(), Playback::PausedByInteraction);
        assert_eq!(c.scheduler().tick_deadline(), None);
        c.advance(60_000);
        assert_eq!(c.index(), 1);

        c.handle(Input::PointerLeave, 60_000);
        assert!(c.is_autoplaying());
        assert_eq!(c.index(), 1);
        assert_eq!(c.scheduler().tick_deadline(), Some(65_000));
    }

    #[test]
    fn tick_then_previous_scenario() {
        let mut c = carousel(3);
        assert!(c.is_autoplaying());
        c.advance(5000);
        assert_eq!(c.index(), 1);

        c.handle(Input::Previous, 5000);
        assert_eq!(c.index(), 0);
        assert!(!c.is_autoplaying());
        c.advance(8999);
        assert!(!c.is_autoplaying());
        c.advance(9000);
        assert!(c.is_autoplaying());
    }

    #[test]
    fn empty_list_renders_nothing_and_schedules_nothing() {
        let mut c = carousel(0);
        assert_eq!(c.view(), None);
        assert!(c.scheduler().is_idle());
        for input in [
            Input::Next,
            Input::Previous,
            Input::JumpTo(0),
            Input::PointerEnter,
            Input::PointerLeave,
            Input::TogglePlay,
            Input::ToggleFullscreen,
        ] {
            c.handle(input, 0);
        }
        assert_eq!(c.view(), None);
        assert!(c.scheduler().is_idle());
    }

    #[test]
    fn single_photo_is_static() {
        let mut c = carousel(1);
        assert!(c.scheduler().is_idle());
        c.handle(Input::Next, 0);
        assert_eq!(c.index(), 0);
        assert!(c.scheduler().is_idle());
        assert!(c.view().is_some());
    }

    #[test]
    fn jump_out_of_range_is_ignored() {
        let mut c = carousel(3);
        c.handle(Input::JumpTo(3), 0);
        assert_eq!(c.index(), 0);
        assert!(c.is_autoplaying());
        c.handle(Input::JumpTo(2), 0);
        assert_eq!(c.index(), 2);
    }

    #[test]
    fn fullscreen_pins_photo_without_touching_timers() {
        let mut c = carousel(3);
        c.handle(Input::ToggleFullscreen, 100);
        assert_eq!(c.view().unwrap().fullscreen, Some(0));
        assert_eq!(c.scheduler().tick_deadline(), Some(5000));

        c.advance(5000);
        let frame = c.view().unwrap();
        assert_eq!(frame.index, 1);
        assert_eq!(frame.fullscreen, Some(0));

        c.handle(Input::ToggleFullscreen, 5100);
        assert_eq!(c.view().unwrap().fullscreen, None);
    }

    #[test]
    fn toggle_play_pauses_without_resume_timer() {
        let mut c = carousel(3);
        c.handle(Input::TogglePlay, 0);
        assert_eq!(c.playback(), Playback::PausedByInteraction);
        assert!(c.scheduler().is_idle());
        c.handle(Input::TogglePlay, 100);
        assert!(c.is_autoplaying());
        assert_eq!(c.scheduler().tick_deadline(), Some(5100));
    }

    #[test]
    fn hover_cancels_pending_resume() {
        let mut c = carousel(3);
        c.handle(Input::Next, 0);
        c.handle(Input::PointerEnter, 1000);
        assert_eq!(c.scheduler().resume_deadline(), None);
        c.advance(10_000);
        assert_eq!(c.playback(), Playback::PausedByInteraction);
    }

    #[test]
    fn leaving_after_manual_navigation_resumes_immediately() {
        let mut c = carousel(3);
        c.handle(Input::Next, 1000);
        assert_eq!(c.playback(), Playback::Suspended);
        assert_eq!(c.scheduler().resume_deadline(), Some(5000));

        c.handle(Input::PointerLeave, 2000);
        assert!(c.is_autoplaying());
        assert_eq!(c.scheduler().resume_deadline(), None);
        assert_eq!(c.scheduler().tick_deadline(), Some(7000));
        assert_eq!(c.index(), 1);
    }

    #[test]
    fn navigation_while_hovered_arms_resume_until_leave() {
        let mut c = carousel(3);
        c.handle(Input::PointerEnter, 500);
        assert_eq!(c.playback(), Playback::PausedByInteraction);

        c.handle(Input::Next, 1000);
        assert_eq!(c.playback(), Playback::Suspended);
        assert_eq!(c.scheduler().resume_deadline(), Some(5000));
        assert_eq!(c.scheduler().tick_deadline(), None);

        c.handle(Input::PointerLeave, 1500);
        assert!(c.is_autoplaying());
        assert_eq!(c.scheduler().resume_deadline(), None);
        assert_eq!(c.scheduler().tick_deadline(), Some(6500));

        c.advance(6500);
        assert_eq!(c.index(), 2);
        assert!(c.is_autoplaying());
    }

    #[test]
    fn shrinking_list_clamps_index_and_tears_down_timers() {
        let mut c = carousel(5);
        c.handle(Input::JumpTo(4), 0);
        c.set_photos(photos(1), 100);
        assert_eq!(c.index(), 0);
        assert!(c.scheduler().is_idle());
        assert!(c.is_autoplaying());

        c.set_photos(photos(3), 200);
        assert_eq!(c.scheduler().tick_deadline(), Some(5200));

        c.set_photos(Vec::new(), 300);
        assert_eq!(c.view(), None);
        assert!(c.scheduler().is_idle());
    }

    #[test]
    fn growing_list_keeps_valid_index() {
        let mut c = carousel(3);
        c.advance(10_000);
        assert_eq!(c.index(), 2);
        c.set_photos(photos(6), 10_000);
        assert_eq!(c.index(), 2);
    }

    #[test]
    fn unmount_drops_all_timers() {
        let mut c = carousel(3);
        c.handle(Input::Next, 0);
        c.unmount();
        assert!(c.scheduler().is_idle());
        c.handle(Input::PointerLeave, 100);
        assert!(c.scheduler().is_idle());

        c.mount(200);
        assert_eq!(c.scheduler().tick_deadline(), Some(5200));
    }

    #[test]
    fn late_advance_catches_up_every_tick() {
        let mut c = carousel(4);
        let fired = c.advance(15_000);
        assert_eq!(fired, 3);
        assert_eq!(c.index(), 3);
        assert_eq!(c.next_deadline(), Some(20_000));
    }
}
