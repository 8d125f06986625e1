//! The single owner of the carousel's two timers.
//!
//! Deadlines are absolute milliseconds on the engine's clock. Nothing here
//! sleeps or spawns; the caller polls [`Scheduler::pop_due`] with the current
//! time and sleeps until [`Scheduler::next_deadline`].

/// Which timer fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    /// Recurring autoplay advance.
    Tick,
    /// One-shot end of the manual-navigation suspension window.
    Resume,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scheduler {
    tick_interval_ms: u64,
    tick_at: Option<u64>,
    resume_at: Option<u64>,
}

impl Scheduler {
    pub fn new(tick_interval_ms: u64) -> Self {
        Self {
            tick_interval_ms: tick_interval_ms.max(1),
            tick_at: None,
            resume_at: None,
        }
    }

    /// Start the recurring tick one interval after `now_ms`. A tick that is
    /// already running keeps its phase.
    pub fn arm_tick(&mut self, now_ms: u64) {
        if self.tick_at.is_none() {
            self.tick_at = Some(now_ms.saturating_add(self.tick_interval_ms));
        }
    }

    pub fn cancel_tick(&mut self) {
        self.tick_at = None;
    }

    /// Schedule the resume timer `delay_ms` from now. Any pending resume is
    /// cancelled first, so rapid input can only push the deadline later.
    pub fn arm_resume(&mut self, now_ms: u64, delay_ms: u64) {
        self.cancel_resume();
        self.resume_at = Some(now_ms.saturating_add(delay_ms));
    }

    pub fn cancel_resume(&mut self) {
        self.resume_at = None;
    }

    pub fn cancel_all(&mut self) {
        self.cancel_tick();
        self.cancel_resume();
    }

    pub fn tick_deadline(&self) -> Option<u64> {
        self.tick_at
    }

    pub fn resume_deadline(&self) -> Option<u64> {
        self.resume_at
    }

    pub fn is_idle(&self) -> bool {
        self.tick_at.is_none() && self.resume_at.is_none()
    }

    pub fn next_deadline(&self) -> Option<u64> {
        match (self.tick_at, self.resume_at) {
            (Some(t), Some(r)) => Some(t.min(r)),
            (t, r) => t.or(r),
        }
    }

    /// Take the earliest timer due at `now_ms`, returning it with the time it
    /// was scheduled for. The tick re-arms itself one interval after that
    /// scheduled time; the resume timer is consumed.
    ///
    /// On a tie the resume timer goes first.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(Timer, u64)> {
        let resume = self.resume_at.filter(|&at| at <= now_ms);
        let tick = self.tick_at.filter(|&at| at <= now_ms);
        match (resume, tick) {
            (Some(r), Some(t)) if t < r => self.fire_tick(t),
            (Some(r), _) => {
                self.resume_at = None;
                Some((Timer::Resume, r))
            }
            (None, Some(t)) => self.fire_tick(t),
            (None, None) => None,
        }
    }

    fn fire_tick(&mut self, at: u64) -> Option<(Timer, u64)> {
        self.tick_at = Some(at.saturating_add(self.tick_interval_ms));
        Some((Timer::Tick, at))
    }
}
