use std::time::{Duration, Instant};

const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Fixed rate tick source for the event loop.
/// A late poll produces a single tick and the next one is scheduled a full interval later, frames are never caught up.
pub struct FrameTimer {
    interval: Duration,
    next: Option<Instant>,
}
impl FrameTimer {
    pub fn new(interval: Duration, now: Instant) -> FrameTimer {
        let interval = interval.max(MIN_INTERVAL);
        FrameTimer { interval, next: Some(now + interval) }
    }

    /// Returns `true` if a tick is due at `now`
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next {
            Some(deadline) if now >= deadline => {
                self.next = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }

    /// Takes effect from the next scheduled tick
    pub fn set_interval(&mut self, interval: Duration) { self.interval = interval.max(MIN_INTERVAL); }

    pub fn stop(&mut self) { self.next = None; }

    /// When the event loop should wake up next, `None` once stopped
    pub fn deadline(&self) -> Option<Instant> { self.next }
}
