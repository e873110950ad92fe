//! Wraparound-safe tick arithmetic.
//!
//! Every periodic activity in the node (status heartbeat, update check,
//! motion debounce, sensor polls) is gated on a [`PollTimer`]. The tick
//! counter is a `u32` millisecond clock that wraps roughly every 49.7
//! days; elapsed-time comparisons must stay correct across that wrap.

/// Monotonic tick count (milliseconds since boot, modulo `u32::MAX + 1`).
pub type Ticks = u32;

/// A "has enough time passed" gate over the wrapping tick clock.
///
/// Lifecycle: starts never-fired (due on the first check), then re-anchors
/// at the current reading each time the owner calls [`mark`](Self::mark).
#[derive(Debug, Clone, Copy, Default)]
pub struct PollTimer {
    last_fired: Option<Ticks>,
}

impl PollTimer {
    pub const fn new() -> Self {
        Self { last_fired: None }
    }

    /// Whether `period` ticks have elapsed since the last fire.
    ///
    /// If the clock has wrapped since the last fire (`now < last_fired`),
    /// the anchor is forced to 0 so the timer fires within at most one
    /// `period` instead of waiting out the wrap distance.
    pub fn is_due(&mut self, now: Ticks, period: Ticks) -> bool {
        let Some(last) = self.last_fired else {
            return true;
        };
        if now < last {
            self.last_fired = Some(0);
            return now >= period;
        }
        now - last >= period
    }

    /// Record a fire at `now`.
    pub fn mark(&mut self, now: Ticks) {
        self.last_fired = Some(now);
    }

    /// Anchor of the last fire, if any. Exposed for diagnostics/tests.
    pub fn last_fired(&self) -> Option<Ticks> {
        self.last_fired
    }
}
