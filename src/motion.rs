//! Motion reporting with rate limiting.
//!
//! The input is sampled by level once per loop pass. While it reads
//! high, a report is published at most once per debounce interval; the
//! payload is the tick timestamp of the report. A level that rises and
//! falls entirely between two passes is not observed, by design of
//! level sampling.

use core::fmt::Write as _;

use log::debug;

use crate::app::ports::{MessagingPort, MotionPort};
use crate::clock::{PollTimer, Ticks};
use crate::config::{NodeConfig, Topic};

pub struct MotionDebouncer {
    timer: PollTimer,
    period: Ticks,
    topic: Topic,
}

impl MotionDebouncer {
    pub fn new(config: &NodeConfig) -> Self {
        Self {
            timer: PollTimer::new(),
            period: config.motion_debounce,
            topic: config.topic("/motion"),
        }
    }

    pub fn service(
        &mut self,
        now: Ticks,
        input: &mut impl MotionPort,
        msg: &mut impl MessagingPort,
    ) {
        if !input.level() {
            return;
        }
        // The debounce window only starts counting from a reported
        // event, so a quiet spell longer than the window means the next
        // motion is reported immediately.
        if !self.timer.is_due(now, self.period) {
            return;
        }
        self.timer.mark(now);

        debug!("motion at {}", now);
        let mut payload: heapless::String<16> = heapless::String::new();
        let _ = write!(payload, "{}", now);
        msg.publish(&self.topic, &payload);
    }
}
