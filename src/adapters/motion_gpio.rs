//! Motion input adapter.
//!
//! A PIR module drives a single GPIO high while it sees motion. The
//! adapter is a thin level read; the debounce policy lives in
//! [`crate::motion`].

use crate::app::ports::MotionPort;

#[cfg(feature = "espidf")]
use esp_idf_hal::gpio::{AnyIOPin, Input, PinDriver};

pub struct MotionInput {
    #[cfg(feature = "espidf")]
    pin: PinDriver<'static, AnyIOPin, Input>,
    #[cfg(not(feature = "espidf"))]
    sim_level: bool,
}

impl MotionInput {
    #[cfg(feature = "espidf")]
    pub fn new(pin: PinDriver<'static, AnyIOPin, Input>) -> Self {
        Self { pin }
    }

    #[cfg(not(feature = "espidf"))]
    pub fn new() -> Self {
        Self { sim_level: false }
    }

    /// Simulation hook: set the sampled level.
    #[cfg(not(feature = "espidf"))]
    pub fn sim_set_level(&mut self, level: bool) {
        self.sim_level = level;
    }
}

#[cfg(not(feature = "espidf"))]
impl Default for MotionInput {
    fn default() -> Self {
        Self::new()
    }
}

impl MotionPort for MotionInput {
    #[cfg(feature = "espidf")]
    fn level(&mut self) -> bool {
        self.pin.is_high()
    }

    #[cfg(not(feature = "espidf"))]
    fn level(&mut self) -> bool {
        self.sim_level
    }
}
