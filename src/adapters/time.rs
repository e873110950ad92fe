//! Tick source and delay.
//!
//! On target the tick is the ESP timer's microsecond counter scaled to
//! milliseconds, which wraps a `u32` after about 49.7 days. The gate
//! arithmetic in [`crate::clock`] is built for exactly that wrap.

use crate::app::ports::ClockPort;
use crate::clock::Ticks;

#[cfg(not(feature = "espidf"))]
use std::time::Instant;

pub struct TickClock {
    #[cfg(not(feature = "espidf"))]
    origin: Instant,
}

impl TickClock {
    #[cfg(feature = "espidf")]
    pub fn new() -> Self {
        Self {}
    }

    #[cfg(not(feature = "espidf"))]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockPort for TickClock {
    #[cfg(feature = "espidf")]
    fn now(&mut self) -> Ticks {
        let micros = unsafe { esp_idf_sys::esp_timer_get_time() };
        (micros / 1_000) as Ticks
    }

    #[cfg(not(feature = "espidf"))]
    fn now(&mut self) -> Ticks {
        self.origin.elapsed().as_millis() as Ticks
    }

    #[cfg(feature = "espidf")]
    fn delay_ms(&mut self, ms: u32) {
        esp_idf_hal::delay::FreeRtos::delay_ms(ms);
    }

    #[cfg(not(feature = "espidf"))]
    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}
