//! Ambient light channel.
//!
//! Polls the lux sensor once per second and publishes the integer lux
//! value. Same availability and error discipline as the environmental
//! channel, on a faster cadence.

use core::fmt::Write as _;

use log::{debug, warn};

use crate::app::ports::{LightSensorPort, MessagingPort};
use crate::clock::{PollTimer, Ticks};
use crate::config::{NodeConfig, Topic};

type Payload = heapless::String<16>;

pub struct LightChannel {
    timer: PollTimer,
    period: Ticks,
    available: bool,
    light_topic: Topic,
    error_topic: Topic,
}

impl LightChannel {
    pub fn new(config: &NodeConfig) -> Self {
        Self {
            timer: PollTimer::new(),
            period: config.light_poll_period,
            available: false,
            light_topic: config.topic("/light"),
            error_topic: config.topic("/error"),
        }
    }

    pub fn init(&mut self, driver: &mut impl LightSensorPort, msg: &mut impl MessagingPort) {
        match driver.begin() {
            Ok(()) => {
                self.available = true;
                debug!("light sensor online");
            }
            Err(e) => {
                warn!("light sensor init failed: {}", e);
                msg.publish(&self.error_topic, "BH1750 not present, deactivated");
            }
        }
    }

    pub fn service(
        &mut self,
        now: Ticks,
        driver: &mut impl LightSensorPort,
        msg: &mut impl MessagingPort,
    ) {
        if !self.available || !self.timer.is_due(now, self.period) {
            return;
        }
        self.timer.mark(now);

        match driver.read() {
            Ok(lux) => {
                let mut payload = Payload::new();
                let _ = write!(payload, "{}", lux);
                msg.publish(&self.light_topic, &payload);
            }
            Err(e) => {
                warn!("light read failed: {}", e);
                msg.publish(&self.error_topic, "BH1750 read failed");
            }
        }
    }
}
