//! Combined environmental sensor channel.
//!
//! One poll produces four publishes (temperature, pressure, humidity,
//! gas resistance), each on its own topic. Pressure is reported in
//! hectopascals and gas resistance in kiloohms; the driver delivers
//! pascals and ohms.

use core::fmt::Write as _;

use log::{debug, warn};

use crate::app::ports::{EnvSensorPort, MessagingPort};
use crate::clock::{PollTimer, Ticks};
use crate::config::{NodeConfig, Topic};

const PASCALS_PER_HECTOPASCAL: f32 = 100.0;
const OHMS_PER_KILOOHM: f32 = 1_000.0;

/// Formatted numeric payload.
type Payload = heapless::String<32>;

pub struct EnvChannel {
    timer: PollTimer,
    period: Ticks,
    /// Cleared permanently when `begin` fails; the channel then skips
    /// its turn every pass for the rest of the process lifetime.
    available: bool,
    temperature_topic: Topic,
    pressure_topic: Topic,
    humidity_topic: Topic,
    gas_topic: Topic,
    error_topic: Topic,
}

impl EnvChannel {
    pub fn new(config: &NodeConfig) -> Self {
        Self {
            timer: PollTimer::new(),
            period: config.env_poll_period,
            available: false,
            temperature_topic: config.topic("/temperature"),
            pressure_topic: config.topic("/pressure"),
            humidity_topic: config.topic("/humidity"),
            gas_topic: config.topic("/gas"),
            error_topic: config.topic("/error"),
        }
    }

    /// One-time driver bring-up. A failure is announced once on the error
    /// topic and deactivates the channel for good.
    pub fn init(&mut self, driver: &mut impl EnvSensorPort, msg: &mut impl MessagingPort) {
        match driver.begin() {
            Ok(()) => {
                self.available = true;
                debug!("environment sensor online");
            }
            Err(e) => {
                warn!("environment sensor init failed: {}", e);
                msg.publish(&self.error_topic, "BME680 not present, deactivated");
            }
        }
    }

    /// Poll if due. A failed read yields exactly one error publish and no
    /// measurement publishes for that interval.
    pub fn service(
        &mut self,
        now: Ticks,
        driver: &mut impl EnvSensorPort,
        msg: &mut impl MessagingPort,
    ) {
        if !self.available || !self.timer.is_due(now, self.period) {
            return;
        }
        self.timer.mark(now);

        let reading = match driver.read() {
            Ok(r) => r,
            Err(e) => {
                warn!("environment read failed: {}", e);
                msg.publish(&self.error_topic, "BME680 read failed");
                return;
            }
        };

        msg.publish(
            &self.temperature_topic,
            &format_value(reading.temperature_c),
        );
        msg.publish(
            &self.pressure_topic,
            &format_value(reading.pressure_pa / PASCALS_PER_HECTOPASCAL),
        );
        msg.publish(&self.humidity_topic, &format_value(reading.humidity_pct));
        msg.publish(
            &self.gas_topic,
            &format_value(reading.gas_ohms / OHMS_PER_KILOOHM),
        );
    }
}

fn format_value(v: f32) -> Payload {
    let mut s = Payload::new();
    let _ = write!(s, "{:.2}", v);
    s
}
