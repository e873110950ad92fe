//! Port traits: the boundary between the loop driver and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ NodeService (domain)
//! ```
//!
//! Driven adapters (WiFi, MQTT, sensor drivers, GPIO, OTA fetcher, clock)
//! implement these traits. The [`NodeService`](super::service::NodeService)
//! consumes them via generics, so the domain core never touches hardware
//! directly and every scenario is reproducible with mocks.

use crate::clock::Ticks;
use crate::error::{CommsError, SensorError};

// ───────────────────────────────────────────────────────────────
// Network transport (station-mode link manager)
// ───────────────────────────────────────────────────────────────

/// State of a transport tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    Down,
    Up,
}

/// Station-mode network link. Connection establishment is asynchronous:
/// request it, then poll [`status`](Self::status) until `Up`.
pub trait NetworkPort {
    /// Begin (or re-begin) association with the access point.
    fn request_connect(&mut self);

    /// Current link state.
    fn status(&mut self) -> LinkStatus;
}

// ───────────────────────────────────────────────────────────────
// Messaging transport (publish/subscribe client)
// ───────────────────────────────────────────────────────────────

/// Publish/subscribe messaging link. Only meaningful once the network
/// tier is up.
pub trait MessagingPort {
    /// Attempt a broker connection under the given client identifier.
    fn connect(&mut self, client_id: &str) -> Result<(), CommsError>;

    /// Whether the session is currently established.
    fn is_connected(&mut self) -> bool;

    /// Fire-and-forget publish. Transport-level failures are the
    /// adapter's to log; they are not escalated to the caller.
    fn publish(&mut self, topic: &str, payload: &str);

    /// Service inbound traffic and keep-alive. Called once per loop pass.
    fn pump(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Sensor drivers
// ───────────────────────────────────────────────────────────────

/// One reading from the combined gas/pressure/humidity/temperature sensor.
/// Raw units as delivered by the driver; presentation scaling happens in
/// the publishing channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvReading {
    pub temperature_c: f32,
    pub pressure_pa: f32,
    pub humidity_pct: f32,
    pub gas_ohms: f32,
}

/// Combined environmental sensor driver.
pub trait EnvSensorPort {
    /// One-time initialisation. Called once at startup; a failure
    /// permanently deactivates the sensor for this process lifetime.
    fn begin(&mut self) -> Result<(), SensorError>;

    /// Trigger and fetch one measurement.
    fn read(&mut self) -> Result<EnvReading, SensorError>;
}

/// Ambient light sensor driver. Readings are lux.
pub trait LightSensorPort {
    fn begin(&mut self) -> Result<(), SensorError>;
    fn read(&mut self) -> Result<u32, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Motion input
// ───────────────────────────────────────────────────────────────

/// Binary motion input, sampled by level (no edge capture).
pub trait MotionPort {
    /// `true` while the input indicates motion.
    fn level(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Remote firmware update
// ───────────────────────────────────────────────────────────────

/// Result of one update check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// A newer image was fetched and applied. On real hardware the
    /// adapter reboots before returning, so this is only observed in
    /// simulation.
    Updated,
    /// The server reports the running version is current.
    NoUpdate,
    /// The check or the apply failed; retried at the next interval.
    Failed,
}

/// Versioned fetch/compare/apply against the update server.
pub trait UpdatePort {
    fn check_and_apply(
        &mut self,
        host: &str,
        port: u16,
        path: &str,
        version: &str,
    ) -> UpdateOutcome;
}

// ───────────────────────────────────────────────────────────────
// Clock
// ───────────────────────────────────────────────────────────────

/// Monotonic wrapping tick source plus the loop's only sleep primitive.
pub trait ClockPort {
    /// Current tick reading (wraps at `u32::MAX`).
    fn now(&mut self) -> Ticks;

    /// Block for `ms` milliseconds. Used by transport recovery and the
    /// end-of-pass idle delay; mocks advance simulated time here.
    fn delay_ms(&mut self, ms: u32);
}
