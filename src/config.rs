//! Node configuration.
//!
//! Everything here is a fixed build-time constant; the node has no runtime
//! reconfiguration surface. Endpoints and periods mirror the deployment the
//! node was commissioned for.

use crate::clock::Ticks;

/// Firmware build/version string. Doubles as the messaging client identity
/// prefix and the payload of the startup announcement.
pub const BUILD_VERSION: &str = "Orwell-01";

/// Maximum formatted topic length, including the root.
pub const TOPIC_CAPACITY: usize = 64;

/// A fully-qualified topic string.
pub type Topic = heapless::String<TOPIC_CAPACITY>;

/// Core node configuration.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    // --- Endpoints ---
    /// MQTT broker host.
    pub mqtt_host: &'static str,
    /// MQTT broker port.
    pub mqtt_port: u16,
    /// Firmware update server host.
    pub update_host: &'static str,
    /// Firmware update server port.
    pub update_port: u16,
    /// Firmware update server path.
    pub update_path: &'static str,

    // --- Topics ---
    /// Topic namespace root (no trailing slash).
    pub topic_root: &'static str,

    // --- Timer periods (ticks) ---
    /// Status heartbeat period.
    pub status_period: Ticks,
    /// Firmware update check period.
    pub update_check_period: Ticks,
    /// Minimum interval between motion reports.
    pub motion_debounce: Ticks,
    /// Combined-sensor poll period.
    pub env_poll_period: Ticks,
    /// Light-sensor poll period.
    pub light_poll_period: Ticks,

    // --- Loop pacing (milliseconds) ---
    /// Idle delay at the end of each loop pass.
    pub idle_delay_ms: u32,
    /// Delay between network status polls while reconnecting.
    pub net_poll_delay_ms: u32,
    /// Delay between messaging connect attempts.
    pub msg_retry_delay_ms: u32,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            mqtt_host: "192.168.2.5",
            mqtt_port: 1883,
            update_host: "192.168.2.5",
            update_port: 2342,
            update_path: "/",

            topic_root: "orwell/test",

            status_period: 23_000,
            update_check_period: 60_000,
            motion_debounce: 1_000,
            env_poll_period: 5_000,
            light_poll_period: 1_000,

            idle_delay_ms: 10,
            net_poll_delay_ms: 500,
            msg_retry_delay_ms: 5_000,
        }
    }
}

impl NodeConfig {
    /// Build a fully-qualified topic from a `/suffix`.
    ///
    /// Topics are sized so that every suffix the node uses fits; an
    /// overlong root+suffix is a configuration defect, not a runtime
    /// condition, so the result is silently capped by the buffer.
    pub fn topic(&self, suffix: &str) -> Topic {
        let mut t = Topic::new();
        let _ = t.push_str(self.topic_root);
        let _ = t.push_str(suffix);
        t
    }
}
