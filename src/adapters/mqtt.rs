//! MQTT messaging adapter.
//!
//! Implements [`MessagingPort`] over `esp_idf_svc::mqtt::client`. The
//! ESP-IDF client delivers connection lifecycle events on a dedicated
//! connection handle; a background thread drains it and mirrors the
//! session state into an atomic flag the loop driver can poll without
//! blocking.
//!
//! Host builds get an in-memory simulation that records publishes and
//! can script connect failures.

use log::{info, warn};

use crate::app::ports::MessagingPort;
use crate::error::CommsError;

#[cfg(feature = "espidf")]
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

#[cfg(feature = "espidf")]
use esp_idf_svc::mqtt::client::{EspMqttClient, EventPayload, MqttClientConfiguration, QoS};

/// How long a connect attempt waits for the broker's acknowledgement.
#[cfg(feature = "espidf")]
const CONNACK_TIMEOUT_MS: u32 = 10_000;
#[cfg(feature = "espidf")]
const CONNACK_POLL_MS: u32 = 100;

pub struct MqttLink {
    broker_url: String,
    #[cfg(feature = "espidf")]
    client: Option<EspMqttClient<'static>>,
    #[cfg(feature = "espidf")]
    connected: Arc<AtomicBool>,
    #[cfg(not(feature = "espidf"))]
    sim_connected: bool,
    #[cfg(not(feature = "espidf"))]
    sim_fail_connects: u32,
    #[cfg(not(feature = "espidf"))]
    sim_published: Vec<(String, String)>,
}

impl MqttLink {
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            broker_url: format!("mqtt://{}:{}", host, port),
            #[cfg(feature = "espidf")]
            client: None,
            #[cfg(feature = "espidf")]
            connected: Arc::new(AtomicBool::new(false)),
            #[cfg(not(feature = "espidf"))]
            sim_connected: false,
            #[cfg(not(feature = "espidf"))]
            sim_fail_connects: 0,
            #[cfg(not(feature = "espidf"))]
            sim_published: Vec::new(),
        }
    }

    /// Simulation hook: make the next `n` connect attempts fail.
    #[cfg(not(feature = "espidf"))]
    pub fn sim_fail_next_connects(&mut self, n: u32) {
        self.sim_fail_connects = n;
    }

    /// Simulation hook: drop the session as a broker disconnect would.
    #[cfg(not(feature = "espidf"))]
    pub fn sim_drop_session(&mut self) {
        self.sim_connected = false;
    }

    #[cfg(not(feature = "espidf"))]
    pub fn sim_published(&self) -> &[(String, String)] {
        &self.sim_published
    }

    // ── Platform-specific ─────────────────────────────────────

    #[cfg(feature = "espidf")]
    fn platform_connect(&mut self, client_id: &str) -> Result<(), CommsError> {
        // Tear down any previous session before starting a new one.
        self.client = None;
        self.connected.store(false, Ordering::SeqCst);

        let conf = MqttClientConfiguration {
            client_id: Some(client_id),
            ..Default::default()
        };
        let (client, mut connection) = EspMqttClient::new(&self.broker_url, &conf)
            .map_err(|e| {
                warn!("MQTT: client creation failed: {}", e);
                CommsError::ConnectFailed
            })?;

        let connected = Arc::clone(&self.connected);
        std::thread::Builder::new()
            .name("mqtt-events".into())
            .stack_size(4096)
            .spawn(move || {
                while let Ok(event) = connection.next() {
                    match event.payload() {
                        EventPayload::Connected(_) => {
                            connected.store(true, Ordering::SeqCst);
                        }
                        EventPayload::Disconnected => {
                            connected.store(false, Ordering::SeqCst);
                        }
                        _ => {}
                    }
                }
                // Connection handle closed; the session is gone.
                connected.store(false, Ordering::SeqCst);
            })
            .map_err(|e| {
                warn!("MQTT: event thread spawn failed: {}", e);
                CommsError::ConnectFailed
            })?;

        self.client = Some(client);

        // Wait for the broker acknowledgement, bounded.
        let mut waited = 0;
        while !self.connected.load(Ordering::SeqCst) {
            if waited >= CONNACK_TIMEOUT_MS {
                warn!("MQTT: no acknowledgement within {} ms", CONNACK_TIMEOUT_MS);
                self.client = None;
                return Err(CommsError::ConnectFailed);
            }
            esp_idf_hal::delay::FreeRtos::delay_ms(CONNACK_POLL_MS);
            waited += CONNACK_POLL_MS;
        }
        info!("MQTT: session established as '{}'", client_id);
        Ok(())
    }

    #[cfg(not(feature = "espidf"))]
    fn platform_connect(&mut self, client_id: &str) -> Result<(), CommsError> {
        if self.sim_fail_connects > 0 {
            self.sim_fail_connects -= 1;
            warn!("MQTT(sim): scripted connect failure for '{}'", client_id);
            return Err(CommsError::ConnectFailed);
        }
        info!("MQTT(sim): '{}' connected to {}", client_id, self.broker_url);
        self.sim_connected = true;
        Ok(())
    }

    #[cfg(feature = "espidf")]
    fn platform_is_connected(&mut self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    #[cfg(not(feature = "espidf"))]
    fn platform_is_connected(&mut self) -> bool {
        self.sim_connected
    }

    #[cfg(feature = "espidf")]
    fn platform_publish(&mut self, topic: &str, payload: &str) {
        let Some(client) = self.client.as_mut() else {
            return;
        };
        // Fire-and-forget: enqueue never blocks the loop. A full outbox
        // drops the sample, which is acceptable for periodic telemetry.
        if let Err(e) = client.enqueue(topic, QoS::AtMostOnce, false, payload.as_bytes()) {
            warn!("MQTT: publish to '{}' failed: {}", topic, e);
        }
    }

    #[cfg(not(feature = "espidf"))]
    fn platform_publish(&mut self, topic: &str, payload: &str) {
        if !self.sim_connected {
            return;
        }
        self.sim_published
            .push((topic.to_string(), payload.to_string()));
    }
}

impl MessagingPort for MqttLink {
    fn connect(&mut self, client_id: &str) -> Result<(), CommsError> {
        self.platform_connect(client_id)
    }

    fn is_connected(&mut self) -> bool {
        self.platform_is_connected()
    }

    fn publish(&mut self, topic: &str, payload: &str) {
        self.platform_publish(topic, payload);
    }

    fn pump(&mut self) {
        // Inbound traffic is drained by the event thread on target and
        // does not exist in simulation.
    }
}
