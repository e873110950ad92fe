//! WiFi station-mode adapter.
//!
//! Implements [`NetworkPort`], the lower of the two transport tiers.
//!
//! ## cfg gating
//!
//! - **`espidf` feature**: real ESP-IDF station driver via
//!   `esp_idf_svc::wifi::EspWifi`.
//! - **host builds**: a simulation that comes up after a fixed number of
//!   status polls, for integration harnesses and dev runs.

use log::info;
#[cfg(feature = "espidf")]
use log::warn;

use crate::app::ports::{LinkStatus, NetworkPort};

#[cfg(feature = "espidf")]
use esp_idf_svc::wifi::{AuthMethod, ClientConfiguration, Configuration, EspWifi};

/// Status polls a simulated link stays down after a connect request.
#[cfg(not(feature = "espidf"))]
const SIM_POLLS_UNTIL_UP: u32 = 3;

pub struct WifiLink {
    #[cfg(feature = "espidf")]
    driver: EspWifi<'static>,
    ssid: heapless::String<32>,
    password: heapless::String<64>,
    #[cfg(not(feature = "espidf"))]
    sim_connected: bool,
    #[cfg(not(feature = "espidf"))]
    sim_polls_remaining: u32,
    /// Simulation: counts connect requests for assertions in tests.
    #[cfg(not(feature = "espidf"))]
    sim_connect_requests: u32,
}

impl WifiLink {
    #[cfg(feature = "espidf")]
    pub fn new(driver: EspWifi<'static>, ssid: &str, password: &str) -> Self {
        Self {
            driver,
            ssid: truncate_into(ssid),
            password: truncate_into(password),
        }
    }

    #[cfg(not(feature = "espidf"))]
    pub fn new(ssid: &str, password: &str) -> Self {
        Self {
            ssid: truncate_into(ssid),
            password: truncate_into(password),
            sim_connected: false,
            sim_polls_remaining: 0,
            sim_connect_requests: 0,
        }
    }

    /// Simulation hook: drop the link so recovery paths can be exercised.
    #[cfg(not(feature = "espidf"))]
    pub fn sim_drop_link(&mut self) {
        self.sim_connected = false;
    }

    #[cfg(not(feature = "espidf"))]
    pub fn sim_connect_requests(&self) -> u32 {
        self.sim_connect_requests
    }

    // ── Platform-specific ─────────────────────────────────────

    #[cfg(feature = "espidf")]
    fn platform_request_connect(&mut self) {
        let config = Configuration::Client(ClientConfiguration {
            ssid: self.ssid.clone(),
            password: self.password.clone(),
            auth_method: if self.password.is_empty() {
                AuthMethod::None
            } else {
                AuthMethod::WPA2Personal
            },
            ..Default::default()
        });
        if let Err(e) = self.driver.set_configuration(&config) {
            warn!("WiFi: set_configuration failed: {}", e);
            return;
        }
        if let Err(e) = self.driver.start() {
            warn!("WiFi: start failed: {}", e);
            return;
        }
        if let Err(e) = self.driver.connect() {
            warn!("WiFi: connect failed: {}", e);
        }
    }

    #[cfg(not(feature = "espidf"))]
    fn platform_request_connect(&mut self) {
        self.sim_connect_requests = self.sim_connect_requests.wrapping_add(1);
        self.sim_polls_remaining = SIM_POLLS_UNTIL_UP;
        info!("WiFi(sim): associating with '{}'", self.ssid);
    }

    #[cfg(feature = "espidf")]
    fn platform_status(&mut self) -> LinkStatus {
        // Up means associated and holding an IP lease.
        if self.driver.is_up().unwrap_or(false) {
            LinkStatus::Up
        } else {
            LinkStatus::Down
        }
    }

    #[cfg(not(feature = "espidf"))]
    fn platform_status(&mut self) -> LinkStatus {
        if self.sim_connected {
            return LinkStatus::Up;
        }
        if self.sim_polls_remaining > 0 {
            self.sim_polls_remaining -= 1;
            if self.sim_polls_remaining == 0 {
                self.sim_connected = true;
                info!("WiFi(sim): link up");
                return LinkStatus::Up;
            }
        }
        LinkStatus::Down
    }
}

impl NetworkPort for WifiLink {
    fn request_connect(&mut self) {
        info!("WiFi: connecting to '{}'", self.ssid);
        self.platform_request_connect();
    }

    fn status(&mut self) -> LinkStatus {
        self.platform_status()
    }
}

fn truncate_into<const N: usize>(s: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
