//! Unattended firmware update adapter.
//!
//! Implements [`UpdatePort`] against a plain HTTP update server. The
//! node sends its running version in an `x-firmware-version` request
//! header; the server answers `304 Not Modified` when that version is
//! current, or `200` with a raw image body. A fetched image is streamed
//! into the inactive OTA slot, marked bootable, and the device restarts
//! immediately. Any failure leaves the running image untouched; the
//! check simply happens again at the next interval.

use log::info;
#[cfg(feature = "espidf")]
use log::warn;

use crate::app::ports::{UpdateOutcome, UpdatePort};

pub struct HttpUpdater {
    #[cfg(not(feature = "espidf"))]
    sim_outcome: UpdateOutcome,
    #[cfg(not(feature = "espidf"))]
    sim_checks: Vec<String>,
}

impl HttpUpdater {
    #[cfg(feature = "espidf")]
    pub fn new() -> Self {
        Self {}
    }

    #[cfg(not(feature = "espidf"))]
    pub fn new() -> Self {
        Self {
            sim_outcome: UpdateOutcome::NoUpdate,
            sim_checks: Vec::new(),
        }
    }

    /// Simulation hook: outcome reported for subsequent checks.
    #[cfg(not(feature = "espidf"))]
    pub fn sim_set_outcome(&mut self, outcome: UpdateOutcome) {
        self.sim_outcome = outcome;
    }

    /// Simulation record of the URLs checked.
    #[cfg(not(feature = "espidf"))]
    pub fn sim_checks(&self) -> &[String] {
        &self.sim_checks
    }

    // ── Platform-specific ─────────────────────────────────────

    #[cfg(feature = "espidf")]
    fn platform_check(&mut self, url: &str, version: &str) -> UpdateOutcome {
        match self.fetch_and_apply(url, version) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("update: {:#}", e);
                UpdateOutcome::Failed
            }
        }
    }

    #[cfg(feature = "espidf")]
    fn fetch_and_apply(&mut self, url: &str, version: &str) -> anyhow::Result<UpdateOutcome> {
        use embedded_svc::http::client::Client;
        use embedded_svc::http::Method;
        use embedded_svc::io::Read as _;
        use esp_idf_svc::http::client::{Configuration, EspHttpConnection};

        let connection = EspHttpConnection::new(&Configuration::default())?;
        let mut client = Client::wrap(connection);

        let headers = [("x-firmware-version", version)];
        let request = client.request(Method::Get, url, &headers)?;
        let mut response = request.submit()?;

        match response.status() {
            304 => return Ok(UpdateOutcome::NoUpdate),
            200 => {}
            status => anyhow::bail!("update server returned status {}", status),
        }

        info!("update: new image offered, flashing");
        let mut ota = esp_ota::OtaUpdate::begin()?;
        let mut buf = [0u8; 4096];
        let mut total = 0usize;
        loop {
            let n = response.read(&mut buf)?;
            if n == 0 {
                break;
            }
            ota.write(&buf[..n])?;
            total += n;
        }
        if total == 0 {
            anyhow::bail!("update server sent an empty image");
        }

        let mut completed = ota.finalize()?;
        completed.set_as_boot_partition()?;
        info!("update: {} bytes flashed, restarting", total);
        completed.restart();
    }

    #[cfg(not(feature = "espidf"))]
    fn platform_check(&mut self, url: &str, _version: &str) -> UpdateOutcome {
        self.sim_checks.push(url.to_string());
        info!("update(sim): checked {} -> {:?}", url, self.sim_outcome);
        self.sim_outcome
    }
}

impl Default for HttpUpdater {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdatePort for HttpUpdater {
    fn check_and_apply(
        &mut self,
        host: &str,
        port: u16,
        path: &str,
        version: &str,
    ) -> UpdateOutcome {
        let url = format!("http://{}:{}{}", host, port, path);
        self.platform_check(&url, version)
    }
}
