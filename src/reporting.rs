//! Periodic status heartbeat and the firmware update cadence.

use log::{info, warn};
use serde::Serialize;

use crate::app::ports::{MessagingPort, UpdateOutcome, UpdatePort};
use crate::clock::{PollTimer, Ticks};
use crate::config::{NodeConfig, Topic, BUILD_VERSION};

/// Heartbeat body. Field order is part of the published format.
#[derive(Serialize)]
struct StatusPayload {
    uptime: Ticks,
    version: &'static str,
}

/// Publishes a JSON heartbeat carrying uptime and firmware version.
pub struct StatusReporter {
    timer: PollTimer,
    period: Ticks,
    topic: Topic,
}

impl StatusReporter {
    pub fn new(config: &NodeConfig) -> Self {
        Self {
            timer: PollTimer::new(),
            period: config.status_period,
            topic: config.topic("/status"),
        }
    }

    pub fn service(&mut self, now: Ticks, msg: &mut impl MessagingPort) {
        if !self.timer.is_due(now, self.period) {
            return;
        }
        self.timer.mark(now);

        let payload = StatusPayload {
            uptime: now,
            version: BUILD_VERSION,
        };
        match serde_json::to_string(&payload) {
            Ok(body) => msg.publish(&self.topic, &body),
            Err(e) => warn!("status serialisation failed: {}", e),
        }
    }
}

/// Runs the unattended firmware update check on its own cadence.
///
/// On real hardware a successful update reboots inside the adapter, so
/// `Updated` only comes back in simulation. Failures are logged and
/// retried at the next interval; they never disturb the rest of the loop.
pub struct UpdateScheduler {
    timer: PollTimer,
    period: Ticks,
    host: &'static str,
    port: u16,
    path: &'static str,
}

impl UpdateScheduler {
    pub fn new(config: &NodeConfig) -> Self {
        Self {
            timer: PollTimer::new(),
            period: config.update_check_period,
            host: config.update_host,
            port: config.update_port,
            path: config.update_path,
        }
    }

    pub fn service(&mut self, now: Ticks, update: &mut impl UpdatePort) {
        if !self.timer.is_due(now, self.period) {
            return;
        }
        self.timer.mark(now);

        match update.check_and_apply(self.host, self.port, self.path, BUILD_VERSION) {
            UpdateOutcome::Updated => info!("firmware updated"),
            UpdateOutcome::NoUpdate => info!("firmware up to date"),
            UpdateOutcome::Failed => warn!("firmware update check failed"),
        }
    }
}
