//! Two-tier transport recovery.
//!
//! The network link and the messaging session must both be up before any
//! other activity in the loop runs. Recovery is deliberately blocking:
//! nothing the node does is meaningful without connectivity, so the loop
//! driver parks here until both tiers are restored. Retries are unbounded
//! and are not surfaced as errors.

use core::fmt::Write as _;

use log::{info, warn};

use crate::app::ports::{ClockPort, LinkStatus, MessagingPort, NetworkPort};
use crate::clock::Ticks;
use crate::config::{NodeConfig, Topic};

/// Messaging client identifier: version string plus a 4-hex-digit suffix.
pub type ClientId = heapless::String<48>;

pub struct TransportRecovery {
    startup_topic: Topic,
    version: &'static str,
    net_poll_delay_ms: u32,
    msg_retry_delay_ms: u32,
    /// xorshift32 state for the client-id suffix. A fresh suffix per
    /// attempt avoids colliding with a previous session the broker has
    /// not yet timed out.
    rng: u32,
}

impl TransportRecovery {
    pub fn new(config: &NodeConfig, version: &'static str) -> Self {
        Self {
            startup_topic: config.topic("/startup"),
            version,
            net_poll_delay_ms: config.net_poll_delay_ms,
            msg_retry_delay_ms: config.msg_retry_delay_ms,
            rng: 0x2545_F491,
        }
    }

    /// Block until both tiers are up. Cheap no-op when they already are.
    ///
    /// The messaging tier is only ever attempted once the network tier
    /// reports `Up`. On every successful messaging (re)connect the
    /// one-shot startup announcement is published.
    pub fn ensure_up(
        &mut self,
        net: &mut impl NetworkPort,
        msg: &mut impl MessagingPort,
        clock: &mut impl ClockPort,
    ) {
        if net.status() == LinkStatus::Down {
            info!("network link down, reconnecting");
            net.request_connect();
            while net.status() == LinkStatus::Down {
                clock.delay_ms(self.net_poll_delay_ms);
            }
            info!("network link up");
        }

        while !msg.is_connected() {
            let client_id = self.next_client_id(clock.now());
            info!("messaging connect as '{}'", client_id);
            match msg.connect(&client_id) {
                Ok(()) => {
                    msg.publish(&self.startup_topic, self.version);
                    info!("messaging link up");
                }
                Err(e) => {
                    warn!(
                        "messaging connect failed ({}), retry in {} ms",
                        e, self.msg_retry_delay_ms
                    );
                    clock.delay_ms(self.msg_retry_delay_ms);
                }
            }
        }
    }

    fn next_client_id(&mut self, entropy: Ticks) -> ClientId {
        // xorshift32, folded with the clock so two boots close together
        // still diverge after the first reconnect.
        let mut x = self.rng ^ entropy ^ 0x9E37_79B9;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.rng = x;

        let mut id = ClientId::new();
        let _ = write!(id, "{}-{:04x}", self.version, x & 0xFFFF);
        id
    }
}
