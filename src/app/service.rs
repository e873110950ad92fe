//! The loop driver.
//!
//! A single cooperative pass gives every activity one bounded turn:
//!
//! ```text
//!   ensure transport up ─▶ pump messaging ─▶ status ─▶ update check
//!     ─▶ motion ─▶ environment ─▶ light ─▶ idle delay
//! ```
//!
//! Activities never block on each other; the only blocking point is
//! transport recovery at the head of the pass. Each pass samples the
//! clock once so every gate in that pass sees the same `now`.

use crate::app::ports::{
    ClockPort, EnvSensorPort, LightSensorPort, MessagingPort, MotionPort, NetworkPort, UpdatePort,
};
use crate::config::{NodeConfig, BUILD_VERSION};
use crate::motion::MotionDebouncer;
use crate::reporting::{StatusReporter, UpdateScheduler};
use crate::sensors::{EnvChannel, LightChannel};
use crate::transport::TransportRecovery;

/// The loop driver's collaborators, one per port.
pub struct NodeIo<N, M, E, L, P, U, C> {
    pub net: N,
    pub msg: M,
    pub env: E,
    pub light: L,
    pub motion: P,
    pub update: U,
    pub clock: C,
}

/// Owns the per-activity bookkeeping and sequences one pass at a time.
pub struct NodeService {
    transport: TransportRecovery,
    status: StatusReporter,
    update: UpdateScheduler,
    motion: MotionDebouncer,
    env: EnvChannel,
    light: LightChannel,
    idle_delay_ms: u32,
    started: bool,
}

impl NodeService {
    pub fn new(config: &NodeConfig) -> Self {
        Self {
            transport: TransportRecovery::new(config, BUILD_VERSION),
            status: StatusReporter::new(config),
            update: UpdateScheduler::new(config),
            motion: MotionDebouncer::new(config),
            env: EnvChannel::new(config),
            light: LightChannel::new(config),
            idle_delay_ms: config.idle_delay_ms,
            started: false,
        }
    }

    /// One-time bring-up: transport first, then sensor init. Sensor init
    /// happens after transport so a missing sensor can be announced on
    /// the error topic.
    pub fn start<N, M, E, L, P, U, C>(&mut self, io: &mut NodeIo<N, M, E, L, P, U, C>)
    where
        N: NetworkPort,
        M: MessagingPort,
        E: EnvSensorPort,
        L: LightSensorPort,
        P: MotionPort,
        U: UpdatePort,
        C: ClockPort,
    {
        self.transport.ensure_up(&mut io.net, &mut io.msg, &mut io.clock);
        self.env.init(&mut io.env, &mut io.msg);
        self.light.init(&mut io.light, &mut io.msg);
        self.started = true;
    }

    /// One cooperative pass. Calls [`start`](Self::start) lazily on the
    /// first pass so test harnesses can drive `service` directly.
    pub fn service<N, M, E, L, P, U, C>(&mut self, io: &mut NodeIo<N, M, E, L, P, U, C>)
    where
        N: NetworkPort,
        M: MessagingPort,
        E: EnvSensorPort,
        L: LightSensorPort,
        P: MotionPort,
        U: UpdatePort,
        C: ClockPort,
    {
        if !self.started {
            self.start(io);
        }
        self.transport.ensure_up(&mut io.net, &mut io.msg, &mut io.clock);
        io.msg.pump();

        let now = io.clock.now();
        self.status.service(now, &mut io.msg);
        self.update.service(now, &mut io.update);
        self.motion.service(now, &mut io.motion, &mut io.msg);
        self.env.service(now, &mut io.env, &mut io.msg);
        self.light.service(now, &mut io.light, &mut io.msg);

        io.clock.delay_ms(self.idle_delay_ms);
    }

    /// Run forever. The device has no shutdown path short of power loss
    /// or the update adapter rebooting it.
    pub fn run<N, M, E, L, P, U, C>(&mut self, mut io: NodeIo<N, M, E, L, P, U, C>) -> !
    where
        N: NetworkPort,
        M: MessagingPort,
        E: EnvSensorPort,
        L: LightSensorPort,
        P: MotionPort,
        U: UpdatePort,
        C: ClockPort,
    {
        self.start(&mut io);
        loop {
            self.service(&mut io);
        }
    }
}
