//! Mock adapters for integration tests.
//!
//! Every port interaction is appended to a shared trace so tests can
//! assert on counts and ordering across the whole pass. Knobs are
//! shared `Rc<Cell<_>>` handles, letting a test change sensor results
//! or drop a link between passes while the loop driver owns the mocks.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use orwell_node::app::ports::{
    ClockPort, EnvReading, EnvSensorPort, LightSensorPort, LinkStatus, MessagingPort, MotionPort,
    NetworkPort, UpdateOutcome, UpdatePort,
};
use orwell_node::app::NodeIo;
use orwell_node::clock::Ticks;
use orwell_node::{CommsError, SensorError};

// ── Trace ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum TraceEvent {
    NetConnectRequested,
    NetUp,
    MsgConnectAttempt(String),
    Publish(String, String),
    EnvBegin,
    EnvRead,
    LightBegin,
    LightRead,
    UpdateCheck(String, u16, String, String),
}

pub type Trace = Rc<RefCell<Vec<TraceEvent>>>;

// ── Mock adapters ─────────────────────────────────────────────

pub struct MockNet {
    trace: Trace,
    polls_until_up: Rc<Cell<u32>>,
    was_up: bool,
}

impl NetworkPort for MockNet {
    fn request_connect(&mut self) {
        self.trace.borrow_mut().push(TraceEvent::NetConnectRequested);
    }

    fn status(&mut self) -> LinkStatus {
        let remaining = self.polls_until_up.get();
        if remaining > 0 {
            self.polls_until_up.set(remaining - 1);
            self.was_up = false;
            return LinkStatus::Down;
        }
        if !self.was_up {
            self.was_up = true;
            self.trace.borrow_mut().push(TraceEvent::NetUp);
        }
        LinkStatus::Up
    }
}

pub struct MockMsg {
    trace: Trace,
    connected: Rc<Cell<bool>>,
    fail_connects: Rc<Cell<u32>>,
}

impl MessagingPort for MockMsg {
    fn connect(&mut self, client_id: &str) -> Result<(), CommsError> {
        self.trace
            .borrow_mut()
            .push(TraceEvent::MsgConnectAttempt(client_id.to_string()));
        let failures = self.fail_connects.get();
        if failures > 0 {
            self.fail_connects.set(failures - 1);
            return Err(CommsError::ConnectFailed);
        }
        self.connected.set(true);
        Ok(())
    }

    fn is_connected(&mut self) -> bool {
        self.connected.get()
    }

    fn publish(&mut self, topic: &str, payload: &str) {
        self.trace
            .borrow_mut()
            .push(TraceEvent::Publish(topic.to_string(), payload.to_string()));
    }

    fn pump(&mut self) {}
}

pub struct MockEnv {
    trace: Trace,
    begin_result: Rc<Cell<Result<(), SensorError>>>,
    read_result: Rc<Cell<Result<EnvReading, SensorError>>>,
}

impl EnvSensorPort for MockEnv {
    fn begin(&mut self) -> Result<(), SensorError> {
        self.trace.borrow_mut().push(TraceEvent::EnvBegin);
        self.begin_result.get()
    }

    fn read(&mut self) -> Result<EnvReading, SensorError> {
        self.trace.borrow_mut().push(TraceEvent::EnvRead);
        self.read_result.get()
    }
}

pub struct MockLight {
    trace: Trace,
    begin_result: Rc<Cell<Result<(), SensorError>>>,
    read_result: Rc<Cell<Result<u32, SensorError>>>,
}

impl LightSensorPort for MockLight {
    fn begin(&mut self) -> Result<(), SensorError> {
        self.trace.borrow_mut().push(TraceEvent::LightBegin);
        self.begin_result.get()
    }

    fn read(&mut self) -> Result<u32, SensorError> {
        self.trace.borrow_mut().push(TraceEvent::LightRead);
        self.read_result.get()
    }
}

pub struct MockMotion {
    level: Rc<Cell<bool>>,
}

impl MotionPort for MockMotion {
    fn level(&mut self) -> bool {
        self.level.get()
    }
}

pub struct MockUpdate {
    trace: Trace,
    outcome: Rc<Cell<UpdateOutcome>>,
}

impl UpdatePort for MockUpdate {
    fn check_and_apply(
        &mut self,
        host: &str,
        port: u16,
        path: &str,
        version: &str,
    ) -> UpdateOutcome {
        self.trace.borrow_mut().push(TraceEvent::UpdateCheck(
            host.to_string(),
            port,
            path.to_string(),
            version.to_string(),
        ));
        self.outcome.get()
    }
}

/// Manual clock: `delay_ms` advances simulated time, nothing sleeps.
pub struct MockClock {
    now: Rc<Cell<Ticks>>,
}

impl ClockPort for MockClock {
    fn now(&mut self) -> Ticks {
        self.now.get()
    }

    fn delay_ms(&mut self, ms: u32) {
        let now = self.now.get();
        self.now.set(now.wrapping_add(ms));
    }
}

// ── Harness ───────────────────────────────────────────────────

pub type MockNodeIo = NodeIo<MockNet, MockMsg, MockEnv, MockLight, MockMotion, MockUpdate, MockClock>;

/// All the mocks plus the shared handles that steer them.
pub struct MockIo {
    pub io: MockNodeIo,
    pub trace: Trace,
    pub now: Rc<Cell<Ticks>>,
    pub net_polls_until_up: Rc<Cell<u32>>,
    pub msg_connected: Rc<Cell<bool>>,
    pub msg_fail_connects: Rc<Cell<u32>>,
    pub env_begin: Rc<Cell<Result<(), SensorError>>>,
    pub env_read: Rc<Cell<Result<EnvReading, SensorError>>>,
    pub light_begin: Rc<Cell<Result<(), SensorError>>>,
    pub light_read: Rc<Cell<Result<u32, SensorError>>>,
    pub motion_level: Rc<Cell<bool>>,
    pub update_outcome: Rc<Cell<UpdateOutcome>>,
}

pub fn nominal_reading() -> EnvReading {
    EnvReading {
        temperature_c: 21.5,
        pressure_pa: 101_325.0,
        humidity_pct: 44.0,
        gas_ohms: 120_000.0,
    }
}

#[allow(dead_code)]
impl MockIo {
    /// Healthy defaults: link up immediately, broker accepts, sensors
    /// present and returning nominal values, no motion.
    pub fn new() -> Self {
        let trace: Trace = Rc::new(RefCell::new(Vec::new()));
        let now = Rc::new(Cell::new(0));
        let net_polls_until_up = Rc::new(Cell::new(0));
        let msg_connected = Rc::new(Cell::new(false));
        let msg_fail_connects = Rc::new(Cell::new(0));
        let env_begin = Rc::new(Cell::new(Ok(())));
        let env_read = Rc::new(Cell::new(Ok(nominal_reading())));
        let light_begin = Rc::new(Cell::new(Ok(())));
        let light_read = Rc::new(Cell::new(Ok(400u32)));
        let motion_level = Rc::new(Cell::new(false));
        let update_outcome = Rc::new(Cell::new(UpdateOutcome::NoUpdate));

        let io = NodeIo {
            net: MockNet {
                trace: Rc::clone(&trace),
                polls_until_up: Rc::clone(&net_polls_until_up),
                was_up: false,
            },
            msg: MockMsg {
                trace: Rc::clone(&trace),
                connected: Rc::clone(&msg_connected),
                fail_connects: Rc::clone(&msg_fail_connects),
            },
            env: MockEnv {
                trace: Rc::clone(&trace),
                begin_result: Rc::clone(&env_begin),
                read_result: Rc::clone(&env_read),
            },
            light: MockLight {
                trace: Rc::clone(&trace),
                begin_result: Rc::clone(&light_begin),
                read_result: Rc::clone(&light_read),
            },
            motion: MockMotion {
                level: Rc::clone(&motion_level),
            },
            update: MockUpdate {
                trace: Rc::clone(&trace),
                outcome: Rc::clone(&update_outcome),
            },
            clock: MockClock {
                now: Rc::clone(&now),
            },
        };

        Self {
            io,
            trace,
            now,
            net_polls_until_up,
            msg_connected,
            msg_fail_connects,
            env_begin,
            env_read,
            light_begin,
            light_read,
            motion_level,
            update_outcome,
        }
    }

    /// Every publish seen so far, in order.
    pub fn published(&self) -> Vec<(String, String)> {
        self.trace
            .borrow()
            .iter()
            .filter_map(|e| match e {
                TraceEvent::Publish(t, p) => Some((t.clone(), p.clone())),
                _ => None,
            })
            .collect()
    }

    /// Payloads published to one topic, in order.
    pub fn published_to(&self, topic: &str) -> Vec<String> {
        self.published()
            .into_iter()
            .filter(|(t, _)| t == topic)
            .map(|(_, p)| p)
            .collect()
    }

    pub fn count(&self, wanted: &TraceEvent) -> usize {
        self.trace.borrow().iter().filter(|e| *e == wanted).count()
    }
}

impl Default for MockIo {
    fn default() -> Self {
        Self::new()
    }
}
