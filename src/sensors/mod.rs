//! Publishing channels for the attached sensors.
//!
//! A channel owns the cadence bookkeeping and topic strings for one
//! sensor and turns raw driver readings into messaging payloads. The
//! drivers themselves live behind port traits in [`crate::app::ports`];
//! the hardware implementations are under [`crate::adapters`].

pub mod environment;
pub mod light;

pub use environment::EnvChannel;
pub use light::LightChannel;
