//! Orwell node firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by the `espidf`
//! feature within each module; host builds run against simulations.

#![deny(unused_must_use)]

pub mod app;
pub mod clock;
pub mod config;
pub mod motion;
pub mod reporting;
pub mod sensors;
pub mod transport;

mod error;
pub mod pins;

pub mod adapters;

pub use error::{CommsError, SensorError};
