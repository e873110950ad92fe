//! Typed errors for the node's collaborators.
//!
//! All variants are `Copy` so they can be passed through the loop driver
//! without allocation. Connectivity and sensor failures are recovered
//! locally (retry or skip); nothing here is fatal.

use core::fmt;

/// Errors from the sensor driver collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The device did not respond at init time.
    NotPresent,
    /// A measurement could not be obtained.
    ReadFailed,
    /// The underlying bus transaction failed.
    Bus,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPresent => write!(f, "sensor not present"),
            Self::ReadFailed => write!(f, "read failed"),
            Self::Bus => write!(f, "bus error"),
        }
    }
}

/// Errors from the messaging transport collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommsError {
    /// The broker refused or the connection attempt timed out.
    ConnectFailed,
    /// Operation requires an established connection.
    NotConnected,
}

impl fmt::Display for CommsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConnectFailed => write!(f, "connect failed"),
            Self::NotConnected => write!(f, "not connected"),
        }
    }
}
