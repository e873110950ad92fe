//! Hardware adapters behind the port traits.
//!
//! Each adapter has two renditions selected by the `espidf` cargo
//! feature: the real ESP-IDF-backed implementation, and a host-side
//! simulation used for development builds and integration harnesses.
//! The sensor bus drivers ([`bme680`], [`bh1750`]) are generic over
//! `embedded-hal` and need no gating.

pub mod bh1750;
pub mod bme680;
pub mod motion_gpio;
pub mod mqtt;
pub mod time;
pub mod updater;
pub mod wifi;
