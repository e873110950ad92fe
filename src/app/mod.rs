//! Application layer: the loop driver and the ports it drives.

pub mod ports;
pub mod service;

pub use service::{NodeIo, NodeService};
