//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises the loop driver
//! against mock adapters. All tests run on the host with no real
//! hardware required.

mod mock_io;
mod transport_flow_tests;
