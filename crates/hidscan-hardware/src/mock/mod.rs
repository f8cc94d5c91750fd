//! Mock device implementations for testing and development.
//!
//! This module provides simulated device implementations that can be controlled
//! programmatically without requiring physical hardware.

pub mod scanner;

pub use scanner::{MockHid, MockHidHandle, MockHidReader};
