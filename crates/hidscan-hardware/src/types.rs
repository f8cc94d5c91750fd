//! Common types shared across scanner device implementations.
//!
//! This module defines device metadata and the connection state machine
//! tracked by the [`ConnectionManager`](crate::ConnectionManager).

use hidscan_core::HealthStatus;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Generic device information.
///
/// Describes the device behind a connector, mainly for log output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Device name (e.g., "hidraw", "Mock HID Scanner").
    pub name: String,

    /// Device model identifier.
    pub model: String,

    /// Optional firmware version string.
    pub firmware_version: Option<String>,
}

impl DeviceInfo {
    /// Create a new DeviceInfo with required fields.
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            firmware_version: None,
        }
    }

    /// Set the firmware version.
    pub fn with_firmware_version(mut self, firmware_version: impl Into<String>) -> Self {
        self.firmware_version = Some(firmware_version.into());
        self
    }
}

/// Lifecycle of the scanner device handle.
///
/// # Valid Transitions
///
/// ```text
/// Disconnected ──> Connecting ──> Connected
///                   ^   │  ^          │
///                   │   v  │          │ read failure
///                  Failed(reason) <───┘
///
/// any state ──close()──> Disconnected
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    /// No handle; the initial state and the state after an explicit close.
    Disconnected,

    /// An open attempt is in progress.
    Connecting,

    /// The handle is open and being read.
    Connected,

    /// The last open or read failed; waiting to retry.
    Failed(String),
}

impl ConnectionState {
    /// Health status derived from this state.
    ///
    /// `Disconnected` has no health of its own: it is only reached before the
    /// first open or after an explicit stop.
    #[must_use]
    pub fn health(&self) -> Option<HealthStatus> {
        match self {
            Self::Disconnected => None,
            Self::Connecting | Self::Failed(_) => Some(HealthStatus::Warning),
            Self::Connected => Some(HealthStatus::Ok),
        }
    }

    /// Whether the handle is open.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => write!(f, "Disconnected"),
            Self::Connecting => write!(f, "Connecting"),
            Self::Connected => write!(f, "Connected"),
            Self::Failed(reason) => write!(f, "Failed ({reason})"),
        }
    }
}
