//! Scanner configuration.
//!
//! The host runtime supplies configuration through the [`ConfigSource`]
//! trait. [`ScannerConfig`] is the stock implementation; it can be built in
//! code or deserialized from a JSON document where every key is optional:
//!
//! ```
//! use hidscan_core::{ConfigSource, EmptyFramePolicy, ScannerConfig};
//! use std::time::Duration;
//!
//! let config = ScannerConfig::from_json_str(r#"{ "device": "/dev/hidraw3" }"#).unwrap();
//! assert_eq!(config.device(), "/dev/hidraw3");
//! assert_eq!(config.reconnect_interval(), Duration::from_secs(10));
//! assert_eq!(config.empty_frame_policy(), EmptyFramePolicy::Emit);
//! ```

use crate::constants::{
    DEFAULT_DEVICE_PATH, DEFAULT_RECONNECT_INTERVAL_SECS, MIN_RECONNECT_INTERVAL_SECS,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What to do with a frame that decoded to an empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyFramePolicy {
    /// Report the frame as a `BarcodeEvent` with `barcode: None`.
    #[default]
    Emit,

    /// Drop the frame silently.
    Suppress,
}

/// Read-only view of the configuration values the scanner needs.
pub trait ConfigSource {
    /// Path to the raw HID device node.
    fn device(&self) -> &str;

    /// Delay between failed open attempts, in whole seconds.
    fn reconnect_interval_secs(&self) -> u64;

    /// Delay between failed open attempts.
    fn reconnect_interval(&self) -> Duration {
        Duration::from_secs(self.reconnect_interval_secs())
    }

    /// Handling of frames that decode to an empty string.
    fn empty_frame_policy(&self) -> EmptyFramePolicy {
        EmptyFramePolicy::Emit
    }

    /// Check that the values are usable.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if the device path is blank or the
    /// reconnect interval is below one second.
    fn validate(&self) -> Result<()> {
        if self.device().trim().is_empty() {
            return Err(Error::invalid_config("device", "device path must not be empty"));
        }

        let secs = self.reconnect_interval_secs();
        if secs < MIN_RECONNECT_INTERVAL_SECS {
            return Err(Error::invalid_config(
                "reconnect_interval",
                format!("must be at least {MIN_RECONNECT_INTERVAL_SECS}s, got {secs}s"),
            ));
        }

        Ok(())
    }
}

/// Scanner configuration with defaults for every field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScannerConfig {
    /// Raw HID device node (default `/dev/hidraw0`).
    pub device: String,

    /// Seconds to wait between failed open attempts (default 10).
    pub reconnect_interval: u64,

    /// Empty frame handling (default `emit`).
    pub empty_frames: EmptyFramePolicy,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            device: DEFAULT_DEVICE_PATH.to_string(),
            reconnect_interval: DEFAULT_RECONNECT_INTERVAL_SECS,
            empty_frames: EmptyFramePolicy::default(),
        }
    }
}

impl ScannerConfig {
    /// Configuration for a specific device node, other fields defaulted.
    pub fn new(device: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            ..Self::default()
        }
    }

    /// Set the reconnect interval in seconds.
    #[must_use]
    pub fn with_reconnect_interval(mut self, secs: u64) -> Self {
        self.reconnect_interval = secs;
        self
    }

    /// Set the empty frame policy.
    #[must_use]
    pub fn with_empty_frames(mut self, policy: EmptyFramePolicy) -> Self {
        self.empty_frames = policy;
        self
    }

    /// Parse and validate a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigParse` for malformed JSON or unknown keys and
    /// `Error::InvalidConfig` for values rejected by [`ConfigSource::validate`].
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

impl ConfigSource for ScannerConfig {
    fn device(&self) -> &str {
        &self.device
    }

    fn reconnect_interval_secs(&self) -> u64 {
        self.reconnect_interval
    }

    fn empty_frame_policy(&self) -> EmptyFramePolicy {
        self.empty_frames
    }
}
