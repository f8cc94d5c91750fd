//! Core constants for HID barcode scanner decoding.
//!
//! USB barcode scanners in keyboard mode deliver their data as HID keyboard
//! usage IDs (page 0x07). When read from a raw `hidraw` node, each scanned
//! barcode arrives as a run of keycode bytes terminated by the Enter usage.
//!
//! ```text
//! 02 00 0F 00 ... 02 00 16 00 ... 27 00 ... 1E 00 ... 28
//! ^^    ^^        ^^    ^^        ^^        ^^        ^^
//! |     'L'       |     'S'       '0'       '1'       delimiter
//! shift           shift
//! ```
//!
//! # Reserved Keycodes
//!
//! | Keycode | Name | Meaning |
//! |---------|------|---------|
//! | `0x00` | [`NO_KEY`] | Report padding, carries no key |
//! | `0x02` | [`MODIFIER_KEYCODE`] | Next keycode uses the shifted mapping |
//! | `0x28` | [`DELIMITER_KEYCODE`] | End of barcode (Enter) |
//!
//! # Usage
//!
//! ```
//! use hidscan_core::constants::*;
//!
//! assert_eq!(DELIMITER_KEYCODE, 40);
//! assert_eq!(DEFAULT_DEVICE_PATH, "/dev/hidraw0");
//! assert_eq!(DEFAULT_RECONNECT_INTERVAL_SECS, 10);
//! ```

// ============================================================================
// Reserved Keycodes
// ============================================================================

/// "No key" usage. Appears as padding between keycodes in every report.
///
/// Never produces a character and never consumes a pending shift.
pub const NO_KEY: u8 = 0x00;

/// Shift modifier marker.
///
/// The keycode that follows uses the shifted character mapping. The effect is
/// one-shot: only the very next appended keycode is affected.
pub const MODIFIER_KEYCODE: u8 = 0x02;

/// End-of-barcode delimiter (Enter, HID usage 0x28).
///
/// # Examples
///
/// ```
/// use hidscan_core::constants::DELIMITER_KEYCODE;
///
/// let frame = [0x0F, 0x16, DELIMITER_KEYCODE];
/// assert_eq!(frame.iter().position(|&b| b == DELIMITER_KEYCODE), Some(2));
/// ```
pub const DELIMITER_KEYCODE: u8 = 0x28; // carriage return

// ============================================================================
// Frame Limits
// ============================================================================

/// Maximum number of keycodes buffered for a single frame.
///
/// Real barcodes are far shorter. A device that never sends a delimiter would
/// otherwise grow the buffer without bound; when this limit is reached the
/// partial frame is discarded.
pub const MAX_FRAME_KEYCODES: usize = 4096;

// ============================================================================
// Configuration Defaults
// ============================================================================

/// Default raw HID device node.
pub const DEFAULT_DEVICE_PATH: &str = "/dev/hidraw0";

/// Default delay between failed open attempts, in seconds.
pub const DEFAULT_RECONNECT_INTERVAL_SECS: u64 = 10;

/// Minimum accepted reconnect interval, in seconds.
///
/// A zero interval would turn the retry loop into a busy loop against a
/// missing device.
pub const MIN_RECONNECT_INTERVAL_SECS: u64 = 1;
