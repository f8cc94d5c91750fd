//! Incremental decoder turning a keycode byte stream into barcode text.
//!
//! The decoder consumes one byte at a time and accumulates keycodes until the
//! delimiter arrives, at which point the buffered keycodes are decoded into a
//! string and the buffer is cleared.
//!
//! # Byte Classes
//!
//! ```text
//! ┌────────────┐ 0x28       ┌──────────────────┐
//! │ Buffering  │───────────>│ decode + flush   │──> Some(text)
//! └────────────┘            └──────────────────┘
//!    │  ^  │ 0x02
//!    │  │  └─────> shift pending for the next appended keycode
//!    │  │ 0x00
//!    │  └──────── ignored (report padding)
//!    │ other
//!    └──────────> appended with the current shift state
//! ```
//!
//! The shift state is captured per keycode at arrival time, so a modifier
//! affects exactly the next appended keycode no matter how many keycodes
//! follow before the delimiter.
//!
//! # Usage
//!
//! ```
//! use hidscan_protocol::FrameDecoder;
//!
//! let mut decoder = FrameDecoder::new();
//!
//! // shift + 'l', shift + 's', '0', '1', delimiter
//! for byte in [0x02, 0x0F, 0x02, 0x16, 0x27, 0x1E] {
//!     assert_eq!(decoder.feed(byte), None);
//! }
//! assert_eq!(decoder.feed(0x28), Some("LS01".to_string()));
//! ```

use hidscan_core::ShiftState;
use hidscan_core::constants::{DELIMITER_KEYCODE, MAX_FRAME_KEYCODES, MODIFIER_KEYCODE, NO_KEY};
use tracing::{trace, warn};

use crate::keymap::KeycodeTable;

/// Initial frame buffer capacity; fits typical 1D barcodes without reallocation.
const INITIAL_FRAME_CAPACITY: usize = 64;

/// A keycode together with the shift state in effect when it arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BufferedKey {
    keycode: u8,
    shift: ShiftState,
}

/// Stateful keycode frame decoder.
///
/// Pure and synchronous: performs no I/O and cannot fail. Unmapped keycodes
/// degrade to missing characters.
#[derive(Debug, Clone)]
pub struct FrameDecoder {
    /// Character mapping used when a frame is flushed.
    table: &'static KeycodeTable,

    /// Keycodes received since the last delimiter or reset.
    buffer: Vec<BufferedKey>,

    /// Shift state to record for the next appended keycode.
    pending_shift: ShiftState,
}

impl FrameDecoder {
    /// Create a decoder using the US keyboard table.
    pub fn new() -> Self {
        Self::with_table(KeycodeTable::us_keyboard())
    }

    /// Create a decoder using a custom keycode table.
    pub fn with_table(table: &'static KeycodeTable) -> Self {
        Self {
            table,
            buffer: Vec::with_capacity(INITIAL_FRAME_CAPACITY),
            pending_shift: ShiftState::Regular,
        }
    }

    /// Feed one byte from the device.
    ///
    /// Returns `Some(text)` when `byte` is the delimiter, `None` otherwise.
    /// The returned text may be empty: a lone delimiter, or a frame made only
    /// of unmapped keycodes, still completes a frame.
    ///
    /// # Example
    ///
    /// ```
    /// use hidscan_protocol::FrameDecoder;
    ///
    /// let mut decoder = FrameDecoder::new();
    /// assert_eq!(decoder.feed(0x28), Some(String::new()));
    /// ```
    pub fn feed(&mut self, byte: u8) -> Option<String> {
        match byte {
            DELIMITER_KEYCODE => Some(self.flush()),
            MODIFIER_KEYCODE => {
                self.pending_shift = ShiftState::Shifted;
                None
            }
            NO_KEY => None,
            keycode => {
                self.append(keycode);
                None
            }
        }
    }

    /// Feed a slice of bytes, collecting every frame completed along the way.
    ///
    /// # Example
    ///
    /// ```
    /// use hidscan_protocol::FrameDecoder;
    ///
    /// let mut decoder = FrameDecoder::new();
    /// let frames = decoder.feed_all(&[0x04, 0x28, 0x05, 0x28, 0x06]);
    ///
    /// assert_eq!(frames, vec!["a".to_string(), "b".to_string()]);
    /// assert_eq!(decoder.buffered_len(), 1);
    /// ```
    pub fn feed_all(&mut self, bytes: &[u8]) -> Vec<String> {
        bytes.iter().filter_map(|&byte| self.feed(byte)).collect()
    }

    /// Drop any partial frame and pending shift.
    ///
    /// Called when the device connection is re-established; keycodes from
    /// before a disconnect never complete a frame.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.pending_shift = ShiftState::Regular;
    }

    /// Number of keycodes waiting for a delimiter.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether the next appended keycode will use the shifted mapping.
    pub fn is_shift_pending(&self) -> bool {
        self.pending_shift.is_shifted()
    }

    fn append(&mut self, keycode: u8) {
        if self.buffer.len() >= MAX_FRAME_KEYCODES {
            warn!(
                discarded = self.buffer.len(),
                "Frame exceeded {} keycodes without a delimiter, discarding", MAX_FRAME_KEYCODES
            );
            self.buffer.clear();
        }

        self.buffer.push(BufferedKey {
            keycode,
            shift: self.pending_shift,
        });
        self.pending_shift = ShiftState::Regular;
    }

    fn flush(&mut self) -> String {
        let text: String = self
            .buffer
            .iter()
            .filter_map(|key| self.table.lookup(key.shift, key.keycode))
            .collect();

        trace!(keycodes = self.buffer.len(), chars = text.len(), "Frame flushed");

        self.reset();
        text
    }
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_new_decoder() {
        let decoder = FrameDecoder::new();
        assert_eq!(decoder.buffered_len(), 0);
        assert!(!decoder.is_shift_pending());
    }

    #[test]
    fn test_simple_frame() {
        let mut decoder = FrameDecoder::new();
        assert_eq!(decoder.feed(0x04), None);
        assert_eq!(decoder.feed(0x05), None);
        assert_eq!(decoder.feed(0x06), None);
        assert_eq!(decoder.feed(DELIMITER_KEYCODE), Some("abc".to_string()));
        assert_eq!(decoder.buffered_len(), 0);
    }

    #[test]
    fn test_modifier_is_consumed_not_buffered() {
        let mut decoder = FrameDecoder::new();
        decoder.feed(MODIFIER_KEYCODE);

        assert_eq!(decoder.buffered_len(), 0);
        assert!(decoder.is_shift_pending());
    }

    #[test]
    fn test_modifier_affects_only_next_keycode() {
        let mut decoder = FrameDecoder::new();
        let frames = decoder.feed_all(&[MODIFIER_KEYCODE, 0x04, 0x04, 0x04, DELIMITER_KEYCODE]);
        assert_eq!(frames, vec!["Aaa".to_string()]);
    }

    #[test]
    fn test_no_key_does_not_consume_shift() {
        let mut decoder = FrameDecoder::new();
        let frames = decoder.feed_all(&[
            MODIFIER_KEYCODE,
            NO_KEY,
            NO_KEY,
            NO_KEY,
            0x0F,
            DELIMITER_KEYCODE,
        ]);
        assert_eq!(frames, vec!["L".to_string()]);
    }

    #[test]
    fn test_no_key_is_not_buffered() {
        let mut decoder = FrameDecoder::new();
        decoder.feed_all(&[NO_KEY, 0x04, NO_KEY]);
        assert_eq!(decoder.buffered_len(), 1);
    }

    #[test]
    fn test_repeated_modifier_is_single_shift() {
        let mut decoder = FrameDecoder::new();
        let frames = decoder.feed_all(&[MODIFIER_KEYCODE, MODIFIER_KEYCODE, 0x16, 0x16, 0x28]);
        assert_eq!(frames, vec!["Ss".to_string()]);
    }

    #[test]
    fn test_unmapped_keycode_consumes_shift() {
        let mut decoder = FrameDecoder::new();
        let frames = decoder.feed_all(&[MODIFIER_KEYCODE, 0xF8, 0x04, DELIMITER_KEYCODE]);
        assert_eq!(frames, vec!["a".to_string()]);
    }

    #[rstest]
    #[case::lone_delimiter(&[0x28])]
    #[case::modifier_only(&[0x02, 0x28])]
    #[case::padding_only(&[0x00, 0x00, 0x00, 0x28])]
    #[case::modifier_and_padding(&[0x02, 0x00, 0x02, 0x00, 0x28])]
    #[case::unmapped_only(&[0xF8, 0x28])]
    #[case::several_unmapped(&[0x29, 0x3A, 0xFF, 0x28])]
    fn test_empty_frames(#[case] bytes: &[u8]) {
        let mut decoder = FrameDecoder::new();
        assert_eq!(decoder.feed_all(bytes), vec![String::new()]);
    }

    #[test]
    fn test_decoder_continues_after_empty_frame() {
        let mut decoder = FrameDecoder::new();
        let frames = decoder.feed_all(&[0xF8, 0x28, 0x1E, 0x1F, 0x28]);
        assert_eq!(frames, vec![String::new(), "12".to_string()]);
    }

    #[test]
    fn test_delimiter_resets_pending_shift() {
        let mut decoder = FrameDecoder::new();
        decoder.feed(MODIFIER_KEYCODE);
        assert_eq!(decoder.feed(DELIMITER_KEYCODE), Some(String::new()));
        assert!(!decoder.is_shift_pending());

        decoder.feed(0x04);
        assert_eq!(decoder.feed(DELIMITER_KEYCODE), Some("a".to_string()));
    }

    #[test]
    fn test_reset_discards_partial_frame() {
        let mut decoder = FrameDecoder::new();
        decoder.feed_all(&[0x04, 0x05, MODIFIER_KEYCODE]);
        decoder.reset();

        assert_eq!(decoder.buffered_len(), 0);
        assert!(!decoder.is_shift_pending());
        assert_eq!(decoder.feed_all(&[0x06, 0x28]), vec!["c".to_string()]);
    }

    #[test]
    fn test_frame_limit_discards_partial_frame() {
        let mut decoder = FrameDecoder::new();
        for _ in 0..MAX_FRAME_KEYCODES {
            decoder.feed(0x04);
        }
        assert_eq!(decoder.buffered_len(), MAX_FRAME_KEYCODES);

        // Next keycode starts over
        decoder.feed(0x05);
        assert_eq!(decoder.buffered_len(), 1);
        assert_eq!(decoder.feed(DELIMITER_KEYCODE), Some("b".to_string()));
    }

    #[test]
    fn test_custom_table() {
        static TABLE: KeycodeTable = KeycodeTable::empty().with_mapping(0x10, 'm', 'M');

        let mut decoder = FrameDecoder::with_table(&TABLE);
        let frames = decoder.feed_all(&[0x04, 0x02, 0x10, 0x10, 0x28]);
        assert_eq!(frames, vec!["Mm".to_string()]);
    }
}
