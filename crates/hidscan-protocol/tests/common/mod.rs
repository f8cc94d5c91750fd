//! Common test fixtures for decoder integration tests.
//!
//! Captures of real scanner output, as read byte by byte from a `hidraw`
//! node. Each capture is a sequence of 8-byte keyboard reports (modifier
//! byte, reserved byte, six keycode slots) with the trailing delimiter.

#![allow(dead_code)]

/// Raw capture of the barcode `LS01` (67 bytes, delimiter included).
pub const LS01_CAPTURE: &[u8] = &[
    0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x00, 0x0f, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x00, 0x16, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x27, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1e, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x28,
];

/// Build a report-shaped byte sequence for `text` followed by the delimiter.
///
/// Supports letters, digits and space. Upper case letters are preceded by a
/// report carrying the shift modifier, the way scanners emit them.
pub fn encode_barcode(text: &str) -> Vec<u8> {
    let mut bytes = Vec::new();

    for c in text.chars() {
        let (shifted, keycode) = match c {
            'a'..='z' => (false, 0x04 + (c as u8 - b'a')),
            'A'..='Z' => (true, 0x04 + (c as u8 - b'A')),
            '1'..='9' => (false, 0x1E + (c as u8 - b'1')),
            '0' => (false, 0x27),
            ' ' => (false, 0x2C),
            other => panic!("unsupported character in fixture: {other:?}"),
        };

        if shifted {
            bytes.extend_from_slice(&[0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
            bytes.extend_from_slice(&[0x02, 0x00, keycode, 0x00, 0x00, 0x00, 0x00, 0x00]);
        } else {
            bytes.extend_from_slice(&[0x00, 0x00, keycode, 0x00, 0x00, 0x00, 0x00, 0x00]);
        }
        bytes.extend_from_slice(&[0x00; 8]);
    }

    bytes.push(0x28);
    bytes
}
