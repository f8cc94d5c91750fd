//! USB HID keycode to character lookup.
//!
//! Barcode scanners in keyboard mode report HID Usage IDs from the
//! Keyboard/Keypad page (0x07). A usage identifies a physical key position,
//! not a character; the character depends on the layout and on whether shift
//! was held. [`KeycodeTable`] resolves `(ShiftState, keycode)` to a character
//! for the US layout used by virtually every scanner's factory setting.
//!
//! | Key          | Usage | Regular | Shifted |
//! |--------------|-------|---------|---------|
//! | Letter L     | 0x0F  | `l`     | `L`     |
//! | Digit 1      | 0x1E  | `1`     | `!`     |
//! | Digit 0      | 0x27  | `0`     | `)`     |
//! | Enter        | 0x28  | (none)  | (none)  |
//! | Minus        | 0x2D  | `-`     | `_`     |
//!
//! Reference: USB HID Usage Tables 1.3, Section 10.
//!
//! # Examples
//!
//! ```
//! use hidscan_core::ShiftState;
//! use hidscan_protocol::KeycodeTable;
//!
//! let table = KeycodeTable::us_keyboard();
//! assert_eq!(table.lookup(ShiftState::Regular, 0x0F), Some('l'));
//! assert_eq!(table.lookup(ShiftState::Shifted, 0x0F), Some('L'));
//! assert_eq!(table.lookup(ShiftState::Regular, 0xF8), None);
//! ```

use hidscan_core::ShiftState;

/// Number of distinct keycode values.
const KEYCODE_SPACE: usize = 256;

/// Letters `a`-`z` occupy usages 0x04-0x1D.
const FIRST_LETTER_USAGE: usize = 0x04;

/// Digits `1`-`9` occupy usages 0x1E-0x26; `0` follows at 0x27.
const FIRST_DIGIT_USAGE: usize = 0x1E;

/// Shifted symbols on the digit row, in usage order (`1` through `0`).
const DIGIT_ROW_SHIFTED: [char; 10] = ['!', '@', '#', '$', '%', '^', '&', '*', '(', ')'];

/// Non-alphanumeric keys on the main block: (usage, regular, shifted).
const MAIN_BLOCK_SYMBOLS: [(u8, char, char); 15] = [
    (0x2B, '\t', '\t'),
    (0x2C, ' ', ' '),
    (0x2D, '-', '_'),
    (0x2E, '=', '+'),
    (0x2F, '[', '{'),
    (0x30, ']', '}'),
    (0x31, '\\', '|'),
    (0x32, '#', '~'), // non-US hash
    (0x33, ';', ':'),
    (0x34, '\'', '"'),
    (0x35, '`', '~'),
    (0x36, ',', '<'),
    (0x37, '.', '>'),
    (0x38, '/', '?'),
    (0x63, '.', '.'), // keypad dot
];

/// Keypad operators. Shift has no effect on these.
const KEYPAD_OPERATORS: [(u8, char); 4] = [(0x54, '/'), (0x55, '*'), (0x56, '-'), (0x57, '+')];

/// Keypad `1`-`9` occupy usages 0x59-0x61; keypad `0` is 0x62.
const FIRST_KEYPAD_DIGIT_USAGE: usize = 0x59;

static US_KEYBOARD: KeycodeTable = KeycodeTable::us_layout();

/// Two parallel keycode maps selected by [`ShiftState`].
///
/// Lookups are total over `0..=255`: every keycode either maps to a character
/// or to `None`. The reserved keycodes (no key, modifier, delimiter) are never
/// mapped in the stock layout.
#[derive(Clone, PartialEq, Eq)]
pub struct KeycodeTable {
    regular: [Option<char>; KEYCODE_SPACE],
    shifted: [Option<char>; KEYCODE_SPACE],
}

impl KeycodeTable {
    /// A table with no mappings at all.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            regular: [None; KEYCODE_SPACE],
            shifted: [None; KEYCODE_SPACE],
        }
    }

    /// The process-wide US keyboard table.
    #[must_use]
    pub fn us_keyboard() -> &'static KeycodeTable {
        &US_KEYBOARD
    }

    /// Return a copy of this table with `keycode` mapped to the given characters.
    ///
    /// Usable in `const` context to build custom layouts as statics:
    ///
    /// ```
    /// use hidscan_core::ShiftState;
    /// use hidscan_protocol::KeycodeTable;
    ///
    /// static CUSTOM: KeycodeTable = KeycodeTable::empty().with_mapping(0x04, 'x', 'X');
    ///
    /// assert_eq!(CUSTOM.lookup(ShiftState::Shifted, 0x04), Some('X'));
    /// assert_eq!(CUSTOM.lookup(ShiftState::Regular, 0x05), None);
    /// ```
    #[must_use]
    pub const fn with_mapping(mut self, keycode: u8, regular: char, shifted: char) -> Self {
        self.regular[keycode as usize] = Some(regular);
        self.shifted[keycode as usize] = Some(shifted);
        self
    }

    /// Look up the character for `keycode` under the given shift state.
    #[must_use]
    pub fn lookup(&self, shift: ShiftState, keycode: u8) -> Option<char> {
        self.layer(shift)[usize::from(keycode)]
    }

    /// Whether `keycode` produces a character under either shift state.
    #[must_use]
    pub fn is_mapped(&self, keycode: u8) -> bool {
        let index = usize::from(keycode);
        self.regular[index].is_some() || self.shifted[index].is_some()
    }

    /// Number of keycodes with at least one mapping.
    #[must_use]
    pub fn mapped_count(&self) -> usize {
        (0..=u8::MAX).filter(|&keycode| self.is_mapped(keycode)).count()
    }

    fn layer(&self, shift: ShiftState) -> &[Option<char>; KEYCODE_SPACE] {
        match shift {
            ShiftState::Regular => &self.regular,
            ShiftState::Shifted => &self.shifted,
        }
    }

    const fn us_layout() -> Self {
        let mut table = Self::empty();

        let mut i = 0;
        while i < 26 {
            table.regular[FIRST_LETTER_USAGE + i] = Some((b'a' + i as u8) as char);
            table.shifted[FIRST_LETTER_USAGE + i] = Some((b'A' + i as u8) as char);
            i += 1;
        }

        i = 0;
        while i < 10 {
            let digit = if i == 9 { '0' } else { (b'1' + i as u8) as char };
            table.regular[FIRST_DIGIT_USAGE + i] = Some(digit);
            table.shifted[FIRST_DIGIT_USAGE + i] = Some(DIGIT_ROW_SHIFTED[i]);

            table.regular[FIRST_KEYPAD_DIGIT_USAGE + i] = Some(digit);
            table.shifted[FIRST_KEYPAD_DIGIT_USAGE + i] = Some(digit);
            i += 1;
        }

        i = 0;
        while i < MAIN_BLOCK_SYMBOLS.len() {
            let (usage, regular, shifted) = MAIN_BLOCK_SYMBOLS[i];
            table = table.with_mapping(usage, regular, shifted);
            i += 1;
        }

        i = 0;
        while i < KEYPAD_OPERATORS.len() {
            let (usage, symbol) = KEYPAD_OPERATORS[i];
            table = table.with_mapping(usage, symbol, symbol);
            i += 1;
        }

        table
    }
}

impl Default for KeycodeTable {
    fn default() -> Self {
        US_KEYBOARD.clone()
    }
}

impl std::fmt::Debug for KeycodeTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeycodeTable")
            .field("mapped", &self.mapped_count())
            .finish()
    }
}
