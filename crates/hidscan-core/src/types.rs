use serde::{Deserialize, Serialize};
use std::fmt;

/// Which half of the keycode table a keycode is looked up in.
///
/// Set to [`ShiftState::Shifted`] by the modifier keycode for exactly one
/// following keycode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftState {
    /// Unmodified mapping.
    #[default]
    Regular,

    /// Shifted mapping (upper case letters, symbols).
    Shifted,
}

impl ShiftState {
    /// Whether this is the shifted state.
    #[must_use]
    pub fn is_shifted(self) -> bool {
        matches!(self, Self::Shifted)
    }
}

impl From<bool> for ShiftState {
    fn from(shifted: bool) -> Self {
        if shifted { Self::Shifted } else { Self::Regular }
    }
}

/// One completed frame read from the scanner.
///
/// `barcode` is `None` when every keycode in the frame was unmapped,
/// modifier-only or padding, i.e. the frame decoded to an empty string.
///
/// # Examples
///
/// ```
/// use hidscan_core::BarcodeEvent;
///
/// let event = BarcodeEvent::from_decoded("LS01".to_string());
/// assert_eq!(event.barcode(), Some("LS01"));
///
/// let empty = BarcodeEvent::from_decoded(String::new());
/// assert!(empty.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BarcodeEvent {
    pub barcode: Option<String>,
}

impl BarcodeEvent {
    /// Build an event from decoded frame text, mapping `""` to `None`.
    #[must_use]
    pub fn from_decoded(text: String) -> Self {
        let barcode = if text.is_empty() { None } else { Some(text) };
        Self { barcode }
    }

    /// The decoded barcode text, if any.
    #[must_use]
    pub fn barcode(&self) -> Option<&str> {
        self.barcode.as_deref()
    }

    /// Whether the frame decoded to nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.barcode.is_none()
    }
}

/// Externally visible health of the scanner connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    /// Device is open and being read.
    Ok,

    /// Device is unavailable; the service is (re)connecting.
    Warning,
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HealthStatus::Ok => write!(f, "ok"),
            HealthStatus::Warning => write!(f, "warning"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(false, ShiftState::Regular)]
    #[case(true, ShiftState::Shifted)]
    fn test_shift_state_from_bool(#[case] input: bool, #[case] expected: ShiftState) {
        assert_eq!(ShiftState::from(input), expected);
        assert_eq!(expected.is_shifted(), input);
    }

    #[test]
    fn test_shift_state_default_is_regular() {
        assert_eq!(ShiftState::default(), ShiftState::Regular);
    }

    #[rstest]
    #[case("LS01", Some("LS01"))]
    #[case("a", Some("a"))]
    #[case("", None)]
    fn test_barcode_event_from_decoded(#[case] text: &str, #[case] expected: Option<&str>) {
        let event = BarcodeEvent::from_decoded(text.to_string());
        assert_eq!(event.barcode(), expected);
        assert_eq!(event.is_empty(), expected.is_none());
    }

    #[test]
    fn test_barcode_event_serialization() {
        let event = BarcodeEvent::from_decoded("LS01".to_string());
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"barcode":"LS01"}"#);

        let empty = BarcodeEvent::from_decoded(String::new());
        let json = serde_json::to_string(&empty).unwrap();
        assert_eq!(json, r#"{"barcode":null}"#);
    }

    #[test]
    fn test_health_status_display() {
        assert_eq!(HealthStatus::Ok.to_string(), "ok");
        assert_eq!(HealthStatus::Warning.to_string(), "warning");
    }
}
