//! Display text for the calculator.
//!
//! The display is the single piece of text the UI renders. It is always a
//! decimal literal in progress (digits, at most one decimal point) or the
//! error marker, and it is never empty.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Text shown when an evaluation ends in a division by zero.
pub const ERROR_MARKER: &str = "Error";

/// The number currently shown on the calculator display.
///
/// `DisplayValue` is an immutable value; entry methods return a new display
/// rather than mutating in place.
///
/// # Example
///
/// ```rust
/// use tally::core::DisplayValue;
///
/// let display = DisplayValue::zero();
/// assert_eq!(display.as_str(), "0");
///
/// let display = DisplayValue::starting_with('7').push('.').push('5');
/// assert_eq!(display.as_str(), "7.5");
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct DisplayValue(String);

impl DisplayValue {
    /// The initial display, `"0"`.
    pub fn zero() -> Self {
        Self("0".to_string())
    }

    /// The error marker display.
    pub fn error() -> Self {
        Self(ERROR_MARKER.to_string())
    }

    /// Display a single entered character, replacing whatever was shown.
    pub fn starting_with(c: char) -> Self {
        Self(c.to_string())
    }

    /// Render an evaluation result.
    ///
    /// Uses the host numeric type's native string conversion, so `8.0`
    /// renders as `"8"` and representation artifacts such as
    /// `0.1 + 0.2` are shown as-is rather than rounded.
    pub fn from_result(value: f64) -> Self {
        Self(format_number(value))
    }

    /// The display text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the pristine `"0"` display.
    pub fn is_zero(&self) -> bool {
        self.0 == "0"
    }

    /// True when the display shows the error marker.
    pub fn is_error(&self) -> bool {
        self.0 == ERROR_MARKER
    }

    /// Append an entered character, returning the new display.
    ///
    /// A second decimal point is ignored, keeping the display a valid
    /// literal in progress.
    pub fn push(&self, c: char) -> Self {
        if c == '.' && self.0.contains('.') {
            return self.clone();
        }
        let mut text = self.0.clone();
        text.push(c);
        Self(text)
    }

    /// Parse the display as an operand.
    ///
    /// Returns `None` for the error marker or any text that is not a
    /// number. Digit-only construction keeps the display parseable, so a
    /// `None` here means the display holds a non-numeric result.
    pub fn parse(&self) -> Option<f64> {
        if self.is_error() {
            return None;
        }
        parse_number(&self.0)
    }
}

impl Default for DisplayValue {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse a decimal string as an operand value.
pub fn parse_number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok()
}

/// Convert a numeric result to its canonical decimal string.
///
/// `f64`'s `Display` produces the shortest string that round-trips, which
/// matches the display rules: no trailing `.0`, no padding zeros.
pub fn format_number(value: f64) -> String {
    value.to_string()
}
