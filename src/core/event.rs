//! Keypad events and arithmetic operators.
//!
//! Every user action is one variant of a closed [`Event`] enum, so the
//! transition function can be matched exhaustively and tested without any
//! UI wiring.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four binary arithmetic operators.
///
/// Serializes to its wire name (`"add"`, `"subtract"`, `"multiply"`,
/// `"divide"`), which is also what the remote endpoint expects.
///
/// # Example
///
/// ```rust
/// use tally::core::Operator;
///
/// assert_eq!(Operator::from_symbol('+'), Some(Operator::Add));
/// assert_eq!(Operator::Divide.name(), "divide");
/// assert_eq!(Operator::Multiply.symbol(), '*');
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// The operator's wire name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
        }
    }

    /// The keypad symbol for this operator.
    pub fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    /// Look up an operator by keypad symbol.
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            _ => None,
        }
    }

    /// Look up an operator by wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "add" => Some(Self::Add),
            "subtract" => Some(Self::Subtract),
            "multiply" => Some(Self::Multiply),
            "divide" => Some(Self::Divide),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A discrete user action fed into the state machine.
///
/// `Digit` covers the characters `0`–`9` and `.`, which share one entry
/// path; anything else inside `Digit` is ignored by the machine.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub enum Event {
    /// A digit or decimal-point key.
    Digit(char),
    /// An operator key.
    Operator(Operator),
    /// The equals key.
    Equals,
    /// The clear key.
    Clear,
}
