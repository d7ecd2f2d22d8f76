//! Calculator state and its derived phase.

use super::display::DisplayValue;
use super::event::Operator;
use serde::{Deserialize, Serialize};

/// The full state of one calculator session.
///
/// Created once at session start and replaced by every applied event; it is
/// never persisted and dies with the session. Invariant: `pending_operator`
/// is present iff `first_operand` is present.
///
/// # Example
///
/// ```rust
/// use tally::core::{CalculatorState, Phase};
///
/// let state = CalculatorState::new();
/// assert_eq!(state.display().as_str(), "0");
/// assert_eq!(state.phase(), Phase::Idle);
/// assert!(state.first_operand().is_none());
/// ```
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct CalculatorState {
    pub(crate) display: DisplayValue,
    pub(crate) first_operand: Option<f64>,
    pub(crate) pending_operator: Option<Operator>,
    pub(crate) awaiting_second_operand: bool,
}

impl CalculatorState {
    /// The initial state: display `"0"`, no operands, nothing pending.
    pub fn new() -> Self {
        Self {
            display: DisplayValue::zero(),
            first_operand: None,
            pending_operator: None,
            awaiting_second_operand: false,
        }
    }

    /// The text the UI should render.
    pub fn display(&self) -> &DisplayValue {
        &self.display
    }

    /// The captured first operand, if an operator has been chosen.
    pub fn first_operand(&self) -> Option<f64> {
        self.first_operand
    }

    /// The operator awaiting a second operand, if any.
    pub fn pending_operator(&self) -> Option<Operator> {
        self.pending_operator
    }

    /// True between choosing an operator and typing the first digit of the
    /// second operand.
    pub fn awaiting_second_operand(&self) -> bool {
        self.awaiting_second_operand
    }

    /// Check the state invariant: an operator is pending iff a first
    /// operand has been captured, and the awaiting flag is only set while
    /// an operator is pending.
    pub fn invariant_holds(&self) -> bool {
        let paired = self.pending_operator.is_some() == self.first_operand.is_some();
        let awaiting_needs_operator = !self.awaiting_second_operand || self.pending_operator.is_some();
        paired && awaiting_needs_operator
    }

    /// The position in the state machine, derived from the state fields.
    pub fn phase(&self) -> Phase {
        if self.display.is_error() {
            Phase::Error
        } else if self.awaiting_second_operand {
            Phase::OperatorPending
        } else if self.pending_operator.is_some() {
            Phase::EnteringSecond
        } else if self.display.is_zero() {
            Phase::Idle
        } else {
            Phase::EnteringFirst
        }
    }
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::new()
    }
}

/// Named positions in the input state machine.
///
/// The phase is derived, not stored; it exists for diagnostics, logging,
/// and the transition rules that depend on where the session stands.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Phase {
    /// Start, after clear, or a pristine `"0"` display.
    Idle,
    /// Typing the first operand.
    EnteringFirst,
    /// An operator was chosen; no digit of the second operand yet.
    OperatorPending,
    /// Typing the second operand.
    EnteringSecond,
    /// A division by zero left the error marker on the display.
    Error,
}

impl Phase {
    /// The phase's name for display and logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::EnteringFirst => "EnteringFirst",
            Self::OperatorPending => "OperatorPending",
            Self::EnteringSecond => "EnteringSecond",
            Self::Error => "Error",
        }
    }

    /// Check if this is the error phase.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }
}
