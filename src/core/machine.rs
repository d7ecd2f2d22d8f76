//! The pure transition function over calculator events.
//!
//! `apply` consumes one event and returns either the next state or an
//! [`EvaluationRequest`] for the evaluator to run. Results are folded back
//! with [`apply_success`] / [`apply_failure`], keeping the core free of
//! I/O: the caller decides whether evaluation happens in-process or across
//! the network.

use super::display::DisplayValue;
use super::event::{Event, Operator};
use super::state::{CalculatorState, Phase};
use crate::eval::EvalError;
use serde::{Deserialize, Serialize};

/// A completed operand pair and operator, ready for evaluation.
///
/// Constructed only on an equals press when both operands and the operator
/// are known.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct EvaluationRequest {
    /// The first operand, captured when the operator was chosen.
    pub a: f64,
    /// The second operand, parsed from the display on equals.
    pub b: f64,
    /// The pending operator.
    pub operator: Operator,
}

/// Outcome of applying one event.
#[derive(Clone, PartialEq, Debug)]
pub enum Step {
    /// The event was handled (or was a no-op); here is the next state.
    Continue(CalculatorState),

    /// Equals completed an operand pair. The state is not advanced until
    /// the evaluation result is folded back.
    Evaluate {
        state: CalculatorState,
        request: EvaluationRequest,
    },
}

impl Step {
    /// The state carried by this step, whichever variant it is.
    pub fn state(&self) -> &CalculatorState {
        match self {
            Self::Continue(state) => state,
            Self::Evaluate { state, .. } => state,
        }
    }

    /// Consume the step, keeping only the carried state.
    pub fn into_state(self) -> CalculatorState {
        match self {
            Self::Continue(state) => state,
            Self::Evaluate { state, .. } => state,
        }
    }
}

/// Apply one keypad event to the state, returning the next step.
///
/// This is a pure transform: the input state is never mutated, and the
/// same state and event always produce the same step.
///
/// # Example
///
/// ```rust
/// use tally::core::{apply, apply_success, CalculatorState, Event, Operator, Step};
///
/// let state = CalculatorState::new();
/// let state = apply(&state, &Event::Digit('5')).into_state();
/// let state = apply(&state, &Event::Operator(Operator::Add)).into_state();
/// let state = apply(&state, &Event::Digit('3')).into_state();
///
/// match apply(&state, &Event::Equals) {
///     Step::Evaluate { state, request } => {
///         assert_eq!(request.a, 5.0);
///         assert_eq!(request.b, 3.0);
///         let state = apply_success(&state, 8.0);
///         assert_eq!(state.display().as_str(), "8");
///     }
///     Step::Continue(_) => unreachable!(),
/// }
/// ```
pub fn apply(state: &CalculatorState, event: &Event) -> Step {
    match event {
        Event::Digit(c) => Step::Continue(on_digit(state, *c)),
        Event::Operator(op) => Step::Continue(on_operator(state, *op)),
        Event::Equals => on_equals(state),
        Event::Clear => Step::Continue(CalculatorState::new()),
    }
}

/// Fold a successful evaluation back into the state.
///
/// The display shows the formatted result and all operand state is
/// cleared, returning the session to a point where the result can be
/// chained into the next computation.
pub fn apply_success(_state: &CalculatorState, value: f64) -> CalculatorState {
    CalculatorState {
        display: DisplayValue::from_result(value),
        first_operand: None,
        pending_operator: None,
        awaiting_second_operand: false,
    }
}

/// Fold a failed evaluation back into the state.
///
/// A division by zero puts the error marker on the display and discards
/// the operands. Every other failure leaves the state untouched so the
/// pending computation can be retried; surfacing the message is the
/// notification channel's job, not the display's.
pub fn apply_failure(state: &CalculatorState, error: &EvalError) -> CalculatorState {
    match error {
        EvalError::DivisionByZero => CalculatorState {
            display: DisplayValue::error(),
            first_operand: None,
            pending_operator: None,
            awaiting_second_operand: false,
        },
        EvalError::InvalidOperand | EvalError::Transport(_) | EvalError::Server(_) => state.clone(),
    }
}

fn on_digit(state: &CalculatorState, c: char) -> CalculatorState {
    if !c.is_ascii_digit() && c != '.' {
        return state.clone();
    }

    // Digit entry after an error starts a fresh computation.
    if state.phase() == Phase::Error {
        return on_digit(&CalculatorState::new(), c);
    }

    let mut next = state.clone();
    if next.display.is_zero() && c != '.' {
        next.display = DisplayValue::starting_with(c);
    } else if next.awaiting_second_operand {
        next.display = DisplayValue::starting_with(c);
    } else {
        next.display = next.display.push(c);
    }
    next.awaiting_second_operand = false;
    next
}

fn on_operator(state: &CalculatorState, op: Operator) -> CalculatorState {
    match state.phase() {
        // Nothing to operate on yet, and "Error" is not an operand.
        Phase::Idle | Phase::Error => state.clone(),

        // Operator pressed twice: swap the pending operator, keep operands.
        Phase::OperatorPending => {
            let mut next = state.clone();
            next.pending_operator = Some(op);
            next
        }

        Phase::EnteringFirst | Phase::EnteringSecond => match state.display.parse() {
            Some(value) => CalculatorState {
                display: DisplayValue::zero(),
                first_operand: Some(value),
                pending_operator: Some(op),
                awaiting_second_operand: true,
            },
            None => state.clone(),
        },
    }
}

fn on_equals(state: &CalculatorState) -> Step {
    let (Some(a), Some(operator)) = (state.first_operand, state.pending_operator) else {
        return Step::Continue(state.clone());
    };
    let Some(b) = state.display.parse() else {
        return Step::Continue(state.clone());
    };
    Step::Evaluate {
        state: state.clone(),
        request: EvaluationRequest { a, b, operator },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press_all(events: &[Event]) -> CalculatorState {
        let mut state = CalculatorState::new();
        for event in events {
            state = apply(&state, event).into_state();
        }
        state
    }

    #[test]
    fn first_digit_replaces_leading_zero() {
        let state = press_all(&[Event::Digit('7')]);
        assert_eq!(state.display().as_str(), "7");
        assert_eq!(state.phase(), Phase::EnteringFirst);
    }

    #[test]
    fn decimal_point_appends_to_leading_zero() {
        let state = press_all(&[Event::Digit('.'), Event::Digit('5')]);
        assert_eq!(state.display().as_str(), "0.5");
    }

    #[test]
    fn digits_concatenate() {
        let state = press_all(&[Event::Digit('1'), Event::Digit('2'), Event::Digit('3')]);
        assert_eq!(state.display().as_str(), "123");
    }

    #[test]
    fn non_digit_characters_are_ignored() {
        let state = press_all(&[Event::Digit('5'), Event::Digit('x')]);
        assert_eq!(state.display().as_str(), "5");
    }

    #[test]
    fn operator_captures_first_operand_and_resets_display() {
        let state = press_all(&[Event::Digit('5'), Event::Operator(Operator::Add)]);
        assert_eq!(state.first_operand(), Some(5.0));
        assert_eq!(state.pending_operator(), Some(Operator::Add));
        assert!(state.awaiting_second_operand());
        assert_eq!(state.display().as_str(), "0");
        assert_eq!(state.phase(), Phase::OperatorPending);
        assert!(state.invariant_holds());
    }

    #[test]
    fn operator_in_idle_is_a_no_op() {
        let state = press_all(&[Event::Operator(Operator::Multiply)]);
        assert_eq!(state, CalculatorState::new());
    }

    #[test]
    fn second_operator_press_swaps_pending_operator() {
        let state = press_all(&[
            Event::Digit('6'),
            Event::Operator(Operator::Add),
            Event::Operator(Operator::Subtract),
        ]);
        assert_eq!(state.first_operand(), Some(6.0));
        assert_eq!(state.pending_operator(), Some(Operator::Subtract));
        assert!(state.awaiting_second_operand());
    }

    #[test]
    fn digit_after_operator_starts_second_operand() {
        let state = press_all(&[
            Event::Digit('5'),
            Event::Operator(Operator::Add),
            Event::Digit('3'),
        ]);
        assert_eq!(state.display().as_str(), "3");
        assert!(!state.awaiting_second_operand());
        assert_eq!(state.phase(), Phase::EnteringSecond);
    }

    #[test]
    fn equals_without_pending_operator_is_a_no_op() {
        let typed = press_all(&[Event::Digit('9')]);
        match apply(&typed, &Event::Equals) {
            Step::Continue(state) => assert_eq!(state, typed),
            Step::Evaluate { .. } => panic!("no pending computation to evaluate"),
        }
    }

    #[test]
    fn equals_yields_evaluation_request() {
        let state = press_all(&[
            Event::Digit('4'),
            Event::Operator(Operator::Divide),
            Event::Digit('2'),
        ]);
        match apply(&state, &Event::Equals) {
            Step::Evaluate { request, .. } => {
                assert_eq!(request.a, 4.0);
                assert_eq!(request.b, 2.0);
                assert_eq!(request.operator, Operator::Divide);
            }
            Step::Continue(_) => panic!("expected an evaluation request"),
        }
    }

    #[test]
    fn equals_does_not_advance_state_by_itself() {
        let state = press_all(&[
            Event::Digit('5'),
            Event::Operator(Operator::Add),
            Event::Digit('3'),
        ]);
        let step = apply(&state, &Event::Equals);
        assert_eq!(step.state(), &state);
    }

    #[test]
    fn success_clears_operands_and_shows_result() {
        let state = press_all(&[
            Event::Digit('5'),
            Event::Operator(Operator::Add),
            Event::Digit('3'),
        ]);
        let state = apply_success(&state, 8.0);
        assert_eq!(state.display().as_str(), "8");
        assert!(state.first_operand().is_none());
        assert!(state.pending_operator().is_none());
        assert!(!state.awaiting_second_operand());
        assert!(state.invariant_holds());
    }

    #[test]
    fn result_can_be_chained_into_next_computation() {
        let state = press_all(&[
            Event::Digit('5'),
            Event::Operator(Operator::Add),
            Event::Digit('3'),
        ]);
        let state = apply_success(&state, 8.0);
        let state = apply(&state, &Event::Operator(Operator::Multiply)).into_state();
        assert_eq!(state.first_operand(), Some(8.0));
        assert_eq!(state.pending_operator(), Some(Operator::Multiply));
    }

    #[test]
    fn division_by_zero_sets_error_marker_and_clears_operands() {
        let state = press_all(&[
            Event::Digit('4'),
            Event::Operator(Operator::Divide),
            Event::Digit('0'),
        ]);
        let state = apply_failure(&state, &EvalError::DivisionByZero);
        assert!(state.display().is_error());
        assert_eq!(state.phase(), Phase::Error);
        assert!(state.first_operand().is_none());
        assert!(state.pending_operator().is_none());
    }

    #[test]
    fn transport_failure_leaves_pending_computation_intact() {
        let state = press_all(&[
            Event::Digit('5'),
            Event::Operator(Operator::Add),
            Event::Digit('3'),
        ]);
        let failed = apply_failure(&state, &EvalError::Transport("connection refused".into()));
        assert_eq!(failed, state);
    }

    #[test]
    fn digit_after_error_behaves_like_clear_then_digit() {
        let mut state = press_all(&[
            Event::Digit('4'),
            Event::Operator(Operator::Divide),
            Event::Digit('0'),
        ]);
        state = apply_failure(&state, &EvalError::DivisionByZero);
        let state = apply(&state, &Event::Digit('7')).into_state();
        assert_eq!(state.display().as_str(), "7");
        assert_eq!(state.phase(), Phase::EnteringFirst);
        assert!(state.first_operand().is_none());
    }

    #[test]
    fn operator_after_error_is_a_no_op() {
        let mut state = press_all(&[
            Event::Digit('1'),
            Event::Operator(Operator::Divide),
            Event::Digit('0'),
        ]);
        state = apply_failure(&state, &EvalError::DivisionByZero);
        let next = apply(&state, &Event::Operator(Operator::Add)).into_state();
        assert_eq!(next, state);
    }

    #[test]
    fn clear_resets_from_any_state() {
        let mid_entry = press_all(&[
            Event::Digit('9'),
            Event::Operator(Operator::Subtract),
            Event::Digit('2'),
        ]);
        let cleared = apply(&mid_entry, &Event::Clear).into_state();
        assert_eq!(cleared, CalculatorState::new());

        let mut errored = press_all(&[
            Event::Digit('1'),
            Event::Operator(Operator::Divide),
            Event::Digit('0'),
        ]);
        errored = apply_failure(&errored, &EvalError::DivisionByZero);
        let cleared = apply(&errored, &Event::Clear).into_state();
        assert_eq!(cleared, CalculatorState::new());
    }
}
