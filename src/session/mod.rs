//! The imperative shell around the pure core.
//!
//! A [`Session`] owns one [`CalculatorState`] and the single-flight
//! discipline for asynchronous evaluation: at most one evaluation is
//! outstanding at a time, equals presses while busy are ignored, clear
//! always works and cancels, and a response that arrives after a cancel is
//! dropped rather than applied.

use crate::core::{apply, apply_failure, apply_success, CalculatorState, Event, Step};
use crate::eval::{EvalError, Evaluator};
use tracing::{debug, trace, warn};
use uuid::Uuid;

/// Identifies one in-flight evaluation.
///
/// A resolution is only applied if its token still matches the session's
/// current in-flight token; anything else is stale and dropped.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct EvalToken(Uuid);

impl EvalToken {
    fn fresh() -> Self {
        Self(Uuid::new_v4())
    }
}

/// An evaluation the caller must run and resolve.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct PendingEvaluation {
    pub token: EvalToken,
    pub request: crate::core::EvaluationRequest,
}

/// Outcome of pressing a key.
#[derive(Clone, PartialEq, Debug)]
pub enum Pressed {
    /// The state advanced (or the event was a benign no-op); re-render.
    Updated,

    /// Equals completed an operand pair: run the evaluation, then call
    /// [`Session::resolve`] with the token and result.
    Evaluate(PendingEvaluation),

    /// The session is busy and the input was dropped.
    Ignored,
}

/// Outcome of resolving an evaluation, for the UI to act on.
#[derive(Clone, PartialEq, Debug)]
pub enum Resolution {
    /// The result was applied; render the new display.
    Applied { display: String },

    /// The evaluation failed; surface the error through the notification
    /// channel. On retryable errors the pending computation is intact.
    Failed { error: EvalError },

    /// The response no longer matched the in-flight token and was dropped.
    Stale,
}

/// One calculator session: exclusively owned state plus the in-flight
/// evaluation token.
///
/// User events are totally ordered per session; the only suspension point
/// is a remote evaluation, tracked by the token so a late response cannot
/// clobber state the user has since cleared.
///
/// # Example
///
/// ```rust
/// use tally::core::{Event, Operator};
/// use tally::session::{Pressed, Resolution, Session};
///
/// let mut session = Session::new();
/// session.press(Event::Digit('5'));
/// session.press(Event::Operator(Operator::Add));
/// session.press(Event::Digit('3'));
///
/// let pending = match session.press(Event::Equals) {
///     Pressed::Evaluate(pending) => pending,
///     _ => unreachable!(),
/// };
/// assert!(session.is_busy());
///
/// let resolution = session.resolve(pending.token, Ok(8.0));
/// assert_eq!(resolution, Resolution::Applied { display: "8".into() });
/// assert_eq!(session.display(), "8");
/// ```
#[derive(Debug, Default)]
pub struct Session {
    state: CalculatorState,
    in_flight: Option<EvalToken>,
}

impl Session {
    /// Start a session in the initial state.
    pub fn new() -> Self {
        Self {
            state: CalculatorState::new(),
            in_flight: None,
        }
    }

    /// The current state.
    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// The text the UI should render.
    pub fn display(&self) -> &str {
        self.state.display().as_str()
    }

    /// True while an evaluation is outstanding; the UI should disable
    /// input (except clear) and show a busy indicator.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Feed one keypad event into the session.
    ///
    /// While an evaluation is in flight only clear is accepted; it cancels
    /// the outstanding token and resets the state. Equals on a completed
    /// operand pair marks the session busy and hands back a
    /// [`PendingEvaluation`] for the caller to run.
    pub fn press(&mut self, event: Event) -> Pressed {
        if self.is_busy() {
            if event == Event::Clear {
                debug!("clear pressed while busy; cancelling in-flight evaluation");
                self.in_flight = None;
                self.state = CalculatorState::new();
                return Pressed::Updated;
            }
            trace!(?event, "input ignored while evaluation in flight");
            return Pressed::Ignored;
        }

        match apply(&self.state, &event) {
            Step::Continue(next) => {
                self.state = next;
                trace!(
                    phase = self.state.phase().name(),
                    display = self.display(),
                    "state advanced"
                );
                Pressed::Updated
            }
            Step::Evaluate { state, request } => {
                self.state = state;
                let token = EvalToken::fresh();
                self.in_flight = Some(token);
                debug!(operator = %request.operator, "evaluation started");
                Pressed::Evaluate(PendingEvaluation { token, request })
            }
        }
    }

    /// Fold an evaluation result back into the session.
    ///
    /// Returns [`Resolution::Stale`] without touching state if `token` is
    /// not the current in-flight token (the session was cleared while the
    /// call was outstanding).
    pub fn resolve(&mut self, token: EvalToken, result: Result<f64, EvalError>) -> Resolution {
        if self.in_flight != Some(token) {
            debug!("dropping stale evaluation response");
            return Resolution::Stale;
        }
        self.in_flight = None;

        match result {
            Ok(value) => {
                self.state = apply_success(&self.state, value);
                debug!(display = self.display(), "evaluation applied");
                Resolution::Applied {
                    display: self.display().to_string(),
                }
            }
            Err(error) => {
                self.state = apply_failure(&self.state, &error);
                warn!(%error, "evaluation failed");
                Resolution::Failed { error }
            }
        }
    }

    /// Press equals and drive the evaluation to completion in one call.
    ///
    /// Returns `None` when equals was a no-op (no completed operand pair,
    /// or the session was busy). Callers that need to accept input while
    /// the call is outstanding should use [`press`](Self::press) and
    /// [`resolve`](Self::resolve) directly.
    pub async fn evaluate_with<E: Evaluator + ?Sized>(
        &mut self,
        evaluator: &E,
    ) -> Option<Resolution> {
        match self.press(Event::Equals) {
            Pressed::Evaluate(pending) => {
                let result = evaluator.evaluate(&pending.request).await;
                Some(self.resolve(pending.token, result))
            }
            Pressed::Updated | Pressed::Ignored => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Operator;
    use crate::eval::LocalEvaluator;

    fn type_sequence(session: &mut Session, events: &[Event]) {
        for event in events {
            session.press(*event);
        }
    }

    fn start_evaluation(session: &mut Session) -> PendingEvaluation {
        match session.press(Event::Equals) {
            Pressed::Evaluate(pending) => pending,
            other => panic!("expected an evaluation, got {other:?}"),
        }
    }

    #[test]
    fn equals_marks_session_busy() {
        let mut session = Session::new();
        type_sequence(
            &mut session,
            &[
                Event::Digit('5'),
                Event::Operator(Operator::Add),
                Event::Digit('3'),
            ],
        );
        assert!(!session.is_busy());
        let pending = start_evaluation(&mut session);
        assert!(session.is_busy());
        assert_eq!(pending.request.a, 5.0);
        assert_eq!(pending.request.b, 3.0);
    }

    #[test]
    fn equals_while_busy_is_ignored() {
        let mut session = Session::new();
        type_sequence(
            &mut session,
            &[
                Event::Digit('5'),
                Event::Operator(Operator::Add),
                Event::Digit('3'),
            ],
        );
        let _pending = start_evaluation(&mut session);
        assert_eq!(session.press(Event::Equals), Pressed::Ignored);
        assert_eq!(session.press(Event::Digit('9')), Pressed::Ignored);
    }

    #[test]
    fn resolve_applies_result_and_clears_busy() {
        let mut session = Session::new();
        type_sequence(
            &mut session,
            &[
                Event::Digit('5'),
                Event::Operator(Operator::Add),
                Event::Digit('3'),
            ],
        );
        let pending = start_evaluation(&mut session);
        let resolution = session.resolve(pending.token, Ok(8.0));
        assert_eq!(
            resolution,
            Resolution::Applied {
                display: "8".to_string()
            }
        );
        assert!(!session.is_busy());
        assert_eq!(session.display(), "8");
    }

    #[test]
    fn clear_while_busy_cancels_and_drops_late_response() {
        let mut session = Session::new();
        type_sequence(
            &mut session,
            &[
                Event::Digit('5'),
                Event::Operator(Operator::Add),
                Event::Digit('3'),
            ],
        );
        let pending = start_evaluation(&mut session);

        assert_eq!(session.press(Event::Clear), Pressed::Updated);
        assert!(!session.is_busy());
        assert_eq!(session.display(), "0");

        // The stale response arrives after the clear and must not apply.
        let resolution = session.resolve(pending.token, Ok(8.0));
        assert_eq!(resolution, Resolution::Stale);
        assert_eq!(session.display(), "0");
        assert!(session.state().first_operand().is_none());
    }

    #[test]
    fn transport_failure_keeps_pending_computation() {
        let mut session = Session::new();
        type_sequence(
            &mut session,
            &[
                Event::Digit('5'),
                Event::Operator(Operator::Add),
                Event::Digit('3'),
            ],
        );
        let before = session.state().clone();
        let pending = start_evaluation(&mut session);

        let resolution = session.resolve(
            pending.token,
            Err(EvalError::Transport("connection refused".into())),
        );
        match resolution {
            Resolution::Failed { error } => assert!(error.is_retryable()),
            other => panic!("expected a failure, got {other:?}"),
        }
        assert_eq!(session.state(), &before);
        assert!(!session.is_busy());

        // The retry goes through with the operands still in place.
        let retry = start_evaluation(&mut session);
        assert_eq!(retry.request.a, 5.0);
        assert_eq!(retry.request.b, 3.0);
    }

    #[test]
    fn division_by_zero_resolution_shows_error_marker() {
        let mut session = Session::new();
        type_sequence(
            &mut session,
            &[
                Event::Digit('4'),
                Event::Operator(Operator::Divide),
                Event::Digit('0'),
            ],
        );
        let pending = start_evaluation(&mut session);
        let resolution = session.resolve(pending.token, Err(EvalError::DivisionByZero));
        assert_eq!(
            resolution,
            Resolution::Failed {
                error: EvalError::DivisionByZero
            }
        );
        assert_eq!(session.display(), "Error");
        assert!(session.state().pending_operator().is_none());
    }

    #[test]
    fn equals_without_pending_pair_returns_updated() {
        let mut session = Session::new();
        session.press(Event::Digit('7'));
        assert_eq!(session.press(Event::Equals), Pressed::Updated);
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn evaluate_with_drives_local_evaluation() {
        let mut session = Session::new();
        type_sequence(
            &mut session,
            &[
                Event::Digit('5'),
                Event::Operator(Operator::Add),
                Event::Digit('3'),
            ],
        );
        let resolution = session.evaluate_with(&LocalEvaluator).await;
        assert_eq!(
            resolution,
            Some(Resolution::Applied {
                display: "8".to_string()
            })
        );
        assert_eq!(session.display(), "8");
    }

    #[tokio::test]
    async fn evaluate_with_is_none_when_nothing_pending() {
        let mut session = Session::new();
        session.press(Event::Digit('7'));
        assert_eq!(session.evaluate_with(&LocalEvaluator).await, None);
    }
}
