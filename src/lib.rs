//! Tally: a pure functional calculator core
//!
//! Tally interprets a stream of discrete keypad events (digit, decimal
//! point, operator, equals, clear) into a display value and a pending
//! computation, and evaluates completed computations either in-process or
//! against a remote endpoint.
//!
//! The crate follows a "pure core, imperative shell" split:
//!
//! - **Core**: [`core::apply`] is a pure transition function over a closed
//!   [`core::Event`] enum; the same state and event always produce the
//!   same step, which makes the whole input policy exhaustively testable.
//! - **Evaluation**: the [`eval::Evaluator`] trait with an in-process
//!   [`eval::LocalEvaluator`] and an HTTP [`eval::RemoteEvaluator`].
//! - **Shell**: [`session::Session`] owns the state and enforces
//!   single-flight asynchronous evaluation with stale-response rejection.
//!
//! # Example
//!
//! ```rust
//! use tally::core::{apply, apply_success, CalculatorState, Event, Operator, Step};
//! use tally::eval::evaluate;
//!
//! let mut state = CalculatorState::new();
//! for event in [
//!     Event::Digit('5'),
//!     Event::Operator(Operator::Add),
//!     Event::Digit('3'),
//! ] {
//!     state = apply(&state, &event).into_state();
//! }
//!
//! let Step::Evaluate { state, request } = apply(&state, &Event::Equals) else {
//!     unreachable!();
//! };
//! let result = evaluate(request.a, request.b, request.operator).unwrap();
//! let state = apply_success(&state, result);
//! assert_eq!(state.display().as_str(), "8");
//! ```

pub mod core;
pub mod eval;
pub mod server;
pub mod session;

// Re-export commonly used types
pub use crate::core::{apply, CalculatorState, Event, Operator, Phase, Step};
pub use crate::eval::{EvalError, Evaluator, LocalEvaluator, RemoteEvaluator};
pub use crate::session::{Pressed, Resolution, Session};
