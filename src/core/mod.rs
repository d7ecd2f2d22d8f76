//! Pure functional calculator core.
//!
//! This module contains the pure core of the calculator:
//! - Display text rules via [`DisplayValue`]
//! - The closed keypad [`Event`] vocabulary and [`Operator`] set
//! - [`CalculatorState`] with its derived [`Phase`]
//! - The transition function [`apply`] and its result folds
//!
//! All logic in this module is pure (no side effects), following the
//! "pure core, imperative shell" philosophy. Evaluation itself lives in
//! [`crate::eval`]; the session shell in [`crate::session`].

mod display;
mod event;
mod machine;
mod state;

pub use display::{format_number, parse_number, DisplayValue, ERROR_MARKER};
pub use event::{Event, Operator};
pub use machine::{apply, apply_failure, apply_success, EvaluationRequest, Step};
pub use state::{CalculatorState, Phase};
