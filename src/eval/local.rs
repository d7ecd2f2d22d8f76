//! In-process arithmetic evaluation.

use super::error::EvalError;
use super::Evaluator;
use crate::core::{EvaluationRequest, Operator};
use async_trait::async_trait;

/// Evaluate one binary arithmetic operation.
///
/// Pure and deterministic: no side effects, no I/O. Division fails with
/// [`EvalError::DivisionByZero`] exactly when the divisor is zero. The
/// digit-only input path should never produce a non-finite operand, but
/// the guard is kept so a chained non-finite result cannot propagate
/// silently.
///
/// # Example
///
/// ```rust
/// use tally::core::Operator;
/// use tally::eval::{evaluate, EvalError};
///
/// assert_eq!(evaluate(5.0, 3.0, Operator::Subtract), Ok(2.0));
/// assert_eq!(evaluate(3.0, 5.0, Operator::Subtract), Ok(-2.0));
/// assert_eq!(
///     evaluate(4.0, 0.0, Operator::Divide),
///     Err(EvalError::DivisionByZero)
/// );
/// ```
pub fn evaluate(a: f64, b: f64, operator: Operator) -> Result<f64, EvalError> {
    if !a.is_finite() || !b.is_finite() {
        return Err(EvalError::InvalidOperand);
    }
    match operator {
        Operator::Add => Ok(a + b),
        Operator::Subtract => Ok(a - b),
        Operator::Multiply => Ok(a * b),
        Operator::Divide => {
            if b == 0.0 {
                Err(EvalError::DivisionByZero)
            } else {
                Ok(a / b)
            }
        }
    }
}

/// The in-process [`Evaluator`]: wraps [`evaluate`] and never suspends.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalEvaluator;

#[async_trait]
impl Evaluator for LocalEvaluator {
    async fn evaluate(&self, request: &EvaluationRequest) -> Result<f64, EvalError> {
        evaluate(request.a, request.b, request.operator)
    }
}
