//! The evaluation contract: turn a completed operand pair and operator
//! into a result or a typed error.
//!
//! Evaluation comes in two shapes behind one trait:
//! - [`LocalEvaluator`] runs the pure arithmetic in-process.
//! - [`RemoteEvaluator`] delegates to the HTTP endpoint and can
//!   additionally fail with [`EvalError::Transport`] / [`EvalError::Server`].

use crate::core::EvaluationRequest;
use async_trait::async_trait;

mod error;
mod local;
mod remote;
pub mod wire;

pub use error::EvalError;
pub use local::{evaluate, LocalEvaluator};
pub use remote::RemoteEvaluator;

/// Something that can evaluate a completed calculation.
///
/// The local variant resolves immediately; the remote variant suspends on
/// network I/O. Callers must not issue concurrent evaluations against the
/// same session — single-flight is enforced by [`crate::session::Session`].
#[async_trait]
pub trait Evaluator: Send + Sync {
    async fn evaluate(&self, request: &EvaluationRequest) -> Result<f64, EvalError>;
}
