//! Evaluation error taxonomy.

use thiserror::Error;

/// Errors an evaluation can produce.
///
/// `DivisionByZero` and `InvalidOperand` are resolved locally by the state
/// machine; `Transport` and `Server` only occur on the remote path and are
/// surfaced to the user verbatim through the notification channel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("Division by zero is not allowed.")]
    DivisionByZero,

    #[error("Operands must be finite numbers")]
    InvalidOperand,

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("{0}")]
    Server(String),
}

impl EvalError {
    /// True when the failure leaves the pending computation intact so the
    /// user can retry without re-entering it.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Server(_))
    }
}
