//! Evaluation delegated to the remote calculation endpoint.

use super::error::EvalError;
use super::wire::{CalculateRequest, CalculateResponse, ErrorBody};
use super::Evaluator;
use crate::core::EvaluationRequest;
use async_trait::async_trait;
use tracing::{debug, warn};

/// An [`Evaluator`] that posts to a remote `POST /api/calculate` endpoint.
///
/// Connection, timeout, and response-parse failures map to
/// [`EvalError::Transport`]; any non-success status maps to
/// [`EvalError::Server`] carrying the server-supplied message. Timeout
/// policy belongs to the [`reqwest::Client`] passed in (or the default
/// client's), not to this type.
///
/// # Example
///
/// ```rust,no_run
/// use tally::core::{EvaluationRequest, Operator};
/// use tally::eval::{Evaluator, RemoteEvaluator};
///
/// # async fn demo() -> Result<(), tally::eval::EvalError> {
/// let evaluator = RemoteEvaluator::new("http://localhost:3001");
/// let request = EvaluationRequest { a: 5.0, b: 3.0, operator: Operator::Add };
/// let result = evaluator.evaluate(&request).await?;
/// assert_eq!(result, 8.0);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct RemoteEvaluator {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteEvaluator {
    /// Create an evaluator against `base_url` with a default client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create an evaluator with a caller-configured client, e.g. one with
    /// a request timeout.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/calculate", self.base_url)
    }
}

#[async_trait]
impl Evaluator for RemoteEvaluator {
    async fn evaluate(&self, request: &EvaluationRequest) -> Result<f64, EvalError> {
        let body = CalculateRequest {
            number1: request.a,
            number2: request.b,
            operation: request.operator,
        };
        debug!(operator = %request.operator, "delegating evaluation to remote endpoint");

        let response = self
            .client
            .post(self.endpoint())
            .json(&body)
            .send()
            .await
            .map_err(|e| EvalError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let parsed: CalculateResponse = response
                .json()
                .await
                .map_err(|e| EvalError::Transport(e.to_string()))?;
            Ok(parsed.result)
        } else {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => format!("server returned status {}", status.as_u16()),
            };
            warn!(status = status.as_u16(), %message, "remote evaluation rejected");
            Err(EvalError::Server(message))
        }
    }
}
