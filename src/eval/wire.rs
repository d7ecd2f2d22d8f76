//! Wire types for the remote calculation protocol.
//!
//! `POST /api/calculate` takes `{ number1, number2, operation }` and
//! answers with the result echoed alongside its inputs, or a 4xx/5xx body
//! carrying a single human-readable `error` field.

use crate::core::Operator;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The request body the client sends.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct CalculateRequest {
    pub number1: f64,
    pub number2: f64,
    pub operation: Operator,
}

/// The request body as the server first sees it.
///
/// The endpoint is permissive on input: operands may arrive as JSON
/// numbers or numeric strings, and any field may be missing. Validation
/// happens in the handler so each failure gets its own message.
#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct RawCalculateRequest {
    #[serde(default)]
    pub number1: Option<Value>,
    #[serde(default)]
    pub number2: Option<Value>,
    #[serde(default)]
    pub operation: Option<String>,
}

/// A successful calculation response.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct CalculateResponse {
    pub result: f64,
    pub operation: String,
    pub number1: f64,
    pub number2: f64,
}

/// An error response body.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Read an operand that may be a JSON number or a numeric string.
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
