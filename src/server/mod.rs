//! The remote calculation endpoint.
//!
//! An axum router exposing `POST /api/calculate` over the same pure
//! arithmetic the local evaluator uses, plus `GET /api/status` for
//! liveness. Each validation failure answers 400 with its own message;
//! anything unexpected answers 500 without leaking internal detail.

use crate::core::Operator;
use crate::eval::wire::{coerce_number, CalculateResponse, ErrorBody, RawCalculateRequest};
use crate::eval::{evaluate, EvalError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tracing::{error, info};

const MSG_MISSING_PARAMETERS: &str =
    "Missing required parameters. Please provide number1, number2, and operation.";
const MSG_INVALID_NUMBERS: &str =
    "Invalid numbers provided. Please ensure number1 and number2 are valid numbers.";
const MSG_INVALID_OPERATION: &str =
    "Invalid operation. Supported operations are: add, subtract, multiply, divide.";
const MSG_DIVISION_BY_ZERO: &str = "Division by zero is not allowed.";
const MSG_INTERNAL_ERROR: &str = "Internal server error. Please try again later.";

/// Build the calculator API router.
pub fn router() -> Router {
    Router::new()
        .route("/api/calculate", post(calculate))
        .route("/api/status", get(status))
}

/// Serve the router on an already-bound listener until shutdown.
pub async fn serve(listener: tokio::net::TcpListener) -> std::io::Result<()> {
    info!(addr = %listener.local_addr()?, "calculation endpoint listening");
    axum::serve(listener, router()).await
}

async fn status() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn calculate(Json(raw): Json<RawCalculateRequest>) -> Response {
    let operation = raw.operation.filter(|name| !name.is_empty());
    let (Some(number1), Some(number2), Some(operation)) = (raw.number1, raw.number2, operation)
    else {
        return bad_request(MSG_MISSING_PARAMETERS);
    };

    let (Some(a), Some(b)) = (coerce_number(&number1), coerce_number(&number2)) else {
        return bad_request(MSG_INVALID_NUMBERS);
    };

    let Some(operator) = Operator::from_name(&operation) else {
        return bad_request(MSG_INVALID_OPERATION);
    };

    match evaluate(a, b, operator) {
        Ok(result) => Json(CalculateResponse {
            result,
            operation,
            number1: a,
            number2: b,
        })
        .into_response(),
        Err(EvalError::DivisionByZero) => bad_request(MSG_DIVISION_BY_ZERO),
        Err(EvalError::InvalidOperand) => bad_request(MSG_INVALID_NUMBERS),
        Err(e) => {
            error!(%e, "calculation failed unexpectedly");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, MSG_INTERNAL_ERROR)
        }
    }
}

fn bad_request(message: &str) -> Response {
    error_response(StatusCode::BAD_REQUEST, message)
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
        .into_response()
}
