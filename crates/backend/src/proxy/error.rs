use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use super::path_guard::PathRejection;

/// Fixed body of the 504 answer
pub const GATEWAY_TIMEOUT_BODY: &str = "Gateway Timeout: el servicio interno no respondió a tiempo";

/// Ошибки прокси
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Invalid path: {0}")]
    InvalidPath(#[from] PathRejection),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(Method),

    #[error("Internal service timed out after {0} ms")]
    Timeout(u64),

    #[error("{0}")]
    Upstream(String),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        match self {
            ProxyError::InvalidPath(reason) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "invalid_path", "message": reason.to_string() })),
            )
                .into_response(),
            ProxyError::MethodNotAllowed(_) => (
                StatusCode::METHOD_NOT_ALLOWED,
                [(header::ALLOW, "GET, POST, PUT, PATCH, DELETE")],
            )
                .into_response(),
            ProxyError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, GATEWAY_TIMEOUT_BODY).into_response(),
            ProxyError::Upstream(message) => (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": "bad_gateway", "message": message })),
            )
                .into_response(),
        }
    }
}
