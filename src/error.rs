// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::database::GatewayError;

/// HTTP API error rendered as the `{success: false, error}` envelope.
///
/// Failures raised by a stored function are business outcomes and keep a 200
/// status; everything the database never got to judge maps to a real HTTP
/// error status.
#[derive(Debug)]
pub enum ApiError {
    // 200 OK, reported inside the envelope
    Rejected(String),

    // 400 Bad Request
    BadRequest(String),

    // 403 Forbidden
    Forbidden(String),

    // 404 Not Found
    NotFound(String),

    // 405 Method Not Allowed
    MethodNotAllowed(String),

    // 413 Payload Too Large
    PayloadTooLarge(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),

    // 504 Gateway Timeout
    GatewayTimeout(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Rejected(_) => StatusCode::OK,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::GatewayTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::Rejected(msg) => msg,
            ApiError::BadRequest(msg) => msg,
            ApiError::Forbidden(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::MethodNotAllowed(msg) => msg,
            ApiError::PayloadTooLarge(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
            ApiError::ServiceUnavailable(msg) => msg,
            ApiError::GatewayTimeout(msg) => msg,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({
            "success": false,
            "error": self.message(),
        })
    }
}

impl ApiError {
    pub fn access_denied() -> Self {
        ApiError::Forbidden("Access denied".to_string())
    }

    pub fn invalid_json(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn invalid_query(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn method_not_allowed() -> Self {
        ApiError::MethodNotAllowed("Method not allowed".to_string())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Function { message } => {
                tracing::warn!("Stored function failed: {}", message);
                ApiError::Rejected(message)
            }
            GatewayError::Unavailable(e) => {
                tracing::error!("Database unavailable: {}", e);
                ApiError::ServiceUnavailable("Database temporarily unavailable".to_string())
            }
            err @ GatewayError::TimedOut { .. } => {
                tracing::error!("{}", err);
                ApiError::GatewayTimeout("Database did not respond in time".to_string())
            }
            err @ (GatewayError::ArityMismatch { .. } | GatewayError::MalformedResult { .. }) => {
                // Don't expose internal call details to clients
                tracing::error!("Gateway contract violation: {}", err);
                ApiError::InternalServerError("An error occurred while processing your request".to_string())
            }
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn function_failures_stay_in_the_envelope() {
        let err: ApiError = GatewayError::Function {
            message: "Product not found".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::OK);
        assert_eq!(err.to_json(), json!({"success": false, "error": "Product not found"}));
    }

    #[test]
    fn infrastructure_failures_use_http_status() {
        let unavailable: ApiError = GatewayError::Unavailable(sqlx::Error::PoolTimedOut).into();
        assert_eq!(unavailable.status_code(), StatusCode::SERVICE_UNAVAILABLE);

        let timed_out: ApiError = GatewayError::TimedOut {
            function: "generate_weekly_menu",
            after: Duration::from_secs(30),
        }
        .into();
        assert_eq!(timed_out.status_code(), StatusCode::GATEWAY_TIMEOUT);

        let arity: ApiError = GatewayError::ArityMismatch {
            function: "user_login",
            expected: 2,
            got: 1,
        }
        .into();
        assert_eq!(arity.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!arity.message().contains("user_login"));
    }

    #[test]
    fn access_denied_is_forbidden() {
        let err = ApiError::access_denied();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(err.to_json()["error"], "Access denied");
    }
}
