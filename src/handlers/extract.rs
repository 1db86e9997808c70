use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Request},
    http::{request::Parts, StatusCode},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// JSON request body where an empty body reads as `T::default()`.
///
/// Clients routinely POST without a body (logout, exports); the fields then
/// simply bind as NULL. Anything non-empty must be valid JSON.
#[derive(Debug, Clone, Default)]
pub struct Body<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Body<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                ApiError::PayloadTooLarge(rejection.body_text())
            } else {
                ApiError::invalid_json(rejection.body_text())
            }
        })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Body(T::default()));
        }

        serde_json::from_slice(&bytes)
            .map(Body)
            .map_err(|e| ApiError::invalid_json(format!("Invalid JSON body: {}", e)))
    }
}

/// Query-string extractor whose rejection is the usual error envelope
#[derive(Debug, Clone, Default)]
pub struct Query<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        axum::extract::Query::<T>::from_request_parts(parts, state)
            .await
            .map(|axum::extract::Query(value)| Query(value))
            .map_err(|rejection| ApiError::invalid_query(rejection.body_text()))
    }
}

/// Path ids are numeric in every stored function. A segment that is not a
/// number goes through as text and the database's cast rejects it.
pub fn numeric_id(raw: &str) -> Value {
    raw.trim()
        .parse::<i64>()
        .map(Value::from)
        .unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Missing or null field -> SQL NULL
pub fn param(value: Option<Value>) -> Value {
    value.unwrap_or(Value::Null)
}

/// Query-string value -> positional parameter
pub fn query_param(value: Option<String>) -> Value {
    value.map(Value::String).unwrap_or(Value::Null)
}
