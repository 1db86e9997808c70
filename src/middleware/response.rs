use axum::{
    extract::Request,
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::value::RawValue;

/// A stored function's result, sent to the client exactly as the database
/// rendered it
#[derive(Debug)]
pub struct PassThrough(pub Box<RawValue>);

impl IntoResponse for PassThrough {
    fn into_response(self) -> Response {
        let body: Box<str> = self.0.into();
        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
            String::from(body),
        )
            .into_response()
    }
}

/// Method mismatches come out of the router with an empty body; give them
/// the error envelope, keeping the `Allow` header
pub async fn method_not_allowed_envelope(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    if response.status() != StatusCode::METHOD_NOT_ALLOWED {
        return response;
    }

    let allow = response.headers().get(header::ALLOW).cloned();
    let mut enveloped = crate::error::ApiError::method_not_allowed().into_response();
    if let Some(allow) = allow {
        enveloped.headers_mut().insert(header::ALLOW, allow);
    }
    enveloped
}

// Convenience type alias
pub type ApiResult = Result<PassThrough, crate::error::ApiError>;
