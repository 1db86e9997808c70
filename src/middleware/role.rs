use axum::{extract::Request, middleware::Next, response::Response};

use crate::error::ApiError;
use crate::types::{CallerContext, Role};

/// Gate for administrator-only routes. Runs after `caller_context_middleware`
/// and short-circuits before any handler (and so any database call) runs.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    require_role(Role::Admin, request, next).await
}

async fn require_role(role: Role, request: Request, next: Next) -> Result<Response, ApiError> {
    let allowed = request
        .extensions()
        .get::<CallerContext>()
        .map(|ctx| ctx.has_role(role))
        .unwrap_or(false);

    if !allowed {
        tracing::warn!(
            "Access denied: {} {} requires {}",
            request.method(),
            request.uri().path(),
            role
        );
        return Err(ApiError::access_denied());
    }

    Ok(next.run(request).await)
}
