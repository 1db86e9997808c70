use axum::{extract::Request, http::HeaderMap, middleware::Next, response::Response};

use crate::error::ApiError;
use crate::types::{CallerContext, Role};

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Caller-context middleware: derives identity from `x-user-id` / `x-user-role`
/// and injects it into the request. Nothing is remembered between requests.
pub async fn caller_context_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let context = context_from_headers(&headers)?;

    tracing::debug!(
        "Caller context: user={:?} role={:?}",
        context.user_id,
        context.role
    );

    request.extensions_mut().insert(context);
    Ok(next.run(request).await)
}

/// Empty or missing headers mean "absent". A role outside the known set is
/// refused rather than forwarded to the database.
pub fn context_from_headers(headers: &HeaderMap) -> Result<CallerContext, ApiError> {
    let user_id = header_value(headers, USER_ID_HEADER)?;

    let role = match header_value(headers, USER_ROLE_HEADER)? {
        None => None,
        Some(raw) => match Role::parse(&raw) {
            Some(role) => Some(role),
            None => {
                tracing::warn!("Rejected unknown role header: {:?}", raw);
                return Err(ApiError::access_denied());
            }
        },
    };

    Ok(CallerContext { user_id, role })
}

fn header_value(headers: &HeaderMap, name: &str) -> Result<Option<String>, ApiError> {
    match headers.get(name) {
        None => Ok(None),
        Some(value) => {
            let value = value.to_str().map_err(|_| ApiError::access_denied())?;
            if value.is_empty() {
                Ok(None)
            } else {
                Ok(Some(value.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn no_headers_is_anonymous() {
        let ctx = context_from_headers(&HeaderMap::new()).unwrap();
        assert!(ctx.is_anonymous());
    }

    #[test]
    fn reads_both_headers() {
        let ctx = context_from_headers(&headers(&[
            (USER_ID_HEADER, "17"),
            (USER_ROLE_HEADER, "app_admin"),
        ]))
        .unwrap();
        assert_eq!(ctx.user_id.as_deref(), Some("17"));
        assert_eq!(ctx.role, Some(Role::Admin));
    }

    #[test]
    fn empty_values_count_as_missing() {
        let ctx = context_from_headers(&headers(&[(USER_ID_HEADER, ""), (USER_ROLE_HEADER, "")])).unwrap();
        assert!(ctx.is_anonymous());
    }

    #[test]
    fn unknown_role_is_denied() {
        let err = context_from_headers(&headers(&[(USER_ROLE_HEADER, "superuser")])).unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
    }

    #[test]
    fn user_without_role_is_allowed() {
        let ctx = context_from_headers(&headers(&[(USER_ID_HEADER, "5")])).unwrap();
        assert_eq!(ctx.user_id.as_deref(), Some("5"));
        assert_eq!(ctx.role, None);
    }
}
