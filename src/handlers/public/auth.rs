// handlers/public/auth.rs - account entry points
//
// Register and login run with no identity settings at all, even if the
// client happens to send headers: the database function is what decides
// who the caller is.

use axum::{extract::State, Extension};
use serde::Deserialize;
use serde_json::Value;

use crate::database::StoredFunction;
use crate::handlers::extract::{param, Body};
use crate::middleware::ApiResult;
use crate::state::AppState;
use crate::types::CallerContext;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub username: Option<Value>,
    pub password: Option<Value>,
}

impl Credentials {
    fn into_params(self) -> Vec<Value> {
        vec![param(self.username), param(self.password)]
    }
}

/// POST /api/auth/register
pub async fn register(State(state): State<AppState>, Body(body): Body<Credentials>) -> ApiResult {
    state
        .call_anonymous(StoredFunction::UserRegister, body.into_params())
        .await
}

/// POST /api/auth/login
///
/// The function answers with `{success, data: {id, username, role}}`; the
/// client keeps that user object and replays id and role as headers.
pub async fn login(State(state): State<AppState>, Body(body): Body<Credentials>) -> ApiResult {
    state
        .call_anonymous(StoredFunction::UserLogin, body.into_params())
        .await
}

/// POST /api/auth/logout
pub async fn logout(State(state): State<AppState>, Extension(ctx): Extension<CallerContext>) -> ApiResult {
    state.call(StoredFunction::UserLogout, vec![], ctx).await
}
