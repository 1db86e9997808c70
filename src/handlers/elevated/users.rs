use axum::{
    extract::{Path, State},
    Extension,
};
use serde::Deserialize;
use serde_json::Value;

use crate::database::StoredFunction;
use crate::handlers::extract::{numeric_id, param, Body};
use crate::middleware::ApiResult;
use crate::state::AppState;
use crate::types::CallerContext;

/// Calorie limits given to a new administrator when the request names none
pub const DEFAULT_DAILY_CAL_LIMIT: i64 = 2500;
pub const DEFAULT_WEEKLY_CAL_LIMIT: i64 = 17500;

/// Account creation body. snake_case is canonical; the camelCase spelling
/// used by the /admin routes is accepted too.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AccountBody {
    pub username: Option<Value>,
    #[serde(alias = "passwordHash")]
    pub password_hash: Option<Value>,
    #[serde(alias = "dailyCalLimit")]
    pub daily_cal_limit: Option<Value>,
    #[serde(alias = "weeklyCalLimit")]
    pub weekly_cal_limit: Option<Value>,
}

impl AccountBody {
    pub fn into_params(self) -> Vec<Value> {
        vec![
            param(self.username),
            param(self.password_hash),
            param(self.daily_cal_limit),
            param(self.weekly_cal_limit),
        ]
    }

    /// Only an absent (or null) limit takes the default
    pub fn with_default_limits(mut self) -> Self {
        if matches!(self.daily_cal_limit, None | Some(Value::Null)) {
            self.daily_cal_limit = Some(Value::from(DEFAULT_DAILY_CAL_LIMIT));
        }
        if matches!(self.weekly_cal_limit, None | Some(Value::Null)) {
            self.weekly_cal_limit = Some(Value::from(DEFAULT_WEEKLY_CAL_LIMIT));
        }
        self
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LimitsBody {
    #[serde(alias = "dailyCalLimit")]
    pub daily_cal_limit: Option<Value>,
    #[serde(alias = "weeklyCalLimit")]
    pub weekly_cal_limit: Option<Value>,
}

/// GET /api/users
pub async fn list(State(state): State<AppState>, Extension(ctx): Extension<CallerContext>) -> ApiResult {
    state.call(StoredFunction::AdminGetAllUsers, vec![], ctx).await
}

/// GET /api/users/export
pub async fn export(State(state): State<AppState>, Extension(ctx): Extension<CallerContext>) -> ApiResult {
    state.call(StoredFunction::AdminExportUsers, vec![], ctx).await
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    Extension(ctx): Extension<CallerContext>,
    Body(body): Body<AccountBody>,
) -> ApiResult {
    state
        .call(StoredFunction::AdminCreateUser, body.into_params(), ctx)
        .await
}

/// POST /api/users/admins
pub async fn create_admin(
    State(state): State<AppState>,
    Extension(ctx): Extension<CallerContext>,
    Body(body): Body<AccountBody>,
) -> ApiResult {
    state
        .call(
            StoredFunction::AdminCreateAdmin,
            body.with_default_limits().into_params(),
            ctx,
        )
        .await
}

/// PUT /api/users/:id
pub async fn update(
    State(state): State<AppState>,
    Extension(ctx): Extension<CallerContext>,
    Path(id): Path<String>,
    Body(body): Body<LimitsBody>,
) -> ApiResult {
    let params = vec![
        numeric_id(&id),
        param(body.daily_cal_limit),
        param(body.weekly_cal_limit),
    ];
    state.call(StoredFunction::AdminUpdateUser, params, ctx).await
}

/// DELETE /api/users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(ctx): Extension<CallerContext>,
    Path(id): Path<String>,
) -> ApiResult {
    state
        .call(StoredFunction::AdminDeleteUser, vec![numeric_id(&id)], ctx)
        .await
}

/// DELETE /api/users/admins/:id
pub async fn delete_admin(
    State(state): State<AppState>,
    Extension(ctx): Extension<CallerContext>,
    Path(id): Path<String>,
) -> ApiResult {
    state
        .call(StoredFunction::AdminDeleteAdmin, vec![numeric_id(&id)], ctx)
        .await
}
