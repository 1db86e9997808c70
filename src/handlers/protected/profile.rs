use axum::{extract::State, Extension};
use serde::Deserialize;
use serde_json::Value;

use crate::database::StoredFunction;
use crate::handlers::extract::{param, Body};
use crate::middleware::ApiResult;
use crate::state::AppState;
use crate::types::CallerContext;

/// The browser client sends camelCase here
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileBody {
    #[serde(alias = "daily_calorie_limit")]
    pub daily_calorie_limit: Option<Value>,
    #[serde(alias = "weekly_calorie_limit")]
    pub weekly_calorie_limit: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WeightBody {
    pub date: Option<Value>,
    pub weight: Option<Value>,
}

/// GET /api/profile
pub async fn get(State(state): State<AppState>, Extension(ctx): Extension<CallerContext>) -> ApiResult {
    state.call(StoredFunction::GetMyProfile, vec![], ctx).await
}

/// PUT /api/profile
pub async fn update(
    State(state): State<AppState>,
    Extension(ctx): Extension<CallerContext>,
    Body(body): Body<ProfileBody>,
) -> ApiResult {
    let params = vec![param(body.daily_calorie_limit), param(body.weekly_calorie_limit)];
    state.call(StoredFunction::UpdateMyProfile, params, ctx).await
}

/// GET /api/profile/weight
pub async fn weight_history(State(state): State<AppState>, Extension(ctx): Extension<CallerContext>) -> ApiResult {
    state.call(StoredFunction::GetWeightHistory, vec![], ctx).await
}

/// POST /api/profile/weight
pub async fn add_weight(
    State(state): State<AppState>,
    Extension(ctx): Extension<CallerContext>,
    Body(body): Body<WeightBody>,
) -> ApiResult {
    let params = vec![param(body.date), param(body.weight)];
    state.call(StoredFunction::AddWeightRecord, params, ctx).await
}
