use axum::{
    extract::State,
    Extension,
};
use serde::Deserialize;
use serde_json::Value;

use crate::database::StoredFunction;
use crate::handlers::extract::{param, query_param, Body, Query};
use crate::middleware::ApiResult;
use crate::state::AppState;
use crate::types::CallerContext;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MenuProductBody {
    pub product_id: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WeekBody {
    /// YYYY-MM-DD
    pub week_start: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DayBody {
    pub date: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct WeekQuery {
    pub week_start: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DayQuery {
    pub date: Option<String>,
}

/// POST /api/menu/add
pub async fn add(
    State(state): State<AppState>,
    Extension(ctx): Extension<CallerContext>,
    Body(body): Body<MenuProductBody>,
) -> ApiResult {
    state
        .call(StoredFunction::AddProductToMenu, vec![param(body.product_id)], ctx)
        .await
}

/// POST /api/menu/remove
pub async fn remove(
    State(state): State<AppState>,
    Extension(ctx): Extension<CallerContext>,
    Body(body): Body<MenuProductBody>,
) -> ApiResult {
    state
        .call(StoredFunction::RemoveProductFromMenu, vec![param(body.product_id)], ctx)
        .await
}

/// POST /api/menu/generate-week
pub async fn generate_week(
    State(state): State<AppState>,
    Extension(ctx): Extension<CallerContext>,
    Body(body): Body<WeekBody>,
) -> ApiResult {
    state
        .call(StoredFunction::GenerateWeeklyMenu, vec![param(body.week_start)], ctx)
        .await
}

/// GET /api/menu/week?week_start=
pub async fn week(
    State(state): State<AppState>,
    Extension(ctx): Extension<CallerContext>,
    Query(query): Query<WeekQuery>,
) -> ApiResult {
    state
        .call(StoredFunction::GetWeeklyMenu, vec![query_param(query.week_start)], ctx)
        .await
}

/// GET /api/menu/day?date=
pub async fn day(
    State(state): State<AppState>,
    Extension(ctx): Extension<CallerContext>,
    Query(query): Query<DayQuery>,
) -> ApiResult {
    state
        .call(StoredFunction::GetDailyMenu, vec![query_param(query.date)], ctx)
        .await
}

/// POST /api/menu/regenerate-day
pub async fn regenerate_day(
    State(state): State<AppState>,
    Extension(ctx): Extension<CallerContext>,
    Body(body): Body<DayBody>,
) -> ApiResult {
    state
        .call(StoredFunction::RegenerateDay, vec![param(body.date)], ctx)
        .await
}
