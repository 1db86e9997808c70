use axum::{
    extract::{Path, State},
    Extension,
};
use serde::Deserialize;
use serde_json::Value;

use crate::database::StoredFunction;
use crate::handlers::extract::{numeric_id, param, query_param, Body, Query};
use crate::handlers::protected::menu::DayQuery;
use crate::middleware::ApiResult;
use crate::state::AppState;
use crate::types::CallerContext;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConsumptionBody {
    pub product_id: Option<Value>,
    pub quantity: Option<Value>,
    /// Omitted -> NULL; the function decides the default timestamp
    pub consumed_at: Option<Value>,
}

/// POST /api/consumption
pub async fn add(
    State(state): State<AppState>,
    Extension(ctx): Extension<CallerContext>,
    Body(body): Body<ConsumptionBody>,
) -> ApiResult {
    let params = vec![param(body.product_id), param(body.quantity), param(body.consumed_at)];
    state.call(StoredFunction::AddConsumedFood, params, ctx).await
}

/// DELETE /api/consumption/:id
pub async fn remove(
    State(state): State<AppState>,
    Extension(ctx): Extension<CallerContext>,
    Path(id): Path<String>,
) -> ApiResult {
    state
        .call(StoredFunction::RemoveConsumedFood, vec![numeric_id(&id)], ctx)
        .await
}

/// GET /api/consumption/day?date=
pub async fn day(
    State(state): State<AppState>,
    Extension(ctx): Extension<CallerContext>,
    Query(query): Query<DayQuery>,
) -> ApiResult {
    state
        .call(StoredFunction::GetDailyConsumption, vec![query_param(query.date)], ctx)
        .await
}
