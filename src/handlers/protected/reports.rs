// Reports are read-only; each takes a single date from the query string.

use axum::{
    extract::State,
    Extension,
};

use crate::database::StoredFunction;
use crate::handlers::extract::{query_param, Query};
use crate::handlers::protected::menu::{DayQuery, WeekQuery};
use crate::middleware::ApiResult;
use crate::state::AppState;
use crate::types::CallerContext;

/// GET /api/reports/daily?date=
pub async fn daily(
    State(state): State<AppState>,
    Extension(ctx): Extension<CallerContext>,
    Query(query): Query<DayQuery>,
) -> ApiResult {
    state
        .call(StoredFunction::GetDailyReport, vec![query_param(query.date)], ctx)
        .await
}

/// GET /api/reports/weekly?week_start=
pub async fn weekly(
    State(state): State<AppState>,
    Extension(ctx): Extension<CallerContext>,
    Query(query): Query<WeekQuery>,
) -> ApiResult {
    state
        .call(StoredFunction::GetWeeklyReport, vec![query_param(query.week_start)], ctx)
        .await
}

/// GET /api/reports/weight-progress?week_start=
pub async fn weight_progress(
    State(state): State<AppState>,
    Extension(ctx): Extension<CallerContext>,
    Query(query): Query<WeekQuery>,
) -> ApiResult {
    state
        .call(StoredFunction::GetWeightReport, vec![query_param(query.week_start)], ctx)
        .await
}

/// GET /api/reports/calories-progress?date=
pub async fn calories_progress(
    State(state): State<AppState>,
    Extension(ctx): Extension<CallerContext>,
    Query(query): Query<DayQuery>,
) -> ApiResult {
    state
        .call(StoredFunction::GetCalorieProgress, vec![query_param(query.date)], ctx)
        .await
}
