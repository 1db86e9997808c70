use axum::{
    extract::{Path, State},
    Extension,
};
use serde::Deserialize;
use serde_json::Value;

use crate::database::{ProductMutation, StoredFunction};
use crate::handlers::extract::{numeric_id, param, query_param, Body, Query};
use crate::middleware::ApiResult;
use crate::state::AppState;
use crate::types::CallerContext;

/// Product fields in the order the create/update functions declare them
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProductBody {
    pub name: Option<Value>,
    pub calories: Option<Value>,
    pub portion_size: Option<Value>,
    pub portion_unit: Option<Value>,
    pub protein: Option<Value>,
    pub fat: Option<Value>,
    pub carbs: Option<Value>,
    pub is_public: Option<Value>,
}

impl ProductBody {
    fn into_params(self) -> Vec<Value> {
        vec![
            param(self.name),
            param(self.calories),
            param(self.portion_size),
            param(self.portion_unit),
            param(self.protein),
            param(self.fat),
            param(self.carbs),
            param(self.is_public),
        ]
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ImportBody {
    pub products: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub name: Option<String>,
}

/// GET /api/products - public products plus the caller's own
pub async fn list(State(state): State<AppState>, Extension(ctx): Extension<CallerContext>) -> ApiResult {
    state.call(StoredFunction::GetAvailableProducts, vec![], ctx).await
}

/// GET /api/products/search?name=
pub async fn search(
    State(state): State<AppState>,
    Extension(ctx): Extension<CallerContext>,
    Query(query): Query<SearchQuery>,
) -> ApiResult {
    state
        .call(StoredFunction::GetProductByName, vec![query_param(query.name)], ctx)
        .await
}

/// GET /api/products/export/mine
pub async fn export_mine(State(state): State<AppState>, Extension(ctx): Extension<CallerContext>) -> ApiResult {
    state.call(StoredFunction::UserExportProducts, vec![], ctx).await
}

/// GET /api/products/export/all (admin)
pub async fn export_all(State(state): State<AppState>, Extension(ctx): Extension<CallerContext>) -> ApiResult {
    state.call(StoredFunction::AdminExportProducts, vec![], ctx).await
}

/// POST /api/products/import (admin)
///
/// `products` is handed over as one jsonb document.
pub async fn import(
    State(state): State<AppState>,
    Extension(ctx): Extension<CallerContext>,
    Body(body): Body<ImportBody>,
) -> ApiResult {
    state
        .call(StoredFunction::AdminImportProducts, vec![param(body.products)], ctx)
        .await
}

/// POST /api/products
pub async fn create(
    State(state): State<AppState>,
    Extension(ctx): Extension<CallerContext>,
    Body(body): Body<ProductBody>,
) -> ApiResult {
    state
        .call(StoredFunction::CreateProduct, body.into_params(), ctx)
        .await
}

/// PUT /api/products/:id - owner update, or the admin variant for app_admin
pub async fn update(
    State(state): State<AppState>,
    Extension(ctx): Extension<CallerContext>,
    Path(id): Path<String>,
    Body(body): Body<ProductBody>,
) -> ApiResult {
    let function = ProductMutation::Update.function(ctx.scope());
    let mut params = vec![numeric_id(&id)];
    params.extend(body.into_params());
    state.call(function, params, ctx).await
}

/// DELETE /api/products/:id - owner delete, or the admin variant for app_admin
pub async fn delete(
    State(state): State<AppState>,
    Extension(ctx): Extension<CallerContext>,
    Path(id): Path<String>,
) -> ApiResult {
    let function = ProductMutation::Delete.function(ctx.scope());
    state.call(function, vec![numeric_id(&id)], ctx).await
}
