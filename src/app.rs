use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    middleware::from_fn,
    response::{IntoResponse, Json},
    routing::{delete, get, post, put},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::handlers::{elevated, protected, public};
use crate::middleware::{caller_context_middleware, method_not_allowed_envelope, require_admin};
use crate::state::AppState;

/// Full application router. Every /api route except register and login sees
/// the caller context; the admin groups are additionally gated on app_admin.
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let api = Router::new()
        .route("/auth/logout", post(public::auth::logout))
        .merge(product_routes())
        .merge(menu_routes())
        .merge(consumption_routes())
        .merge(profile_routes())
        .merge(report_routes())
        .merge(user_routes())
        .merge(admin_routes())
        .layer(from_fn(caller_context_middleware))
        // merged after the layer: these never read identity headers
        .merge(credential_routes());

    let mut app = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/api", api)
        .fallback(not_found)
        .layer(from_fn(method_not_allowed_envelope))
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .with_state(state);

    // Global middleware
    if config.api.enable_request_logging {
        app = app.layer(TraceLayer::new_for_http());
    }
    if config.security.enable_cors {
        app = app.layer(CorsLayer::permissive());
    }
    app
}

fn credential_routes() -> Router<AppState> {
    use public::auth;

    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
}

fn product_routes() -> Router<AppState> {
    use protected::products;

    let admin_only = Router::new()
        .route("/products/export/all", get(products::export_all))
        .route("/products/import", post(products::import))
        .route_layer(from_fn(require_admin));

    Router::new()
        .route("/products", get(products::list).post(products::create))
        .route("/products/search", get(products::search))
        .route("/products/export/mine", get(products::export_mine))
        // Role decides owner vs admin function inside the handler
        .route("/products/:id", put(products::update).delete(products::delete))
        .merge(admin_only)
}

fn menu_routes() -> Router<AppState> {
    use protected::menu;

    Router::new()
        .route("/menu/add", post(menu::add))
        .route("/menu/remove", post(menu::remove))
        .route("/menu/generate-week", post(menu::generate_week))
        .route("/menu/week", get(menu::week))
        .route("/menu/day", get(menu::day))
        .route("/menu/regenerate-day", post(menu::regenerate_day))
}

fn consumption_routes() -> Router<AppState> {
    use protected::consumption;

    Router::new()
        .route("/consumption", post(consumption::add))
        .route("/consumption/day", get(consumption::day))
        .route("/consumption/:id", delete(consumption::remove))
}

fn profile_routes() -> Router<AppState> {
    use protected::profile;

    Router::new()
        .route("/profile", get(profile::get).put(profile::update))
        .route(
            "/profile/weight",
            get(profile::weight_history).post(profile::add_weight),
        )
}

fn report_routes() -> Router<AppState> {
    use protected::reports;

    Router::new()
        .route("/reports/daily", get(reports::daily))
        .route("/reports/weekly", get(reports::weekly))
        .route("/reports/weight-progress", get(reports::weight_progress))
        .route("/reports/calories-progress", get(reports::calories_progress))
}

fn user_routes() -> Router<AppState> {
    use elevated::users;

    Router::new()
        .route("/users", get(users::list).post(users::create_user))
        .route("/users/export", get(users::export))
        .route("/users/admins", post(users::create_admin))
        .route("/users/admins/:id", delete(users::delete_admin))
        .route("/users/:id", put(users::update).delete(users::delete_user))
        .route_layer(from_fn(require_admin))
}

/// Administrative aliases kept for older clients; same functions as /users
fn admin_routes() -> Router<AppState> {
    use elevated::users;

    Router::new()
        .route("/admin/users", get(users::list).post(users::create_user))
        .route("/admin/users/:id", delete(users::delete_user))
        .route("/admin/admins", post(users::create_admin))
        .route("/admin/admins/:id", delete(users::delete_admin))
        .route_layer(from_fn(require_admin))
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Nutrition API",
            "version": version,
            "description": "HTTP gateway for the nutrition calorie-tracking database",
            "endpoints": {
                "auth": "/api/auth/{register,login,logout}",
                "products": "/api/products[/:id|/search|/export/mine]",
                "menu": "/api/menu/{add,remove,generate-week,week,day,regenerate-day}",
                "consumption": "/api/consumption[/:id|/day]",
                "profile": "/api/profile[/weight]",
                "reports": "/api/reports/{daily,weekly,weight-progress,calories-progress}",
                "admin": "/api/users/*, /api/admin/*, /api/products/{export/all,import} (app_admin)",
            }
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.gateway.ping().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "database unavailable",
                    "data": {
                        "status": "degraded",
                        "timestamp": now,
                        "database": "unavailable"
                    }
                })),
            )
        }
    }
}

async fn not_found() -> ApiError {
    ApiError::not_found("Not found")
}
