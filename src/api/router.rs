use axum::{
    http::HeaderValue,
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::api::{
    handlers::{auth, budgets, dashboard, expenses, health},
    middleware::auth::require_auth,
    state::AppState,
};

/// Builds the full application router. `/health`, register and login are
/// public; everything else requires a bearer token.
pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/logout", post(auth::logout))
        // Expenses
        .route(
            "/api/expense",
            get(expenses::list_expenses).post(expenses::create_expense),
        )
        .route(
            "/api/expense/:id",
            get(expenses::get_expense)
                .put(expenses::update_expense)
                .delete(expenses::delete_expense),
        )
        // Budgets
        .route(
            "/api/budget",
            get(budgets::list_budgets)
                .post(budgets::upsert_budget)
                .put(budgets::upsert_budget),
        )
        .route("/api/budget/status", get(budgets::budget_statuses))
        .route("/api/budget/:category", delete(budgets::delete_budget))
        .route("/api/dashboard", get(dashboard::dashboard))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/health", get(health::health))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(state.config.cors_origin.as_deref()))
        .with_state(state)
}

fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let Some(origin) = origin else {
        return CorsLayer::permissive();
    };
    match origin.parse::<HeaderValue>() {
        Ok(value) => CorsLayer::new()
            .allow_origin(AllowOrigin::exact(value))
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any),
        Err(_) => {
            tracing::warn!(%origin, "invalid CORS origin, allowing any");
            CorsLayer::permissive()
        }
    }
}
