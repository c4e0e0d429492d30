use axum::{
    extract::State,
    Extension, Json,
};
use outlay_core::{Clock, Dashboard, ExpenseStorage};
use serde::Deserialize;

use crate::api::{
    error::ApiError,
    extractors::ApiQuery,
    middleware::auth::AuthUser,
    response::ApiResponse,
    state::AppState,
};

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub threshold: Option<i64>,
}

/// GET /api/dashboard?threshold=80
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    ApiQuery(query): ApiQuery<DashboardQuery>,
) -> Result<Json<ApiResponse<Dashboard>>, ApiError> {
    let snapshot = state.storage.load_snapshot(&auth.owner())?;
    let threshold = query.threshold.unwrap_or(state.config.alert_threshold);
    let dashboard = Dashboard::build_with_limit(
        &snapshot,
        state.clock.today(),
        threshold,
        state.config.recent_limit,
    )?;
    Ok(Json(ApiResponse::success(dashboard)))
}
