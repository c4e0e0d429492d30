use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::NaiveDate;
use outlay_core::{
    budget_status, spend_by_category, BudgetForm, Clock, CoreError, ExpenseStorage, StatusView,
};
use outlay_domain::{Budget, Category, DateWindow};
use serde::Deserialize;

use crate::api::{
    error::ApiError,
    extractors::{ApiJson, ApiQuery},
    middleware::auth::AuthUser,
    response::ApiResponse,
    state::AppState,
};

/// Optional bounds for `/api/budget/status`; defaults to the current month.
#[derive(Debug, Default, Deserialize)]
pub struct WindowQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl WindowQuery {
    fn resolve(&self, today: NaiveDate) -> Result<DateWindow, ApiError> {
        let month = DateWindow::month_containing(today);
        let window = DateWindow::new(
            self.start.unwrap_or(month.start),
            self.end.unwrap_or(month.end),
        )
        .map_err(CoreError::from)?;
        Ok(window)
    }
}

/// GET /api/budget
pub async fn list_budgets(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<ApiResponse<Vec<Budget>>>, ApiError> {
    let budgets = state.storage.list_budgets(&auth.owner())?;
    Ok(Json(ApiResponse::success(budgets)))
}

/// POST|PUT /api/budget - creates or replaces the budget for a category
pub async fn upsert_budget(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    ApiJson(form): ApiJson<BudgetForm>,
) -> Result<Json<ApiResponse<Vec<Budget>>>, ApiError> {
    let budget = form.validate().map_err(CoreError::from)?;
    let category = budget.category;
    let budgets = state.storage.upsert_budget(&auth.owner(), budget)?;
    tracing::info!(owner = %auth.id, %category, "budget saved");
    Ok(Json(ApiResponse::success(budgets)))
}

/// DELETE /api/budget/:category
pub async fn delete_budget(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(category): Path<String>,
) -> Result<Json<ApiResponse<Vec<Budget>>>, ApiError> {
    let category: Category = category
        .parse()
        .map_err(|err: outlay_domain::UnknownCategory| ApiError::bad_request(err.to_string()))?;
    let budgets = state.storage.delete_budget(&auth.owner(), category)?;
    tracing::info!(owner = %auth.id, %category, "budget deleted");
    Ok(Json(ApiResponse::success(budgets)))
}

/// GET /api/budget/status?start=YYYY-MM-DD&end=YYYY-MM-DD
pub async fn budget_statuses(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    ApiQuery(query): ApiQuery<WindowQuery>,
) -> Result<Json<ApiResponse<Vec<StatusView>>>, ApiError> {
    let window = query.resolve(state.clock.today())?;
    let snapshot = state.storage.load_snapshot(&auth.owner())?;
    let spend = spend_by_category(&snapshot.expenses, window);
    let statuses = budget_status(&snapshot.budgets, &spend)?;
    Ok(Json(ApiResponse::success(
        statuses.into_iter().map(StatusView::from).collect(),
    )))
}
