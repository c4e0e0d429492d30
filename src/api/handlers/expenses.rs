use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use outlay_core::{recent_expenses, CoreError, ExpenseForm, ExpenseStorage};
use outlay_domain::Expense;
use uuid::Uuid;

use crate::api::{
    error::ApiError,
    extractors::ApiJson,
    middleware::auth::AuthUser,
    response::ApiResponse,
    state::AppState,
};

fn parse_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::bad_request("Invalid expense ID format"))
}

fn newest_first(expenses: Vec<Expense>) -> Vec<Expense> {
    recent_expenses(&expenses, expenses.len())
}

/// GET /api/expense - newest first
pub async fn list_expenses(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<ApiResponse<Vec<Expense>>>, ApiError> {
    let expenses = state.storage.list_expenses(&auth.owner())?;
    Ok(Json(ApiResponse::success(newest_first(expenses))))
}

/// GET /api/expense/:id
pub async fn get_expense(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Expense>>, ApiError> {
    let id = parse_id(&id)?;
    let expense = state
        .storage
        .list_expenses(&auth.owner())?
        .into_iter()
        .find(|expense| expense.id == id)
        .ok_or(CoreError::ExpenseNotFound(id))?;
    Ok(Json(ApiResponse::success(expense)))
}

/// POST /api/expense - returns the updated list
pub async fn create_expense(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    ApiJson(form): ApiJson<ExpenseForm>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<Expense>>>), ApiError> {
    let expense = Expense::from_draft(form.validate().map_err(CoreError::from)?);
    let id = expense.id;
    let expenses = state.storage.create_expense(&auth.owner(), expense)?;
    tracing::info!(owner = %auth.id, %id, "expense created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(newest_first(expenses))),
    ))
}

/// PUT /api/expense/:id - returns the updated list
pub async fn update_expense(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    ApiJson(form): ApiJson<ExpenseForm>,
) -> Result<Json<ApiResponse<Vec<Expense>>>, ApiError> {
    let id = parse_id(&id)?;
    let draft = form.validate().map_err(CoreError::from)?;
    let expenses = state.storage.update_expense(&auth.owner(), id, draft)?;
    tracing::info!(owner = %auth.id, %id, "expense updated");
    Ok(Json(ApiResponse::success(newest_first(expenses))))
}

/// DELETE /api/expense/:id - returns the updated list
pub async fn delete_expense(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<Expense>>>, ApiError> {
    let id = parse_id(&id)?;
    let expenses = state.storage.delete_expense(&auth.owner(), id)?;
    tracing::info!(owner = %auth.id, %id, "expense deleted");
    Ok(Json(ApiResponse::success(newest_first(expenses))))
}
