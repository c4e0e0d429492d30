use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use outlay_core::{CoreError, ValidationErrors};

use crate::api::response::ApiResponse;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Validation(ValidationErrors),
    Unauthorized(String),
    NotFound(String),
    Conflict(String),
    InternalError(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn internal_error(msg: impl Into<String>) -> Self {
        Self::InternalError(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Conflict(msg)
            | ApiError::InternalError(msg) => msg.clone(),
            ApiError::Validation(_) => "Validation failed".to_string(),
            ApiError::NotFound(msg) => format!("{} not found", msg),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(errors) => ApiError::Validation(errors),
            CoreError::InvalidBudget { .. } | CoreError::InvalidWindow(_) => {
                ApiError::BadRequest(err.to_string())
            }
            CoreError::ExpenseNotFound(id) => ApiError::NotFound(format!("Expense {id}")),
            CoreError::BudgetNotFound(category) => {
                ApiError::NotFound(format!("Budget for {category}"))
            }
            CoreError::UserNotFound(_) => ApiError::Unauthorized("Unknown user".into()),
            CoreError::EmailTaken(_) => ApiError::Conflict(err.to_string()),
            CoreError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            CoreError::Storage(_) | CoreError::Serde(_) | CoreError::Io(_) => {
                tracing::error!(error = %err, "storage failure");
                ApiError::InternalError("Storage unavailable".into())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();
        let body = match self {
            ApiError::Validation(errors) => ApiResponse::error_with(
                message,
                serde_json::to_value(&errors.errors).unwrap_or_default(),
            ),
            _ => ApiResponse::<serde_json::Value>::error(message),
        };

        (status, Json(body)).into_response()
    }
}
