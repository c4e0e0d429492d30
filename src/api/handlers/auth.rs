use axum::{extract::State, http::StatusCode, Extension, Json};
use outlay_core::{LoginForm, RegistrationForm};
use outlay_domain::{User, UserProfile};
use serde::Serialize;

use crate::api::{
    error::ApiError,
    extractors::ApiJson,
    middleware::auth::AuthUser,
    response::ApiResponse,
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: UserProfile,
}

fn open_session(state: &AppState, user: &User) -> SessionResponse {
    SessionResponse {
        token: state.sessions.issue(user.id),
        user: user.profile(),
    }
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ApiJson(form): ApiJson<RegistrationForm>,
) -> Result<(StatusCode, Json<ApiResponse<SessionResponse>>), ApiError> {
    let user = state.auth().register(&form)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(open_session(&state, &user))),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(form): ApiJson<LoginForm>,
) -> Result<Json<ApiResponse<SessionResponse>>, ApiError> {
    let user = state.auth().login(&form)?;
    tracing::info!(user = %user.id, "login");
    Ok(Json(ApiResponse::success(open_session(&state, &user))))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<ApiResponse<UserProfile>>, ApiError> {
    let user = state.auth().user(auth.id)?;
    Ok(Json(ApiResponse::success(user.profile())))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Json<ApiResponse<bool>> {
    Json(ApiResponse::success(state.sessions.revoke(&auth.token)))
}
