use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::api::{error::ApiError, state::AppState};

/// Identity attached to authenticated requests.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub token: String,
}

impl AuthUser {
    /// Storage key for this user's expenses and budgets.
    pub fn owner(&self) -> String {
        self.id.to_string()
    }
}

/// Extract the Bearer token from the Authorization header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let auth_header = headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::unauthorized("Missing authorization header"))?;

    // Expected format: "Bearer <token>"
    let parts: Vec<&str> = auth_header.split_whitespace().collect();
    if parts.len() != 2 || !parts[0].eq_ignore_ascii_case("Bearer") {
        return Err(ApiError::unauthorized(
            "Invalid authorization header format. Expected: Bearer <token>",
        ));
    }
    Ok(parts[1])
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers())?.to_string();
    let id = state
        .sessions
        .resolve(&token)
        .ok_or_else(|| ApiError::unauthorized("Invalid authentication token"))?;
    req.extensions_mut().insert(AuthUser { id, token });
    Ok(next.run(req).await)
}
