use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::user::{NewUser, User};
use crate::state::AppState;
use crate::tiers::{self, Tier};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: Uuid,
    pub user: User,
}

/// A user record as returned to the client: the row plus the tiers the
/// user could still upgrade to, so the upgrade modal never re-derives
/// rank ordering on its own.
#[derive(Serialize)]
pub struct UserResponse {
    #[serde(flatten)]
    pub user: User,
    pub upgrade_options: Vec<Tier>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let upgrade_options = tiers::upgrade_options(user.tier);
        UserResponse {
            user,
            upgrade_options,
        }
    }
}

/// POST /api/auth/login
/// Dev login: upserts the user by email and issues a bearer session.
/// First login lands on the free tier; re-login keeps the stored tier.
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if req.email.trim().is_empty() || !req.email.contains('@') {
        return Err(AppError::Validation("A valid email is required".into()));
    }
    if req.username.trim().is_empty() {
        return Err(AppError::Validation("A username is required".into()));
    }

    let user = state
        .storage
        .upsert_user(NewUser {
            email: req.email.trim().to_lowercase(),
            username: req.username.trim().to_string(),
            first_name: req.first_name,
            last_name: req.last_name,
        })
        .await?;

    let session = state
        .storage
        .create_session(user.id, state.config.session_ttl_hours)
        .await?;

    info!("User {} logged in (tier: {})", user.id, user.tier);

    Ok(Json(LoginResponse {
        token: session.token,
        user,
    }))
}

/// POST /api/auth/logout
/// Revokes the presented session token.
pub async fn handle_logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<StatusCode, AppError> {
    state.storage.delete_session(auth.token).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/auth/user
pub async fn handle_current_user(auth: AuthUser) -> Json<UserResponse> {
    Json(auth.user.into())
}
