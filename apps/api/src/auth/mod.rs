pub mod handlers;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::User;
use crate::state::AppState;

/// The authenticated caller, resolved from an `Authorization: Bearer`
/// session token. Any handler taking this extractor is auth-gated; a
/// missing, malformed, or expired token rejects with 401 before the
/// handler body runs.
pub struct AuthUser {
    pub user: User,
    pub token: Uuid,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AppError::Unauthorized)?;

        let session = state
            .storage
            .get_session(token)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if session.is_expired(chrono::Utc::now()) {
            return Err(AppError::Unauthorized);
        }

        // Session rows outliving their user (e.g. account deletion) are
        // treated as unauthenticated, not as a missing resource.
        let user = state
            .storage
            .get_user(session.user_id)
            .await?
            .ok_or(AppError::Unauthorized)?;

        Ok(AuthUser { user, token })
    }
}

fn bearer_token(parts: &Parts) -> Option<Uuid> {
    let header = parts.headers.get(axum::http::header::AUTHORIZATION)?;
    let value = header.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?;
    Uuid::parse_str(token.trim()).ok()
}
