use axum::{extract::State, Json};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::auth::handlers::UserResponse;
use crate::errors::AppError;
use crate::state::AppState;
use crate::tiers::Tier;

#[derive(Debug, Deserialize)]
pub struct TierChangeRequest {
    pub tier: Tier,
}

/// PATCH /api/user/tier
/// Moves the caller to a higher tier. Unknown tier strings never reach
/// this handler (closed enum, 400 at deserialization); equal or lower
/// targets are rejected so the stored tier only ever goes up.
pub async fn handle_update_tier(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<TierChangeRequest>,
) -> Result<Json<UserResponse>, AppError> {
    validate_upgrade(auth.user.tier, req.tier)?;

    let updated = state
        .storage
        .update_user_tier(auth.user.id, req.tier)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", auth.user.id)))?;

    Ok(Json(updated.into()))
}

fn validate_upgrade(current: Tier, target: Tier) -> Result<(), AppError> {
    if target.rank() <= current.rank() {
        return Err(AppError::Validation(format!(
            "Cannot change tier from {current} to {target}: target must be higher"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upgrade_to_higher_tier_allowed() {
        assert!(validate_upgrade(Tier::Free, Tier::Silver).is_ok());
        assert!(validate_upgrade(Tier::Free, Tier::Platinum).is_ok());
        assert!(validate_upgrade(Tier::Gold, Tier::Platinum).is_ok());
    }

    #[test]
    fn test_same_tier_rejected() {
        for tier in crate::tiers::ALL_TIERS {
            assert!(validate_upgrade(tier, tier).is_err());
        }
    }

    #[test]
    fn test_downgrade_rejected() {
        assert!(validate_upgrade(Tier::Platinum, Tier::Gold).is_err());
        assert!(validate_upgrade(Tier::Silver, Tier::Free).is_err());
    }

    #[test]
    fn test_unknown_tier_fails_deserialization() {
        let err = serde_json::from_str::<TierChangeRequest>(r#"{"tier": "diamond"}"#);
        assert!(err.is_err());
        let ok = serde_json::from_str::<TierChangeRequest>(r#"{"tier": "gold"}"#).unwrap();
        assert_eq!(ok.tier, Tier::Gold);
    }
}
