use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::tiers::Tier;

#[derive(Debug, Clone, Deserialize)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub event_date: DateTime<Utc>,
    pub image_url: String,
    pub tier: Tier,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub event_date: DateTime<Utc>,
    pub image_url: String,
    pub tier: Tier,
    pub created_at: DateTime<Utc>,
}

/// An event annotated with whether the requesting user's tier grants
/// access. The full listing always carries this flag so the client can
/// render the lock affordance without re-deriving the policy.
#[derive(Debug, Clone, Serialize)]
pub struct EventWithAccess {
    #[serde(flatten)]
    pub event: Event,
    pub accessible: bool,
}
