pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::event::{Event, NewEvent};
use crate::models::session::Session;
use crate::models::user::{NewUser, User};
use crate::tiers::Tier;

pub use postgres::PgStorage;

/// Persistence operations behind the HTTP handlers. One Postgres
/// implementation in production; the seam exists so handlers never build
/// queries themselves.
#[async_trait]
pub trait Storage: Send + Sync {
    // User operations
    async fn get_user(&self, id: Uuid) -> Result<Option<User>, sqlx::Error>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error>;
    async fn upsert_user(&self, user: NewUser) -> Result<User, sqlx::Error>;
    async fn update_user_tier(&self, id: Uuid, tier: Tier) -> Result<Option<User>, sqlx::Error>;

    // Event operations
    async fn list_events(&self) -> Result<Vec<Event>, sqlx::Error>;
    async fn list_events_for_tier(&self, user_tier: Tier) -> Result<Vec<Event>, sqlx::Error>;
    async fn create_event(&self, event: NewEvent) -> Result<Event, sqlx::Error>;
    async fn events_exist(&self) -> Result<bool, sqlx::Error>;

    // Session operations
    async fn create_session(&self, user_id: Uuid, ttl_hours: i64) -> Result<Session, sqlx::Error>;
    async fn get_session(&self, token: Uuid) -> Result<Option<Session>, sqlx::Error>;
    async fn delete_session(&self, token: Uuid) -> Result<(), sqlx::Error>;
}
