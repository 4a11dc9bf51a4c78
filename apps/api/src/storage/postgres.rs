use async_trait::async_trait;
use chrono::{Duration, Utc};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::event::{Event, NewEvent};
use crate::models::session::Session;
use crate::models::user::{NewUser, User};
use crate::storage::Storage;
use crate::tiers::Tier;

/// Postgres-backed storage over a sqlx connection pool.
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Storage for PgStorage {
    async fn get_user(&self, id: Uuid) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
    }

    /// Inserts on first login, refreshes profile fields on subsequent
    /// logins. The stored tier is preserved across re-logins.
    async fn upsert_user(&self, user: NewUser) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, username, first_name, last_name, tier)
            VALUES ($1, $2, $3, $4, $5, 'free')
            ON CONFLICT (email) DO UPDATE
            SET username = EXCLUDED.username,
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                updated_at = now()
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.email)
        .bind(&user.username)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_user_tier(&self, id: Uuid, tier: Tier) -> Result<Option<User>, sqlx::Error> {
        let updated = sqlx::query_as::<_, User>(
            "UPDATE users SET tier = $1, updated_at = now() WHERE id = $2 RETURNING *",
        )
        .bind(tier)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        if let Some(user) = &updated {
            info!("User {} tier set to {}", user.id, user.tier);
        }
        Ok(updated)
    }

    async fn list_events(&self) -> Result<Vec<Event>, sqlx::Error> {
        sqlx::query_as::<_, Event>("SELECT * FROM events ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await
    }

    /// Server-side tier filter. The CASE mapping must mirror `Tier::rank`;
    /// the user's rank is bound as the comparison threshold.
    async fn list_events_for_tier(&self, user_tier: Tier) -> Result<Vec<Event>, sqlx::Error> {
        sqlx::query_as::<_, Event>(
            r#"
            SELECT * FROM events
            WHERE CASE tier
                WHEN 'free' THEN 0
                WHEN 'silver' THEN 1
                WHEN 'gold' THEN 2
                WHEN 'platinum' THEN 3
            END <= $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_tier.rank())
        .fetch_all(&self.pool)
        .await
    }

    async fn create_event(&self, event: NewEvent) -> Result<Event, sqlx::Error> {
        sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (id, title, description, event_date, image_url, tier)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.event_date)
        .bind(&event.image_url)
        .bind(event.tier)
        .fetch_one(&self.pool)
        .await
    }

    async fn events_exist(&self) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM events)")
            .fetch_one(&self.pool)
            .await
    }

    async fn create_session(&self, user_id: Uuid, ttl_hours: i64) -> Result<Session, sqlx::Error> {
        let expires_at = Utc::now() + Duration::hours(ttl_hours);
        sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (token, user_id, expires_at)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await
    }

    /// Expiry is enforced by the caller via `Session::is_expired`; stale
    /// rows linger until logout, which is fine at this scale.
    async fn get_session(&self, token: Uuid) -> Result<Option<Session>, sqlx::Error> {
        sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
    }

    async fn delete_session(&self, token: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
