use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Session {
    pub token: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// A session authenticates strictly before its expiry instant.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session_expiring_at(expires_at: DateTime<Utc>) -> Session {
        Session {
            token: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            created_at: expires_at - Duration::hours(72),
            expires_at,
        }
    }

    #[test]
    fn test_live_session_not_expired() {
        let now = Utc::now();
        let session = session_expiring_at(now + Duration::hours(1));
        assert!(!session.is_expired(now));
    }

    #[test]
    fn test_past_expiry_is_expired() {
        let now = Utc::now();
        let session = session_expiring_at(now - Duration::seconds(1));
        assert!(session.is_expired(now));
    }

    #[test]
    fn test_expiry_instant_counts_as_expired() {
        let now = Utc::now();
        let session = session_expiring_at(now);
        assert!(session.is_expired(now));
    }
}
