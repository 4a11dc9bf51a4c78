use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::info;

use crate::models::event::NewEvent;
use crate::storage::Storage;
use crate::tiers::Tier;

/// Seeds the fixed event catalog on startup. Guarded by an existence
/// check, so running it on every boot never duplicates rows.
pub async fn seed_events(storage: &dyn Storage) -> Result<()> {
    if storage.events_exist().await? {
        return Ok(());
    }

    let catalog = seed_catalog()?;
    let count = catalog.len();
    for event in catalog {
        storage.create_event(event).await?;
    }
    info!("Seeded {count} events");
    Ok(())
}

fn seed_event(
    title: &str,
    description: &str,
    date: &str,
    image_url: &str,
    tier: Tier,
) -> Result<NewEvent> {
    Ok(NewEvent {
        title: title.to_string(),
        description: description.to_string(),
        // Dates in the catalog are fixed RFC 3339 literals.
        event_date: date
            .parse::<DateTime<Utc>>()
            .with_context(|| format!("Invalid catalog date '{date}' for '{title}'"))?,
        image_url: image_url.to_string(),
        tier,
    })
}

fn seed_catalog() -> Result<Vec<NewEvent>> {
    Ok(vec![
        // Free tier
        seed_event(
            "Community Music Festival",
            "Join us for an amazing evening of local music and community celebration. Free entry for all music lovers!",
            "2024-12-15T19:00:00Z",
            "https://images.unsplash.com/photo-1493225457124-a3eb161ffa5f?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=400",
            Tier::Free,
        )?,
        seed_event(
            "Local Art Gallery Opening",
            "Discover emerging local artists at our monthly gallery opening. Refreshments and networking included.",
            "2024-12-20T18:00:00Z",
            "https://images.unsplash.com/photo-1578321272176-b7bbc0679853?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=400",
            Tier::Free,
        )?,
        seed_event(
            "Tech Meetup & Networking",
            "Connect with local developers and tech enthusiasts. Pizza and drinks provided. Perfect for beginners!",
            "2025-01-08T18:30:00Z",
            "https://images.unsplash.com/photo-1517180102446-f3ece451e9d8?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=400",
            Tier::Free,
        )?,
        seed_event(
            "Yoga in the Park",
            "Start your weekend with relaxing yoga session in Central Park. Bring your own mat and enjoy nature!",
            "2025-01-11T08:00:00Z",
            "https://images.unsplash.com/photo-1544367567-0f2fcb009e0b?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=400",
            Tier::Free,
        )?,
        // Silver tier
        seed_event(
            "Exclusive Business Workshop",
            "Advanced entrepreneurship workshop with industry leaders. Limited to Silver members and above.",
            "2025-01-05T14:00:00Z",
            "https://images.unsplash.com/photo-1556761175-b413da4baf72?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=400",
            Tier::Silver,
        )?,
        seed_event(
            "Premium Wine Tasting",
            "Curated wine tasting experience with sommelier-guided sessions. Exclusive to Silver tier and above.",
            "2025-01-12T17:00:00Z",
            "https://images.unsplash.com/photo-1510812431401-41d2bd2722f3?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=400",
            Tier::Silver,
        )?,
        seed_event(
            "Culinary Masterclass",
            "Learn from Michelin-starred chefs in this hands-on cooking experience. Limited to 20 participants.",
            "2025-01-18T15:00:00Z",
            "https://images.unsplash.com/photo-1556909114-f6e7ad7d3136?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=400",
            Tier::Silver,
        )?,
        // Gold tier
        seed_event(
            "VIP Networking Gala",
            "High-profile networking event with industry executives and thought leaders. Black-tie dress code.",
            "2025-01-25T19:30:00Z",
            "https://images.unsplash.com/photo-1464366400600-7168b8af9bc3?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=400",
            Tier::Gold,
        )?,
        seed_event(
            "Private Art Auction",
            "Exclusive art auction featuring rare pieces from renowned artists. Champagne reception included.",
            "2025-02-02T18:00:00Z",
            "https://images.unsplash.com/photo-1541961017774-22349e4a1262?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=400",
            Tier::Gold,
        )?,
        seed_event(
            "Investment Summit",
            "Meet with top-tier investors and venture capitalists. Pitch opportunities for qualified startups.",
            "2025-02-15T10:00:00Z",
            "https://images.unsplash.com/photo-1454165804606-c3d57bc86b40?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=400",
            Tier::Gold,
        )?,
        // Platinum tier
        seed_event(
            "Exclusive Members Summit",
            "Ultra-exclusive summit with Fortune 500 CEOs and industry pioneers. Platinum members only.",
            "2025-02-10T09:00:00Z",
            "https://images.unsplash.com/photo-1515187029135-18ee286d815b?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=400",
            Tier::Platinum,
        )?,
        seed_event(
            "Private Jet Experience",
            "Luxury travel experience to exclusive destination with world-class amenities and networking.",
            "2025-03-05T06:00:00Z",
            "https://images.unsplash.com/photo-1540962351504-03099e0a754b?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=400",
            Tier::Platinum,
        )?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use async_trait::async_trait;
    use uuid::Uuid;

    use crate::models::event::Event;
    use crate::models::session::Session;
    use crate::models::user::{NewUser, User};

    /// In-memory storage covering the operations seeding touches.
    #[derive(Default)]
    struct MemStorage {
        events: Mutex<Vec<Event>>,
    }

    #[async_trait]
    impl Storage for MemStorage {
        async fn get_user(&self, _id: Uuid) -> Result<Option<User>, sqlx::Error> {
            unimplemented!("not used by seeding")
        }

        async fn get_user_by_email(&self, _email: &str) -> Result<Option<User>, sqlx::Error> {
            unimplemented!("not used by seeding")
        }

        async fn upsert_user(&self, _user: NewUser) -> Result<User, sqlx::Error> {
            unimplemented!("not used by seeding")
        }

        async fn update_user_tier(
            &self,
            _id: Uuid,
            _tier: Tier,
        ) -> Result<Option<User>, sqlx::Error> {
            unimplemented!("not used by seeding")
        }

        async fn list_events(&self) -> Result<Vec<Event>, sqlx::Error> {
            Ok(self.events.lock().unwrap().clone())
        }

        async fn list_events_for_tier(&self, _user_tier: Tier) -> Result<Vec<Event>, sqlx::Error> {
            unimplemented!("not used by seeding")
        }

        async fn create_event(&self, event: NewEvent) -> Result<Event, sqlx::Error> {
            let created = Event {
                id: Uuid::new_v4(),
                title: event.title,
                description: event.description,
                event_date: event.event_date,
                image_url: event.image_url,
                tier: event.tier,
                created_at: Utc::now(),
            };
            self.events.lock().unwrap().push(created.clone());
            Ok(created)
        }

        async fn events_exist(&self) -> Result<bool, sqlx::Error> {
            Ok(!self.events.lock().unwrap().is_empty())
        }

        async fn create_session(
            &self,
            _user_id: Uuid,
            _ttl_hours: i64,
        ) -> Result<Session, sqlx::Error> {
            unimplemented!("not used by seeding")
        }

        async fn get_session(&self, _token: Uuid) -> Result<Option<Session>, sqlx::Error> {
            unimplemented!("not used by seeding")
        }

        async fn delete_session(&self, _token: Uuid) -> Result<(), sqlx::Error> {
            unimplemented!("not used by seeding")
        }
    }

    #[tokio::test]
    async fn test_seeding_twice_never_duplicates() {
        let storage = MemStorage::default();

        seed_events(&storage).await.unwrap();
        assert_eq!(storage.events.lock().unwrap().len(), 12);

        // Second invocation hits the existence guard and inserts nothing.
        seed_events(&storage).await.unwrap();
        assert_eq!(storage.events.lock().unwrap().len(), 12);
    }

    #[test]
    fn test_catalog_size_and_tier_distribution() {
        let catalog = seed_catalog().unwrap();
        assert_eq!(catalog.len(), 12);

        let count = |tier: Tier| catalog.iter().filter(|e| e.tier == tier).count();
        assert_eq!(count(Tier::Free), 4);
        assert_eq!(count(Tier::Silver), 3);
        assert_eq!(count(Tier::Gold), 3);
        assert_eq!(count(Tier::Platinum), 2);
    }

    #[test]
    fn test_catalog_dates_are_fixed_literals() {
        // The catalog literals all land in 2024-2025; a malformed one is a
        // build error in seed_catalog, not a silent substitution.
        let cutoff: DateTime<Utc> = "2025-12-31T00:00:00Z".parse().unwrap();
        for event in seed_catalog().unwrap() {
            assert!(event.event_date < cutoff, "bad date in '{}'", event.title);
            assert!(!event.title.is_empty());
            assert!(!event.image_url.is_empty());
        }
    }

    #[test]
    fn test_malformed_date_is_an_error() {
        let err = seed_event("t", "d", "not-a-date", "https://x/img.jpg", Tier::Free);
        assert!(err.is_err());
    }
}
