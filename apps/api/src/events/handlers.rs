use axum::{extract::State, Json};

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::event::{Event, EventWithAccess, NewEvent};
use crate::state::AppState;
use crate::tiers;

/// GET /api/events
/// Returns the full catalog, insertion-ordered, with each event annotated
/// for the caller's tier. Locked events are visible on purpose: the client
/// renders the upgrade affordance from the `accessible` flag.
pub async fn handle_list_events(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<EventWithAccess>>, AppError> {
    let events = state.storage.list_events().await?;
    let annotated = annotate_for_tier(events, auth.user.tier);
    Ok(Json(annotated))
}

/// GET /api/events/accessible
/// Returns only the events the caller's tier grants, filtered in SQL.
pub async fn handle_list_accessible_events(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<Event>>, AppError> {
    let events = state.storage.list_events_for_tier(auth.user.tier).await?;
    Ok(Json(events))
}

/// POST /api/events
/// Creates an event. The tier field deserializes against the closed enum,
/// so unknown tiers are rejected before this handler runs.
pub async fn handle_create_event(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(req): Json<NewEvent>,
) -> Result<Json<Event>, AppError> {
    if req.title.trim().is_empty() {
        return Err(AppError::Validation("Event title is required".into()));
    }
    let event = state.storage.create_event(req).await?;
    Ok(Json(event))
}

fn annotate_for_tier(events: Vec<Event>, user_tier: tiers::Tier) -> Vec<EventWithAccess> {
    events
        .into_iter()
        .map(|event| {
            let accessible = tiers::has_access(user_tier, event.tier);
            EventWithAccess { event, accessible }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiers::Tier;
    use chrono::Utc;
    use uuid::Uuid;

    fn event_with_tier(tier: Tier) -> Event {
        Event {
            id: Uuid::new_v4(),
            title: format!("{tier} event"),
            description: "test".into(),
            event_date: Utc::now(),
            image_url: "https://example.com/img.jpg".into(),
            tier,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_silver_user_annotation() {
        let events = vec![
            event_with_tier(Tier::Free),
            event_with_tier(Tier::Silver),
            event_with_tier(Tier::Gold),
            event_with_tier(Tier::Platinum),
        ];
        let flags: Vec<bool> = annotate_for_tier(events, Tier::Silver)
            .iter()
            .map(|e| e.accessible)
            .collect();
        assert_eq!(flags, vec![true, true, false, false]);
    }

    #[test]
    fn test_platinum_user_sees_everything() {
        let events = vec![
            event_with_tier(Tier::Free),
            event_with_tier(Tier::Platinum),
        ];
        assert!(annotate_for_tier(events, Tier::Platinum)
            .iter()
            .all(|e| e.accessible));
    }

    #[test]
    fn test_annotation_preserves_order() {
        let events = vec![
            event_with_tier(Tier::Gold),
            event_with_tier(Tier::Free),
            event_with_tier(Tier::Silver),
        ];
        let titles: Vec<String> = annotate_for_tier(events, Tier::Free)
            .iter()
            .map(|e| e.event.title.clone())
            .collect();
        assert_eq!(titles, vec!["gold event", "free event", "silver event"]);
    }

    #[test]
    fn test_accessible_flag_serializes_alongside_event() {
        let annotated = annotate_for_tier(vec![event_with_tier(Tier::Gold)], Tier::Free);
        let json = serde_json::to_value(&annotated[0]).unwrap();
        assert_eq!(json["accessible"], serde_json::json!(false));
        assert_eq!(json["tier"], serde_json::json!("gold"));
        assert!(json.get("title").is_some());
    }
}
