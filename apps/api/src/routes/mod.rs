pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::auth::handlers as auth_handlers;
use crate::events::handlers as event_handlers;
use crate::state::AppState;
use crate::users::handlers as user_handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/auth/login", post(auth_handlers::handle_login))
        .route("/api/auth/logout", post(auth_handlers::handle_logout))
        .route("/api/auth/user", get(auth_handlers::handle_current_user))
        // Events
        .route(
            "/api/events",
            get(event_handlers::handle_list_events).post(event_handlers::handle_create_event),
        )
        .route(
            "/api/events/accessible",
            get(event_handlers::handle_list_accessible_events),
        )
        // Tier upgrade
        .route("/api/user/tier", patch(user_handlers::handle_update_tier))
        .with_state(state)
}
