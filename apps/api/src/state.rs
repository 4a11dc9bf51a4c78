use std::sync::Arc;

use crate::config::Config;
use crate::storage::Storage;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Persistence seam. Production wires up `PgStorage`.
    pub storage: Arc<dyn Storage>,
    pub config: Config,
}
