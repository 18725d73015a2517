use std::sync::Arc;

use crate::matching::requester::MatchRequester;
use crate::repository::Repository;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Persistence backend. `PgRepository` in production.
    pub repo: Arc<dyn Repository>,
    /// Scores pairs through the configured oracle (the Anthropic client in production).
    pub requester: MatchRequester,
}
