pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::matching::handlers;
use crate::preferences::handlers as preference_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Matching API
        .route(
            "/api/v1/matches/calculate",
            post(handlers::handle_calculate_match),
        )
        .route("/api/v1/matches/batch", post(handlers::handle_batch_match))
        .route("/api/v1/matches/:id", get(handlers::handle_get_match))
        .route(
            "/api/v1/matches/:id/status",
            patch(handlers::handle_update_status),
        )
        .route(
            "/api/v1/job-postings/:id/matches",
            get(handlers::handle_top_matches_for_job_posting),
        )
        .route(
            "/api/v1/candidates/:id/matches",
            get(handlers::handle_top_matches_for_candidate),
        )
        // Employer preferences
        .route(
            "/api/v1/employers/:id/preferences",
            get(preference_handlers::handle_get_preferences)
                .put(preference_handlers::handle_put_preferences),
        )
        .with_state(state)
}
