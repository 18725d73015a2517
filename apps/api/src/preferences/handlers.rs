use axum::{extract::State, Json};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::{AppJson, AppPath};
use crate::models::preference::{PreferenceInput, PreferenceRow};
use crate::state::AppState;

/// GET /api/v1/employers/:id/preferences
pub async fn handle_get_preferences(
    State(state): State<AppState>,
    AppPath(employer_id): AppPath<Uuid>,
) -> Result<Json<PreferenceRow>, AppError> {
    ensure_employer(&state, employer_id).await?;

    let preferences = state
        .repo
        .find_preferences(employer_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Employer {employer_id} has no matching preferences"))
        })?;

    Ok(Json(preferences))
}

/// PUT /api/v1/employers/:id/preferences
///
/// Creates or replaces the employer's single preference record.
pub async fn handle_put_preferences(
    State(state): State<AppState>,
    AppPath(employer_id): AppPath<Uuid>,
    AppJson(input): AppJson<PreferenceInput>,
) -> Result<Json<PreferenceRow>, AppError> {
    if input.min_experience < 0 {
        return Err(AppError::Validation(
            "min_experience cannot be negative".to_string(),
        ));
    }

    ensure_employer(&state, employer_id).await?;

    let preferences = state.repo.upsert_preferences(employer_id, &input).await?;
    Ok(Json(preferences))
}

async fn ensure_employer(state: &AppState, employer_id: Uuid) -> Result<(), AppError> {
    state
        .repo
        .find_employer(employer_id)
        .await?
        .map(|_| ())
        .ok_or_else(|| AppError::NotFound(format!("Employer {employer_id} not found")))
}
